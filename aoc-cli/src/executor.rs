//! Runs the selected solvers on a rayon pool

use crate::cache::InputCache;
use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, CliError, ExecutorError};
use aoc_http_client::{AnswerHint, AocClient, SubmissionResult};
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::{DateTime, Local, TimeDelta};
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// What happened when an answer was posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Correct,
    Incorrect { hint: Option<AnswerHint> },
    AlreadyCompleted,
    Throttled { wait_time: Option<Duration> },
    Error(String),
}

impl From<SubmissionResult> for SubmissionOutcome {
    fn from(result: SubmissionResult) -> Self {
        match result {
            SubmissionResult::Correct => Self::Correct,
            SubmissionResult::Incorrect { hint } => Self::Incorrect { hint },
            SubmissionResult::AlreadyCompleted => Self::AlreadyCompleted,
            SubmissionResult::Throttled { wait_time } => Self::Throttled { wait_time },
        }
    }
}

/// Why a part produced no answer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartFailure {
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Parse(String),
    #[error("{0}")]
    Solve(String),
}

/// Outcome of one year/day/part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, PartFailure>,
    pub solve_duration: TimeDelta,
    /// Only set on the first part reported for a day
    pub parse_duration: Option<TimeDelta>,
    pub submitted_at: Option<DateTime<Local>>,
    pub submission: Option<SubmissionOutcome>,
    pub submission_wait: Option<Duration>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, failure: PartFailure) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(failure),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
            submitted_at: None,
            submission: None,
            submission_wait: None,
        }
    }
}

/// One registered year/day and the parts to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Everything a worker needs, shared read-only across the pool
struct RunContext {
    registry: SolverRegistry,
    input_file: Option<PathBuf>,
    cache_dir: PathBuf,
    cache: InputCache,
    client: Option<AocClient>,
    session: Zeroizing<String>,
    submit: bool,
    auto_retry: bool,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

pub struct Executor {
    ctx: RunContext,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, CliError> {
        let client = if config.session.is_empty() {
            None
        } else {
            Some(AocClient::new()?)
        };

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ArcExecutorError::from(ExecutorError::ThreadPool(e.to_string())))?;

        Ok(Self {
            ctx: RunContext {
                registry,
                input_file: config.input_file.clone(),
                cache_dir: config.cache_dir.clone(),
                cache: InputCache::new(config.cache_dir.clone(), config.user_id),
                client,
                session: config.session.clone(),
                submit: config.submit,
                auto_retry: config.auto_retry,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Swap in a session obtained after start-up
    pub fn update_session(
        &mut self,
        session: Zeroizing<String>,
        user_id: u64,
    ) -> Result<(), CliError> {
        self.ctx.client = Some(AocClient::new()?);
        self.ctx.session = session;
        self.ctx.cache = InputCache::new(self.ctx.cache_dir.clone(), user_id);
        Ok(())
    }

    /// Registered days matching the filters, in year/day order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let ctx = &self.ctx;
        ctx.registry
            .storage()
            .iter_info()
            .filter(|info| ctx.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| ctx.day_filter.is_none_or(|d| info.day == d))
            .filter_map(|info| {
                let parts = select_parts(ctx.part_filter, info.parts)?;
                Some(WorkItem {
                    year: info.year,
                    day: info.day,
                    parts,
                })
            })
            .collect()
    }

    /// Work items whose input must still be downloaded
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        if self.ctx.input_file.is_some() {
            return Vec::new();
        }
        work_items
            .iter()
            .filter(|w| !self.ctx.cache.contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Whether a session is available to fetch inputs
    pub fn has_session(&self) -> bool {
        !self.ctx.session.is_empty()
    }

    /// Run every work item, streaming results into `tx`
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let ctx = &self.ctx;

        match ctx.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .filter_map(|work| run_work_item(work, &tx, ctx).err())
                .reduce(ArcExecutorError::combine)
                .map_or(Ok(()), Err),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .filter_map(|items| {
                            items
                                .iter()
                                .filter_map(|work| run_work_item(work, &tx, ctx).err())
                                .reduce(ArcExecutorError::combine)
                        })
                        .reduce_with(ArcExecutorError::combine)
                        .map_or(Ok(()), Err)
                })
            }
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .filter_map(|work| run_work_item(work, &tx, ctx).err())
                    .reduce_with(ArcExecutorError::combine)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

/// Parts to run for a solver with `max_parts` parts, `None` when the filter excludes all
fn select_parts(part_filter: Option<u8>, max_parts: u8) -> Option<RangeInclusive<u8>> {
    match part_filter {
        Some(p) if (1..=max_parts).contains(&p) => Some(p..=p),
        Some(_) => None,
        None if max_parts > 0 => Some(1..=max_parts),
        None => None,
    }
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let raw = match load_input(ctx, year, day) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(year, day, error = %e, "skipping day");
            for part in work.parts.clone() {
                let failure = PartFailure::Input(e.to_string());
                send(tx, SolverResult::failed(year, day, part, failure))?;
            }
            return Ok(());
        }
    };
    let input = raw.trim_end();

    if ctx.parallelize_by == ParallelizeBy::Part {
        run_parts_parallel(work, input, tx, ctx)
    } else {
        run_parts_in_order(work, input, tx, ctx)
    }
}

/// Each part parses its own copy of the input; results are sent in part
/// order so submissions never skip ahead
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let first = *work.parts.start();

    let results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match ctx.registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(&mut *solver, part, part == first),
            Err(e) => SolverResult::failed(year, day, part, PartFailure::Parse(e.to_string())),
        })
        .collect();

    results
        .into_iter()
        .try_for_each(|result| submit_and_send(tx, result, ctx))
}

/// One parse, parts solved in order on a helper thread while earlier
/// answers are submitted
fn run_parts_in_order(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let parts = work.parts.clone();
    let (solve_tx, solve_rx) = std::sync::mpsc::channel();

    std::thread::scope(|s| {
        s.spawn(move || match ctx.registry.create_solver(year, day, input) {
            Ok(mut solver) => {
                debug!(year, day, parse = ?solver.parse_duration(), "parsed");
                for (i, part) in parts.enumerate() {
                    if solve_tx.send(solve_part(&mut *solver, part, i == 0)).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                let message = e.to_string();
                for part in parts {
                    let failure = PartFailure::Parse(message.clone());
                    if solve_tx.send(SolverResult::failed(year, day, part, failure)).is_err() {
                        break;
                    }
                }
            }
        });

        solve_rx
            .into_iter()
            .try_for_each(|result| submit_and_send(tx, result, ctx))
    })
}

fn solve_part(solver: &mut dyn DynSolver, part: u8, report_parse: bool) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    let parse_duration = report_parse.then(|| solver.parse_duration());

    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration,
            submitted_at: None,
            submission: None,
            submission_wait: None,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(year, day, part, PartFailure::Solve(e.to_string()))
        },
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
}

fn submit_and_send(
    tx: &Sender<SolverResult>,
    mut result: SolverResult,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    if ctx.submit
        && let Ok(answer) = &result.answer
    {
        let (outcome, waited) = submit_with_retry(ctx, result.year, result.day, result.part, answer);
        result.submitted_at = Some(Local::now());
        result.submission = Some(outcome);
        result.submission_wait = Some(waited);
    }
    send(tx, result)
}

/// Local file, then cache, then the site (caching what was downloaded)
fn load_input(ctx: &RunContext, year: u16, day: u8) -> Result<String, ExecutorError> {
    let input_error = |source: Box<dyn std::error::Error + Send + Sync>| ExecutorError::Input {
        year,
        day,
        source,
    };

    if let Some(path) = &ctx.input_file {
        debug!(path = %path.display(), "reading local input");
        return std::fs::read_to_string(path).map_err(|e| input_error(Box::new(e)));
    }

    if let Some(input) = ctx.cache.get(year, day).map_err(|e| input_error(Box::new(e)))? {
        return Ok(input);
    }

    let client = ctx
        .client
        .as_ref()
        .ok_or_else(|| input_error("not cached and no session available".into()))?;
    let input = client
        .get_input(year, day, &ctx.session)
        .map_err(|e| input_error(Box::new(e)))?;

    if let Err(e) = ctx.cache.put(year, day, &input) {
        warn!(year, day, error = %e, "failed to cache input");
    }
    Ok(input)
}

/// Post an answer, sleeping through throttles when auto-retry is on
fn submit_with_retry(
    ctx: &RunContext,
    year: u16,
    day: u8,
    part: u8,
    answer: &str,
) -> (SubmissionOutcome, Duration) {
    let Some(client) = ctx.client.as_ref() else {
        return (SubmissionOutcome::Error("no session".into()), Duration::ZERO);
    };

    let mut waited = Duration::ZERO;
    loop {
        match client.submit_answer(year, day, part, answer, &ctx.session) {
            Ok(SubmissionResult::Throttled {
                wait_time: Some(wait),
            }) if ctx.auto_retry => {
                debug!(year, day, part, ?wait, "throttled, retrying");
                std::thread::sleep(wait);
                waited += wait;
            }
            Ok(result) => return (result.into(), waited),
            Err(e) => return (SubmissionOutcome::Error(e.to_string()), waited),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    struct Words;

    impl AocParser for Words {
        type SharedData<'a> = Vec<&'a str>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            if input.contains('!') {
                return Err(ParseError::InvalidFormat("bang".into()));
            }
            Ok(input.split(' ').collect())
        }
    }

    impl Solver for Words {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.len().to_string()),
                2 => shared
                    .last()
                    .map(|w| w.to_string())
                    .ok_or_else(|| SolveError::failed("no words")),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    fn config(cache: &TempDir, input: Option<PathBuf>, by: ParallelizeBy) -> Config {
        Config {
            year_filter: None,
            day_filter: None,
            part_filter: None,
            tags: Vec::new(),
            input_file: input,
            cache_dir: cache.path().to_path_buf(),
            thread_count: 2,
            parallelize_by: by,
            submit: false,
            auto_retry: false,
            user_id: 7,
            user_id_provided: true,
            session: Zeroizing::new(String::new()),
            quiet: true,
        }
    }

    fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_solver::<Words>(2015, 1)
            .unwrap()
            .register_solver::<Words>(2015, 2)
            .unwrap()
            .register_solver::<Words>(2016, 1)
            .unwrap()
            .build()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_select_parts() {
        assert_eq!(select_parts(None, 2), Some(1..=2));
        assert_eq!(select_parts(None, 1), Some(1..=1));
        assert_eq!(select_parts(Some(2), 2), Some(2..=2));
        assert_eq!(select_parts(Some(2), 1), None);
    }

    #[test]
    fn test_work_items_filtered() {
        let cache = TempDir::new().unwrap();
        let mut cfg = config(&cache, None, ParallelizeBy::Day);
        cfg.year_filter = Some(2015);
        cfg.part_filter = Some(2);
        let executor = Executor::new(registry(), &cfg).unwrap();

        let items = executor.collect_work_items();
        assert_eq!(
            items,
            vec![
                WorkItem { year: 2015, day: 1, parts: 2..=2 },
                WorkItem { year: 2015, day: 2, parts: 2..=2 },
            ]
        );
        assert_eq!(executor.missing_inputs(&items), vec![(2015, 1), (2015, 2)]);
    }

    #[test]
    fn test_cached_input_is_trimmed() {
        let cache = TempDir::new().unwrap();
        let store = InputCache::new(cache.path().to_path_buf(), 7);
        for (year, day) in [(2015, 1), (2015, 2), (2016, 1)] {
            store.put(year, day, "ab cd ef\n\n").unwrap();
        }

        for by in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let executor = Executor::new(registry(), &config(&cache, None, by)).unwrap();
            let results = run(&executor);
            assert_eq!(results.len(), 6);
            assert!(results.iter().all(|r| r.answer.is_ok()));
            assert_eq!(results[0].answer.as_deref(), Ok("3"));
            assert_eq!(results[1].answer.as_deref(), Ok("ef"));
            assert!(results[0].parse_duration.is_some());
            assert!(results[1].parse_duration.is_none());
        }
    }

    #[test]
    fn test_local_input_file() {
        let cache = TempDir::new().unwrap();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "x y").unwrap();

        let mut cfg = config(&cache, Some(file.path().to_path_buf()), ParallelizeBy::Day);
        cfg.year_filter = Some(2016);
        cfg.day_filter = Some(1);
        let executor = Executor::new(registry(), &cfg).unwrap();

        assert!(executor.missing_inputs(&executor.collect_work_items()).is_empty());
        let results = run(&executor);
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].answer.as_deref(), Ok("y"));
        assert!(!InputCache::new(cache.path().to_path_buf(), 7).contains(2016, 1));
    }

    #[test]
    fn test_failures_are_reported_per_part() {
        let cache = TempDir::new().unwrap();
        let store = InputCache::new(cache.path().to_path_buf(), 7);
        store.put(2015, 1, "bad!").unwrap();

        let mut cfg = config(&cache, None, ParallelizeBy::Sequential);
        cfg.year_filter = Some(2015);
        let executor = Executor::new(registry(), &cfg).unwrap();
        let results = run(&executor);

        assert_eq!(results.len(), 4);
        assert!(matches!(results[0].answer, Err(PartFailure::Parse(_))));
        assert!(matches!(results[1].answer, Err(PartFailure::Parse(_))));
        // 2015/2 has no cached input and no session
        assert!(matches!(results[2].answer, Err(PartFailure::Input(_))));
        assert!(matches!(results[3].answer, Err(PartFailure::Input(_))));
    }
}
