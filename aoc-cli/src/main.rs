//! `aoc`: run Advent of Code solutions from the archive

mod aggregator;
mod cache;
mod cli;
mod config;
mod error;
mod executor;
mod logging;
mod output;

// Linked for its inventory-submitted solver plugins
use aoc_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use output::OutputFormatter;
use tracing::{debug, warn};

fn main() {
    logging::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.tags)?;
    debug!(solvers = registry.storage().len(), "registry built");

    let mut executor = Executor::new(registry, &config)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing = executor.missing_inputs(&work_items);
    if !missing.is_empty() && !executor.has_session() {
        if !config.quiet {
            println!("Missing {} input file(s):", missing.len());
            for (year, day) in &missing {
                println!("  - {year}/day{day:02}");
            }
            println!();
        }
        let session = config::prompt_session(
            "Session token required to fetch missing inputs from adventofcode.com",
        )?;
        let expected = config.user_id_provided.then_some(config.user_id);
        let user_id = config::verify_session(&session, expected)?;
        executor.update_session(session, user_id)?;
    }

    run_executor(executor, config.quiet)
}

fn run_executor(executor: Executor, quiet: bool) -> Result<(), CliError> {
    let work_items = executor.collect_work_items();
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected = work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |part| ResultKey {
            year: w.year,
            day: w.day,
            part,
        })
    });
    let mut aggregator = ResultAggregator::new(expected);

    let formatter = OutputFormatter::new(quiet);
    let (tx, rx) = std::sync::mpsc::channel();
    let handle = std::thread::spawn(move || executor.execute(tx));

    let mut results = Vec::new();
    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    handle
        .join()
        .map_err(|_| CliError::Config("executor thread panicked".to_string()))??;

    formatter.print_summary(&results);
    Ok(())
}

/// Registry of every linked plugin carrying all of `tags`
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new().register_solver_plugins(|plugin| {
        tags.iter()
            .all(|tag| plugin.tags.contains(&tag.as_str()))
    })?;
    Ok(builder.build())
}
