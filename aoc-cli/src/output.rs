//! Printing of results and the closing summary

use crate::executor::{SolverResult, SubmissionOutcome};
use aoc_http_client::AnswerHint;
use chrono::TimeDelta;
use std::time::Instant;

pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{answer}"),
            (Ok(_), false) => println!("{}", format_result(result)),
            (Err(e), _) => eprintln!("{}: Error - {e}", prefix(result)),
        }
    }

    /// Counts and timings over everything printed; silent in quiet mode
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let solved: Vec<_> = results.iter().filter(|r| r.answer.is_ok()).collect();
        let failed = results.len() - solved.len();
        let parse: TimeDelta = solved.iter().filter_map(|r| r.parse_duration).sum();
        let solve: TimeDelta = solved.iter().map(|r| r.solve_duration).sum();
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", solved.len(), failed);
        println!("Total parse time: {}", format_duration(parse));
        println!("Total solve time: {}", format_duration(solve));
        println!(
            "Elapsed wall-clock time: {}",
            format_duration(TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::MAX))
        );
        if !elapsed.is_zero() {
            let compute = (parse + solve).num_microseconds().unwrap_or(0) as f64 / 1e6;
            println!("Speedup factor: {:.2}x", compute / elapsed.as_secs_f64());
        }
    }
}

fn prefix(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

/// `YYYY/DD Part P: answer (parse: .., solve: ..[, submitted ..])`
fn format_result(result: &SolverResult) -> String {
    let answer = result.answer.as_deref().unwrap_or("");
    let parse = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    let submission = result
        .submission
        .as_ref()
        .map(|outcome| {
            let at = result
                .submitted_at
                .map(|t| t.format(" %H:%M:%S").to_string())
                .unwrap_or_default();
            format!(", submitted{at}: {}", format_outcome(outcome))
        })
        .unwrap_or_default();

    format!(
        "{}: {answer} ({parse}solve: {}{submission})",
        prefix(result),
        format_duration(result.solve_duration)
    )
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };
    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1e3)
    } else {
        format!("{:.2}s", micros as f64 / 1e6)
    }
}

fn format_outcome(outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::Correct => "✓ Correct".to_string(),
        SubmissionOutcome::Incorrect { hint: None } => "✗ Incorrect".to_string(),
        SubmissionOutcome::Incorrect {
            hint: Some(AnswerHint::TooHigh),
        } => "✗ Incorrect (too high)".to_string(),
        SubmissionOutcome::Incorrect {
            hint: Some(AnswerHint::TooLow),
        } => "✗ Incorrect (too low)".to_string(),
        SubmissionOutcome::AlreadyCompleted => "⏭ Already completed".to_string(),
        SubmissionOutcome::Throttled {
            wait_time: Some(wait),
        } => format!("⏳ Throttled (wait {})", humanize(*wait)),
        SubmissionOutcome::Throttled { wait_time: None } => "⏳ Throttled".to_string(),
        SubmissionOutcome::Error(msg) => format!("⚠ Error: {msg}"),
    }
}

fn humanize(wait: std::time::Duration) -> String {
    TimeDelta::from_std(wait)
        .map(format_duration)
        .unwrap_or_else(|_| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::PartFailure;
    use std::time::Duration;

    fn solved(part: u8, parse: Option<TimeDelta>) -> SolverResult {
        SolverResult {
            year: 2015,
            day: 4,
            part,
            answer: Ok("282749".to_string()),
            solve_duration: TimeDelta::microseconds(1500),
            parse_duration: parse,
            submitted_at: None,
            submission: None,
            submission_wait: None,
        }
    }

    #[test]
    fn test_durations() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
    }

    #[test]
    fn test_first_part_line() {
        let line = format_result(&solved(1, Some(TimeDelta::microseconds(12))));
        assert_eq!(line, "2015/04 Part 1: 282749 (parse: 12µs, solve: 1.50ms)");
    }

    #[test]
    fn test_later_part_line_omits_parse() {
        let line = format_result(&solved(2, None));
        assert_eq!(line, "2015/04 Part 2: 282749 (solve: 1.50ms)");
    }

    #[test]
    fn test_submission_suffix() {
        let mut result = solved(1, None);
        result.submission = Some(SubmissionOutcome::Incorrect {
            hint: Some(AnswerHint::TooLow),
        });
        assert_eq!(
            format_result(&result),
            "2015/04 Part 1: 282749 (solve: 1.50ms, submitted: ✗ Incorrect (too low))"
        );
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(
            format_outcome(&SubmissionOutcome::Throttled {
                wait_time: Some(Duration::from_secs(30))
            }),
            "⏳ Throttled (wait 30.00s)"
        );
        assert_eq!(
            format_outcome(&SubmissionOutcome::Error("boom".into())),
            "⚠ Error: boom"
        );
    }

    #[test]
    fn test_failed_result_has_prefix() {
        let result = SolverResult {
            answer: Err(PartFailure::Solve("no path".into())),
            ..solved(2, None)
        };
        assert_eq!(prefix(&result), "2015/04 Part 2");
    }
}
