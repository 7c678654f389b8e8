//! Parsed solver instances and the type-erased interface over them

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Answer for one part together with when it was computed
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The answer string
    pub answer: String,
    /// When solving started (UTC)
    pub solve_start: DateTime<Utc>,
    /// When solving completed (UTC)
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    /// Time spent solving
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// One parsed puzzle input for a specific year and day
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input` with `S` and record how long parsing took
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let parse_start = Utc::now();
        let shared = S::parse(input)?;
        let parse_end = Utc::now();

        Ok(Self {
            year,
            day,
            shared,
            parse_start,
            parse_end,
        })
    }

    /// Borrow the parsed data
    pub fn shared(&self) -> &S::SharedData<'a> {
        &self.shared
    }
}

/// Object-safe view of a [`SolverInstance`]
///
/// The registry hands these out so the runner can treat every day alike.
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(mut solver: Box<dyn DynSolver>) -> Result<(), Box<dyn std::error::Error>> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("Part {}: {} ({:?})", part, result.answer, result.duration());
///     }
///     println!("parse took {:?}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve the given part, timing the call
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    /// When parsing started (UTC)
    fn parse_start(&self) -> DateTime<Utc>;

    /// When parsing finished (UTC)
    fn parse_end(&self) -> DateTime<Utc>;

    /// Puzzle year
    fn year(&self) -> u16;

    /// Puzzle day
    fn day(&self) -> u8;

    /// Number of parts the underlying solver answers
    fn parts(&self) -> u8;

    /// Time spent parsing
    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<'a, S: Solver> DynSolver for SolverInstance<'a, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let solve_start = Utc::now();
        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        let solve_end = Utc::now();

        Ok(SolveResult {
            answer,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AocParser;

    struct Lines;

    impl AocParser for Lines {
        type SharedData<'a> = Vec<&'a str>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            if input.is_empty() {
                return Err(ParseError::MissingData("no lines".into()));
            }
            Ok(input.lines().collect())
        }
    }

    impl Solver for Lines {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.len().to_string()),
                2 => Ok(shared.iter().map(|l| l.len()).sum::<usize>().to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn test_instance_solves_in_any_order() {
        let mut instance = SolverInstance::<Lines>::new(2015, 3, "ab\ncde").unwrap();
        assert_eq!(instance.solve(2).unwrap().answer, "5");
        assert_eq!(instance.solve(1).unwrap().answer, "2");
        assert_eq!(instance.solve(1).unwrap().answer, "2");
        assert_eq!(instance.year(), 2015);
        assert_eq!(instance.day(), 3);
        assert_eq!(instance.parts(), 2);
        assert!(instance.parse_duration() >= TimeDelta::zero());
    }

    #[test]
    fn test_instance_rejects_out_of_range_part() {
        let mut instance = SolverInstance::<Lines>::new(2015, 3, "x").unwrap();
        assert!(matches!(instance.solve(3), Err(SolveError::PartOutOfRange(3))));
        assert!(matches!(instance.solve(0), Err(SolveError::PartOutOfRange(0))));
    }

    #[test]
    fn test_instance_parse_failure() {
        assert!(matches!(
            SolverInstance::<Lines>::new(2015, 3, ""),
            Err(ParseError::MissingData(_))
        ));
    }
}
