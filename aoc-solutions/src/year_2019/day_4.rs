use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 4, tags = ["2019", "brute-force"])]
pub struct Solver;

/// Lengths of the runs of equal digits, or `None` if the digits ever decrease
fn digit_runs(password: u32) -> Option<Vec<usize>> {
    let digits = password.to_string();
    if digits.bytes().tuple_windows().any(|(a, b)| b < a) {
        return None;
    }
    Some(digits.bytes().dedup_with_count().map(|(n, _)| n).collect())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<usize>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parse = || -> anyhow::Result<_> {
            let (first, last) = input
                .trim()
                .split_once('-')
                .ok_or_else(|| anyhow!("expected a range"))?;
            let first: u32 = first.parse().context("invalid range start")?;
            let last: u32 = last.parse().context("invalid range end")?;
            Ok((first..=last).filter_map(digit_runs).collect())
        };
        parse().map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|runs| runs.iter().any(|&n| n >= 2)).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|runs| runs.contains(&2)).count().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_runs() {
        assert_eq!(digit_runs(111111), Some(vec![6]));
        assert_eq!(digit_runs(223450), None);
        assert_eq!(digit_runs(123789), Some(vec![1; 6]));
        assert_eq!(digit_runs(111122), Some(vec![4, 2]));
    }

    #[test]
    fn test_solver() {
        let mut shared = Solver::parse("555-566").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "6");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "5");
        assert!(Solver::parse("555").is_err());
    }
}
