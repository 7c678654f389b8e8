use std::ops::RangeInclusive;
use std::sync::LazyLock;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, tags = ["2022", "ranges"])]
pub struct Solver;

static PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+),(\d+)-(\d+)$").expect("pair pattern is valid"));

type Sections = RangeInclusive<u32>;

fn contains(outer: &Sections, inner: &Sections) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

fn overlaps(a: &Sections, b: &Sections) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Sections, Sections)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let invalid = || ParseError::InvalidFormat(format!("invalid pair {line:?}"));
                let caps = PAIR.captures(line).ok_or_else(invalid)?;
                let mut bounds = [0u32; 4];
                for (bound, group) in bounds.iter_mut().zip(1usize..) {
                    *bound = caps[group].parse().map_err(|_| invalid())?;
                }
                let [a, b, c, d] = bounds;
                if a > b || c > d {
                    return Err(invalid());
                }
                Ok((a..=b, c..=d))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .iter()
            .filter(|(a, b)| contains(a, b) || contains(b, a))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|(a, b)| overlaps(a, b)).count().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "2-4,6-8\n2-3,4-5\n5-7,7-9\n2-8,3-7\n6-6,4-6\n2-6,4-8";

    #[test]
    fn test_parts() {
        let mut pairs = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut pairs).unwrap(), "2");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut pairs).unwrap(), "4");
    }

    #[test]
    fn test_far_apart() {
        let mut pairs = Solver::parse("25-31,57-102").unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut pairs).unwrap(), "0");
        assert!(Solver::parse("5-3,1-2").is_err());
        assert!(Solver::parse("1-2;3-4").is_err());
    }
}
