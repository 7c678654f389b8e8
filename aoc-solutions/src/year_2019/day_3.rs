use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 3, tags = ["2019", "grid"])]
pub struct Solver;

/// Each visited point with the steps taken to first reach it
fn trace(path: &str) -> anyhow::Result<HashMap<Point, u64>> {
    let mut location = Point::ORIGIN;
    let mut steps = 0;
    let mut visited = HashMap::new();
    for segment in path.trim().split(',') {
        let direction = match segment.as_bytes().first() {
            Some(b'U') => Point::UP,
            Some(b'D') => Point::DOWN,
            Some(b'L') => Point::LEFT,
            Some(b'R') => Point::RIGHT,
            _ => bail!("invalid segment {segment:?}"),
        };
        let length: u64 = segment[1..]
            .parse()
            .with_context(|| format!("invalid segment {segment:?}"))?;
        for _ in 0..length {
            location += direction;
            steps += 1;
            visited.entry(location).or_insert(steps);
        }
    }
    Ok(visited)
}

/// Crossing points of two wires, with the combined steps to reach each
fn crossings(first: &HashMap<Point, u64>, second: &HashMap<Point, u64>) -> Vec<(Point, u64)> {
    first
        .iter()
        .filter_map(|(point, a)| second.get(point).map(|b| (*point, a + b)))
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Point, u64)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parse = || -> anyhow::Result<_> {
            let mut lines = input.lines().filter(|line| !line.trim().is_empty());
            let mut wire = || -> anyhow::Result<_> {
                trace(lines.next().ok_or_else(|| anyhow!("expected two wires"))?)
            };
            let (first, second) = (wire()?, wire()?);
            Ok(crossings(&first, &second))
        };
        parse().map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|(point, _)| point.manhattan(Point::ORIGIN))
            .min()
            .map(|d| d.to_string())
            .ok_or_else(|| SolveError::failed("the wires never cross"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|(_, steps)| steps)
            .min()
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::failed("the wires never cross"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve<const N: u8>(input: &str) -> String
    where
        Solver: PartSolver<N>,
    {
        <Solver as PartSolver<N>>::solve(&mut Solver::parse(input).unwrap()).unwrap()
    }

    const SMALL: &str = "R8,U5,L5,D3\nU7,R6,D4,L4";
    const MEDIUM: &str = "R75,D30,R83,U83,L12,D49,R71,U7,L72\nU62,R66,U55,R34,D71,R55,D58,R83";
    const LARGE: &str =
        "R98,U47,R26,D63,R33,U87,L62,D20,R33,U53,R51\nU98,R91,D20,R16,D67,R40,U7,R15,U6,R7";

    #[test]
    fn test_trace() {
        let visited = trace("R8,U5,L5,D3").unwrap();
        assert_eq!(visited.len(), 21);
        assert_eq!(visited[&Point::new(8, -5)], 13);
        assert!(trace("X4").is_err());
    }

    #[test]
    fn test_part1() {
        assert_eq!(solve::<1>(SMALL), "6");
        assert_eq!(solve::<1>(MEDIUM), "159");
        assert_eq!(solve::<1>(LARGE), "135");
    }

    #[test]
    fn test_part2() {
        assert_eq!(solve::<2>(SMALL), "30");
        assert_eq!(solve::<2>(MEDIUM), "610");
        assert_eq!(solve::<2>(LARGE), "410");
    }

    #[test]
    fn test_parallel_wires() {
        let mut shared = Solver::parse("R2\nU2").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
        assert!(Solver::parse("R2").is_err());
    }
}
