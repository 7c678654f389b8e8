use std::collections::HashSet;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 9, tags = ["2022", "simulation", "grid"])]
pub struct Solver;

/// Step `tail` one square towards `head` unless they already touch
fn follow(tail: Point, head: Point) -> Point {
    let gap = head - tail;
    if gap.x.abs() <= 1 && gap.y.abs() <= 1 {
        tail
    } else {
        tail + Point::new(gap.x.signum(), gap.y.signum())
    }
}

/// Squares the last of `knots` knots visits while the head follows `moves`
fn tail_visits(moves: &[(Point, u32)], knots: usize) -> usize {
    let mut rope = vec![Point::ORIGIN; knots.max(1)];
    let mut visited = HashSet::from([Point::ORIGIN]);
    for &(direction, count) in moves {
        for _ in 0..count {
            rope[0] += direction;
            for i in 1..rope.len() {
                rope[i] = follow(rope[i], rope[i - 1]);
            }
            visited.extend(rope.last().copied());
        }
    }
    visited.len()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Point, u32)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| -> anyhow::Result<_> {
                let (direction, count) = line
                    .trim()
                    .split_once(' ')
                    .ok_or_else(|| anyhow!("invalid move {line:?}"))?;
                let direction = match direction {
                    "U" => Point::UP,
                    "D" => Point::DOWN,
                    "L" => Point::LEFT,
                    "R" => Point::RIGHT,
                    other => bail!("unknown direction {other:?}"),
                };
                Ok((direction, count.parse().with_context(|| format!("invalid move {line:?}"))?))
            })
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_visits(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_visits(shared, 10).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "R 4\nU 4\nL 3\nD 1\nR 4\nD 1\nL 5\nR 2";
    const LARGE: &str = "R 5\nU 8\nL 8\nD 3\nR 17\nD 10\nL 25\nU 20";

    #[test]
    fn test_follow() {
        assert_eq!(follow(Point::new(2, 0), Point::new(5, 0)), Point::new(3, 0));
        assert_eq!(follow(Point::new(4, 7), Point::new(5, 9)), Point::new(5, 8));
        assert_eq!(follow(Point::new(1, 1), Point::new(2, 2)), Point::new(1, 1));
    }

    #[test]
    fn test_part1() {
        let mut moves = Solver::parse(SMALL).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut moves).unwrap(), "13");
    }

    #[test]
    fn test_part2() {
        let mut small = Solver::parse(SMALL).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut small).unwrap(), "1");
        let mut large = Solver::parse(LARGE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut large).unwrap(), "36");
    }

    #[test]
    fn test_parse_errors() {
        assert!(Solver::parse("X 4").is_err());
        assert!(Solver::parse("R four").is_err());
    }
}
