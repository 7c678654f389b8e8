use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 3, tags = ["2015", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Point>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .chars()
            .map(|c| match c {
                '^' => Ok(Point::UP),
                'v' => Ok(Point::DOWN),
                '<' => Ok(Point::LEFT),
                '>' => Ok(Point::RIGHT),
                other => Err(ParseError::InvalidFormat(format!("unknown direction {other:?}"))),
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(houses_visited(shared.iter().copied()).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let santa = houses_visited(shared.iter().copied().step_by(2));
        let robo_santa = houses_visited(shared.iter().copied().skip(1).step_by(2));
        Ok(santa.union(&robo_santa).count().to_string())
    }
}

fn houses_visited(moves: impl Iterator<Item = Point>) -> HashSet<Point> {
    let mut location = Point::ORIGIN;
    let mut visited = HashSet::from([location]);
    for step in moves {
        location += step;
        visited.insert(location);
    }
    visited
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

    #[test]
    fn test_part1() {
        assert_eq!(solve::<1>(">"), "2");
        assert_eq!(solve::<1>("^>v<"), "4");
        assert_eq!(solve::<1>("^v^v^v^v^v"), "2");
    }

    #[test]
    fn test_part2() {
        assert_eq!(solve::<2>("^v"), "3");
        assert_eq!(solve::<2>("^>v<"), "3");
        assert_eq!(solve::<2>("^v^v^v^v^v"), "11");
    }
}
