use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;
use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 8, tags = ["2022", "grid"])]
pub struct Solver;

/// Trees from `from` outward in `direction`, not including `from`
fn sight_line(forest: &Grid<u8>, from: Point, direction: Point) -> impl Iterator<Item = u8> + '_ {
    std::iter::successors(Some(from + direction), move |&p| Some(p + direction))
        .map_while(|p| forest.get(p).copied())
}

fn visible_from_outside(forest: &Grid<u8>, tree: Point) -> bool {
    let Some(&height) = forest.get(tree) else {
        return false;
    };
    Point::ORTHOGONAL
        .into_iter()
        .any(|direction| sight_line(forest, tree, direction).all(|other| other < height))
}

fn scenic_score(forest: &Grid<u8>, tree: Point) -> usize {
    let Some(&height) = forest.get(tree) else {
        return 0;
    };
    Point::ORTHOGONAL
        .into_iter()
        .map(|direction| {
            let mut seen = 0;
            for other in sight_line(forest, tree, direction) {
                seen += 1;
                if other >= height {
                    break;
                }
            }
            seen
        })
        .product()
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input.trim(), |b| match b {
            b'0'..=b'9' => Ok(b - b'0'),
            other => bail!("invalid tree height {:?}", other as char),
        })
        .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .points()
            .filter(|&tree| visible_from_outside(shared, tree))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .points()
            .map(|tree| scenic_score(shared, tree))
            .max()
            .map(|score| score.to_string())
            .ok_or_else(|| SolveError::failed("empty forest"))
    }
}
