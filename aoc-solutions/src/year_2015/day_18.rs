use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;
use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 18, tags = ["2015", "grid", "cellular-automaton"])]
pub struct Solver;

const STEPS: usize = 100;

impl AocParser for Solver {
    type SharedData<'a> = Grid<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input.trim(), |b| match b {
            b'#' => Ok(true),
            b'.' => Ok(false),
            other => bail!("unexpected light {:?}", other as char),
        })
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn corners(grid: &Grid<bool>) -> [Point; 4] {
    let (w, h) = (grid.width() as i64 - 1, grid.height() as i64 - 1);
    [Point::new(0, 0), Point::new(w, 0), Point::new(0, h), Point::new(w, h)]
}

fn step(grid: &Grid<bool>) -> Grid<bool> {
    grid.map(|p, &on| {
        let neighbours = grid.neighbors8(p).filter(|&&n| n).count();
        matches!((on, neighbours), (true, 2 | 3) | (false, 3))
    })
}

fn animate(grid: &Grid<bool>, steps: usize, stuck_corners: bool) -> usize {
    let stick = |mut grid: Grid<bool>| {
        if stuck_corners {
            for corner in corners(&grid) {
                grid.set(corner, true);
            }
        }
        grid
    };
    let end = (0..steps).fold(stick(grid.clone()), |g, _| stick(step(&g)));
    end.count(|&on| on)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(animate(shared, STEPS, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(animate(shared, STEPS, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
.#.#.#
...##.
#....#
..#...
#.#..#
####..";

    #[test]
    fn test_part1() {
        let grid = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(animate(&grid, 0, false), 15);
        assert_eq!(animate(&grid, 1, false), 11);
        assert_eq!(animate(&grid, 4, false), 4);
    }

    #[test]
    fn test_part2() {
        let grid = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(animate(&grid, 0, true), 17);
        assert_eq!(animate(&grid, 5, true), 17);
    }
}
