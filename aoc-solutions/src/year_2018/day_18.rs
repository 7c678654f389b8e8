use std::collections::HashMap;

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 18, tags = ["2018", "grid", "cellular-automaton", "cycle-detection"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Acre {
    Open,
    Trees,
    Lumberyard,
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<Acre>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input.trim(), |b| match b {
            b'.' => Ok(Acre::Open),
            b'|' => Ok(Acre::Trees),
            b'#' => Ok(Acre::Lumberyard),
            other => bail!("unexpected acre {:?}", other as char),
        })
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn minute(area: &Grid<Acre>) -> Grid<Acre> {
    area.map(|p, &acre| {
        let around = |kind: Acre| area.neighbors8(p).filter(|&&n| n == kind).count();
        match acre {
            Acre::Open if around(Acre::Trees) >= 3 => Acre::Trees,
            Acre::Trees if around(Acre::Lumberyard) >= 3 => Acre::Lumberyard,
            Acre::Lumberyard if around(Acre::Lumberyard) == 0 || around(Acre::Trees) == 0 => Acre::Open,
            unchanged => unchanged,
        }
    })
}

fn resource_value(area: &Grid<Acre>) -> usize {
    area.count(|&a| a == Acre::Trees) * area.count(|&a| a == Acre::Lumberyard)
}

/// The area after `minutes`, skipping ahead once a state repeats
fn after(area: &Grid<Acre>, minutes: usize) -> Grid<Acre> {
    let mut seen = HashMap::new();
    let mut history = Vec::new();
    let mut current = area.clone();
    for t in 0..minutes {
        if let Some(&start) = seen.get(&current) {
            let period = t - start;
            return history.swap_remove(start + (minutes - start) % period);
        }
        seen.insert(current.clone(), t);
        history.push(current.clone());
        current = minute(&current);
    }
    current
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(resource_value(&after(shared, 10)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(resource_value(&after(shared, 1_000_000_000)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
.#.#...|#.
.....#|##|
.|..|...#.
..|#.....#
#.#|||#|#|
...#.||...
.|....|...
||...#|.#|
|.||||..|.
...#.|..|.";

    #[test]
    fn test_ten_minutes() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "1147");
    }

    #[test]
    fn test_skip_ahead_matches_simulation() {
        let area = Solver::parse(EXAMPLE).unwrap();
        let mut naive = area.clone();
        for minutes in 1..=60 {
            naive = minute(&naive);
            assert_eq!(after(&area, minutes), naive, "minute {minutes}");
        }
    }

    #[test]
    fn test_edge_neighbours_count() {
        // three trees around the corner, all in row or column zero
        let area = Solver::parse(".|\n||").unwrap();
        assert_eq!(minute(&area), Solver::parse("||\n||").unwrap());
    }
}
