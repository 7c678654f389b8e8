use std::collections::{HashMap, HashSet};

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 17, tags = ["2020", "cellular-automaton"])]
pub struct Solver;

const CYCLES: usize = 6;

/// A cube position; unused trailing axes stay at zero
type Cube = [i64; 4];

impl AocParser for Solver {
    /// Active cubes in the starting slice
    type SharedData<'a> = Vec<Cube>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let slice = Grid::parse(input.trim(), |b| match b {
            b'#' => Ok(true),
            b'.' => Ok(false),
            other => bail!("unexpected cube {:?}", other as char),
        })
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(slice
            .iter()
            .filter(|(_, active)| **active)
            .map(|(p, _)| [p.x, p.y, 0, 0])
            .collect())
    }
}

/// Unit offsets over the first `dims` axes, excluding the origin
fn offsets(dims: usize) -> Vec<Cube> {
    (0..dims)
        .map(|_| -1..=1)
        .multi_cartesian_product()
        .filter(|delta| delta.iter().any(|&d| d != 0))
        .map(|delta| {
            let mut offset = [0; 4];
            offset[..dims].copy_from_slice(&delta);
            offset
        })
        .collect()
}

fn cycle(active: &HashSet<Cube>, offsets: &[Cube]) -> HashSet<Cube> {
    let mut neighbours: HashMap<Cube, usize> = HashMap::new();
    for cube in active {
        for offset in offsets {
            let n = std::array::from_fn(|axis| cube[axis] + offset[axis]);
            *neighbours.entry(n).or_default() += 1;
        }
    }
    neighbours
        .into_iter()
        .filter(|(cube, count)| *count == 3 || (*count == 2 && active.contains(cube)))
        .map(|(cube, _)| cube)
        .collect()
}

fn boot(initial: &[Cube], dims: usize) -> usize {
    let offsets = offsets(dims);
    let active: HashSet<Cube> = initial.iter().copied().collect();
    (0..CYCLES).fold(active, |active, _| cycle(&active, &offsets)).len()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(boot(shared, 3).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(boot(shared, 4).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = ".#.\n..#\n###";

    #[test]
    fn test_offsets() {
        assert_eq!(offsets(3).len(), 26);
        assert_eq!(offsets(4).len(), 80);
        assert!(offsets(3).iter().all(|o| o[3] == 0));
    }

    #[test]
    fn test_three_dimensions() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.len(), 5);
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "112");
    }

    #[test]
    fn test_four_dimensions() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "848");
    }

    #[test]
    fn test_first_cycle() {
        let initial = Solver::parse(EXAMPLE).unwrap();
        let active = initial.into_iter().collect();
        assert_eq!(cycle(&active, &offsets(3)).len(), 11);
    }
}
