use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 11, tags = ["2021", "grid", "cellular-automaton"])]
pub struct Solver;

const FLASH_AT: u8 = 10;
const MAX_STEPS: usize = 100_000;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input.trim(), |b| match b {
            b'0'..=b'9' => Ok(b - b'0'),
            other => bail!("unexpected energy level {:?}", other as char),
        })
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// Advance one step in place and return how many octopuses flashed
fn step(octopuses: &mut Grid<u8>) -> usize {
    let mut flashing = Vec::new();
    for p in octopuses.points() {
        if let Some(&energy) = octopuses.get(p) {
            octopuses.set(p, energy + 1);
            if energy + 1 == FLASH_AT {
                flashing.push(p);
            }
        }
    }

    // each octopus crosses the threshold once per step
    let mut flashes = 0;
    while let Some(p) = flashing.pop() {
        flashes += 1;
        for n in p.neighbors8() {
            if let Some(&energy) = octopuses.get(n) {
                octopuses.set(n, energy + 1);
                if energy + 1 == FLASH_AT {
                    flashing.push(n);
                }
            }
        }
    }

    *octopuses = octopuses.map(|_, &energy| if energy >= FLASH_AT { 0 } else { energy });
    flashes
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut octopuses = shared.clone();
        let flashes: usize = (0..100).map(|_| step(&mut octopuses)).sum();
        Ok(flashes.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut octopuses = shared.clone();
        let everyone = octopuses.width() * octopuses.height();
        (1..=MAX_STEPS)
            .find(|_| step(&mut octopuses) == everyone)
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::failed(format!("no synchronised flash within {MAX_STEPS} steps")))
    }
}
