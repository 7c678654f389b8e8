use std::sync::LazyLock;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 6, tags = ["2015", "grid", "simulation"])]
pub struct Solver;

const SIZE: usize = 1000;

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(turn on|turn off|toggle) (\d+),(\d+) through (\d+),(\d+)$")
        .expect("instruction pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    On,
    Off,
    Toggle,
}

/// An action over the inclusive rectangle `from..=to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    action: Action,
    from: (usize, usize),
    to: (usize, usize),
}

impl Instruction {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let caps = INSTRUCTION
            .captures(line.trim())
            .ok_or_else(|| anyhow!("unrecognised instruction"))?;
        let coord = |i: usize| -> anyhow::Result<usize> {
            let value: usize = caps[i].parse().context("invalid coordinate")?;
            if value >= SIZE {
                return Err(anyhow!("coordinate {value} outside the grid"));
            }
            Ok(value)
        };
        let action = match &caps[1] {
            "turn on" => Action::On,
            "turn off" => Action::Off,
            _ => Action::Toggle,
        };
        let (x0, y0, x1, y1) = (coord(2)?, coord(3)?, coord(4)?, coord(5)?);
        Ok(Instruction {
            action,
            from: (x0.min(x1), y0.min(y1)),
            to: (x0.max(x1), y0.max(y1)),
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                Instruction::parse(line).map_err(|e| anyhow!("(line {}) {}: {:?}", idx + 1, e, line))
            })
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let lit = run(shared, |light, action| match action {
            Action::On => *light = 1,
            Action::Off => *light = 0,
            Action::Toggle => *light ^= 1,
        });
        Ok(lit.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let brightness = run(shared, |light, action| match action {
            Action::On => *light += 1,
            Action::Off => *light = light.saturating_sub(1),
            Action::Toggle => *light += 2,
        });
        Ok(brightness.to_string())
    }
}

/// Apply every instruction to a dark grid and total the cell values
fn run(instructions: &[Instruction], apply: impl Fn(&mut u32, Action)) -> u64 {
    let mut grid = vec![0u32; SIZE * SIZE];
    for instr in instructions {
        for y in instr.from.1..=instr.to.1 {
            let row = &mut grid[y * SIZE..(y + 1) * SIZE];
            for light in &mut row[instr.from.0..=instr.to.0] {
                apply(light, instr.action);
            }
        }
    }
    grid.iter().map(|&v| u64::from(v)).sum()
}
