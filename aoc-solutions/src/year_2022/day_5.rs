use std::sync::LazyLock;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 5, tags = ["2022", "simulation", "stacks"])]
pub struct Solver;

static MOVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^move (\d+) from (\d+) to (\d+)$").expect("move pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Move {
    count: usize,
    from: usize,
    to: usize,
}

/// Crate stacks, bottom first, and the rearrangement procedure
#[derive(Debug, Clone)]
pub struct Cargo {
    stacks: Vec<Vec<u8>>,
    moves: Vec<Move>,
}

impl Cargo {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let input = input.replace("\r\n", "\n");
        let (drawing, procedure) = input
            .split_once("\n\n")
            .ok_or_else(|| anyhow!("expected a drawing and a procedure"))?;

        let mut rows: Vec<&str> = drawing.lines().collect();
        let labels = rows.pop().ok_or_else(|| anyhow!("empty drawing"))?;
        let mut stacks = vec![Vec::new(); labels.split_whitespace().count()];
        // crate letters sit at columns 1, 5, 9, ...
        for row in rows.iter().rev() {
            for (i, letter) in row.bytes().skip(1).step_by(4).enumerate() {
                match letter {
                    b' ' => {}
                    b'A'..=b'Z' => stacks
                        .get_mut(i)
                        .ok_or_else(|| anyhow!("crate beyond the last stack in {row:?}"))?
                        .push(letter),
                    other => bail!("unexpected {:?} in {row:?}", other as char),
                }
            }
        }

        let moves = procedure
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let caps = MOVE
                    .captures(line.trim())
                    .ok_or_else(|| anyhow!("invalid move {line:?}"))?;
                let field = |i: usize| caps[i].parse::<usize>().context("number out of range");
                let (count, from, to) = (field(1)?, field(2)?, field(3)?);
                if from == 0 || to == 0 || from > stacks.len() || to > stacks.len() {
                    bail!("no such stack in {line:?}");
                }
                Ok(Move {
                    count,
                    from: from - 1,
                    to: to - 1,
                })
            })
            .collect::<anyhow::Result<_>>()?;
        Ok(Self { stacks, moves })
    }

    /// Run the procedure; `in_order` keeps lifted crates in their order
    fn rearrange(&self, in_order: bool) -> Result<Vec<Vec<u8>>, SolveError> {
        let mut stacks = self.stacks.clone();
        for (step, m) in self.moves.iter().enumerate() {
            let source = &mut stacks[m.from];
            let split = source.len().checked_sub(m.count).ok_or_else(|| {
                SolveError::failed(format!(
                    "step {}: stack {} runs out of crates",
                    step + 1,
                    m.from + 1
                ))
            })?;
            let mut lifted = source.split_off(split);
            if !in_order {
                lifted.reverse();
            }
            stacks[m.to].extend(lifted);
        }
        Ok(stacks)
    }
}

fn tops(stacks: &[Vec<u8>]) -> String {
    stacks.iter().filter_map(|s| s.last()).map(|&c| char::from(c)).collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Cargo;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Cargo::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tops(&shared.rearrange(false)?))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tops(&shared.rearrange(true)?))
    }
}
