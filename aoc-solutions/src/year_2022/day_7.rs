use std::collections::HashMap;

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 7, tags = ["2022", "tree"])]
pub struct Solver;

const SMALL_DIR: u64 = 100_000;
const DISK_SIZE: u64 = 70_000_000;
const UPDATE_SIZE: u64 = 30_000_000;

/// Total size of every directory, keyed by its path from the root
///
/// A file counts towards every directory above it; listing a directory
/// twice does not count its files twice.
fn directory_sizes(session: &str) -> anyhow::Result<HashMap<Vec<&str>, u64>> {
    let mut cwd: Vec<&str> = Vec::new();
    let mut files: HashMap<Vec<&str>, u64> = HashMap::new();
    let mut sizes = HashMap::from([(Vec::new(), 0)]);

    for line in session.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words[..] {
            ["$", "cd", "/"] => cwd.clear(),
            ["$", "cd", ".."] => {
                if cwd.pop().is_none() {
                    bail!("cd .. from the root");
                }
            }
            ["$", "cd", name] => {
                cwd.push(name);
                sizes.entry(cwd.clone()).or_insert(0);
            }
            ["$", "ls"] => {}
            ["dir", name] => {
                let mut path = cwd.clone();
                path.push(name);
                sizes.entry(path).or_insert(0);
            }
            [size, name] => {
                let size: u64 = size.parse().with_context(|| format!("invalid listing {line:?}"))?;
                let mut path = cwd.clone();
                path.push(name);
                files.insert(path, size);
            }
            _ => bail!("unrecognised line {line:?}"),
        }
    }

    for (path, size) in files {
        for depth in 0..path.len() {
            *sizes.entry(path[..depth].to_vec()).or_insert(0) += size;
        }
    }
    Ok(sizes)
}

impl AocParser for Solver {
    type SharedData<'a> = HashMap<Vec<&'a str>, u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        directory_sizes(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.values().filter(|&&size| size <= SMALL_DIR).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let used = shared.get(&Vec::new()).copied().unwrap_or(0);
        let free = DISK_SIZE
            .checked_sub(used)
            .ok_or_else(|| SolveError::failed("more used than the disk holds"))?;
        let shortfall = UPDATE_SIZE.saturating_sub(free);
        shared
            .values()
            .filter(|&&size| size >= shortfall)
            .min()
            .map(|size| size.to_string())
            .ok_or_else(|| SolveError::failed("no directory frees enough space"))
    }
}
