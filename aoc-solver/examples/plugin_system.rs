//! Plugin registration and tag filtering
//!
//! Run with: cargo run --example plugin_system

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

/// Report repair: entries summing to 2020
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 1, tags = ["2020", "search"])]
pub struct ReportRepair;

impl AocParser for ReportRepair {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| line.trim().parse().map_err(ParseError::invalid))
            .collect()
    }
}

impl PartSolver<1> for ReportRepair {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .find_map(|(i, &a)| shared[i + 1..].iter().find(|&&b| a + b == 2020).map(|&b| a * b))
            .map(|product| product.to_string())
            .ok_or_else(|| SolveError::failed("no pair sums to 2020"))
    }
}

impl PartSolver<2> for ReportRepair {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let entries: &[u32] = shared;
        for (i, &a) in entries.iter().enumerate() {
            for (j, &b) in entries.iter().enumerate().skip(i + 1) {
                if let Some(&c) = entries[j + 1..].iter().find(|&&c| a + b + c == 2020) {
                    return Ok((a * b * c).to_string());
                }
            }
        }
        Err(SolveError::failed("no triple sums to 2020"))
    }
}

/// Not run below: filtered out by tag
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2020, day = 2, tags = ["2020", "strings"])]
pub struct PasswordPhilosophy;

impl AocParser for PasswordPhilosophy {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.lines().collect())
    }
}

impl PartSolver<1> for PasswordPhilosophy {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"search"))?
        .build();

    for info in registry.storage().iter_info() {
        println!("registered {}/{:02} ({} parts)", info.year, info.day, info.parts);
    }

    let input = "1721\n979\n366\n299\n675\n1456";
    let mut solver = registry.create_solver(2020, 1, input)?;
    for part in 1..=solver.parts() {
        let result = solver.solve(part)?;
        println!("Part {part}: {} in {}us", result.answer, result.duration().num_microseconds().unwrap_or(0));
    }

    assert!(!registry.storage().contains(2020, 2));
    Ok(())
}
