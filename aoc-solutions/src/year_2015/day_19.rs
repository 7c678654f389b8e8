use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 19, tags = ["2015", "search", "strings"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData<'a> {
    /// `(from, to)` pairs
    replacements: Vec<(&'a str, &'a str)>,
    molecule: &'a str,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_machine(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_machine(input: &str) -> anyhow::Result<SharedData<'_>> {
    let mut replacements = Vec::new();
    let mut molecule = None;
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line.split_once(" => ") {
            Some((from, to)) => replacements.push((from, to)),
            None if molecule.is_none() => molecule = Some(line),
            None => bail!("unexpected line {line:?}"),
        }
    }
    Ok(SharedData {
        replacements,
        molecule: molecule.ok_or_else(|| anyhow!("missing medicine molecule"))?,
    })
}

/// Every molecule one replacement away from `molecule`
fn single_replacements(molecule: &str, replacements: &[(&str, &str)]) -> HashSet<String> {
    replacements
        .iter()
        .flat_map(|&(from, to)| {
            molecule
                .match_indices(from)
                .map(move |(at, _)| [&molecule[..at], to, &molecule[at + from.len()..]].concat())
        })
        .collect()
}

/// Fewest replacements turning `e` into `medicine`
///
/// Runs the replacements backwards from the medicine, always expanding the
/// shortest candidate first. `e` only ever stands alone, so reductions to
/// `e` must consume the whole molecule.
fn fewest_steps(medicine: &str, replacements: &[(&str, &str)]) -> Option<usize> {
    let mut queue = BinaryHeap::from([Reverse((medicine.len(), 0, medicine.to_string()))]);
    let mut seen = HashSet::from([medicine.to_string()]);

    while let Some(Reverse((_, steps, molecule))) = queue.pop() {
        if molecule == "e" {
            return Some(steps);
        }
        for &(from, to) in replacements {
            if from == "e" {
                if molecule == to {
                    queue.push(Reverse((1, steps + 1, "e".to_string())));
                }
                continue;
            }
            for (at, _) in molecule.match_indices(to) {
                let reduced = [&molecule[..at], from, &molecule[at + to.len()..]].concat();
                if seen.insert(reduced.clone()) {
                    queue.push(Reverse((reduced.len(), steps + 1, reduced)));
                }
            }
        }
    }
    None
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(single_replacements(shared.molecule, &shared.replacements)
            .len()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        fewest_steps(shared.molecule, &shared.replacements)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("the medicine cannot be made from 'e'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLACEMENTS: &str = "\
e => H
e => O
H => HO
H => OH
O => HH
";

    fn solve<const N: u8>(molecule: &str) -> Result<String, SolveError>
    where
        Solver: PartSolver<N>,
    {
        let input = format!("{REPLACEMENTS}\n{molecule}\n");
        <Solver as PartSolver<N>>::solve(&mut Solver::parse(&input).unwrap())
    }

    #[test]
    fn test_part1() {
        assert_eq!(solve::<1>("HOH").unwrap(), "4");
        assert_eq!(solve::<1>("HOHOHO").unwrap(), "7");
    }

    #[test]
    fn test_part2() {
        assert_eq!(solve::<2>("HOH").unwrap(), "3");
        assert_eq!(solve::<2>("HOHOHO").unwrap(), "6");
    }

    #[test]
    fn test_unreachable() {
        assert!(solve::<2>("X").is_err());
        assert!(Solver::parse("H => HO\n").is_err());
    }
}
