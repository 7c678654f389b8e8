use std::collections::HashMap;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 16, tags = ["2015", "parsing"])]
pub struct Solver;

/// What the MFCSAM reported
const PROFILE: [(&str, u32); 10] = [
    ("children", 3),
    ("cats", 7),
    ("samoyeds", 2),
    ("pomeranians", 3),
    ("akitas", 0),
    ("vizslas", 0),
    ("goldfish", 5),
    ("trees", 3),
    ("cars", 2),
    ("perfumes", 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aunt<'a> {
    number: u32,
    things: HashMap<&'a str, u32>,
}

impl<'a> Aunt<'a> {
    fn parse(line: &'a str) -> anyhow::Result<Self> {
        let (name, things) = line.split_once(": ").ok_or_else(|| anyhow!("missing ': '"))?;
        let number = name
            .strip_prefix("Sue ")
            .ok_or_else(|| anyhow!("expected 'Sue N'"))?
            .parse()
            .context("invalid Sue number")?;
        let things = things
            .split(", ")
            .map(|thing| -> anyhow::Result<(&str, u32)> {
                let (kind, count) = thing
                    .split_once(": ")
                    .ok_or_else(|| anyhow!("invalid entry {thing:?}"))?;
                Ok((kind, count.trim().parse().with_context(|| format!("invalid count for {kind}"))?))
            })
            .collect::<anyhow::Result<_>>()?;
        Ok(Aunt { number, things })
    }

    /// Every remembered thing agrees with the profile under `matches`
    fn fits(&self, matches: impl Fn(&str, u32, u32) -> bool) -> bool {
        PROFILE.iter().all(|&(kind, reading)| {
            self.things.get(kind).is_none_or(|&count| matches(kind, count, reading))
        })
    }
}

/// Cats and trees read low, pomeranians and goldfish read high
fn ranged(kind: &str, count: u32, reading: u32) -> bool {
    match kind {
        "cats" | "trees" => count > reading,
        "pomeranians" | "goldfish" => count < reading,
        _ => count == reading,
    }
}

fn find_aunt(aunts: &[Aunt<'_>], matches: impl Fn(&str, u32, u32) -> bool) -> Result<String, SolveError> {
    aunts
        .iter()
        .find(|aunt| aunt.fits(&matches))
        .map(|aunt| aunt.number.to_string())
        .ok_or_else(|| SolveError::failed("no Sue matches the profile"))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Aunt<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Aunt::parse(line).map_err(|e| anyhow!("{e}: {line:?}")))
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_aunt(shared, |_, count, reading| count == reading)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_aunt(shared, ranged)
    }
}
