use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 15, tags = ["2015", "brute-force"])]
pub struct Solver;

const TEASPOONS: u32 = 100;
const CALORIE_TARGET: i64 = 500;

/// capacity, durability, flavor, texture, calories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingredient([i64; 5]);

impl Ingredient {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let (_, properties) = line.split_once(": ").ok_or_else(|| anyhow!("missing ': '"))?;
        let mut values = [0; 5];
        for (slot, name) in ["capacity", "durability", "flavor", "texture", "calories"]
            .into_iter()
            .enumerate()
        {
            let value = properties
                .split(", ")
                .find_map(|prop| prop.strip_prefix(name)?.strip_prefix(' '))
                .ok_or_else(|| anyhow!("missing property {name}"))?;
            values[slot] = value.parse().with_context(|| format!("invalid {name}"))?;
        }
        Ok(Ingredient(values))
    }
}

/// Every split of `total` teaspoons across `slots` ingredients
fn recipes(slots: usize, total: u32) -> Vec<Vec<u32>> {
    if slots <= 1 {
        return vec![vec![total; slots]];
    }
    (0..=total)
        .flat_map(|first| {
            recipes(slots - 1, total - first).into_iter().map(move |mut rest| {
                rest.insert(0, first);
                rest
            })
        })
        .collect()
}

/// Score and calories of a recipe; negative property totals count as zero
fn score(ingredients: &[Ingredient], amounts: &[u32]) -> (i64, i64) {
    let total = |prop: usize| {
        ingredients
            .iter()
            .zip(amounts)
            .map(|(ing, &n)| ing.0[prop] * i64::from(n))
            .sum::<i64>()
            .max(0)
    };
    ((0..4).map(total).product(), total(4))
}

fn best(ingredients: &[Ingredient], calories: Option<i64>) -> i64 {
    recipes(ingredients.len(), TEASPOONS)
        .iter()
        .map(|amounts| score(ingredients, amounts))
        .filter(|&(_, cal)| calories.is_none_or(|target| cal == target))
        .map(|(score, _)| score)
        .max()
        .unwrap_or(0)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Ingredient>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| Ingredient::parse(line).map_err(|e| anyhow!("(line {}) {}", idx + 1, e)))
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best(shared, None).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best(shared, Some(CALORIE_TARGET)).to_string())
    }
}
