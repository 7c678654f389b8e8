use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 13, tags = ["2015", "graph", "permutations"])]
pub struct Solver;

/// `happiness[a][b]`: what `a` gains sitting next to `b`
type Happiness = Vec<Vec<i64>>;

impl AocParser for Solver {
    type SharedData<'a> = Happiness;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_preferences(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_preferences(input: &str) -> anyhow::Result<Happiness> {
    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut entries = Vec::new();
    for (idx, line) in input.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
        let words: Vec<&str> = line.trim_end_matches('.').split_whitespace().collect();
        let [person, "would", sign, amount, "happiness", "units", "by", "sitting", "next", "to", neighbour] =
            words[..]
        else {
            bail!("(line {}) unrecognised preference {line:?}", idx + 1);
        };
        let amount: i64 = amount
            .parse()
            .with_context(|| format!("(line {}) invalid amount", idx + 1))?;
        let amount = match sign {
            "gain" => amount,
            "lose" => -amount,
            other => return Err(anyhow!("(line {}) expected gain or lose, got {other:?}", idx + 1)),
        };
        let next = ids.len();
        let person = *ids.entry(person).or_insert(next);
        let next = ids.len();
        let neighbour = *ids.entry(neighbour).or_insert(next);
        entries.push((person, neighbour, amount));
    }

    let mut happiness = vec![vec![0; ids.len()]; ids.len()];
    for (person, neighbour, amount) in entries {
        happiness[person][neighbour] = amount;
    }
    Ok(happiness)
}

/// Best total over every circular seating
///
/// The first guest stays in seat 0; rotations of a table are equivalent.
fn best_seating(happiness: &Happiness) -> i64 {
    let guests = happiness.len();
    if guests < 2 {
        return 0;
    }
    let pair = |a: usize, b: usize| happiness[a][b] + happiness[b][a];
    (1..guests)
        .permutations(guests - 1)
        .map(|rest| {
            let first = rest.first().copied().unwrap_or(0);
            let last = rest.last().copied().unwrap_or(0);
            pair(0, first)
                + pair(0, last)
                + rest.iter().tuple_windows().map(|(&a, &b)| pair(a, b)).sum::<i64>()
        })
        .max()
        .unwrap_or(0)
}

/// The table with an extra guest who neither gains nor loses anything
fn with_indifferent_guest(happiness: &Happiness) -> Happiness {
    let guests = happiness.len() + 1;
    let mut extended: Happiness = happiness
        .iter()
        .map(|row| row.iter().copied().chain([0]).collect())
        .collect();
    extended.push(vec![0; guests]);
    extended
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best_seating(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best_seating(&with_indifferent_guest(shared)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Alice would gain 54 happiness units by sitting next to Bob.
Alice would lose 79 happiness units by sitting next to Carol.
Alice would lose 2 happiness units by sitting next to David.
Bob would gain 83 happiness units by sitting next to Alice.
Bob would lose 7 happiness units by sitting next to Carol.
Bob would lose 63 happiness units by sitting next to David.
Carol would lose 62 happiness units by sitting next to Alice.
Carol would gain 60 happiness units by sitting next to Bob.
Carol would gain 55 happiness units by sitting next to David.
David would gain 46 happiness units by sitting next to Alice.
David would lose 7 happiness units by sitting next to Bob.
David would gain 41 happiness units by sitting next to Carol.";

    #[test]
    fn test_parse() {
        let happiness = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(
            happiness,
            vec![
                vec![0, 54, -79, -2],
                vec![83, 0, -7, -63],
                vec![-62, 60, 0, 55],
                vec![46, -7, 41, 0],
            ]
        );
    }

    #[test]
    fn test_parts() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "330");
        // the extra guest breaks the weakest link of the best open chain
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "286");
    }

    #[test]
    fn test_bad_line() {
        assert!(Solver::parse("Alice would win 5 happiness units by sitting next to Bob.").is_err());
        assert!(Solver::parse("Alice likes Bob").is_err());
    }
}
