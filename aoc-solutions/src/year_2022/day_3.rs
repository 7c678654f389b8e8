use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, tags = ["2022", "sets"])]
pub struct Solver;

/// Item types as a bitset, bit `n` set for priority `n`
type Items = u64;

fn priority(item: u8) -> Option<u32> {
    match item {
        b'a'..=b'z' => Some(u32::from(item - b'a') + 1),
        b'A'..=b'Z' => Some(u32::from(item - b'A') + 27),
        _ => None,
    }
}

fn items(contents: &[u8]) -> Items {
    contents
        .iter()
        .filter_map(|&b| priority(b))
        .fold(0, |set, p| set | 1 << p)
}

/// Priority of the single item type common to every set
fn common_priority(sets: &[Items]) -> Result<u32, SolveError> {
    let common = sets.iter().fold(Items::MAX, |all, &set| all & set);
    if common.count_ones() != 1 {
        return Err(SolveError::failed(format!(
            "expected one shared item type, found {}",
            common.count_ones()
        )));
    }
    Ok(common.trailing_zeros())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a [u8]>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if line.len() % 2 != 0 || line.bytes().any(|b| priority(b).is_none()) {
                    Err(ParseError::InvalidFormat(format!("invalid rucksack {line:?}")))
                } else {
                    Ok(line.as_bytes())
                }
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for sack in shared.iter() {
            let (left, right) = sack.split_at(sack.len() / 2);
            total += common_priority(&[items(left), items(right)])?;
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % 3 != 0 {
            return Err(SolveError::failed("elves do not split into groups of three"));
        }
        let mut total = 0;
        for group in shared.chunks(3) {
            let sets: Vec<Items> = group.iter().map(|sack| items(sack)).collect();
            total += common_priority(&sets)?;
        }
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
vJrwpWtwJgWrhcsFMMfFFhFp
jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
PmmdzqPrVvPwwTWBwg
wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
ttgJtRGJQctTZtZT
CrZsJsPPZsGzwwsLwLmpwMDw";

    #[test]
    fn test_priority() {
        assert_eq!(priority(b'p'), Some(16));
        assert_eq!(priority(b'L'), Some(38));
        assert_eq!(priority(b'Z'), Some(52));
        assert_eq!(priority(b'1'), None);
    }

    #[test]
    fn test_parts() {
        let mut sacks = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut sacks).unwrap(), "157");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut sacks).unwrap(), "70");
    }

    #[test]
    fn test_ambiguous_rucksacks() {
        let mut sacks = Solver::parse("abab").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut sacks).is_err());
        assert!(<Solver as PartSolver<2>>::solve(&mut sacks).is_err());
        assert!(Solver::parse("abc").is_err());
    }
}
