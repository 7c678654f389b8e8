use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 19, tags = ["2016", "josephus", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    /// Number of elves in the circle
    type SharedData<'a> = usize;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        match input.trim().parse() {
            Ok(0) => Err(ParseError::InvalidFormat("the circle needs at least one elf".into())),
            Ok(elves) => Ok(elves),
            Err(e) => Err(ParseError::InvalidFormat(format!("invalid elf count: {e}"))),
        }
    }
}

/// Each elf steals from the next: the Josephus problem with k = 2
///
/// The winner is `n` with its leading binary 1 moved to the end.
fn steal_left(elves: usize) -> usize {
    let top = usize::BITS - 1 - elves.leading_zeros();
    ((elves & !(1 << top)) << 1) | 1
}

/// Each elf steals from the one directly across the circle
///
/// `next[i]` links the remaining elves; `before` trails the current victim,
/// which moves one extra step whenever an odd-sized circle shrinks.
fn steal_across(elves: usize) -> usize {
    let mut next: Vec<usize> = (1..=elves).map(|i| i % elves).collect();
    let mut before = (elves / 2 + elves - 1) % elves;
    for remaining in (2..=elves).rev() {
        let victim = next[before];
        next[before] = next[victim];
        if remaining % 2 == 1 {
            before = next[before];
        }
    }
    before + 1
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(steal_left(*shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(steal_across(*shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Direct simulation over a shrinking vector
    fn naive(elves: usize, across: bool) -> usize {
        let mut circle: Vec<usize> = (1..=elves).collect();
        let mut current = 0;
        while circle.len() > 1 {
            let offset = if across { circle.len() / 2 } else { 1 };
            let victim = (current + offset) % circle.len();
            circle.remove(victim);
            if victim > current {
                current += 1;
            }
            current %= circle.len();
        }
        circle[0]
    }

    #[test]
    fn test_examples() {
        assert_eq!(steal_left(5), 3);
        assert_eq!(steal_across(5), 2);
        assert_eq!(steal_left(1), 1);
        assert_eq!(steal_across(1), 1);
        assert_eq!(steal_across(2), 1);
    }

    proptest! {
        #[test]
        fn prop_matches_simulation(elves in 1usize..300) {
            prop_assert_eq!(steal_left(elves), naive(elves, false));
            prop_assert_eq!(steal_across(elves), naive(elves, true));
        }
    }
}
