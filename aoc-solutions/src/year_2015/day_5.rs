use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 5, tags = ["2015", "strings"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a [u8]>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::as_bytes)
            .collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|w| is_nice(w)).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|w| is_nicer(w)).count().to_string())
    }
}

/// Three vowels, a doubled letter and none of `ab cd pq xy`
fn is_nice(word: &[u8]) -> bool {
    let vowels = word.iter().filter(|&c| b"aeiou".contains(c)).count();
    let pairs = || word.iter().copied().tuple_windows::<(u8, u8)>();
    vowels >= 3
        && pairs().any(|(a, b)| a == b)
        && !pairs().any(|pair| matches!(pair, (b'a', b'b') | (b'c', b'd') | (b'p', b'q') | (b'x', b'y')))
}

/// A pair appearing twice without overlap, and a letter repeated with one between
fn is_nicer(word: &[u8]) -> bool {
    let repeated_pair = (0..word.len().saturating_sub(1))
        .any(|i| word[i + 2..].windows(2).any(|w| w == &word[i..i + 2]));
    let sandwich = word.windows(3).any(|w| w[0] == w[2]);
    repeated_pair && sandwich
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part1() {
        assert!(is_nice(b"ugknbfddgicrmopn"));
        assert!(is_nice(b"aaa"));
        assert!(!is_nice(b"jchzalrnumimnmhp"));
        assert!(!is_nice(b"haegwjzuvuyypxyu"));
        assert!(!is_nice(b"dvszwmarrgswjxmb"));

        let mut shared = Solver::parse("ugknbfddgicrmopn\njchzalrnumimnmhp\naaa\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "2");
    }

    #[test]
    fn test_part2() {
        assert!(is_nicer(b"qjhvhtzxzqqjkmpb"));
        assert!(is_nicer(b"xxyxx"));
        assert!(!is_nicer(b"uurcxstgmygtbstg"));
        assert!(!is_nicer(b"ieodomkazucvgmuy"));
        // overlapping pair does not count
        assert!(!is_nicer(b"aaa"));

        let mut shared = Solver::parse("qjhvhtzxzqqjkmpb\nuurcxstgmygtbstg").unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "1");
    }
}
