use std::sync::LazyLock;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2015, day = 25, tags = ["2015", "number-theory"])]
pub struct Solver;

const FIRST_CODE: u64 = 20_151_125;
const MULTIPLIER: u64 = 252_533;
const MODULUS: u64 = 33_554_393;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("number pattern is valid"));

/// 1-based position of `(row, column)` along the anti-diagonal fill order
fn code_index(row: u64, column: u64) -> u64 {
    let diagonal = row + column - 1;
    diagonal * (diagonal - 1) / 2 + column
}

fn mod_pow(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut result = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    result
}

fn code_at(row: u64, column: u64) -> u64 {
    FIRST_CODE * mod_pow(MULTIPLIER, code_index(row, column) - 1, MODULUS) % MODULUS
}

impl AocParser for Solver {
    /// `(row, column)`
    type SharedData<'a> = (u64, u64);

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let numbers = NUMBER
            .find_iter(input)
            .map(|m| m.as_str().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        match numbers[..] {
            [row, column] if row > 0 && column > 0 => Ok((row, column)),
            _ => Err(ParseError::MissingData("expected a row and a column".to_string())),
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (row, column) = *shared;
        Ok(code_at(row, column).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_index() {
        assert_eq!(code_index(1, 1), 1);
        assert_eq!(code_index(2, 1), 2);
        assert_eq!(code_index(1, 2), 3);
        assert_eq!(code_index(3, 1), 4);
        assert_eq!(code_index(4, 2), 12);
        assert_eq!(code_index(1, 5), 15);
    }

    #[test]
    fn test_codes() {
        assert_eq!(code_at(1, 1), 20151125);
        assert_eq!(code_at(2, 1), 31916031);
        assert_eq!(code_at(1, 2), 18749137);
        assert_eq!(code_at(6, 6), 27995004);
        assert_eq!(code_at(1, 6), 33511524);
        assert_eq!(code_at(4, 4), 9380097);
    }

    #[test]
    fn test_parse_manual() {
        let input = "To continue, please consult the code grid in the manual.  \
                     Enter the code at row 4, column 4.";
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(shared, (4, 4));
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "9380097");
        assert!(Solver::parse("row 4").is_err());
    }
}
