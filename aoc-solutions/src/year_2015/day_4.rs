use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use md5::{Digest, Md5};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 4, tags = ["2015", "hashing"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData<'a> {
    secret_key: &'a str,
    /// Part 1's answer; a hash with six leading zeroes also has five, so
    /// part 2 resumes from here
    five_zeroes: Option<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let secret_key = input.trim();
        if secret_key.is_empty() {
            return Err(ParseError::MissingData("secret key".to_string()));
        }
        Ok(SharedData {
            secret_key,
            five_zeroes: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let answer = match shared.five_zeroes {
            Some(answer) => answer,
            None => {
                let answer = mine(shared.secret_key, 5, 1)?;
                *shared.five_zeroes.insert(answer)
            }
        };
        Ok(answer.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared.five_zeroes.unwrap_or(1);
        Ok(mine(shared.secret_key, 6, start)?.to_string())
    }
}

/// Whether the hex form of `digest` starts with `zeroes` zero digits
fn leading_zero_nibbles(digest: &[u8], zeroes: usize) -> bool {
    let full = zeroes / 2;
    digest[..full].iter().all(|&b| b == 0) && (zeroes % 2 == 0 || digest[full] >> 4 == 0)
}

/// Lowest `n >= start` whose hash of `key + n` has `zeroes` leading zeroes
fn mine(key: &str, zeroes: usize, start: u64) -> Result<u64, SolveError> {
    let mut prefix = Md5::new();
    prefix.update(key.as_bytes());

    (start..)
        .find(|n| {
            let digest = prefix.clone().chain_update(n.to_string().as_bytes()).finalize();
            leading_zero_nibbles(&digest, zeroes)
        })
        .ok_or_else(|| SolveError::failed("search space exhausted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zeroes() {
        assert!(leading_zero_nibbles(&[0, 0, 0x0f, 0xff], 5));
        assert!(!leading_zero_nibbles(&[0, 0, 0x10, 0xff], 5));
        assert!(leading_zero_nibbles(&[0, 0, 0, 0xff], 6));
        assert!(!leading_zero_nibbles(&[0, 0, 0x01, 0xff], 6));
    }

    #[test]
    fn test_part1() {
        assert_eq!(mine("abcdef", 5, 1).unwrap(), 609043);
        assert_eq!(mine("pqrstuv", 5, 1).unwrap(), 1048970);
    }

    #[test]
    fn test_part2_resumes_from_part1() {
        let mut shared = Solver::parse("abcdef\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "609043");
        assert_eq!(shared.five_zeroes, Some(609043));
    }
}
