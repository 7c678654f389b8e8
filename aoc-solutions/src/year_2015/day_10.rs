use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 10, tags = ["2015", "strings", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    digits: Vec<u8>,
    /// Sequence after 40 rounds; part 2 carries on from it
    after_40: Option<Vec<u8>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let digits = input
            .trim()
            .bytes()
            .map(|b| match b {
                b'1'..=b'9' => Ok(b - b'0'),
                other => Err(ParseError::InvalidFormat(format!(
                    "expected a digit 1-9, found {:?}",
                    other as char
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if digits.is_empty() {
            return Err(ParseError::MissingData("starting sequence".to_string()));
        }
        Ok(SharedData {
            digits,
            after_40: None,
        })
    }
}

fn look_and_say(digits: &[u8]) -> Vec<u8> {
    let mut next = Vec::with_capacity(digits.len() * 2);
    for (digit, run) in &digits.iter().chunk_by(|&&d| d) {
        // a seed may hold runs longer than 9
        let mut count = run.count().to_string().into_bytes();
        count.iter_mut().for_each(|b| *b -= b'0');
        next.extend(count);
        next.push(digit);
    }
    next
}

fn rounds(digits: &[u8], times: usize) -> Vec<u8> {
    (0..times).fold(digits.to_vec(), |seq, _| look_and_say(&seq))
}

fn after_40(shared: &mut SharedData) -> &[u8] {
    shared.after_40.get_or_insert_with(|| rounds(&shared.digits, 40))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(after_40(shared).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(rounds(after_40(shared), 10).len().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_and_say() {
        assert_eq!(look_and_say(&[1]), [1, 1]);
        assert_eq!(look_and_say(&[1, 1]), [2, 1]);
        assert_eq!(look_and_say(&[2, 1]), [1, 2, 1, 1]);
        assert_eq!(look_and_say(&[1, 2, 1, 1]), [1, 1, 1, 2, 2, 1]);
        assert_eq!(rounds(&[1], 5), [3, 1, 2, 2, 1, 1]);
        assert_eq!(look_and_say(&[7; 12]), [1, 2, 7]);
    }

    #[test]
    fn test_parts_share_progress() {
        let mut shared = Solver::parse("1\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "82350");
        assert!(shared.after_40.is_some());
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "1166642");
    }
}
