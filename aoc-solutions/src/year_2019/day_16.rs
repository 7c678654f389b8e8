use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 16, tags = ["2019", "signal"])]
pub struct Solver;

const PHASES: usize = 100;
const REPEATS: usize = 10_000;
const MESSAGE_LEN: usize = 8;
const OFFSET_DIGITS: usize = 7;

/// Pattern multiplier for output digit `row` at input digit `col`
fn pattern(row: usize, col: usize) -> i64 {
    [0, 1, 0, -1][((col + 1) / (row + 1)) % 4]
}

fn phase(signal: &[u8]) -> Vec<u8> {
    (0..signal.len())
        .map(|row| {
            let total: i64 = signal
                .iter()
                .enumerate()
                .skip(row)
                .map(|(col, &digit)| i64::from(digit) * pattern(row, col))
                .sum();
            (total.abs() % 10) as u8
        })
        .collect()
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Message at the offset named by the first seven digits of the repeated signal
///
/// Past the halfway point every pattern row is zeros followed by ones, so each
/// phase is a running sum from the end.
fn embedded_message(signal: &[u8]) -> Option<String> {
    let offset = signal
        .get(..OFFSET_DIGITS)?
        .iter()
        .fold(0, |n, &d| n * 10 + usize::from(d));
    let total = signal.len() * REPEATS;
    if offset < total / 2 || offset + MESSAGE_LEN > total {
        return None;
    }
    let mut tail: Vec<u8> = (offset..total).map(|i| signal[i % signal.len()]).collect();
    for _ in 0..PHASES {
        let mut sum = 0u8;
        for digit in tail.iter_mut().rev() {
            sum = (sum + *digit) % 10;
            *digit = sum;
        }
    }
    Some(digits_to_string(&tail[..MESSAGE_LEN]))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .bytes()
            .map(|b| match b {
                b'0'..=b'9' => Ok(b - b'0'),
                other => Err(ParseError::InvalidFormat(format!(
                    "invalid digit {:?}",
                    other as char
                ))),
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() < MESSAGE_LEN {
            return Err(SolveError::failed("signal shorter than the message"));
        }
        let output = (0..PHASES).fold(shared.clone(), |signal, _| phase(&signal));
        Ok(digits_to_string(&output[..MESSAGE_LEN]))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        embedded_message(shared)
            .ok_or_else(|| {
                SolveError::failed("message offset is not in the second half of the signal")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve<const N: u8>(input: &str) -> String
    where
        Solver: PartSolver<N>,
    {
        <Solver as PartSolver<N>>::solve(&mut Solver::parse(input).unwrap()).unwrap()
    }

    #[test]
    fn test_pattern() {
        let second: Vec<i64> = (0..8).map(|col| pattern(1, col)).collect();
        assert_eq!(second, [0, 1, 1, 0, 0, -1, -1, 0]);
        let third: Vec<i64> = (0..8).map(|col| pattern(2, col)).collect();
        assert_eq!(third, [0, 0, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_phases() {
        let mut signal = Solver::parse("12345678").unwrap();
        for expected in ["48226158", "34040438", "03415518", "01029498"] {
            signal = phase(&signal);
            assert_eq!(digits_to_string(&signal), expected);
        }
    }

    #[test]
    fn test_part1() {
        assert_eq!(solve::<1>("80871224585914546619083218645595"), "24176176");
        assert_eq!(solve::<1>("19617804207202209144916044189917"), "73745418");
        assert_eq!(solve::<1>("69317163492948606335995924319873"), "52432133");
    }

    #[test]
    fn test_part2() {
        assert_eq!(solve::<2>("03036732577212944063491565474664"), "84462026");
        assert_eq!(solve::<2>("02935109699940807407585447034323"), "78725270");
        assert_eq!(solve::<2>("03081770884921959731165446850517"), "53553731");
    }

    #[test]
    fn test_offset_in_first_half() {
        let mut signal = Solver::parse("00000011234567890").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut signal).is_err());
        assert!(Solver::parse("12a4").is_err());
    }
}
