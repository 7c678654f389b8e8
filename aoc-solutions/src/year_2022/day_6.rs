use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["2022", "strings", "sliding-window"])]
pub struct Solver;

/// Characters read when the last `width` of them are all different
fn first_marker(stream: &[u8], width: usize) -> Option<usize> {
    let mut counts = [0u32; 256];
    let mut distinct = 0;
    for (i, &b) in stream.iter().enumerate() {
        counts[usize::from(b)] += 1;
        if counts[usize::from(b)] == 1 {
            distinct += 1;
        }
        if i >= width {
            let gone = usize::from(stream[i - width]);
            counts[gone] -= 1;
            if counts[gone] == 0 {
                distinct -= 1;
            }
        }
        if distinct == width {
            return Some(i + 1);
        }
    }
    None
}

fn solve_for(stream: &[u8], width: usize) -> Result<String, SolveError> {
    first_marker(stream, width)
        .map(|n| n.to_string())
        .ok_or_else(|| SolveError::failed(format!("no run of {width} distinct characters")))
}

impl AocParser for Solver {
    type SharedData<'a> = &'a [u8];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.trim().as_bytes())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_for(shared, 4)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_for(shared, 14)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_markers() {
        for (stream, at) in [
            ("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 7),
            ("bvwbjplbgvbhsrlpgdmjqwftvncz", 5),
            ("nppdvjthqldpwncqszvftbrmjlhg", 6),
            ("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", 10),
            ("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", 11),
        ] {
            assert_eq!(first_marker(stream.as_bytes(), 4), Some(at), "{stream}");
        }
        assert_eq!(first_marker(b"aabbaabbcc", 4), None);
    }

    #[test]
    fn test_message_markers() {
        for (stream, at) in [
            ("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 19),
            ("bvwbjplbgvbhsrlpgdmjqwftvncz", 23),
            ("nppdvjthqldpwncqszvftbrmjlhg", 23),
            ("nznrnfrfntjfmvfwmzdfjlvtqnbhcprsg", 29),
            ("zcfzfwzzqfrljwzlrfnpqdbhtmscgvjw", 26),
        ] {
            let mut shared = Solver::parse(stream).unwrap();
            assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), at.to_string());
        }
        let mut chatter = Solver::parse("hellomyfriendhowareyouthisfineevening").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut chatter).is_err());
    }
}
