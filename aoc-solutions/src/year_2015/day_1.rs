use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 1, tags = ["2015", "parsing"])]
pub struct Solver;

impl AocParser for Solver {
    /// Floor deltas, one per instruction
    type SharedData<'a> = Vec<i8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .bytes()
            .enumerate()
            .map(|(idx, byte)| match byte {
                b'(' => Ok(1),
                b')' => Ok(-1),
                other => Err(ParseError::InvalidFormat(format!(
                    "(position {}) expected '(' or ')', found {:?}",
                    idx + 1,
                    other as char
                ))),
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(final_floor(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        enters_basement(shared)
            .map(|position| position.to_string())
            .ok_or_else(|| SolveError::failed("Santa never enters the basement"))
    }
}

fn final_floor(moves: &[i8]) -> i64 {
    moves.iter().map(|&m| i64::from(m)).sum()
}

/// 1-based position of the first move that reaches floor -1
fn enters_basement(moves: &[i8]) -> Option<usize> {
    moves
        .iter()
        .scan(0i64, |floor, &m| {
            *floor += i64::from(m);
            Some(*floor)
        })
        .position(|floor| floor < 0)
        .map(|idx| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(input: &str) -> i64 {
        final_floor(&Solver::parse(input).unwrap())
    }

    #[test]
    fn test_final_floor() {
        assert_eq!(floor("(())"), 0);
        assert_eq!(floor("()()"), 0);
        assert_eq!(floor("((("), 3);
        assert_eq!(floor("(()(()("), 3);
        assert_eq!(floor("))((((("), 3);
        assert_eq!(floor("())"), -1);
        assert_eq!(floor("))("), -1);
        assert_eq!(floor(")))"), -3);
        assert_eq!(floor(")())())"), -3);
    }

    #[test]
    fn test_enters_basement() {
        assert_eq!(enters_basement(&Solver::parse(")").unwrap()), Some(1));
        assert_eq!(enters_basement(&Solver::parse("()())").unwrap()), Some(5));
        assert_eq!(enters_basement(&Solver::parse("(((").unwrap()), None);
    }

    #[test]
    fn test_parts() {
        let mut shared = Solver::parse("()())\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "-1");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "5");
        assert!(Solver::parse("(x)").is_err());
    }
}
