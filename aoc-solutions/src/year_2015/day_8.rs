use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 8, tags = ["2015", "strings"])]
pub struct Solver;

impl AocParser for Solver {
    /// String literals as written, quotes included
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
                    Ok(line)
                } else {
                    Err(ParseError::InvalidFormat(format!("not a string literal: {line}")))
                }
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|literal| literal.len() - in_memory_len(literal))
            .sum::<usize>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for literal in shared.iter() {
            let encoded = serde_json::to_string(literal)
                .map_err(|e| SolveError::SolveFailed(Box::new(e)))?;
            total += encoded.len() - literal.len();
        }
        Ok(total.to_string())
    }
}

/// Characters the literal decodes to (`\\`, `\"` and `\xHH` are one each)
fn in_memory_len(literal: &str) -> usize {
    let body = &literal.as_bytes()[1..literal.len() - 1];
    let mut len = 0;
    let mut i = 0;
    while i < body.len() {
        i += match body[i..] {
            [b'\\', b'x', a, b, ..] if a.is_ascii_hexdigit() && b.is_ascii_hexdigit() => 4,
            [b'\\', b'\\' | b'"', ..] => 2,
            _ => 1,
        };
        len += 1;
    }
    len
}
