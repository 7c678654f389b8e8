use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use serde_json::Value;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 12, tags = ["2015", "json"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Value;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        serde_json::from_str(input.trim()).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// Sum of every number, skipping objects with a `"red"` value when asked
fn sum_numbers(value: &Value, ignore_red: bool) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or_default(),
        Value::Array(items) => items.iter().map(|v| sum_numbers(v, ignore_red)).sum(),
        Value::Object(fields) => {
            if ignore_red && fields.values().any(|v| v.as_str() == Some("red")) {
                return 0;
            }
            fields.values().map(|v| sum_numbers(v, ignore_red)).sum()
        }
        Value::Null | Value::Bool(_) | Value::String(_) => 0,
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_numbers(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_numbers(shared, true).to_string())
    }
}
