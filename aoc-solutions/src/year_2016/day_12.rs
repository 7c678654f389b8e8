use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::assembunny::{Instr, Machine, parse_program};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 12, tags = ["2016", "vm", "assembunny"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instr>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_program(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(Machine::new(shared, [0; 4]).run()[0].to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(Machine::new(shared, [0, 0, 1, 0]).run()[0].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
cpy 41 a
inc a
inc a
dec a
jnz a 2
dec a";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "42");
    }

    #[test]
    fn test_c_starts_at_one() {
        // a = 5 + (c ? 7 : 0), with the add loop rewritten
        let source = "cpy 5 a\njnz c 2\njnz 1 4\ncpy 7 b\ninc a\ndec b\njnz b -2";
        let mut shared = Solver::parse(source).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "5");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "12");
    }
}
