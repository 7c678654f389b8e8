use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::assembunny::{Instr, Machine, parse_program};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 25, tags = ["2016", "vm", "assembunny"])]
pub struct Solver;

/// Outputs checked before a seed is accepted
const SIGNAL_LENGTH: usize = 20;
const MAX_SEED: i64 = 100_000;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instr>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_program(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

/// Whether the program starts with the clock signal `0, 1, 0, 1, ...`
fn emits_clock(program: &[Instr], a: i64) -> bool {
    let signal = Machine::new(program, [a, 0, 0, 0]).take(SIGNAL_LENGTH);
    let mut emitted = 0;
    for (i, bit) in signal.enumerate() {
        if bit != (i % 2) as i64 {
            return false;
        }
        emitted += 1;
    }
    emitted == SIGNAL_LENGTH
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        (1..=MAX_SEED)
            .find(|&a| emits_clock(shared, a))
            .map(|a| a.to_string())
            .ok_or_else(|| SolveError::failed(format!("no seed up to {MAX_SEED} emits a clock signal")))
    }
}
