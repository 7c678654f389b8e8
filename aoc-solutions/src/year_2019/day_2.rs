use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 2, tags = ["2019", "intcode"])]
pub struct Solver;

const GRAVITY_ASSIST: usize = 19690720;

/// Run an add/multiply intcode program to completion
///
/// Reading or writing outside memory, or an unknown opcode, is an error.
fn run(mut memory: Vec<usize>) -> Result<Vec<usize>, SolveError> {
    let mut pc = 0;
    loop {
        let op = *memory
            .get(pc)
            .ok_or_else(|| SolveError::failed(format!("ran off the end at {pc}")))?;
        if op == 99 {
            return Ok(memory);
        }
        let [a, b, out] = memory
            .get(pc + 1..pc + 4)
            .and_then(|args| <[usize; 3]>::try_from(args).ok())
            .ok_or_else(|| SolveError::failed(format!("truncated instruction at {pc}")))?;
        let read = |addr: usize| {
            memory
                .get(addr)
                .copied()
                .ok_or_else(|| SolveError::failed(format!("address {addr} out of range")))
        };
        let value = match op {
            1 => read(a)?.wrapping_add(read(b)?),
            2 => read(a)?.wrapping_mul(read(b)?),
            other => return Err(SolveError::failed(format!("unknown opcode {other} at {pc}"))),
        };
        *memory
            .get_mut(out)
            .ok_or_else(|| SolveError::failed(format!("address {out} out of range")))? = value;
        pc += 4;
    }
}

fn run_with(program: &[usize], noun: usize, verb: usize) -> Result<usize, SolveError> {
    let mut memory = program.to_vec();
    if memory.len() < 3 {
        return Err(SolveError::failed("program too short to patch"));
    }
    memory[1] = noun;
    memory[2] = verb;
    Ok(run(memory)?[0])
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<usize>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .split(',')
            .map(|value| value.parse().with_context(|| format!("invalid value {value:?}")))
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run_with(shared, 12, 2)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        for noun in 0..100 {
            for verb in 0..100 {
                // bad patches may crash the program; those pairs are simply wrong
                if run_with(shared, noun, verb).is_ok_and(|v| v == GRAVITY_ASSIST) {
                    return Ok((100 * noun + verb).to_string());
                }
            }
        }
        Err(SolveError::failed("no noun and verb produce the target"))
    }
}
