use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 23, tags = ["2015", "vm"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    Hlf(usize),
    Tpl(usize),
    Inc(usize),
    Jmp(i64),
    Jie(usize, i64),
    Jio(usize, i64),
}

fn register(token: &str) -> anyhow::Result<usize> {
    match token.trim() {
        "a" => Ok(0),
        "b" => Ok(1),
        other => bail!("unknown register {other:?}"),
    }
}

fn offset(token: &str) -> anyhow::Result<i64> {
    let token = token.trim();
    token
        .strip_prefix('+')
        .unwrap_or(token)
        .parse()
        .with_context(|| format!("invalid offset {token:?}"))
}

impl Instr {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let (op, args) = line
            .trim()
            .split_once(' ')
            .ok_or_else(|| anyhow!("missing operand"))?;
        let arg = |n: usize| {
            args.split(',')
                .nth(n)
                .ok_or_else(|| anyhow!("{op} expects {} operand(s)", n + 1))
        };
        Ok(match op {
            "hlf" => Instr::Hlf(register(arg(0)?)?),
            "tpl" => Instr::Tpl(register(arg(0)?)?),
            "inc" => Instr::Inc(register(arg(0)?)?),
            "jmp" => Instr::Jmp(offset(arg(0)?)?),
            "jie" => Instr::Jie(register(arg(0)?)?, offset(arg(1)?)?),
            "jio" => Instr::Jio(register(arg(0)?)?, offset(arg(1)?)?),
            other => bail!("unknown instruction {other:?}"),
        })
    }
}

/// Run until the instruction pointer leaves the program
fn run(program: &[Instr], mut registers: [u64; 2]) -> [u64; 2] {
    let mut pc = 0i64;
    while let Some(&instr) = usize::try_from(pc).ok().and_then(|i| program.get(i)) {
        pc += match instr {
            Instr::Hlf(r) => {
                registers[r] /= 2;
                1
            }
            Instr::Tpl(r) => {
                registers[r] *= 3;
                1
            }
            Instr::Inc(r) => {
                registers[r] += 1;
                1
            }
            Instr::Jmp(off) => off,
            Instr::Jie(r, off) if registers[r] % 2 == 0 => off,
            Instr::Jio(r, off) if registers[r] == 1 => off,
            Instr::Jie(..) | Instr::Jio(..) => 1,
        };
    }
    registers
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instr>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| Instr::parse(line).map_err(|e| anyhow!("(line {}) {}", idx + 1, e)))
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared, [0, 0])[1].to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared, [1, 0])[1].to_string())
    }
}
