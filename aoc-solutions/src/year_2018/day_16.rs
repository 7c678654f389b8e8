use std::sync::LazyLock;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 16, tags = ["2018", "vm", "deduction"])]
pub struct Solver;

type Registers = [usize; 4];
/// Opcode number followed by the A, B and C operands
type Encoded = [usize; 4];

static NUMBERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("number pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Addr,
    Addi,
    Mulr,
    Muli,
    Banr,
    Bani,
    Borr,
    Bori,
    Setr,
    Seti,
    Gtir,
    Gtri,
    Gtrr,
    Eqir,
    Eqri,
    Eqrr,
}

impl Op {
    const ALL: [Op; 16] = [
        Op::Addr,
        Op::Addi,
        Op::Mulr,
        Op::Muli,
        Op::Banr,
        Op::Bani,
        Op::Borr,
        Op::Bori,
        Op::Setr,
        Op::Seti,
        Op::Gtir,
        Op::Gtri,
        Op::Gtrr,
        Op::Eqir,
        Op::Eqri,
        Op::Eqrr,
    ];

    /// Execute with operands `a`, `b`, `c`; `None` when a register operand
    /// is out of range
    fn apply(self, [a, b, c]: [usize; 3], regs: &Registers) -> Option<Registers> {
        let reg = |r: usize| regs.get(r).copied();
        let value = match self {
            Op::Addr => reg(a)? + reg(b)?,
            Op::Addi => reg(a)? + b,
            Op::Mulr => reg(a)? * reg(b)?,
            Op::Muli => reg(a)? * b,
            Op::Banr => reg(a)? & reg(b)?,
            Op::Bani => reg(a)? & b,
            Op::Borr => reg(a)? | reg(b)?,
            Op::Bori => reg(a)? | b,
            Op::Setr => reg(a)?,
            Op::Seti => a,
            Op::Gtir => usize::from(a > reg(b)?),
            Op::Gtri => usize::from(reg(a)? > b),
            Op::Gtrr => usize::from(reg(a)? > reg(b)?),
            Op::Eqir => usize::from(a == reg(b)?),
            Op::Eqri => usize::from(reg(a)? == b),
            Op::Eqrr => usize::from(reg(a)? == reg(b)?),
        };
        let mut out = *regs;
        *out.get_mut(c)? = value;
        Some(out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    before: Registers,
    instr: Encoded,
    after: Registers,
}

impl Sample {
    /// Bitmask over `Op::ALL` of the ops consistent with this sample
    fn candidates(&self) -> u16 {
        let [_, a, b, c] = self.instr;
        Op::ALL
            .iter()
            .enumerate()
            .filter(|(_, op)| op.apply([a, b, c], &self.before) == Some(self.after))
            .fold(0, |mask, (i, _)| mask | 1 << i)
    }
}

fn four_numbers(line: &str) -> anyhow::Result<[usize; 4]> {
    let numbers = NUMBERS
        .find_iter(line)
        .map(|m| m.as_str().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()?;
    numbers
        .try_into()
        .map_err(|v: Vec<usize>| anyhow!("expected 4 numbers, found {}", v.len()))
}

fn parse_sample(block: &str) -> anyhow::Result<Sample> {
    let lines: Vec<&str> = block.lines().map(str::trim).collect();
    let [before, instr, after] = lines[..] else {
        bail!("a sample has exactly three lines");
    };
    if !before.starts_with("Before:") || !after.starts_with("After:") {
        bail!("sample is missing its Before/After lines");
    }
    Ok(Sample {
        before: four_numbers(before)?,
        instr: four_numbers(instr)?,
        after: four_numbers(after)?,
    })
}

#[derive(Debug)]
pub struct Manual {
    samples: Vec<Sample>,
    program: Vec<Encoded>,
}

impl AocParser for Solver {
    type SharedData<'a> = Manual;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parse = || -> anyhow::Result<Manual> {
            let input = input.replace("\r\n", "\n");
            let (samples, program) = input.split_once("\n\n\n").unwrap_or((input.as_str(), ""));
            let samples = samples
                .split("\n\n")
                .filter(|block| !block.trim().is_empty())
                .enumerate()
                .map(|(i, block)| parse_sample(block).with_context(|| format!("sample {}", i + 1)))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let program = program
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(four_numbers)
                .collect::<anyhow::Result<Vec<_>>>()
                .context("test program")?;
            Ok(Manual { samples, program })
        };
        parse().map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

/// Assign each opcode number its op by repeatedly fixing numbers left with
/// a single candidate
fn resolve(mut candidates: [u16; 16]) -> Option<[Op; 16]> {
    let mut decoded = [None; 16];
    while decoded.iter().any(Option::is_none) {
        let (number, mask) = candidates
            .iter()
            .enumerate()
            .find(|&(n, mask)| decoded[n].is_none() && mask.count_ones() == 1)
            .map(|(n, &mask)| (n, mask))?;
        decoded[number] = Some(Op::ALL[mask.trailing_zeros() as usize]);
        for other in &mut candidates {
            *other &= !mask;
        }
    }
    let mut ops = [Op::Addr; 16];
    for (slot, op) in ops.iter_mut().zip(decoded) {
        *slot = op?;
    }
    Some(ops)
}

fn execute(ops: &[Op; 16], program: &[Encoded]) -> Option<Registers> {
    program.iter().try_fold([0; 4], |regs, &[opcode, a, b, c]| {
        ops.get(opcode)?.apply([a, b, c], &regs)
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ambiguous = shared
            .samples
            .iter()
            .filter(|s| s.candidates().count_ones() >= 3)
            .count();
        Ok(ambiguous.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut candidates = [u16::MAX; 16];
        for sample in &shared.samples {
            let slot = candidates
                .get_mut(sample.instr[0])
                .ok_or_else(|| SolveError::failed(format!("opcode {} out of range", sample.instr[0])))?;
            *slot &= sample.candidates();
        }
        let ops = resolve(candidates).ok_or_else(|| SolveError::failed("samples do not pin down every opcode"))?;
        let registers =
            execute(&ops, &shared.program).ok_or_else(|| SolveError::failed("test program uses an invalid register"))?;
        Ok(registers[0].to_string())
    }
}
