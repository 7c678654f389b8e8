use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 24, tags = ["2021", "vm", "reverse-engineering"])]
pub struct Solver;

const MODEL_DIGITS: usize = 14;
/// Instructions per input digit in the MONAD program
const BLOCK_LEN: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(usize),
    Lit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
    Div,
    Mod,
    Eql,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    Inp(usize),
    Op(AluOp, usize, Operand),
}

const W: usize = 0;
const X: usize = 1;
const Y: usize = 2;
const Z: usize = 3;

fn register(token: &str) -> anyhow::Result<usize> {
    match token {
        "w" => Ok(W),
        "x" => Ok(X),
        "y" => Ok(Y),
        "z" => Ok(Z),
        other => bail!("unknown register {other:?}"),
    }
}

fn operand(token: &str) -> anyhow::Result<Operand> {
    match token.parse() {
        Ok(n) => Ok(Operand::Lit(n)),
        Err(_) => register(token).map(Operand::Reg),
    }
}

impl Instr {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (op, a, b) = match words[..] {
            ["inp", a] => return Ok(Instr::Inp(register(a)?)),
            [op, a, b] => (op, a, b),
            _ => bail!("unknown instruction"),
        };
        let op = match op {
            "add" => AluOp::Add,
            "mul" => AluOp::Mul,
            "div" => AluOp::Div,
            "mod" => AluOp::Mod,
            "eql" => AluOp::Eql,
            other => bail!("unknown instruction {other:?}"),
        };
        Ok(Instr::Op(op, register(a)?, operand(b)?))
    }
}

/// Run the ALU over `inputs`; `None` on a missing input or an illegal
/// `div`/`mod`
fn run(program: &[Instr], inputs: &[i64]) -> Option<[i64; 4]> {
    let mut regs = [0i64; 4];
    let mut inputs = inputs.iter().copied();
    for &instr in program {
        let (op, a, b) = match instr {
            Instr::Inp(a) => {
                regs[a] = inputs.next()?;
                continue;
            }
            Instr::Op(op, a, b) => (op, a, b),
        };
        let lhs = regs[a];
        let rhs = match b {
            Operand::Reg(r) => regs[r],
            Operand::Lit(n) => n,
        };
        regs[a] = match op {
            AluOp::Add => lhs + rhs,
            AluOp::Mul => lhs * rhs,
            AluOp::Div => lhs.checked_div(rhs)?,
            AluOp::Mod if lhs >= 0 && rhs > 0 => lhs % rhs,
            AluOp::Mod => return None,
            AluOp::Eql => i64::from(lhs == rhs),
        };
    }
    Some(regs)
}

/// `digits[later] == digits[earlier] + offset` for the model number to leave
/// `z` at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constraint {
    earlier: usize,
    later: usize,
    offset: i64,
}

/// Pair up the blocks that push a base-26 digit onto `z` with the blocks
/// that pop it
///
/// A block dividing `z` by 1 pushes `input + y_offset`; a block dividing by
/// 26 pops the last push, and keeps `z` from growing only when the popped
/// value plus its `x_offset` equals its own input.
fn constraints(program: &[Instr]) -> anyhow::Result<Vec<Constraint>> {
    let mut pushed: Vec<(usize, i64)> = Vec::new();
    let mut found = Vec::new();
    for (block, code) in program.chunks(BLOCK_LEN).enumerate() {
        if code.len() != BLOCK_LEN {
            bail!("block {} has {} instructions, expected {BLOCK_LEN}", block + 1, code.len());
        }
        let x_offset = match code[5] {
            Instr::Op(AluOp::Add, X, Operand::Lit(n)) => n,
            other => bail!(
                "block {}: expected `add x N` as 6th instruction, found {other:?}",
                block + 1
            ),
        };
        match code[4] {
            Instr::Op(AluOp::Div, Z, Operand::Lit(1)) => match code[15] {
                Instr::Op(AluOp::Add, Y, Operand::Lit(y_offset)) => pushed.push((block, y_offset)),
                other => bail!(
                    "block {}: expected `add y N` as 16th instruction, found {other:?}",
                    block + 1
                ),
            },
            Instr::Op(AluOp::Div, Z, Operand::Lit(26)) => {
                let (earlier, y_offset) = pushed
                    .pop()
                    .with_context(|| format!("block {} pops from an empty stack", block + 1))?;
                found.push(Constraint {
                    earlier,
                    later: block,
                    offset: y_offset + x_offset,
                });
            }
            other => bail!(
                "block {}: expected `div z 1` or `div z 26`, found {other:?}",
                block + 1
            ),
        }
    }
    if !pushed.is_empty() {
        bail!("{} pushed digit(s) are never popped", pushed.len());
    }
    Ok(found)
}

/// Extreme model number meeting every constraint, largest or smallest
fn model_number(constraints: &[Constraint], largest: bool) -> Option<[i64; MODEL_DIGITS]> {
    let mut digits = [if largest { 9 } else { 1 }; MODEL_DIGITS];
    for c in constraints {
        if c.offset.abs() > 8 || c.later >= MODEL_DIGITS {
            return None;
        }
        let (earlier, later) = match (largest, c.offset >= 0) {
            (true, true) => (9 - c.offset, 9),
            (true, false) => (9, 9 + c.offset),
            (false, true) => (1, 1 + c.offset),
            (false, false) => (1 - c.offset, 1),
        };
        digits[c.earlier] = earlier;
        digits[c.later] = later;
    }
    Some(digits)
}

fn to_number(digits: &[i64]) -> String {
    digits.iter().map(|d| d.to_string()).collect()
}

pub struct Monad {
    program: Vec<Instr>,
    constraints: Vec<Constraint>,
}

impl Monad {
    /// Find the extreme model number and confirm it on the ALU
    fn solve(&self, largest: bool) -> Result<String, SolveError> {
        let digits = model_number(&self.constraints, largest)
            .ok_or_else(|| SolveError::failed("no model number satisfies every digit constraint"))?;
        match run(&self.program, &digits) {
            Some(regs) if regs[Z] == 0 => Ok(to_number(&digits)),
            Some(regs) => Err(SolveError::failed(format!(
                "{} leaves z = {} on the ALU",
                to_number(&digits),
                regs[Z]
            ))),
            None => Err(SolveError::failed("the ALU rejected the model number")),
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Monad;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parse = || -> anyhow::Result<Monad> {
            let program = input
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| {
                    Instr::parse(line).with_context(|| format!("line {}: {line:?}", i + 1))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            let constraints = constraints(&program)?;
            Ok(Monad { program, constraints })
        };
        parse().map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.solve(true)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.solve(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(source: &str) -> Vec<Instr> {
        source.lines().map(|line| Instr::parse(line).unwrap()).collect()
    }

    /// One MONAD digit block
    fn block(divisor: i64, x_offset: i64, y_offset: i64) -> String {
        format!(
            "inp w\nmul x 0\nadd x z\nmod x 26\ndiv z {divisor}\nadd x {x_offset}\neql x w\neql x 0\n\
             mul y 0\nadd y 25\nmul y x\nadd y 1\nmul z y\nmul y 0\nadd y w\nadd y {y_offset}\n\
             mul y x\nadd z y\n"
        )
    }

    #[test]
    fn test_alu_examples() {
        assert_eq!(run(&program("inp x\nmul x -1"), &[7]).unwrap()[X], -7);

        let triple = program("inp z\ninp x\nmul z 3\neql z x");
        assert_eq!(run(&triple, &[2, 6]).unwrap()[Z], 1);
        assert_eq!(run(&triple, &[2, 7]).unwrap()[Z], 0);

        let binary = program(
            "inp w\nadd z w\nmod z 2\ndiv w 2\nadd y w\nmod y 2\ndiv w 2\nadd x w\nmod x 2\ndiv w 2\nmod w 2",
        );
        assert_eq!(run(&binary, &[11]).unwrap(), [1, 0, 1, 1]);
    }

    #[test]
    fn test_alu_rejects() {
        assert_eq!(run(&program("inp x\ninp y"), &[1]), None);
        assert_eq!(run(&program("inp x\ndiv x 0"), &[1]), None);
        assert_eq!(run(&program("inp x\nmod x 5"), &[-1]), None);
    }

    #[test]
    fn test_constraints_from_skeleton() {
        // only the div/add lines matter; everything else is filler
        let mut lines = vec!["mul w 0"; 72];
        lines[4] = "div z 1";
        lines[5] = "add x 2";
        lines[15] = "add y 6";
        lines[22] = "div z 1";
        lines[23] = "add x 10";
        lines[33] = "add y 2";
        lines[40] = "div z 26";
        lines[41] = "add x -6";
        lines[51] = "add y 8";
        lines[58] = "div z 26";
        lines[59] = "add x -1";
        lines[60] = "add y 13";

        let mut found = constraints(&program(&lines.join("\n"))).unwrap();
        found.sort();
        assert_eq!(
            found,
            vec![
                Constraint {
                    earlier: 0,
                    later: 3,
                    offset: 5
                },
                Constraint {
                    earlier: 1,
                    later: 2,
                    offset: -4
                },
            ]
        );
        assert_eq!(to_number(&model_number(&found, true).unwrap()), "49599999999999");
        assert_eq!(to_number(&model_number(&found, false).unwrap()), "15161111111111");
    }

    #[test]
    fn test_full_program_checked_on_alu() {
        // pushes at 0..7, pops in reverse order at 7..14;
        // digit 13 - i must equal digit i + 1 - i
        let mut source = String::new();
        for i in 0..7 {
            source += &block(1, 11 + i, i + 1);
        }
        for i in (0..7).rev() {
            source += &block(26, -2 * i, 4);
        }
        let mut shared = Solver::parse(&source).unwrap();

        let largest = <Solver as PartSolver<1>>::solve(&mut shared).unwrap();
        let smallest = <Solver as PartSolver<2>>::solve(&mut shared).unwrap();
        assert_eq!(largest, "89999994567899");
        assert_eq!(smallest, "11234561111112");

        // bumping a constrained digit breaks the balance
        let mut digits: Vec<i64> = smallest.bytes().map(|b| i64::from(b - b'0')).collect();
        digits[13] += 1;
        assert_ne!(run(&shared.program, &digits).unwrap()[Z], 0);
    }

    #[test]
    fn test_unbalanced_program() {
        assert!(Solver::parse(&block(1, 12, 3)).is_err());
        assert!(Solver::parse(&block(26, -3, 3)).is_err());
        assert!(Solver::parse("inp w\nadd x 1").is_err());
        assert!(Solver::parse("inp q").is_err());
    }

    #[test]
    fn test_unreachable_offset() {
        let source = block(1, 12, 9) + &block(26, 0, 1);
        let mut shared = Solver::parse(&source).unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
    }
}
