use std::collections::VecDeque;

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 18, tags = ["2017", "vm", "concurrency"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Reg(usize),
    Lit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    Snd(Value),
    Set(usize, Value),
    Add(usize, Value),
    Mul(usize, Value),
    Mod(usize, Value),
    Rcv(usize),
    Jgz(Value, Value),
}

fn register(token: &str) -> anyhow::Result<usize> {
    match token.as_bytes() {
        &[r @ b'a'..=b'z'] => Ok((r - b'a') as usize),
        _ => bail!("invalid register {token:?}"),
    }
}

fn value(token: &str) -> anyhow::Result<Value> {
    match token.parse() {
        Ok(n) => Ok(Value::Lit(n)),
        Err(_) => register(token).map(Value::Reg),
    }
}

impl Instr {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        Ok(match words[..] {
            ["snd", x] => Instr::Snd(value(x)?),
            ["set", x, y] => Instr::Set(register(x)?, value(y)?),
            ["add", x, y] => Instr::Add(register(x)?, value(y)?),
            ["mul", x, y] => Instr::Mul(register(x)?, value(y)?),
            ["mod", x, y] => Instr::Mod(register(x)?, value(y)?),
            ["rcv", x] => Instr::Rcv(register(x)?),
            ["jgz", x, y] => Instr::Jgz(value(x)?, value(y)?),
            _ => bail!("unknown instruction"),
        })
    }
}

/// What a single step did
enum Step {
    Continue,
    Send(i64),
    /// `rcv` on the given register; the program counter has not moved
    Receive(usize),
    Terminated,
}

#[derive(Debug, Clone)]
struct Program {
    registers: [i64; 26],
    pc: i64,
}

impl Program {
    fn new(id: i64) -> Self {
        let mut registers = [0; 26];
        registers[(b'p' - b'a') as usize] = id;
        Self { registers, pc: 0 }
    }

    fn get(&self, value: Value) -> i64 {
        match value {
            Value::Reg(r) => self.registers[r],
            Value::Lit(n) => n,
        }
    }

    fn step(&mut self, code: &[Instr]) -> Result<Step, SolveError> {
        let Some(&instr) = usize::try_from(self.pc).ok().and_then(|i| code.get(i)) else {
            return Ok(Step::Terminated);
        };
        let mut jump = 1;
        let step = match instr {
            Instr::Snd(x) => Step::Send(self.get(x)),
            Instr::Set(r, y) => {
                self.registers[r] = self.get(y);
                Step::Continue
            }
            Instr::Add(r, y) => {
                self.registers[r] = self.registers[r].wrapping_add(self.get(y));
                Step::Continue
            }
            Instr::Mul(r, y) => {
                self.registers[r] = self.registers[r].wrapping_mul(self.get(y));
                Step::Continue
            }
            Instr::Mod(r, y) => {
                let divisor = self.get(y);
                self.registers[r] = self.registers[r]
                    .checked_rem_euclid(divisor)
                    .ok_or_else(|| SolveError::failed(format!("mod by {divisor} at {}", self.pc)))?;
                Step::Continue
            }
            Instr::Rcv(r) => return Ok(Step::Receive(r)),
            Instr::Jgz(x, y) => {
                if self.get(x) > 0 {
                    jump = self.get(y);
                }
                Step::Continue
            }
        };
        self.pc += jump;
        Ok(step)
    }

    /// Complete a pending `rcv`
    fn receive(&mut self, r: usize, value: i64) {
        self.registers[r] = value;
        self.pc += 1;
    }

    /// Run until blocked on an empty inbox or terminated
    ///
    /// Returns the number of values sent.
    fn run_until_blocked(
        &mut self,
        code: &[Instr],
        inbox: &mut VecDeque<i64>,
        outbox: &mut VecDeque<i64>,
    ) -> Result<usize, SolveError> {
        let mut sent = 0;
        loop {
            match self.step(code)? {
                Step::Continue => {}
                Step::Send(v) => {
                    outbox.push_back(v);
                    sent += 1;
                }
                Step::Receive(r) => match inbox.pop_front() {
                    Some(v) => self.receive(r, v),
                    None => return Ok(sent),
                },
                Step::Terminated => return Ok(sent),
            }
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instr>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Instr::parse(line).with_context(|| format!("line {}: {line:?}", i + 1)))
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

/// `snd` plays a sound and `rcv` with a nonzero register recovers the last one
fn recovered_frequency(code: &[Instr]) -> Result<i64, SolveError> {
    let mut program = Program::new(0);
    let mut last_sound = None;
    loop {
        match program.step(code)? {
            Step::Continue => {}
            Step::Send(v) => last_sound = Some(v),
            Step::Receive(r) => {
                let current = program.registers[r];
                if current != 0 {
                    return last_sound.ok_or_else(|| SolveError::failed("rcv before any sound"));
                }
                program.receive(r, current);
            }
            Step::Terminated => return Err(SolveError::failed("program ended without recovering a sound")),
        }
    }
}

/// Two copies exchanging values; counts the sends of program 1 until deadlock
fn duet_sends(code: &[Instr]) -> Result<usize, SolveError> {
    let mut programs = [Program::new(0), Program::new(1)];
    let mut queues = [VecDeque::new(), VecDeque::new()];
    let mut sent_by_one = 0;
    loop {
        let [to_zero, to_one] = &mut queues;
        let sent_by_zero = programs[0].run_until_blocked(code, to_zero, to_one)?;
        let sent = programs[1].run_until_blocked(code, to_one, to_zero)?;
        sent_by_one += sent;
        if sent_by_zero == 0 && sent == 0 {
            return Ok(sent_by_one);
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        recovered_frequency(shared).map(|f| f.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        duet_sends(shared).map(|n| n.to_string())
    }
}
