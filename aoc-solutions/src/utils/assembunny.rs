//! The assembunny register machine (`cpy inc dec jnz tgl out`).
//!
//! Programs are run with two peephole rewrites, applied only when the
//! instructions at the program counter match exactly:
//!
//! - add loop: `inc x; dec y; jnz y -2` (either order) becomes `x += y; y = 0`
//! - multiply loop: `cpy s c; inc a; dec c; jnz c -2; dec d; jnz d -5`
//!   becomes `a += s * d; c = 0; d = 0`
//!
//! `tgl` rewrites instructions in place, so the patterns are matched against
//! the live program on every step.

use anyhow::{Context, anyhow, bail};

/// Register file `a b c d`
pub type Registers = [i64; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(usize),
    Lit(i64),
}

impl Operand {
    fn parse(token: &str) -> anyhow::Result<Self> {
        match token.as_bytes() {
            [r @ b'a'..=b'd'] => Ok(Operand::Reg(usize::from(r - b'a'))),
            _ => token
                .parse()
                .map(Operand::Lit)
                .with_context(|| format!("invalid operand {token:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    Cpy(Operand, Operand),
    Inc(Operand),
    Dec(Operand),
    Jnz(Operand, Operand),
    Tgl(Operand),
    Out(Operand),
}

impl Instr {
    /// The instruction after `tgl` hits it
    fn toggled(self) -> Self {
        match self {
            Instr::Inc(x) => Instr::Dec(x),
            Instr::Dec(x) | Instr::Tgl(x) | Instr::Out(x) => Instr::Inc(x),
            Instr::Jnz(x, y) => Instr::Cpy(x, y),
            Instr::Cpy(x, y) => Instr::Jnz(x, y),
        }
    }
}

/// Parse one instruction per line
pub fn parse_program(input: &str) -> anyhow::Result<Vec<Instr>> {
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| parse_instr(line).with_context(|| format!("(line {}) {line:?}", idx + 1)))
        .collect()
}

fn parse_instr(line: &str) -> anyhow::Result<Instr> {
    let mut tokens = line.split_whitespace();
    let op = tokens.next().ok_or_else(|| anyhow!("empty instruction"))?;
    let args = tokens.map(Operand::parse).collect::<anyhow::Result<Vec<_>>>()?;

    Ok(match (op, args.as_slice()) {
        ("cpy", &[x, y]) => Instr::Cpy(x, y),
        ("inc", &[x]) => Instr::Inc(x),
        ("dec", &[x]) => Instr::Dec(x),
        ("jnz", &[x, y]) => Instr::Jnz(x, y),
        ("tgl", &[x]) => Instr::Tgl(x),
        ("out", &[x]) => Instr::Out(x),
        _ => bail!("unknown instruction or wrong arity"),
    })
}

enum Event {
    Continue,
    Output(i64),
    Halted,
}

/// A running program
///
/// Iterating a machine yields the values it `out`puts; the iterator ends
/// when the program counter leaves the program.
#[derive(Debug, Clone)]
pub struct Machine {
    program: Vec<Instr>,
    pub registers: Registers,
    pc: i64,
    peepholes: bool,
}

impl Machine {
    pub fn new(program: &[Instr], registers: Registers) -> Self {
        Self {
            program: program.to_vec(),
            registers,
            pc: 0,
            peepholes: true,
        }
    }

    /// Turn the loop rewrites on or off
    pub fn with_peepholes(mut self, enabled: bool) -> Self {
        self.peepholes = enabled;
        self
    }

    /// Run to completion and return the final registers
    ///
    /// Output is discarded.
    pub fn run(mut self) -> Registers {
        while !matches!(self.step(), Event::Halted) {}
        self.registers
    }

    fn value(&self, operand: Operand) -> i64 {
        match operand {
            Operand::Reg(r) => self.registers[r],
            Operand::Lit(v) => v,
        }
    }

    fn step(&mut self) -> Event {
        let Some(&instr) = usize::try_from(self.pc).ok().and_then(|pc| self.program.get(pc)) else {
            return Event::Halted;
        };

        if self.peepholes && self.apply_peephole() {
            return Event::Continue;
        }

        let mut event = Event::Continue;
        let mut next = self.pc + 1;
        match instr {
            Instr::Cpy(src, Operand::Reg(dst)) => self.registers[dst] = self.value(src),
            Instr::Inc(Operand::Reg(r)) => self.registers[r] += 1,
            Instr::Dec(Operand::Reg(r)) => self.registers[r] -= 1,
            Instr::Jnz(cond, offset) => {
                if self.value(cond) != 0 {
                    next = self.pc + self.value(offset);
                }
            }
            Instr::Tgl(offset) => {
                let target = self.pc + self.value(offset);
                if let Some(slot) = usize::try_from(target)
                    .ok()
                    .and_then(|t| self.program.get_mut(t))
                {
                    *slot = slot.toggled();
                }
            }
            Instr::Out(x) => event = Event::Output(self.value(x)),
            // invalid after a toggle, e.g. `cpy 1 2`
            Instr::Cpy(..) | Instr::Inc(_) | Instr::Dec(_) => {}
        }
        self.pc = next;
        event
    }

    /// Execute a recognised loop in one go, returning whether one matched
    fn apply_peephole(&mut self) -> bool {
        use Instr::*;
        use Operand::*;

        let Ok(pc) = usize::try_from(self.pc) else {
            return false;
        };

        if let Some(window) = self.program.get(pc..pc + 3)
            && let [Inc(Reg(x)), Dec(Reg(y)), Jnz(Reg(z), Lit(-2))]
            | [Dec(Reg(y)), Inc(Reg(x)), Jnz(Reg(z), Lit(-2))] = *window
            && x != y
            && z == y
            && self.registers[y] > 0
        {
            self.registers[x] += self.registers[y];
            self.registers[y] = 0;
            self.pc += 3;
            return true;
        }

        if let Some(window) = self.program.get(pc..pc + 6)
            && let [
                Cpy(src, Reg(c)),
                Inc(Reg(a)),
                Dec(Reg(c2)),
                Jnz(Reg(c3), Lit(-2)),
                Dec(Reg(d)),
                Jnz(Reg(d2), Lit(-5)),
            ] = *window
            && c == c2
            && c == c3
            && d == d2
            && a != c
            && a != d
            && c != d
            && src != Reg(c)
            && src != Reg(d)
        {
            let factor = self.value(src);
            if factor > 0 && self.registers[d] > 0 {
                self.registers[a] += factor * self.registers[d];
                self.registers[c] = 0;
                self.registers[d] = 0;
                self.pc += 6;
                return true;
            }
        }

        false
    }
}

impl Iterator for Machine {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            match self.step() {
                Event::Continue => {}
                Event::Output(value) => return Some(value),
                Event::Halted => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, registers: Registers) -> Registers {
        Machine::new(&parse_program(source).unwrap(), registers).run()
    }

    #[test]
    fn test_monorail_example() {
        let source = "cpy 41 a\ninc a\ninc a\ndec a\njnz a 2\ndec a";
        assert_eq!(run(source, [0; 4])[0], 42);
    }

    #[test]
    fn test_toggle_example() {
        let source = "cpy 2 a\ntgl a\ntgl a\ntgl a\ncpy 1 a\ndec a\ndec a";
        assert_eq!(run(source, [0; 4])[0], 3);
    }

    #[test]
    fn test_loops_match_naive_execution() {
        let add = "cpy 7 b\ninc a\ndec b\njnz b -2";
        let mul = "cpy 3 b\ncpy 4 d\ncpy b c\ninc a\ndec c\njnz c -2\ndec d\njnz d -5";
        for (source, a) in [(add, 7), (mul, 12)] {
            let program = parse_program(source).unwrap();
            let fast = Machine::new(&program, [0; 4]).run();
            let slow = Machine::new(&program, [0; 4]).with_peepholes(false).run();
            assert_eq!(fast, slow);
            assert_eq!(fast[0], a);
        }
    }

    #[test]
    fn test_output_stream() {
        let source = "out 0\nout 1\njnz 1 -2";
        let machine = Machine::new(&parse_program(source).unwrap(), [0; 4]);
        assert_eq!(machine.take(5).collect::<Vec<_>>(), [0, 1, 0, 1, 0]);

        let halting = Machine::new(&parse_program("out a\ninc a\nout a").unwrap(), [5, 0, 0, 0]);
        assert_eq!(halting.collect::<Vec<_>>(), [5, 6]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_program("cpy 1").is_err());
        assert!(parse_program("mov a b").is_err());
        let err = parse_program("inc a\ninc e").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
}
