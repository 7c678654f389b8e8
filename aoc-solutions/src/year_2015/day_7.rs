use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 7, tags = ["2015", "dp", "graph"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal<'a> {
    Wire(&'a str),
    Value(u16),
}

impl<'a> Signal<'a> {
    fn parse(token: &'a str) -> anyhow::Result<Self> {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            token
                .parse()
                .map(Signal::Value)
                .with_context(|| format!("signal {token:?} does not fit in 16 bits"))
        } else if token.bytes().all(|b| b.is_ascii_lowercase()) {
            Ok(Signal::Wire(token))
        } else {
            bail!("invalid signal {token:?}")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate<'a> {
    Direct(Signal<'a>),
    Not(Signal<'a>),
    And(Signal<'a>, Signal<'a>),
    Or(Signal<'a>, Signal<'a>),
    LShift(Signal<'a>, Signal<'a>),
    RShift(Signal<'a>, Signal<'a>),
}

impl<'a> Gate<'a> {
    fn parse(expr: &'a str) -> anyhow::Result<Self> {
        let words: Vec<&str> = expr.split_whitespace().collect();
        Ok(match words[..] {
            [x] => Gate::Direct(Signal::parse(x)?),
            ["NOT", x] => Gate::Not(Signal::parse(x)?),
            [x, op, y] => {
                let (x, y) = (Signal::parse(x)?, Signal::parse(y)?);
                match op {
                    "AND" => Gate::And(x, y),
                    "OR" => Gate::Or(x, y),
                    "LSHIFT" => Gate::LShift(x, y),
                    "RSHIFT" => Gate::RShift(x, y),
                    other => bail!("unknown gate {other:?}"),
                }
            }
            _ => bail!("unrecognised expression {expr:?}"),
        })
    }

    fn inputs(&self) -> Vec<Signal<'a>> {
        match *self {
            Gate::Direct(x) | Gate::Not(x) => vec![x],
            Gate::And(x, y) | Gate::Or(x, y) | Gate::LShift(x, y) | Gate::RShift(x, y) => vec![x, y],
        }
    }
}

/// Wire name to the gate driving it
#[derive(Debug, Clone)]
pub struct Circuit<'a> {
    gates: HashMap<&'a str, Gate<'a>>,
}

impl<'a> Circuit<'a> {
    fn parse(input: &'a str) -> anyhow::Result<Self> {
        let mut gates = HashMap::new();
        for (idx, line) in input.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let (expr, target) = line
                .split_once(" -> ")
                .ok_or_else(|| anyhow!("(line {}) missing ' -> '", idx + 1))?;
            let target = match Signal::parse(target.trim()) {
                Ok(Signal::Wire(name)) => name,
                _ => bail!("(line {}) invalid target wire {target:?}", idx + 1),
            };
            let gate = Gate::parse(expr).map_err(|e| anyhow!("(line {}) {}", idx + 1, e))?;
            if gates.insert(target, gate).is_some() {
                bail!("(line {}) wire {target:?} is driven twice", idx + 1);
            }
        }

        let circuit = Circuit { gates };
        circuit.check_wiring()?;
        Ok(circuit)
    }

    fn wire_inputs(&self, wire: &str) -> impl Iterator<Item = &'a str> {
        self.gates
            .get(wire)
            .map(Gate::inputs)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|signal| match signal {
                Signal::Wire(name) => Some(name),
                Signal::Value(_) => None,
            })
    }

    /// Every input wire is driven and there is no feedback loop
    fn check_wiring(&self) -> anyhow::Result<()> {
        let mut pending: HashMap<&str, usize> = HashMap::new();
        let mut consumers: HashMap<&str, Vec<&str>> = HashMap::new();
        for &wire in self.gates.keys() {
            let inputs: Vec<_> = self.wire_inputs(wire).collect();
            if let Some(missing) = inputs.iter().find(|w| !self.gates.contains_key(*w)) {
                bail!("wire {missing:?} feeds {wire:?} but is never driven");
            }
            pending.insert(wire, inputs.len());
            for input in inputs {
                consumers.entry(input).or_default().push(wire);
            }
        }

        let mut ready: Vec<&str> = pending.iter().filter(|(_, n)| **n == 0).map(|(w, _)| *w).collect();
        let mut resolved = 0;
        while let Some(wire) = ready.pop() {
            resolved += 1;
            for &consumer in consumers.get(wire).into_iter().flatten() {
                if let Some(n) = pending.get_mut(consumer) {
                    *n -= 1;
                    if *n == 0 {
                        ready.push(consumer);
                    }
                }
            }
        }
        if resolved != self.gates.len() {
            bail!("circuit contains a feedback loop");
        }
        Ok(())
    }

    fn with_override(&self, wire: &'a str, value: u16) -> Self {
        let mut gates = self.gates.clone();
        gates.insert(wire, Gate::Direct(Signal::Value(value)));
        Circuit { gates }
    }

    fn signal(&self, wire: &'a str) -> Result<u16, SolveError> {
        if !self.gates.contains_key(wire) {
            return Err(SolveError::failed(format!("no wire named {wire:?}")));
        }
        Ok(DpCache::new(HashMapBackend::new(), self).get(&wire))
    }
}

impl<'a> DpProblem<&'a str, u16> for &Circuit<'a> {
    fn deps(&self, wire: &&'a str) -> Vec<&'a str> {
        self.wire_inputs(wire).collect()
    }

    fn compute(&self, wire: &&'a str, deps: Vec<u16>) -> u16 {
        let Some(gate) = self.gates.get(wire) else {
            return 0;
        };
        let mut deps = deps.into_iter();
        let mut eval = |signal: Signal| match signal {
            Signal::Value(v) => v,
            Signal::Wire(_) => deps.next().unwrap_or_default(),
        };
        match *gate {
            Gate::Direct(x) => eval(x),
            Gate::Not(x) => !eval(x),
            Gate::And(x, y) => eval(x) & eval(y),
            Gate::Or(x, y) => eval(x) | eval(y),
            Gate::LShift(x, y) => {
                let x = eval(x);
                x.checked_shl(u32::from(eval(y))).unwrap_or(0)
            }
            Gate::RShift(x, y) => {
                let x = eval(x);
                x.checked_shr(u32::from(eval(y))).unwrap_or(0)
            }
        }
    }
}

pub struct SharedData<'a> {
    circuit: Circuit<'a>,
    signal_a: Option<u16>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Circuit::parse(input)
            .map(|circuit| SharedData {
                circuit,
                signal_a: None,
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn signal_a(shared: &mut SharedData<'_>) -> Result<u16, SolveError> {
    if let Some(value) = shared.signal_a {
        return Ok(value);
    }
    let value = shared.circuit.signal("a")?;
    Ok(*shared.signal_a.insert(value))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        signal_a(shared).map(|v| v.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let a = signal_a(shared)?;
        shared.circuit.with_override("b", a).signal("a").map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
123 -> x
456 -> y
x AND y -> d
x OR y -> e
x LSHIFT 2 -> f
y RSHIFT 2 -> g
NOT x -> h
NOT y -> i";

    #[test]
    fn test_example_signals() {
        let circuit = Circuit::parse(EXAMPLE).unwrap();
        for (wire, expected) in [
            ("d", 72),
            ("e", 507),
            ("f", 492),
            ("g", 114),
            ("h", 65412),
            ("i", 65079),
            ("x", 123),
            ("y", 456),
        ] {
            assert_eq!(circuit.signal(wire).unwrap(), expected, "wire {wire}");
        }
        assert!(circuit.signal("a").is_err());
    }

    #[test]
    fn test_shift_masks_to_16_bits() {
        let circuit = Circuit::parse("65535 -> x\nx LSHIFT 4 -> a\nx LSHIFT 16 -> b").unwrap();
        assert_eq!(circuit.signal("a").unwrap(), 0xfff0);
        assert_eq!(circuit.signal("b").unwrap(), 0);
    }

    #[test]
    fn test_override_b() {
        let mut shared = Solver::parse("b LSHIFT 1 -> a\n3 -> b").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "6");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "12");
    }

    #[test]
    fn test_bad_wiring() {
        assert!(Solver::parse("x -> a").is_err());
        assert!(Solver::parse("b -> a\na -> b").is_err());
        assert!(Solver::parse("1 -> a\n2 -> a").is_err());
        assert!(Solver::parse("1 XOR 2 -> a").is_err());
    }
}
