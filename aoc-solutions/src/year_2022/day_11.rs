use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::math::lcm;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 11, tags = ["2022", "simulation", "modular-arithmetic"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add(u64),
    Multiply(u64),
    Square,
}

impl Operation {
    fn apply(self, worry: u64) -> u64 {
        match self {
            Operation::Add(n) => worry + n,
            Operation::Multiply(n) => worry * n,
            Operation::Square => worry * worry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
}

impl Monkey {
    fn parse(block: &str) -> anyhow::Result<Self> {
        let mut lines = block.lines().map(str::trim).skip(1);
        let mut field = |prefix: &str| -> anyhow::Result<&str> {
            lines
                .next()
                .and_then(|line| line.strip_prefix(prefix))
                .ok_or_else(|| anyhow!("expected {prefix:?}"))
        };
        let number = |text: &str| -> anyhow::Result<u64> {
            text.trim().parse().with_context(|| format!("invalid number {text:?}"))
        };

        let items = field("Starting items:")?
            .split(',')
            .map(number)
            .collect::<anyhow::Result<_>>()?;
        let words: Vec<&str> = field("Operation: new = old")?.split_whitespace().collect();
        let operation = match words[..] {
            ["*", "old"] => Operation::Square,
            ["*", n] => Operation::Multiply(number(n)?),
            ["+", n] => Operation::Add(number(n)?),
            _ => bail!("unsupported operation {words:?}"),
        };
        let divisor = number(field("Test: divisible by")?)?;
        if divisor == 0 {
            bail!("divisible by zero");
        }
        let if_true = number(field("If true: throw to monkey")?)? as usize;
        let if_false = number(field("If false: throw to monkey")?)? as usize;
        Ok(Monkey {
            items,
            operation,
            divisor,
            if_true,
            if_false,
        })
    }
}

/// Product of the two highest inspection counts after `rounds`
///
/// Without relief, worry levels are kept modulo the common multiple of
/// every divisor, which leaves every test result unchanged.
fn monkey_business(monkeys: &[Monkey], rounds: usize, relief: bool) -> u64 {
    let mut monkeys = monkeys.to_vec();
    let modulus = monkeys.iter().fold(1, |m, monkey| lcm(m, monkey.divisor as i64)) as u64;
    let mut inspected = vec![0u64; monkeys.len()];

    for _ in 0..rounds {
        for i in 0..monkeys.len() {
            let items = std::mem::take(&mut monkeys[i].items);
            inspected[i] += items.len() as u64;
            let Monkey {
                operation,
                divisor,
                if_true,
                if_false,
                ..
            } = monkeys[i];
            for worry in items {
                let worry = operation.apply(worry);
                let worry = if relief { worry / 3 } else { worry % modulus };
                let target = if worry % divisor == 0 { if_true } else { if_false };
                monkeys[target].items.push(worry);
            }
        }
    }

    inspected.sort_unstable_by(|a, b| b.cmp(a));
    inspected.iter().take(2).product()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parse = || -> anyhow::Result<Vec<Monkey>> {
            let monkeys = input
                .replace("\r\n", "\n")
                .split("\n\n")
                .filter(|block| !block.trim().is_empty())
                .map(Monkey::parse)
                .collect::<anyhow::Result<Vec<_>>>()?;
            if let Some(m) = monkeys
                .iter()
                .find(|m| m.if_true >= monkeys.len() || m.if_false >= monkeys.len())
            {
                bail!("throw to a missing monkey from {m:?}");
            }
            Ok(monkeys)
        };
        parse().map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 20, true).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 10_000, false).to_string())
    }
}
