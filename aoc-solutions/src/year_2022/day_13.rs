use std::cmp::Ordering;

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use serde_json::Value;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 13, tags = ["2022", "parsing", "sorting"])]
pub struct Solver;

/// Distress signal packet: an integer or a list of packets
#[derive(Debug, Clone)]
pub enum Packet {
    Int(u64),
    List(Vec<Packet>),
}

impl Packet {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let value: Value =
            serde_json::from_str(line).with_context(|| format!("invalid packet {line:?}"))?;
        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> anyhow::Result<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .map(Packet::Int)
                .with_context(|| format!("{n} is not a packet integer")),
            Value::Array(items) => items
                .iter()
                .map(Self::from_value)
                .collect::<anyhow::Result<_>>()
                .map(Packet::List),
            other => bail!("unexpected {other} in packet"),
        }
    }
}

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Int(a), Packet::Int(b)) => a.cmp(b),
            (Packet::List(a), Packet::List(b)) => a.cmp(b),
            // a bare integer compares as a one-element list
            (Packet::Int(_), Packet::List(b)) => std::slice::from_ref(self).cmp(b.as_slice()),
            (Packet::List(a), Packet::Int(_)) => a.as_slice().cmp(std::slice::from_ref(other)),
        }
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Packet {}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn divider(n: u64) -> Packet {
    Packet::List(vec![Packet::List(vec![Packet::Int(n)])])
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Packet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let packets = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Packet::parse)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;
        if packets.len() % 2 != 0 {
            return Err(ParseError::InvalidFormat("packets do not pair up".to_string()));
        }
        Ok(packets)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = shared
            .chunks(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] < pair[1])
            .map(|(i, _)| i + 1)
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // a divider's sorted position is one more than the packets below it
        let (two, six) = (divider(2), divider(6));
        let below_two = shared.iter().filter(|p| **p < two).count() + 1;
        let below_six = shared.iter().filter(|p| **p < six).count() + 2;
        Ok((below_two * below_six).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
[1,1,3,1,1]
[1,1,5,1,1]

[[1],[2,3,4]]
[[1],4]

[9]
[[8,7,6]]

[[4,4],4,4]
[[4,4],4,4,4]

[7,7,7,7]
[7,7,7]

[]
[3]

[[[]]]
[[]]

[1,[2,[3,[4,[5,6,7]]]],8,9]
[1,[2,[3,[4,[5,6,0]]]],8,9]
";

    #[test]
    fn test_pair_order() {
        let packets = Solver::parse(EXAMPLE).unwrap();
        let in_order: Vec<bool> = packets.chunks(2).map(|p| p[0] < p[1]).collect();
        assert_eq!(in_order, [true, true, false, true, false, true, false, false]);
    }

    #[test]
    fn test_parts() {
        let mut packets = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut packets).unwrap(), "13");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut packets).unwrap(), "140");
    }

    #[test]
    fn test_sorted_dividers() {
        let mut packets = Solver::parse(EXAMPLE).unwrap();
        packets.extend([divider(2), divider(6)]);
        packets.sort();
        let two = packets.iter().position(|p| *p == divider(2)).unwrap();
        let six = packets.iter().position(|p| *p == divider(6)).unwrap();
        assert_eq!((two + 1, six + 1), (10, 14));
    }

    #[test]
    fn test_bad_packets() {
        assert!(Solver::parse("[1,\"a\"]\n[2]").is_err());
        assert!(Solver::parse("[1,-2]\n[2]").is_err());
        assert!(Solver::parse("[1]").is_err());
    }
}
