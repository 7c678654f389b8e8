use std::collections::{HashMap, VecDeque};
use std::sync::LazyLock;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 16, tags = ["2022", "graph", "bitmask"])]
pub struct Solver;

static VALVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Valve (\w+) has flow rate=(\d+); tunnels? leads? to valves? (\w+(?:, \w+)*)$")
        .expect("valve pattern is valid")
});

/// Valves worth opening, with travel times between them
///
/// Index `flows.len()` in `distances` is the `AA` starting room.
#[derive(Debug, Clone)]
pub struct Network {
    flows: Vec<u32>,
    distances: Vec<Vec<u32>>,
}

impl Network {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let mut names = HashMap::new();
        let mut rooms = Vec::new();
        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let caps = VALVE
                .captures(line)
                .ok_or_else(|| anyhow!("invalid valve {line:?}"))?;
            let name = caps.get(1).map_or("", |m| m.as_str());
            let flow: u32 = caps[2].parse()?;
            let tunnels: Vec<&str> = caps
                .get(3)
                .map_or("", |m| m.as_str())
                .split(", ")
                .collect();
            names.insert(name, rooms.len());
            rooms.push((name, flow, tunnels));
        }
        let Some(&start) = names.get("AA") else {
            bail!("missing valve AA");
        };
        let adjacency = rooms
            .iter()
            .map(|(_, _, tunnels)| {
                tunnels
                    .iter()
                    .map(|t| {
                        let index = names.get(t).copied();
                        index.ok_or_else(|| anyhow!("unknown valve {t}"))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let useful: Vec<usize> = (0..rooms.len()).filter(|&i| rooms[i].1 > 0).collect();
        if useful.len() > 20 {
            bail!("too many working valves: {}", useful.len());
        }
        let sources = useful.iter().copied().chain([start]);
        let distances = sources
            .map(|from| {
                let steps = bfs(&adjacency, from);
                useful
                    .iter()
                    .map(|&to| {
                        steps[to].ok_or_else(|| anyhow!("valve {} unreachable", rooms[to].0))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let flows = useful.iter().map(|&i| rooms[i].1).collect();
        Ok(Self { flows, distances })
    }

    /// Best pressure released for every set of opened valves, within `minutes`
    fn best_by_opened(&self, minutes: u32) -> HashMap<u32, u32> {
        let mut best = HashMap::new();
        let mut stack = vec![(self.flows.len(), minutes, 0u32, 0u32)];
        while let Some((at, left, opened, released)) = stack.pop() {
            let entry = best.entry(opened).or_insert(0);
            *entry = (*entry).max(released);
            for (valve, &flow) in self.flows.iter().enumerate() {
                if opened & (1 << valve) != 0 {
                    continue;
                }
                let cost = self.distances[at][valve] + 1;
                if cost >= left {
                    continue;
                }
                let left = left - cost;
                stack.push((valve, left, opened | (1 << valve), released + flow * left));
            }
        }
        best
    }
}

fn bfs(adjacency: &[Vec<usize>], from: usize) -> Vec<Option<u32>> {
    let mut steps = vec![None; adjacency.len()];
    steps[from] = Some(0);
    let mut queue = VecDeque::from([from]);
    while let Some(at) = queue.pop_front() {
        let dist = steps[at].unwrap_or(0);
        for &next in &adjacency[at] {
            if steps[next].is_none() {
                steps[next] = Some(dist + 1);
                queue.push_back(next);
            }
        }
    }
    steps
}

fn most_pressure(network: &Network) -> u32 {
    network.best_by_opened(30).into_values().max().unwrap_or(0)
}

/// Two workers with 26 minutes each, opening disjoint sets of valves
fn most_pressure_with_elephant(network: &Network) -> u32 {
    let best: Vec<(u32, u32)> = network.best_by_opened(26).into_iter().collect();
    let mut most = 0;
    for (i, &(mine, released)) in best.iter().enumerate() {
        for &(theirs, other) in &best[i..] {
            if mine & theirs == 0 {
                most = most.max(released + other);
            }
        }
    }
    most
}

impl AocParser for Solver {
    type SharedData<'a> = Network;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Network::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(most_pressure(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(most_pressure_with_elephant(shared).to_string())
    }
}
