use std::collections::HashMap;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 6, tags = ["2019", "graph", "dp"])]
pub struct Solver;

/// Orbiting object to the object it orbits
#[derive(Debug, Clone)]
pub struct OrbitMap<'a> {
    parent: HashMap<&'a str, &'a str>,
}

impl<'a> OrbitMap<'a> {
    fn parse(input: &'a str) -> anyhow::Result<Self> {
        let mut parent = HashMap::new();
        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (centre, orbiter) = line
                .split_once(')')
                .ok_or_else(|| anyhow!("invalid orbit {line:?}"))?;
            if parent.insert(orbiter, centre).is_some() {
                bail!("{orbiter} orbits two objects");
            }
        }
        let map = Self { parent };
        for &object in map.parent.keys() {
            if map.ancestors(object).nth(map.parent.len()).is_some() {
                bail!("orbit loop through {object}");
            }
        }
        Ok(map)
    }

    /// Objects `object` orbits, directly then indirectly
    fn ancestors<'s>(&'s self, object: &str) -> impl Iterator<Item = &'a str> + use<'a, 's> {
        std::iter::successors(self.parent.get(object).copied(), |o| self.parent.get(o).copied())
    }

    /// Orbital transfers to move from what `from` orbits to what `to` orbits
    fn transfers(&self, from: &str, to: &str) -> Option<usize> {
        let hops: HashMap<&str, usize> = self
            .ancestors(from)
            .enumerate()
            .map(|(i, o)| (o, i))
            .collect();
        self.ancestors(to)
            .enumerate()
            .find_map(|(i, o)| hops.get(o).map(|j| i + j))
    }
}

impl<'a> DpProblem<&'a str, usize> for &OrbitMap<'a> {
    fn deps(&self, object: &&'a str) -> Vec<&'a str> {
        self.parent.get(object).copied().into_iter().collect()
    }

    fn compute(&self, _object: &&'a str, deps: Vec<usize>) -> usize {
        deps.first().map_or(0, |depth| depth + 1)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = OrbitMap<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        OrbitMap::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map = &*shared;
        let depths = DpCache::new(HashMapBackend::new(), map);
        Ok(map.parent.keys().map(|o| depths.get(o)).sum::<usize>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .transfers("YOU", "SAN")
            .map(|n| n.to_string())
            .ok_or_else(|| SolveError::failed("YOU and SAN share no orbit"))
    }
}
