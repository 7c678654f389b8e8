use std::collections::HashMap;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::{Itertools, MinMaxResult};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 9, tags = ["2015", "graph", "permutations"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// `distances[a][b]`, `None` when there is no direct route
    distances: Vec<Vec<Option<u32>>>,
    common_result: Option<(u32, u32)>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_routes(input)
            .map(|distances| SharedData {
                distances,
                common_result: None,
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_routes(input: &str) -> anyhow::Result<Vec<Vec<Option<u32>>>> {
    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut edges = Vec::new();
    for (idx, line) in input.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
        let (route, dist) = line
            .split_once(" = ")
            .ok_or_else(|| anyhow!("(line {}) missing ' = '", idx + 1))?;
        let (from, to) = route
            .split_once(" to ")
            .ok_or_else(|| anyhow!("(line {}) missing ' to '", idx + 1))?;
        let dist: u32 = dist
            .parse()
            .with_context(|| format!("(line {}) invalid distance", idx + 1))?;
        let next = ids.len();
        let from = *ids.entry(from).or_insert(next);
        let next = ids.len();
        let to = *ids.entry(to).or_insert(next);
        edges.push((from, to, dist));
    }

    let mut distances = vec![vec![None; ids.len()]; ids.len()];
    for (from, to, dist) in edges {
        distances[from][to] = Some(dist);
        distances[to][from] = Some(dist);
    }
    Ok(distances)
}

/// Shortest and longest routes visiting every location exactly once
fn route_extremes(shared: &mut SharedData) -> Result<(u32, u32), SolveError> {
    if let Some(result) = shared.common_result {
        return Ok(result);
    }
    let distances = &shared.distances;
    let lengths = (0..distances.len())
        .permutations(distances.len())
        // a route and its reverse have the same length
        .filter(|route| route.first() <= route.last())
        .filter_map(|route| {
            route
                .iter()
                .tuple_windows()
                .map(|(&a, &b)| distances[a][b])
                .sum::<Option<u32>>()
        });

    let result = match lengths.minmax() {
        MinMaxResult::NoElements => return Err(SolveError::failed("no route visits every location")),
        MinMaxResult::OneElement(len) => (len, len),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    Ok(*shared.common_result.insert(result))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        route_extremes(shared).map(|(shortest, _)| shortest.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        route_extremes(shared).map(|(_, longest)| longest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
London to Dublin = 464
London to Belfast = 518
Dublin to Belfast = 141";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.distances.len(), 3);
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "605");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "982");
    }

    #[test]
    fn test_disconnected() {
        let mut shared = Solver::parse("A to B = 1\nC to D = 2").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
    }
}
