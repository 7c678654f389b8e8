use std::collections::VecDeque;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;
use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, tags = ["2022", "grid", "bfs"])]
pub struct Solver;

/// Heightmap with `S` and `E` resolved to their elevations
#[derive(Debug, Clone)]
pub struct Heightmap {
    heights: Grid<u8>,
    start: Point,
    end: Point,
}

impl Heightmap {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let raw = Grid::parse(input.trim(), |b| match b {
            b'a'..=b'z' | b'S' | b'E' => Ok(b),
            other => bail!("invalid elevation {:?}", other as char),
        })?;
        let find = |marker: u8| {
            raw.iter()
                .find(|&(_, &b)| b == marker)
                .map(|(p, _)| p)
                .ok_or_else(|| anyhow!("missing {}", marker as char))
        };
        let (start, end) = (find(b'S')?, find(b'E')?);
        let heights = raw.map(|_, &b| match b {
            b'S' => 0,
            b'E' => 25,
            b => b - b'a',
        });
        Ok(Self { heights, start, end })
    }

    /// Steps from the nearest square satisfying `is_start` up to the end
    ///
    /// Searches downhill from the end, so every candidate start is covered
    /// by one pass.
    fn shortest_climb(&self, is_start: impl Fn(Point, u8) -> bool) -> Option<usize> {
        let mut steps: Grid<Option<usize>> =
            Grid::from_fn(self.heights.width(), self.heights.height(), |_, _| None);
        steps.set(self.end, Some(0));
        let mut queue = VecDeque::from([(self.end, 0)]);
        while let Some((at, dist)) = queue.pop_front() {
            let height = *self.heights.get(at)?;
            if is_start(at, height) {
                return Some(dist);
            }
            for next in at.neighbors4() {
                let reachable = self
                    .heights
                    .get(next)
                    .is_some_and(|&h| h + 1 >= height);
                if reachable && steps.get(next) == Some(&None) {
                    steps.set(next, Some(dist + 1));
                    queue.push_back((next, dist + 1));
                }
            }
        }
        None
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Heightmap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Heightmap::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared.start;
        shared
            .shortest_climb(|p, _| p == start)
            .map(|n| n.to_string())
            .ok_or_else(|| SolveError::failed("no route from S to E"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .shortest_climb(|_, height| height == 0)
            .map(|n| n.to_string())
            .ok_or_else(|| SolveError::failed("no lowest square reaches E"))
    }
}
