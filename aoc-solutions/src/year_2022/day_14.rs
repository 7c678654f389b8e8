use std::collections::HashSet;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 14, tags = ["2022", "simulation", "grid"])]
pub struct Solver;

const SOURCE: Point = Point::new(500, 0);
const FALLS: [Point; 3] = [Point::new(0, 1), Point::new(-1, 1), Point::new(1, 1)];

/// Cave scan: rock squares and the depth of the lowest one
#[derive(Debug, Clone)]
pub struct Cave {
    rock: HashSet<Point>,
    lowest: i64,
}

impl Cave {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let mut rock = HashSet::new();
        for line in input.lines().filter(|l| !l.trim().is_empty()) {
            let corners = line
                .split("->")
                .map(|pair| -> anyhow::Result<Point> {
                    let (x, y) = pair
                        .trim()
                        .split_once(',')
                        .ok_or_else(|| anyhow!("invalid point {pair:?}"))?;
                    Ok(Point::new(
                        x.parse().with_context(|| format!("invalid x in {pair:?}"))?,
                        y.parse().with_context(|| format!("invalid y in {pair:?}"))?,
                    ))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            for (from, to) in corners.iter().tuple_windows() {
                if from.x != to.x && from.y != to.y {
                    bail!("diagonal rock from {from:?} to {to:?}");
                }
                let step = Point::new((to.x - from.x).signum(), (to.y - from.y).signum());
                let mut at = *from;
                rock.insert(at);
                while at != *to {
                    at += step;
                    rock.insert(at);
                }
            }
            if let [single] = corners[..] {
                rock.insert(single);
            }
        }
        let lowest = rock
            .iter()
            .map(|p| p.y)
            .max()
            .ok_or_else(|| anyhow!("no rock in the scan"))?;
        Ok(Self { rock, lowest })
    }

    /// Units of sand at rest once sand falls into the abyss or blocks the
    /// source; `floor` adds an endless floor two below the lowest rock
    fn fill(&self, floor: bool) -> usize {
        let mut blocked = self.rock.clone();
        let floor_y = self.lowest + 2;
        let mut resting = 0;
        // the path the last grain took, so the next starts where it left off
        let mut path = vec![SOURCE];
        while let Some(&grain) = path.last() {
            let next = FALLS
                .iter()
                .map(|&fall| grain + fall)
                .find(|p| !blocked.contains(p) && p.y < floor_y);
            match next {
                Some(p) if !floor && p.y > self.lowest => return resting,
                Some(p) => path.push(p),
                None => {
                    blocked.insert(grain);
                    resting += 1;
                    path.pop();
                }
            }
        }
        resting
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Cave::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.fill(false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.fill(true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "498,4 -> 498,6 -> 496,6\n503,4 -> 502,4 -> 502,9 -> 494,9";

    #[test]
    fn test_parse() {
        let cave = Cave::parse(EXAMPLE).unwrap();
        assert_eq!(cave.rock.len(), 20);
        assert_eq!(cave.lowest, 9);
        assert!(cave.rock.contains(&Point::new(497, 6)));
        assert!(Cave::parse("1,1 -> 2,2").is_err());
        assert!(Cave::parse("1;1").is_err());
    }

    #[test]
    fn test_parts() {
        let mut cave = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut cave).unwrap(), "24");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut cave).unwrap(), "93");
    }

    #[test]
    fn test_single_ledge() {
        // the very first grain rolls off the single rock
        let cave = Cave::parse("500,2").unwrap();
        assert_eq!(cave.fill(false), 0);
        // with the floor at y=4 the pile fills a triangle over the ledge
        assert_eq!(cave.fill(true), 1 + 3 + 5 + 7 - 1);
    }
}
