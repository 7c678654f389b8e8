use std::collections::HashMap;
use std::f64::consts::TAU;

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::math::gcd;
use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 10, tags = ["2019", "geometry"])]
pub struct Solver;

const BET_TARGET: usize = 200;

/// Asteroid map, with the monitoring station placed once parsed
#[derive(Debug, Clone)]
pub struct Belt {
    asteroids: Vec<Point>,
    station: Point,
    visible: usize,
}

/// Direction from `from` to `to` in lowest terms, and how many steps of it
fn line_of_sight(from: Point, to: Point) -> (Point, i64) {
    let delta = to - from;
    let steps = gcd(delta.x, delta.y);
    (Point::new(delta.x / steps, delta.y / steps), steps)
}

/// Clockwise angle from straight up, y growing downwards
fn bearing(direction: Point) -> f64 {
    (direction.x as f64).atan2(-direction.y as f64).rem_euclid(TAU)
}

fn visible_from(asteroids: &[Point], station: Point) -> usize {
    asteroids
        .iter()
        .filter(|&&a| a != station)
        .map(|&a| line_of_sight(station, a).0)
        .unique()
        .count()
}

impl Belt {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let mut asteroids = Vec::new();
        for (y, line) in input.lines().enumerate() {
            for (x, cell) in line.trim().bytes().enumerate() {
                match cell {
                    b'#' => asteroids.push(Point::new(x as i64, y as i64)),
                    b'.' => {}
                    other => bail!("unexpected {:?} at {x},{y}", other as char),
                }
            }
        }
        let (station, visible) = asteroids
            .iter()
            .map(|&a| (a, visible_from(&asteroids, a)))
            .max_by_key(|&(_, visible)| visible)
            .ok_or_else(|| anyhow::anyhow!("no asteroids"))?;
        Ok(Self {
            asteroids,
            station,
            visible,
        })
    }

    /// Every other asteroid in the order the rotating laser destroys it
    fn vaporization_order(&self) -> Vec<Point> {
        let mut rays: HashMap<Point, Vec<(i64, Point)>> = HashMap::new();
        for &asteroid in self.asteroids.iter().filter(|&&a| a != self.station) {
            let (direction, distance) = line_of_sight(self.station, asteroid);
            rays.entry(direction).or_default().push((distance, asteroid));
        }
        // (rotation, bearing, asteroid): the n-th closest on a ray goes on the n-th sweep
        let mut order = Vec::new();
        for (direction, mut ray) in rays {
            ray.sort_unstable();
            let angle = bearing(direction);
            order.extend(ray.into_iter().enumerate().map(|(sweep, (_, a))| (sweep, angle, a)));
        }
        order.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        order.into_iter().map(|(_, _, a)| a).collect()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Belt;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Belt::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.visible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .vaporization_order()
            .get(BET_TARGET - 1)
            .map(|a| (a.x * 100 + a.y).to_string())
            .ok_or_else(|| {
                SolveError::failed(format!("fewer than {BET_TARGET} asteroids to destroy"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LARGE: &str = "\
.#..##.###...#######
##.############..##.
.#.######.########.#
.###.#######.####.#.
#####.##.#.##.###.##
..#####..#.#########
####################
#.####....###.#.#.##
##.#################
#####.##.###..####..
..######..##.#######
####.##.####...##..#
.#####..#.######.###
##...#.##########...
#.##########.#######
.####.#.###.###.#.##
....##.##.###..#####
.#.#.###########.###
#.#.#.#####.####.###
###.##.####.##.#..##";

    #[test]
    fn test_small_belt() {
        let belt = Belt::parse(".#..#\n.....\n#####\n....#\n...##").unwrap();
        assert_eq!(visible_from(&belt.asteroids, Point::new(1, 0)), 7);
        assert_eq!(visible_from(&belt.asteroids, Point::new(0, 2)), 6);
        assert_eq!((belt.station, belt.visible), (Point::new(3, 4), 8));
    }

    #[test]
    fn test_bearing() {
        assert_eq!(bearing(Point::UP), 0.0);
        assert!(bearing(Point::RIGHT) < bearing(Point::DOWN));
        assert!(bearing(Point::DOWN) < bearing(Point::LEFT));
        assert!(bearing(Point::new(-1, -100)) > bearing(Point::LEFT));
    }

    #[test]
    fn test_sweep_order() {
        let mut belt = Belt::parse(
            ".#....#####...#..\n##...##.#####..##\n##...#...#.#####.\n..#.....#...###..\n..#.#.....#....##",
        )
        .unwrap();
        belt.station = Point::new(8, 3);
        let order = belt.vaporization_order();
        let expected = [(8, 1), (9, 0), (9, 1), (10, 0), (9, 2), (11, 1), (12, 1), (11, 2), (15, 1)];
        for (got, (x, y)) in order.iter().zip(expected) {
            assert_eq!(*got, Point::new(x, y));
        }
    }

    #[test]
    fn test_large_belt() {
        let mut belt = Solver::parse(LARGE).unwrap();
        assert_eq!((belt.station, belt.visible), (Point::new(11, 13), 210));
        let order = belt.vaporization_order();
        assert_eq!(order.len(), 299);
        for (n, (x, y)) in [(1, (11, 12)), (2, (12, 1)), (3, (12, 2)), (10, (12, 8)), (20, (16, 0))]
            .into_iter()
            .chain([(50, (16, 9)), (100, (10, 16)), (199, (9, 6)), (201, (10, 9))])
        {
            assert_eq!(order[n - 1], Point::new(x, y), "asteroid #{n}");
        }
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut belt).unwrap(), "802");
    }

    #[test]
    fn test_not_enough_asteroids() {
        let mut belt = Solver::parse("#.#\n...").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut belt).unwrap(), "1");
        assert!(<Solver as PartSolver<2>>::solve(&mut belt).is_err());
        assert!(Solver::parse("#x").is_err());
        assert!(Solver::parse("...").is_err());
    }
}
