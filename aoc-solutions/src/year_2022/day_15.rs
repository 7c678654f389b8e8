use std::ops::Range;
use std::sync::LazyLock;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use regex::Regex;

use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 15, tags = ["2022", "ranges", "manhattan"])]
pub struct Solver;

static SENSOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Sensor at x=(-?\d+), y=(-?\d+): closest beacon is at x=(-?\d+), y=(-?\d+)$")
        .expect("sensor pattern is valid")
});

const SCAN_ROW: i64 = 2_000_000;
const SEARCH_MAX: i64 = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    at: Point,
    beacon: Point,
}

impl Sensor {
    fn radius(&self) -> i64 {
        self.at.manhattan(self.beacon)
    }

    /// Columns of row `y` this sensor rules out, empty when out of reach
    fn covered(&self, y: i64) -> Range<i64> {
        let reach = self.radius() - (self.at.y - y).abs();
        if reach < 0 {
            return self.at.x..self.at.x;
        }
        self.at.x - reach..self.at.x + reach + 1
    }
}

/// Covered ranges of row `y`, merged and sorted
fn merged_coverage(sensors: &[Sensor], y: i64) -> Vec<Range<i64>> {
    sensors
        .iter()
        .map(|s| s.covered(y))
        .filter(|r| !r.is_empty())
        .sorted_by_key(|r| (r.start, r.end))
        .coalesce(|a, b| {
            if b.start <= a.end {
                Ok(a.start..a.end.max(b.end))
            } else {
                Err((a, b))
            }
        })
        .collect()
}

/// Positions in row `y` that cannot hold a beacon
fn ruled_out(sensors: &[Sensor], y: i64) -> i64 {
    let covered: i64 = merged_coverage(sensors, y).iter().map(|r| r.end - r.start).sum();
    let beacons = sensors
        .iter()
        .filter(|s| s.beacon.y == y)
        .map(|s| s.beacon.x)
        .unique()
        .count() as i64;
    covered - beacons
}

/// The single uncovered position with both coordinates in `0..=max`
fn distress_beacon(sensors: &[Sensor], max: i64) -> Option<Point> {
    (0..=max).rev().find_map(|y| {
        let mut x = 0;
        for range in merged_coverage(sensors, y) {
            if range.start > x {
                break;
            }
            x = x.max(range.end);
        }
        (x <= max).then_some(Point::new(x, y))
    })
}

fn tuning_frequency(beacon: Point) -> i64 {
    beacon.x * 4_000_000 + beacon.y
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Sensor>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let invalid = || ParseError::InvalidFormat(format!("invalid sensor {line:?}"));
                let caps = SENSOR.captures(line).ok_or_else(invalid)?;
                let mut coords = [0i64; 4];
                for (coord, group) in coords.iter_mut().zip(1usize..) {
                    *coord = caps[group].parse().map_err(|_| invalid())?;
                }
                let [sx, sy, bx, by] = coords;
                Ok(Sensor {
                    at: Point::new(sx, sy),
                    beacon: Point::new(bx, by),
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(ruled_out(shared, SCAN_ROW).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        distress_beacon(shared, SEARCH_MAX)
            .map(|beacon| tuning_frequency(beacon).to_string())
            .ok_or_else(|| SolveError::failed("every position is covered"))
    }
}
