use std::ops::RangeInclusive;
use std::sync::LazyLock;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 24, tags = ["2023", "geometry", "linear-algebra"])]
pub struct Solver;

static HAILSTONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+),\s*(-?\d+),\s*(-?\d+)\s*@\s*(-?\d+),\s*(-?\d+),\s*(-?\d+)$")
        .expect("hailstone pattern is valid")
});

const TEST_AREA: RangeInclusive<i128> = 200_000_000_000_000..=400_000_000_000_000;
/// Largest rock speed tried along x and y
const MAX_ROCK_SPEED: i128 = 1000;

type Vec3 = [i128; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    position: Vec3,
    velocity: Vec3,
}

impl Hailstone {
    fn parse(line: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidFormat(format!("invalid hailstone {line:?}"));
        let caps = HAILSTONE.captures(line).ok_or_else(invalid)?;
        let mut values = [0i128; 6];
        for (value, group) in values.iter_mut().zip(1usize..) {
            *value = caps[group].parse().map_err(|_| invalid())?;
        }
        let [px, py, pz, vx, vy, vz] = values;
        Ok(Self {
            position: [px, py, pz],
            velocity: [vx, vy, vz],
        })
    }

    /// The same path seen from a frame moving at `(vx, vy)` in the xy plane
    fn relative_to(&self, vx: i128, vy: i128) -> Self {
        let [ux, uy, uz] = self.velocity;
        Self {
            position: self.position,
            velocity: [ux - vx, uy - vy, uz],
        }
    }

    /// Exact time at which this stone reaches `(x, y)`, if it ever does
    ///
    /// `None` also covers a stone at rest on that point, where the time is
    /// undetermined.
    fn time_at(&self, x: i128, y: i128) -> Option<i128> {
        let ([px, py, _], [vx, vy, _]) = (self.position, self.velocity);
        let time = match (vx, vy) {
            (0, 0) => return None,
            (0, _) => exact_div(y - py, vy)?,
            _ => exact_div(x - px, vx)?,
        };
        (px + vx * time == x && py + vy * time == y).then_some(time)
    }
}

fn exact_div(num: i128, den: i128) -> Option<i128> {
    (den != 0 && num % den == 0).then_some(num / den)
}

/// Crossing of two paths in the xy plane as `(t, s, det)` with `det > 0`
///
/// The first stone reaches the crossing at `t / det`, the second at `s / det`.
fn crossing(a: &Hailstone, b: &Hailstone) -> Option<(i128, i128, i128)> {
    let ([ax, ay, _], [avx, avy, _]) = (a.position, a.velocity);
    let ([bx, by, _], [bvx, bvy, _]) = (b.position, b.velocity);
    let (dx, dy) = (bx - ax, by - ay);
    let det = bvx * avy - avx * bvy;
    if det == 0 {
        return None;
    }
    let t = bvx * dy - bvy * dx;
    let s = avx * dy - avy * dx;
    let sign = det.signum();
    Some((t * sign, s * sign, det * sign))
}

/// Pairs whose future xy paths cross inside `area` on both axes
fn future_crossings(hail: &[Hailstone], area: &RangeInclusive<i128>) -> usize {
    hail.iter()
        .tuple_combinations()
        .filter(|(a, b)| {
            let Some((t, s, det)) = crossing(a, b) else {
                return false;
            };
            let inside = |p: i128, v: i128| {
                let scaled = p * det + v * t;
                *area.start() * det <= scaled && scaled <= *area.end() * det
            };
            t >= 0
                && s >= 0
                && inside(a.position[0], a.velocity[0])
                && inside(a.position[1], a.velocity[1])
        })
        .count()
}

/// Rock whose straight throw hits every hailstone at a whole-numbered time
///
/// Seen from the rock's frame every hailstone passes through the launch
/// point, so candidate xy velocities are tried from slowest outwards.
fn rock_throw(hail: &[Hailstone]) -> Option<Hailstone> {
    (0..=MAX_ROCK_SPEED).find_map(|speed| {
        (-speed..=speed)
            .cartesian_product(-speed..=speed)
            .filter(|&(vx, vy)| vx.abs() == speed || vy.abs() == speed)
            .find_map(|(vx, vy)| throw_with(hail, vx, vy))
    })
}

fn throw_with(hail: &[Hailstone], vx: i128, vy: i128) -> Option<Hailstone> {
    let moving: Vec<Hailstone> = hail.iter().map(|h| h.relative_to(vx, vy)).collect();
    let first = moving.first()?;
    let (t, _, det) = moving[1..].iter().find_map(|other| crossing(first, other))?;
    let t = exact_div(t, det)?;
    let x = first.position[0] + first.velocity[0] * t;
    let y = first.position[1] + first.velocity[1] * t;

    let times = moving
        .iter()
        .map(|h| h.time_at(x, y).filter(|&time| time >= 0))
        .collect::<Option<Vec<_>>>()?;

    // z is untouched by the frame change, so solve it from two distinct times
    let (i, j) = (0..times.len())
        .tuple_combinations()
        .find(|&(i, j)| times[i] != times[j])?;
    let (a, b) = (&hail[i], &hail[j]);
    let (ta, tb) = (times[i], times[j]);
    let vz = exact_div(
        a.position[2] - b.position[2] + a.velocity[2] * ta - b.velocity[2] * tb,
        ta - tb,
    )?;
    let z = a.position[2] + (a.velocity[2] - vz) * ta;

    let rock = Hailstone {
        position: [x, y, z],
        velocity: [vx, vy, vz],
    };
    let hits = hail.iter().zip(&times).all(|(h, &time)| {
        (0..3).all(|axis| {
            rock.position[axis] + rock.velocity[axis] * time
                == h.position[axis] + h.velocity[axis] * time
        })
    });
    hits.then_some(rock)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hailstone>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Hailstone::parse)
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(future_crossings(shared, &TEST_AREA).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        rock_throw(shared)
            .map(|rock| rock.position.iter().sum::<i128>().to_string())
            .ok_or_else(|| SolveError::failed("no single throw hits every hailstone"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3";

    #[test]
    fn test_future_crossings() {
        let hail = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(future_crossings(&hail, &(7..=27)), 2);
        // A and B cross at (14.333, 15.333)
        assert_eq!(crossing(&hail[0], &hail[1]), Some((7, 11, 3)));
        // B and C are parallel
        assert_eq!(crossing(&hail[1], &hail[2]), None);
    }

    #[test]
    fn test_rock_throw() {
        let mut hail = Solver::parse(EXAMPLE).unwrap();
        let rock = rock_throw(&hail).unwrap();
        assert_eq!(rock.position, [24, 13, 10]);
        assert_eq!(rock.velocity, [-3, 1, 2]);
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut hail).unwrap(), "47");
    }

    #[test]
    fn test_time_at() {
        let stone = Hailstone::parse("19, 13, 30 @ -2, 1, -2").unwrap();
        assert_eq!(stone.relative_to(-3, 1).time_at(24, 13), Some(5));
        assert_eq!(stone.time_at(18, 13), None);
        assert!(Hailstone::parse("19, 13 @ -2, 1").is_err());
    }
}
