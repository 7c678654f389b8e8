use std::sync::LazyLock;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::math::lcm;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 12, tags = ["2019", "simulation", "cycle"])]
pub struct Solver;

const STEPS: usize = 1000;

static MOON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<x=(-?\d+), y=(-?\d+), z=(-?\d+)>$").expect("moon pattern is valid")
});

/// Positions and velocities along one axis, for every moon
///
/// The axes never interact, so each one can be stepped and checked for
/// repetition on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    position: Vec<i64>,
    velocity: Vec<i64>,
}

impl Axis {
    fn step(&mut self) {
        for (i, velocity) in self.velocity.iter_mut().enumerate() {
            let here = self.position[i];
            *velocity += self.position.iter().map(|&other| (other - here).signum()).sum::<i64>();
        }
        for (position, velocity) in self.position.iter_mut().zip(&self.velocity) {
            *position += velocity;
        }
    }

    /// Steps until the axis returns to this exact state
    fn period(&self) -> i64 {
        let mut axis = self.clone();
        let mut steps = 0;
        loop {
            axis.step();
            steps += 1;
            if axis == *self {
                return steps;
            }
        }
    }
}

fn total_energy(axes: &[Axis; 3]) -> i64 {
    (0..axes[0].position.len())
        .map(|moon| {
            let potential: i64 = axes.iter().map(|a| a.position[moon].abs()).sum();
            let kinetic: i64 = axes.iter().map(|a| a.velocity[moon].abs()).sum();
            potential * kinetic
        })
        .sum()
}

fn energy_after(mut axes: [Axis; 3], steps: usize) -> i64 {
    for _ in 0..steps {
        axes.iter_mut().for_each(Axis::step);
    }
    total_energy(&axes)
}

impl AocParser for Solver {
    type SharedData<'a> = [Axis; 3];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parse = || -> anyhow::Result<_> {
            let mut axes = [(); 3].map(|_| Axis {
                position: Vec::new(),
                velocity: Vec::new(),
            });
            for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
                let caps = MOON.captures(line).ok_or_else(|| anyhow!("invalid moon {line:?}"))?;
                for (axis, group) in axes.iter_mut().zip(1usize..) {
                    axis.position.push(caps[group].parse().context("coordinate out of range")?);
                    axis.velocity.push(0);
                }
            }
            Ok(axes)
        };
        parse().map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(energy_after(shared.clone(), STEPS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(Axis::period).fold(1, lcm).to_string())
    }
}
