use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 14, tags = ["2015", "simulation"])]
pub struct Solver;

const RACE_SECONDS: u32 = 2503;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reindeer {
    speed: u32,
    fly_time: u32,
    rest_time: u32,
}

impl Reindeer {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let [_, "can", "fly", speed, "km/s", "for", fly, "seconds,", .., rest, "seconds."] =
            words[..]
        else {
            bail!("unrecognised reindeer {line:?}");
        };
        Ok(Reindeer {
            speed: speed.parse().context("invalid speed")?,
            fly_time: fly.parse().context("invalid flight time")?,
            rest_time: rest.parse().context("invalid rest time")?,
        })
    }

    fn distance_after(self, seconds: u32) -> u32 {
        let cycle = self.fly_time + self.rest_time;
        let flying = (seconds / cycle) * self.fly_time + (seconds % cycle).min(self.fly_time);
        flying * self.speed
    }
}

/// Points after `seconds`: every second, each reindeer in the lead scores one
fn race_points(herd: &[Reindeer], seconds: u32) -> Vec<u32> {
    let mut points = vec![0; herd.len()];
    for second in 1..=seconds {
        let distances: Vec<u32> = herd.iter().map(|r| r.distance_after(second)).collect();
        let lead = distances.iter().copied().max().unwrap_or(0);
        for (score, _) in points.iter_mut().zip(&distances).filter(|(_, d)| **d == lead) {
            *score += 1;
        }
    }
    points
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Reindeer>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let herd = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Reindeer::parse)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if herd.iter().any(|r| r.fly_time + r.rest_time == 0) {
            return Err(ParseError::InvalidFormat("reindeer with a zero-length cycle".into()));
        }
        Ok(herd)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|r| r.distance_after(RACE_SECONDS))
            .max()
            .map(|d| d.to_string())
            .ok_or_else(|| SolveError::failed("no reindeer"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        race_points(shared, RACE_SECONDS)
            .into_iter()
            .max()
            .map(|p| p.to_string())
            .ok_or_else(|| SolveError::failed("no reindeer"))
    }
}
