use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 2, tags = ["2015", "arithmetic"])]
pub struct Solver;

/// Present dimensions, sorted ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Present([u64; 3]);

impl Present {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let mut dims = [0u64; 3];
        let mut parts = line.trim().split('x');
        for dim in &mut dims {
            let raw = parts.next().ok_or_else(|| anyhow!("expected LxWxH"))?;
            *dim = raw.parse().with_context(|| format!("invalid dimension {raw:?}"))?;
        }
        if parts.next().is_some() {
            return Err(anyhow!("expected LxWxH"));
        }
        dims.sort_unstable();
        Ok(Present(dims))
    }

    /// Surface area plus the area of the smallest side
    fn paper(self) -> u64 {
        let [a, b, c] = self.0;
        2 * (a * b + b * c + c * a) + a * b
    }

    /// Smallest perimeter plus volume
    fn ribbon(self) -> u64 {
        let [a, b, c] = self.0;
        2 * (a + b) + a * b * c
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Present>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| Present::parse(line).map_err(|e| anyhow!("(line {}) {}", idx + 1, e)))
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|p| p.paper()).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|p| p.ribbon()).sum::<u64>().to_string())
    }
}
