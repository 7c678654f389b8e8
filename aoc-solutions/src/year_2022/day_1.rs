use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, tags = ["2022", "sorting"])]
pub struct Solver;

impl AocParser for Solver {
    /// Calories carried by each elf, largest first
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut totals = input
            .replace("\r\n", "\n")
            .split("\n\n")
            .filter(|elf| !elf.trim().is_empty())
            .map(|elf| {
                elf.lines()
                    .map(|item| {
                        item.trim().parse::<u64>().map_err(|_| {
                            ParseError::InvalidFormat(format!("invalid calories {item:?}"))
                        })
                    })
                    .sum::<Result<u64, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        totals.sort_unstable_by(|a, b| b.cmp(a));
        Ok(totals)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .first()
            .map(|top| top.to_string())
            .ok_or_else(|| SolveError::failed("no elves"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() < 3 {
            return Err(SolveError::failed("fewer than three elves"));
        }
        Ok(shared[..3].iter().sum::<u64>().to_string())
    }
}
