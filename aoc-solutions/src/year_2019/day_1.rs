use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 1, tags = ["2019", "arithmetic"])]
pub struct Solver;

fn fuel_required(mass: u64) -> u64 {
    (mass / 3).saturating_sub(2)
}

/// Fuel for a module plus the fuel for that fuel, until it needs none
fn total_fuel(mass: u64) -> u64 {
    std::iter::successors(Some(fuel_required(mass)), |&fuel| Some(fuel_required(fuel)))
        .take_while(|&fuel| fuel > 0)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(|line| {
                line.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("invalid mass {line:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|&m| fuel_required(m)).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|&m| total_fuel(m)).sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_required() {
        assert_eq!(fuel_required(12), 2);
        assert_eq!(fuel_required(14), 2);
        assert_eq!(fuel_required(1969), 654);
        assert_eq!(fuel_required(100756), 33583);
        assert_eq!(fuel_required(2), 0);
    }

    #[test]
    fn test_total_fuel() {
        assert_eq!(total_fuel(14), 2);
        assert_eq!(total_fuel(1969), 966);
        assert_eq!(total_fuel(100756), 50346);
    }

    #[test]
    fn test_solver() {
        let mut masses = Solver::parse("12\n14\n1969\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut masses).unwrap(), "658");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut masses).unwrap(), "970");
        assert!(Solver::parse("12\nheavy").is_err());
    }
}
