use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 20, tags = ["2015", "number-theory"])]
pub struct Solver;

impl AocParser for Solver {
    /// Target number of presents
    type SharedData<'a> = usize;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .parse()
            .map_err(|e| ParseError::InvalidFormat(format!("invalid target: {e}")))
    }
}

/// First house receiving at least `target` presents
///
/// Elf `n` visits houses `n, 2n, 3n...`, at most `limit` of them, leaving
/// `per_house * n` presents at each. House `h` gets at least `per_house * h`
/// from its own elf, so no house beyond `target / per_house` is needed.
fn first_house(target: usize, per_house: usize, limit: Option<usize>) -> Option<usize> {
    let last = (target / per_house).max(1);
    let mut presents = vec![0usize; last + 1];
    for elf in 1..=last {
        let visits = limit.unwrap_or(usize::MAX);
        for house in (elf..=last).step_by(elf).take(visits) {
            presents[house] += per_house * elf;
        }
    }
    presents.iter().skip(1).position(|&p| p >= target).map(|i| i + 1)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_house(*shared, 10, None)
            .map(|house| house.to_string())
            .ok_or_else(|| SolveError::failed("no house reaches the target"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_house(*shared, 11, Some(50))
            .map(|house| house.to_string())
            .ok_or_else(|| SolveError::failed("no house reaches the target"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part1() {
        // houses 1..=9 get 10 30 40 70 60 120 80 150 130
        assert_eq!(first_house(10, 10, None), Some(1));
        assert_eq!(first_house(70, 10, None), Some(4));
        assert_eq!(first_house(100, 10, None), Some(6));
        assert_eq!(first_house(130, 10, None), Some(8));
        assert_eq!(first_house(150, 10, None), Some(8));
    }

    #[test]
    fn test_part2_elves_retire() {
        // elf 1 stops after 2 houses, so house 3 only sees elf 3
        assert_eq!(first_house(44, 11, Some(2)), Some(4));
        assert_eq!(first_house(33, 11, Some(1)), Some(3));

        let mut shared = Solver::parse("1000\n").unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "36");
    }
}
