use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["2022", "game"])]
pub struct Solver;

/// Rock, paper and scissors as 0, 1 and 2; each beats the one before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape(u8);

impl Shape {
    fn score(self) -> u32 {
        u32::from(self.0) + 1
    }

    /// Our shape that gives `outcome` (0 loss, 1 draw, 2 win) against `self`
    fn answer_for(self, outcome: u8) -> Shape {
        Shape((self.0 + outcome + 2) % 3)
    }

    /// 0 for a loss, 1 for a draw, 2 for a win, seen from `self`
    fn outcome_against(self, opponent: Shape) -> u8 {
        (self.0 + 4 - opponent.0) % 3
    }
}

/// Strategy guide row: the opponent's shape and our column as 0, 1 or 2
type Round = (Shape, u8);

fn round_score(ours: Shape, opponent: Shape) -> u32 {
    ours.score() + 3 * u32::from(ours.outcome_against(opponent))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| -> anyhow::Result<Round> {
                match line.trim().as_bytes() {
                    &[them @ b'A'..=b'C', b' ', us @ b'X'..=b'Z'] => {
                        Ok((Shape(them - b'A'), us - b'X'))
                    }
                    _ => bail!("invalid round {line:?}"),
                }
            })
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|&(opponent, column)| round_score(Shape(column), opponent))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|&(opponent, outcome)| round_score(opponent.answer_for(outcome), opponent))
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROCK: Shape = Shape(0);
    const PAPER: Shape = Shape(1);
    const SCISSORS: Shape = Shape(2);

    #[test]
    fn test_rounds() {
        assert_eq!(round_score(PAPER, ROCK), 8);
        assert_eq!(round_score(ROCK, PAPER), 1);
        assert_eq!(round_score(SCISSORS, SCISSORS), 6);
        assert_eq!(ROCK.answer_for(1), ROCK);
        assert_eq!(PAPER.answer_for(0), ROCK);
        assert_eq!(SCISSORS.answer_for(2), ROCK);
    }

    #[test]
    fn test_parts() {
        let mut guide = Solver::parse("A Y\nB X\nC Z\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut guide).unwrap(), "15");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut guide).unwrap(), "12");
        assert!(Solver::parse("A W").is_err());
    }
}
