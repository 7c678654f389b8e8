use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 22, tags = ["2019", "modular-arithmetic"])]
pub struct Solver;

const SMALL_DECK: i128 = 10_007;
const TRACKED_CARD: i128 = 2019;
const HUGE_DECK: i128 = 119_315_717_514_047;
const HUGE_REPEATS: i128 = 101_741_582_076_661;
const WANTED_POSITION: i128 = 2020;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Technique {
    NewStack,
    Cut(i128),
    Increment(i128),
}

impl Technique {
    fn parse(line: &str) -> anyhow::Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        Ok(match words[..] {
            ["deal", "into", "new", "stack"] => Technique::NewStack,
            ["cut", n] => Technique::Cut(n.parse().with_context(|| format!("invalid cut {n:?}"))?),
            ["deal", "with", "increment", n] => {
                let n = n.parse().with_context(|| format!("invalid increment {n:?}"))?;
                if n <= 0 {
                    bail!("increment must be positive, got {n}");
                }
                Technique::Increment(n)
            }
            _ => bail!("unknown technique {line:?}"),
        })
    }
}

/// A shuffle as the map `position = (a * card + b) mod size`
///
/// Every technique is such a map, so any sequence of them, repeated any
/// number of times, is one too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shuffle {
    a: i128,
    b: i128,
    size: i128,
}

impl Shuffle {
    fn identity(size: i128) -> Self {
        Self { a: 1, b: 0, size }
    }

    fn from_techniques(techniques: &[Technique], size: i128) -> Self {
        techniques.iter().fold(Self::identity(size), |shuffle, &technique| {
            let (a, b) = match technique {
                Technique::NewStack => (-1, -1),
                Technique::Cut(n) => (1, -n),
                Technique::Increment(n) => (n, 0),
            };
            shuffle.then(Self { a, b, size })
        })
    }

    /// `self` followed by `next`
    fn then(self, next: Self) -> Self {
        Self {
            a: (next.a * self.a).rem_euclid(self.size),
            b: (next.a * self.b + next.b).rem_euclid(self.size),
            size: self.size,
        }
    }

    fn repeat(self, mut times: i128) -> Self {
        let (mut result, mut square) = (Self::identity(self.size), self);
        while times > 0 {
            if times & 1 == 1 {
                result = result.then(square);
            }
            square = square.then(square);
            times >>= 1;
        }
        result
    }

    fn position_of(&self, card: i128) -> i128 {
        (self.a * card + self.b).rem_euclid(self.size)
    }

    /// The card that ends up at `position`, `None` if cards collide
    fn card_at(&self, position: i128) -> Option<i128> {
        let inverse = mod_inverse(self.a, self.size)?;
        Some(((position - self.b) * inverse).rem_euclid(self.size))
    }
}

fn mod_inverse(value: i128, modulus: i128) -> Option<i128> {
    let (mut old_r, mut r) = (value.rem_euclid(modulus), modulus);
    let (mut old_s, mut s) = (1, 0);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    (old_r == 1).then(|| old_s.rem_euclid(modulus))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Technique>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Technique::parse)
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let shuffle = Shuffle::from_techniques(shared, SMALL_DECK);
        Ok(shuffle.position_of(TRACKED_CARD).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Shuffle::from_techniques(shared, HUGE_DECK)
            .repeat(HUGE_REPEATS)
            .card_at(WANTED_POSITION)
            .map(|card| card.to_string())
            .ok_or_else(|| SolveError::failed("the shuffle does not permute the deck"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn deck_after(techniques: &str) -> Vec<i128> {
        let shuffle = Shuffle::from_techniques(&Solver::parse(techniques).unwrap(), 10);
        (0..10).map(|position| shuffle.card_at(position).unwrap()).collect()
    }

    #[test]
    fn test_single_techniques() {
        assert_eq!(deck_after("deal into new stack"), [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(deck_after("cut 3"), [3, 4, 5, 6, 7, 8, 9, 0, 1, 2]);
        assert_eq!(deck_after("cut -4"), [6, 7, 8, 9, 0, 1, 2, 3, 4, 5]);
        assert_eq!(deck_after("deal with increment 3"), [0, 7, 4, 1, 8, 5, 2, 9, 6, 3]);
    }

    #[test]
    fn test_combined_shuffles() {
        assert_eq!(
            deck_after("deal with increment 7\ndeal into new stack\ndeal into new stack"),
            [0, 3, 6, 9, 2, 5, 8, 1, 4, 7]
        );
        assert_eq!(
            deck_after("cut 6\ndeal with increment 7\ndeal into new stack"),
            [3, 0, 7, 4, 1, 8, 5, 2, 9, 6]
        );
        assert_eq!(
            deck_after("deal with increment 7\ndeal with increment 9\ncut -2"),
            [6, 3, 0, 7, 4, 1, 8, 5, 2, 9]
        );
        assert_eq!(
            deck_after(
                "deal into new stack\ncut -2\ndeal with increment 7\ncut 8\ncut -4\n\
                 deal with increment 7\ncut 3\ndeal with increment 9\ndeal with increment 3\ncut -1"
            ),
            [9, 2, 5, 8, 1, 4, 7, 0, 3, 6]
        );
    }

    #[test]
    fn test_non_permuting_increment() {
        let shuffle = Shuffle::from_techniques(&[Technique::Increment(4)], 10);
        assert_eq!(shuffle.card_at(0), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Solver::parse("deal with increment 0").is_err());
        assert!(Solver::parse("cut x").is_err());
        assert!(Solver::parse("shuffle").is_err());
    }

    fn technique() -> impl Strategy<Value = Technique> {
        prop_oneof![
            Just(Technique::NewStack),
            (-10_006i128..10_007).prop_map(Technique::Cut),
            (1i128..10_007).prop_map(Technique::Increment),
        ]
    }

    proptest! {
        #[test]
        fn test_repeat_matches_iteration(
            techniques in prop::collection::vec(technique(), 1..10),
            times in 0i128..20,
            card in 0i128..SMALL_DECK,
        ) {
            let once = Shuffle::from_techniques(&techniques, SMALL_DECK);
            let stepped = (0..times).fold(card, |c, _| once.position_of(c));
            let repeated = once.repeat(times);
            prop_assert_eq!(repeated.position_of(card), stepped);
            prop_assert_eq!(repeated.card_at(stepped), Some(card));
        }
    }
}
