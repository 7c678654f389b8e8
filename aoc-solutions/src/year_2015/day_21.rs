use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 21, tags = ["2015", "brute-force", "simulation"])]
pub struct Solver;

const PLAYER_HIT_POINTS: u32 = 100;

/// `(cost, damage, armor)`
type Item = (u32, u32, u32);

const WEAPONS: [Item; 5] = [(8, 4, 0), (10, 5, 0), (25, 6, 0), (40, 7, 0), (74, 8, 0)];
const ARMOR: [Item; 5] = [(13, 0, 1), (31, 0, 2), (53, 0, 3), (75, 0, 4), (102, 0, 5)];
const RINGS: [Item; 6] = [(25, 1, 0), (50, 2, 0), (100, 3, 0), (20, 0, 1), (40, 0, 2), (80, 0, 3)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fighter {
    hit_points: u32,
    damage: u32,
    armor: u32,
}

impl Fighter {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let stat = |name: &str| -> anyhow::Result<u32> {
            input
                .lines()
                .find_map(|line| line.trim().strip_prefix(name)?.strip_prefix(": "))
                .ok_or_else(|| anyhow!("missing {name}"))?
                .parse()
                .with_context(|| format!("invalid {name}"))
        };
        Ok(Fighter {
            hit_points: stat("Hit Points")?,
            damage: stat("Damage")?,
            armor: stat("Armor")?,
        })
    }

    /// Rounds this fighter needs to bring `other` down
    fn rounds_to_beat(&self, other: &Fighter) -> u32 {
        let per_hit = self.damage.saturating_sub(other.armor).max(1);
        other.hit_points.div_ceil(per_hit)
    }
}

/// The player strikes first, so ties go to the player
fn player_wins(player: &Fighter, boss: &Fighter) -> bool {
    player.rounds_to_beat(boss) <= boss.rounds_to_beat(player)
}

/// One weapon, up to one armor and up to two distinct rings, with total cost
fn loadouts() -> impl Iterator<Item = (u32, Fighter)> {
    let armor = std::iter::once(None).chain(ARMOR.into_iter().map(Some));
    let rings = (0..=2).flat_map(|n| RINGS.into_iter().combinations(n));
    WEAPONS
        .into_iter()
        .cartesian_product(armor)
        .cartesian_product(rings.collect_vec())
        .map(|((weapon, armor), rings)| {
            let items = std::iter::once(weapon).chain(armor).chain(rings);
            let (cost, damage, armor) = items.fold((0, 0, 0), |acc, item| {
                (acc.0 + item.0, acc.1 + item.1, acc.2 + item.2)
            });
            (
                cost,
                Fighter {
                    hit_points: PLAYER_HIT_POINTS,
                    damage,
                    armor,
                },
            )
        })
}

impl AocParser for Solver {
    type SharedData<'a> = Fighter;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Fighter::parse(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        loadouts()
            .filter(|(_, player)| player_wins(player, shared))
            .map(|(cost, _)| cost)
            .min()
            .map(|cost| cost.to_string())
            .ok_or_else(|| SolveError::failed("no loadout beats the boss"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        loadouts()
            .filter(|(_, player)| !player_wins(player, shared))
            .map(|(cost, _)| cost)
            .max()
            .map(|cost| cost.to_string())
            .ok_or_else(|| SolveError::failed("every loadout beats the boss"))
    }
}
