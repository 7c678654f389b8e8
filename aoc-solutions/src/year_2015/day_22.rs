use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 22, tags = ["2015", "search", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spell {
    MagicMissile,
    Drain,
    Shield,
    Poison,
    Recharge,
}

impl Spell {
    const ALL: [Spell; 5] = [
        Spell::MagicMissile,
        Spell::Drain,
        Spell::Shield,
        Spell::Poison,
        Spell::Recharge,
    ];

    fn cost(self) -> u32 {
        match self {
            Spell::MagicMissile => 53,
            Spell::Drain => 73,
            Spell::Shield => 113,
            Spell::Poison => 173,
            Spell::Recharge => 229,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boss {
    hit_points: i32,
    damage: i32,
}

impl Boss {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let stat = |name: &str| -> anyhow::Result<i32> {
            input
                .lines()
                .find_map(|line| line.trim().strip_prefix(name)?.strip_prefix(": "))
                .ok_or_else(|| anyhow!("missing {name}"))?
                .parse()
                .with_context(|| format!("invalid {name}"))
        };
        Ok(Boss {
            hit_points: stat("Hit Points")?,
            damage: stat("Damage")?,
        })
    }
}

/// Everything that matters at the start of the player's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Battle {
    player_hp: i32,
    mana: u32,
    boss_hp: i32,
    shield: u8,
    poison: u8,
    recharge: u8,
}

impl Battle {
    /// Start-of-turn effects; returns the player's armor for this turn
    fn apply_effects(&mut self) -> i32 {
        let armor = if self.shield > 0 { 7 } else { 0 };
        if self.poison > 0 {
            self.boss_hp -= 3;
        }
        if self.recharge > 0 {
            self.mana += 101;
        }
        self.shield = self.shield.saturating_sub(1);
        self.poison = self.poison.saturating_sub(1);
        self.recharge = self.recharge.saturating_sub(1);
        armor
    }

    /// Cast `spell` after the player's effects resolved, `None` if not allowed
    fn cast(mut self, spell: Spell) -> Option<Self> {
        self.mana = self.mana.checked_sub(spell.cost())?;
        match spell {
            Spell::MagicMissile => self.boss_hp -= 4,
            Spell::Drain => {
                self.boss_hp -= 2;
                self.player_hp += 2;
            }
            // an effect may be recast on the turn it wears off
            Spell::Shield if self.shield == 0 => self.shield = 6,
            Spell::Poison if self.poison == 0 => self.poison = 6,
            Spell::Recharge if self.recharge == 0 => self.recharge = 5,
            Spell::Shield | Spell::Poison | Spell::Recharge => return None,
        }
        Some(self)
    }
}

/// Least mana spent on a win, by uniform-cost search over battle states
///
/// `drain_per_turn` is lost by the player at the start of each of their
/// turns (1 on hard mode).
fn cheapest_win(player_hp: i32, mana: u32, boss: Boss, drain_per_turn: i32) -> Option<u32> {
    let start = Battle {
        player_hp,
        mana,
        boss_hp: boss.hit_points,
        shield: 0,
        poison: 0,
        recharge: 0,
    };
    // (spent, won, state)
    let mut queue = BinaryHeap::from([Reverse((0u32, false, start))]);
    let mut best: HashMap<Battle, u32> = HashMap::from([(start, 0)]);

    while let Some(Reverse((spent, won, mut battle))) = queue.pop() {
        if won {
            return Some(spent);
        }
        if best.get(&battle).is_some_and(|&b| b < spent) {
            continue;
        }

        battle.player_hp -= drain_per_turn;
        if battle.player_hp <= 0 {
            continue;
        }
        battle.apply_effects();
        if battle.boss_hp <= 0 {
            queue.push(Reverse((spent, true, battle)));
            continue;
        }

        for spell in Spell::ALL {
            let Some(mut next) = battle.cast(spell) else {
                continue;
            };
            let spent = spent + spell.cost();
            if next.boss_hp <= 0 {
                queue.push(Reverse((spent, true, next)));
                continue;
            }

            // boss turn; poison can finish him before he strikes
            let armor = next.apply_effects();
            if next.boss_hp <= 0 {
                queue.push(Reverse((spent, true, next)));
                continue;
            }
            next.player_hp -= (boss.damage - armor).max(1);
            if next.player_hp <= 0 {
                continue;
            }

            if best.get(&next).is_none_or(|&b| spent < b) {
                best.insert(next, spent);
                queue.push(Reverse((spent, false, next)));
            }
        }
    }
    None
}

impl AocParser for Solver {
    type SharedData<'a> = Boss;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Boss::parse(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        cheapest_win(50, 500, *shared, 0)
            .map(|mana| mana.to_string())
            .ok_or_else(|| SolveError::failed("the boss cannot be beaten"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        cheapest_win(50, 500, *shared, 1)
            .map(|mana| mana.to_string())
            .ok_or_else(|| SolveError::failed("the boss cannot be beaten on hard mode"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_example() {
        let boss = Boss {
            hit_points: 13,
            damage: 8,
        };
        // poison, then magic missile; the boss dies of poison on his turn
        assert_eq!(cheapest_win(10, 250, boss, 0), Some(226));
        // shield is mandatory on hard mode and leaves too little mana
        assert_eq!(cheapest_win(10, 250, boss, 1), None);
    }

    #[test]
    fn test_second_example() {
        let boss = Boss {
            hit_points: 14,
            damage: 8,
        };
        // recharge, shield, drain, poison, magic missile
        assert_eq!(cheapest_win(10, 250, boss, 0), Some(229 + 113 + 73 + 173 + 53));
    }

    #[test]
    fn test_second_example_replay() {
        let boss = Boss {
            hit_points: 14,
            damage: 8,
        };
        let mut battle = Battle {
            player_hp: 10,
            mana: 250,
            boss_hp: boss.hit_points,
            shield: 0,
            poison: 0,
            recharge: 0,
        };
        let spells = [
            Spell::Recharge,
            Spell::Shield,
            Spell::Drain,
            Spell::Poison,
            Spell::MagicMissile,
        ];
        for spell in spells {
            battle.apply_effects();
            battle = battle.cast(spell).unwrap();
            let armor = battle.apply_effects();
            if battle.boss_hp <= 0 {
                break;
            }
            battle.player_hp -= (boss.damage - armor).max(1);
            assert!(battle.player_hp > 0);
        }
        assert!(battle.boss_hp <= 0);
        assert_eq!(battle.player_hp, 1);
        assert_eq!(battle.mana, 114);
    }

    #[test]
    fn test_recast_on_expiry() {
        let battle = Battle {
            player_hp: 10,
            mana: 500,
            boss_hp: 10,
            shield: 1,
            poison: 0,
            recharge: 0,
        };
        assert!(battle.cast(Spell::Shield).is_none());
        let mut battle = battle;
        assert_eq!(battle.apply_effects(), 7);
        assert_eq!(battle.cast(Spell::Shield).map(|b| b.shield), Some(6));
    }

    #[test]
    fn test_parse() {
        let mut boss = Solver::parse("Hit Points: 13\nDamage: 8\n").unwrap();
        assert_eq!(boss, Boss { hit_points: 13, damage: 8 });
        assert!(<Solver as PartSolver<1>>::solve(&mut boss).is_ok());
        assert!(Solver::parse("Hit Points: 13").is_err());
    }
}
