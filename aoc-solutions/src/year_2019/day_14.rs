use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 14, tags = ["2019", "graph", "binary-search"])]
pub struct Solver;

const CARGO_ORE: u64 = 1_000_000_000_000;

#[derive(Debug, Clone)]
struct Reaction<'a> {
    makes: u64,
    inputs: Vec<(&'a str, u64)>,
}

/// Reactions keyed by product, plus every product ordered so that each
/// comes before anything it is made from
#[derive(Debug, Clone)]
pub struct Nanofactory<'a> {
    reactions: HashMap<&'a str, Reaction<'a>>,
    order: Vec<&'a str>,
}

fn parse_amount(text: &str) -> anyhow::Result<(&str, u64)> {
    let (qty, chemical) = text
        .trim()
        .split_once(' ')
        .ok_or_else(|| anyhow!("invalid amount {text:?}"))?;
    Ok((chemical, qty.parse().with_context(|| format!("invalid quantity {qty:?}"))?))
}

impl<'a> Nanofactory<'a> {
    fn parse(input: &'a str) -> anyhow::Result<Self> {
        let mut reactions = HashMap::new();
        for line in input.lines().filter(|l| !l.trim().is_empty()) {
            let (inputs, output) = line
                .split_once("=>")
                .ok_or_else(|| anyhow!("invalid reaction {line:?}"))?;
            let (product, makes) = parse_amount(output)?;
            let inputs = inputs.split(',').map(parse_amount).collect::<anyhow::Result<_>>()?;
            if makes == 0 || reactions.insert(product, Reaction { makes, inputs }).is_some() {
                bail!("{product} has more than one way to be made");
            }
        }
        let order = Self::order(&reactions)?;
        Ok(Self { reactions, order })
    }

    /// Depth-first topological sort from FUEL
    fn order(reactions: &HashMap<&'a str, Reaction<'a>>) -> anyhow::Result<Vec<&'a str>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Open,
            Done,
        }
        fn visit<'a>(
            chemical: &'a str,
            reactions: &HashMap<&'a str, Reaction<'a>>,
            marks: &mut HashMap<&'a str, Mark>,
            order: &mut Vec<&'a str>,
        ) -> anyhow::Result<()> {
            match marks.get(chemical) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Open) => bail!("{chemical} is needed to make itself"),
                None => {}
            }
            if chemical != "ORE" {
                let reaction = reactions
                    .get(chemical)
                    .ok_or_else(|| anyhow!("nothing makes {chemical}"))?;
                marks.insert(chemical, Mark::Open);
                for &(input, _) in &reaction.inputs {
                    visit(input, reactions, marks, order)?;
                }
            }
            marks.insert(chemical, Mark::Done);
            order.push(chemical);
            Ok(())
        }

        let mut order = Vec::new();
        visit("FUEL", reactions, &mut HashMap::new(), &mut order)?;
        order.reverse();
        Ok(order)
    }

    /// Ore needed to make `fuel` FUEL, reusing leftovers
    fn ore_for(&self, fuel: u64) -> u64 {
        let mut needed = HashMap::from([("FUEL", fuel)]);
        for chemical in &self.order {
            let Some(reaction) = self.reactions.get(chemical) else {
                continue;
            };
            let want = needed.get(chemical).copied().unwrap_or(0);
            let runs = want.div_ceil(reaction.makes);
            for &(input, qty) in &reaction.inputs {
                *needed.entry(input).or_insert(0) += runs * qty;
            }
        }
        needed.get("ORE").copied().unwrap_or(0)
    }

    /// Most FUEL that `ore` can make
    fn max_fuel(&self, ore: u64) -> u64 {
        let (mut low, mut high) = (0, 1);
        while self.ore_for(high) <= ore {
            low = high;
            high *= 2;
        }
        // ore_for(low) <= ore < ore_for(high)
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if self.ore_for(mid) <= ore {
                low = mid;
            } else {
                high = mid;
            }
        }
        low
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Nanofactory<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Nanofactory::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.ore_for(1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.ore_for(1) == 0 {
            return Err(SolveError::failed("FUEL needs no ore, so there is no limit"));
        }
        Ok(shared.max_fuel(CARGO_ORE).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIN: &str = "\
10 ORE => 10 A
1 ORE => 1 B
7 A, 1 B => 1 C
7 A, 1 C => 1 D
7 A, 1 D => 1 E
7 A, 1 E => 1 FUEL";

    const PAIRS: &str = "\
9 ORE => 2 A
8 ORE => 3 B
7 ORE => 5 C
3 A, 4 B => 1 AB
5 B, 7 C => 1 BC
4 C, 1 A => 1 CA
2 AB, 3 BC, 4 CA => 1 FUEL";

    const LARGE: &str = "\
2 VPVL, 7 FWMGM, 2 CXFTF, 11 MNCFX => 1 STKFG
17 NVRVD, 3 JNWZP => 8 VPVL
53 STKFG, 6 MNCFX, 46 VJHF, 81 HVMC, 68 CXFTF, 25 GNMV => 1 FUEL
22 VJHF, 37 MNCFX => 5 FWMGM
139 ORE => 4 NVRVD
144 ORE => 7 JNWZP
5 MNCFX, 7 RFSQX, 2 FWMGM, 2 VPVL, 19 CXFTF => 3 HVMC
5 VJHF, 7 MNCFX, 9 VPVL, 37 CXFTF => 6 GNMV
145 ORE => 6 MNCFX
1 NVRVD => 8 CXFTF
1 VJHF, 6 MNCFX => 4 RFSQX
176 ORE => 6 VJHF";

    #[test]
    fn test_part1() {
        for (input, ore) in [(CHAIN, 31), (PAIRS, 165), (LARGE, 180697)] {
            assert_eq!(Nanofactory::parse(input).unwrap().ore_for(1), ore);
        }
    }

    #[test]
    fn test_part2() {
        let mut factory = Solver::parse(LARGE).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut factory).unwrap(), "5586022");
    }

    #[test]
    fn test_max_fuel_bounds() {
        let factory = Nanofactory::parse(CHAIN).unwrap();
        assert_eq!(factory.max_fuel(30), 0);
        assert_eq!(factory.max_fuel(31), 1);
        assert!(factory.ore_for(factory.max_fuel(10_000) + 1) > 10_000);
    }

    #[test]
    fn test_invalid_reactions() {
        assert!(Solver::parse("1 A => 1 FUEL").is_err());
        assert!(Solver::parse("1 FUEL => 1 A\n1 A => 1 FUEL").is_err());
        assert!(Solver::parse("1 ORE => 1 FUEL\n2 ORE => 1 FUEL").is_err());
        assert!(Solver::parse("ORE => 1 FUEL").is_err());
    }
}
