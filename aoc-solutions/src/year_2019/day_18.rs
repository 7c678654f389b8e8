use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;
use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 18, tags = ["2019", "search", "graph"])]
pub struct Solver;

/// Bit `n` stands for key (or door) `n`, `a` being 0
type KeySet = u32;

/// Route from one point of interest to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Route {
    key: u8,
    steps: u32,
    /// keys needed for the doors on the way, plus the keys walked over
    needs: KeySet,
}

fn key_bit(cell: u8) -> Option<KeySet> {
    match cell {
        b'a'..=b'z' => Some(1 << (cell - b'a')),
        b'A'..=b'Z' => Some(1 << (cell - b'A')),
        _ => None,
    }
}

/// Vault map; `@` marks a robot
#[derive(Debug, Clone)]
pub struct Vault {
    grid: Grid<u8>,
}

impl Vault {
    fn parse(input: &str) -> anyhow::Result<Self> {
        let grid = Grid::parse(input.trim(), |cell| match cell {
            b'#' | b'.' | b'@' | b'a'..=b'z' | b'A'..=b'Z' => Ok(cell),
            other => bail!("unexpected {:?}", other as char),
        })?;
        let vault = Self { grid };
        if vault.robots().is_empty() {
            bail!("no entrance");
        }
        Ok(vault)
    }

    fn robots(&self) -> Vec<Point> {
        self.grid.iter().filter(|&(_, &c)| c == b'@').map(|(p, _)| p).collect()
    }

    /// Wall off the single entrance and put a robot in each diagonal corner
    fn split_entrance(&self) -> Option<Self> {
        let [centre] = self.robots()[..] else {
            return None;
        };
        let mut grid = self.grid.clone();
        for direction in Point::ALL_DIRECTIONS {
            let corner = direction.x != 0 && direction.y != 0;
            if !grid.set(centre + direction, if corner { b'@' } else { b'#' }) {
                return None;
            }
        }
        grid.set(centre, b'#');
        Some(Self { grid })
    }

    /// Breadth-first routes from `start` to every key it can reach
    fn routes_from(&self, start: Point) -> Vec<Route> {
        let mut routes = Vec::new();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0, 0)]);
        while let Some((at, steps, mut needs)) = queue.pop_front() {
            let cell = self.grid.get(at).copied().unwrap_or(b'#');
            if let Some(bit) = key_bit(cell) {
                if cell.is_ascii_lowercase() && at != start {
                    routes.push(Route {
                        key: cell - b'a',
                        steps,
                        needs,
                    });
                }
                needs |= bit;
            }
            for next in at.neighbors4() {
                if self.grid.get(next).is_some_and(|&c| c != b'#') && seen.insert(next) {
                    queue.push_back((next, steps + 1, needs));
                }
            }
        }
        routes
    }

    /// Fewest steps for the robots together to collect every key
    ///
    /// Doors whose key is not in the vault never block anything; another
    /// robot's quadrant may be holding it for all this one knows.
    fn collect_all(&self) -> Option<u32> {
        let robots = self.robots();
        let keys: Vec<(u8, Point)> = self
            .grid
            .iter()
            .filter(|(_, c)| c.is_ascii_lowercase())
            .map(|(p, &c)| (c - b'a', p))
            .collect();
        let all: KeySet = keys.iter().fold(0, |set, &(k, _)| set | 1 << k);

        // node ids: robots first, then key `k` at robots.len() + k
        let mut routes: Vec<Vec<Route>> = vec![Vec::new(); robots.len() + 26];
        for (i, &robot) in robots.iter().enumerate() {
            routes[i] = self.routes_from(robot);
        }
        for &(key, at) in &keys {
            routes[robots.len() + key as usize] = self.routes_from(at);
        }

        let start: Vec<usize> = (0..robots.len()).collect();
        let mut best = HashMap::from([((0, start.clone()), 0)]);
        let mut queue = BinaryHeap::from([Reverse((0, 0, start))]);
        while let Some(Reverse((steps, held, at))) = queue.pop() {
            if held == all {
                return Some(steps);
            }
            if best.get(&(held, at.clone())).is_some_and(|&b| b < steps) {
                continue;
            }
            for (robot, &node) in at.iter().enumerate() {
                for route in &routes[node] {
                    let bit = 1 << route.key;
                    if held & bit != 0 || route.needs & all & !held != 0 {
                        continue;
                    }
                    let mut next = at.clone();
                    next[robot] = robots.len() + route.key as usize;
                    let state = (held | bit, next);
                    let steps = steps + route.steps;
                    if best.get(&state).is_none_or(|&b| steps < b) {
                        best.insert(state.clone(), steps);
                        queue.push(Reverse((steps, state.0, state.1)));
                    }
                }
            }
        }
        None
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vault;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Vault::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .collect_all()
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::failed("some keys are unreachable"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let vault = match shared.robots().len() {
            1 => shared
                .split_entrance()
                .ok_or_else(|| SolveError::failed("no room to split the entrance"))?,
            _ => shared.clone(),
        };
        vault
            .collect_all()
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::failed("some keys are unreachable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve<const N: u8>(input: &str) -> String
    where
        Solver: PartSolver<N>,
    {
        <Solver as PartSolver<N>>::solve(&mut Solver::parse(input).unwrap()).unwrap()
    }

    const CROSS: &str = "\
#######
#a.#Cd#
##...##
##.@.##
##...##
#cB#Ab#
#######";

    #[test]
    fn test_routes() {
        let vault = Vault::parse("#########\n#b.A.@.a#\n#########").unwrap();
        let mut routes = vault.routes_from(Point::new(5, 1));
        routes.sort_by_key(|r| r.key);
        assert_eq!(
            routes,
            vec![
                Route { key: 0, steps: 2, needs: 0 },
                Route { key: 1, steps: 4, needs: 1 },
            ]
        );
    }

    #[test]
    fn test_part1() {
        assert_eq!(solve::<1>("#########\n#b.A.@.a#\n#########"), "8");
        assert_eq!(
            solve::<1>(
                "########################\n#f.D.E.e.C.b.A.@.a.B.c.#\n\
                 ######################.#\n#d.....................#\n########################"
            ),
            "86"
        );
        assert_eq!(
            solve::<1>(
                "########################\n#...............b.C.D.f#\n\
                 #.######################\n#.....@.a.B.c.d.A.e.F.g#\n########################"
            ),
            "132"
        );
        assert_eq!(
            solve::<1>(
                "########################\n#@..............ac.GI.b#\n###d#e#f################\n\
                 ###A#B#C################\n###g#h#i################\n########################"
            ),
            "81"
        );
        assert_eq!(solve::<1>(CROSS), "26");
    }

    #[test]
    fn test_part2() {
        assert_eq!(solve::<2>(CROSS), "8");
        assert_eq!(
            solve::<2>(
                "###############\n#d.ABC.#.....a#\n######@#@######\n###############\n\
                 ######@#@######\n#b.....#.....c#\n###############"
            ),
            "24"
        );
        assert_eq!(
            solve::<2>(
                "#############\n#DcBa.#.GhKl#\n#.###@#@#I###\n#e#d#####j#k#\n\
                 ###C#@#@###J#\n#fEbA.#.FgHi#\n#############"
            ),
            "32"
        );
        assert_eq!(
            solve::<2>(
                "#############\n#g#f.D#..h#l#\n#F###e#E###.#\n#dCba@#@BcIJ#\n#############\n\
                 #nK.L@#@G...#\n#M###N#H###.#\n#o#m..#i#jk.#\n#############"
            ),
            "72"
        );
    }

    #[test]
    fn test_invalid_vaults() {
        assert!(Solver::parse("#####\n#a.b#\n#####").is_err());
        assert!(Solver::parse("###\n#@?\n###").is_err());
        let mut sealed = Solver::parse("#####\n#@#a#\n#####").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut sealed).is_err());
        let mut cramped = Solver::parse("#@a").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut cramped).is_err());
    }
}
