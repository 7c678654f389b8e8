use std::collections::{HashMap, HashSet, VecDeque};

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 20, tags = ["2019", "search", "grid"])]
pub struct Solver;

/// Where a portal tile leads and how the recursion depth changes on the way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Warp {
    to: Point,
    depth: i32,
}

/// Donut maze with labelled portals; `AA` is the entrance and `ZZ` the exit
#[derive(Debug, Clone)]
pub struct Donut {
    open: HashSet<Point>,
    warps: HashMap<Point, Warp>,
    start: Point,
    finish: Point,
}

impl Donut {
    fn parse(input: &str) -> anyhow::Result<Self> {
        // leading spaces are significant, so the text is not trimmed
        let mut rows: Vec<&[u8]> = input.lines().map(str::as_bytes).collect();
        while rows.last().is_some_and(|r| r.trim_ascii().is_empty()) {
            rows.pop();
        }
        let height = rows.len() as i64;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as i64;
        let cell = |p: Point| -> u8 {
            usize::try_from(p.y)
                .ok()
                .and_then(|y| rows.get(y)?.get(usize::try_from(p.x).ok()?))
                .copied()
                .unwrap_or(b' ')
        };

        let mut open = HashSet::new();
        let mut labels: HashMap<[u8; 2], Vec<Point>> = HashMap::new();
        for y in 0..height {
            for x in 0..width {
                let p = Point::new(x, y);
                if cell(p) != b'.' {
                    continue;
                }
                open.insert(p);
                for direction in Point::ORTHOGONAL {
                    let (near, far) = (cell(p + direction), cell(p + direction * 2));
                    if near.is_ascii_uppercase() && far.is_ascii_uppercase() {
                        // labels read left to right or top to bottom
                        let name = if direction == Point::UP || direction == Point::LEFT {
                            [far, near]
                        } else {
                            [near, far]
                        };
                        labels.entry(name).or_default().push(p);
                    }
                }
            }
        }

        let on_outer_edge =
            |p: Point| p.x == 2 || p.y == 2 || p.x == width - 3 || p.y == height - 3;
        let mut single = |name: &[u8; 2]| -> anyhow::Result<Point> {
            match labels.remove(name).as_deref() {
                Some(&[p]) => Ok(p),
                _ => Err(anyhow!("expected one {} tile", String::from_utf8_lossy(name))),
            }
        };
        let start = single(b"AA")?;
        let finish = single(b"ZZ")?;

        let mut warps = HashMap::new();
        for (name, ends) in labels {
            let [a, b] = ends[..] else {
                bail!("portal {} has {} ends", String::from_utf8_lossy(&name), ends.len());
            };
            for (from, to) in [(a, b), (b, a)] {
                let depth = if on_outer_edge(from) { -1 } else { 1 };
                warps.insert(from, Warp { to, depth });
            }
        }
        Ok(Self {
            open,
            warps,
            start,
            finish,
        })
    }

    /// Fewest steps from entrance to exit
    ///
    /// With `recursive` set, inner portals lead one level down and outer
    /// portals one level up; the exit only counts on the outermost level.
    /// Going deeper than there are portals never shortens the walk.
    fn shortest_walk(&self, recursive: bool) -> Option<usize> {
        let max_depth = self.warps.len() as i32;
        let mut seen = HashSet::from([(self.start, 0)]);
        let mut queue = VecDeque::from([(self.start, 0, 0)]);
        while let Some((at, depth, steps)) = queue.pop_front() {
            if at == self.finish && depth == 0 {
                return Some(steps);
            }
            let walk = at.neighbors4().filter(|p| self.open.contains(p)).map(|p| (p, depth));
            let warp = self.warps.get(&at).and_then(|warp| {
                let depth = if recursive { depth + warp.depth } else { 0 };
                (0..=max_depth).contains(&depth).then_some((warp.to, depth))
            });
            for state in walk.chain(warp) {
                if seen.insert(state) {
                    queue.push_back((state.0, state.1, steps + 1));
                }
            }
        }
        None
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Donut;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Donut::parse(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .shortest_walk(false)
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::failed("ZZ is unreachable"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .shortest_walk(true)
            .map(|s| s.to_string())
            .ok_or_else(|| SolveError::failed("ZZ is unreachable through the recursive levels"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &[&str] = &[
        "         A           ",
        "         A           ",
        "  #######.#########  ",
        "  #######.........#  ",
        "  #######.#######.#  ",
        "  #######.#######.#  ",
        "  #######.#######.#  ",
        "  #####  B    ###.#  ",
        "BC...##  C    ###.#  ",
        "  ##.##       ###.#  ",
        "  ##...DE  F  ###.#  ",
        "  #####    G  ###.#  ",
        "  #########.#####.#  ",
        "DE..#######...###.#  ",
        "  #.#########.###.#  ",
        "FG..#########.....#  ",
        "  ###########.#####  ",
        "             Z       ",
        "             Z       ",
    ];

    const LARGE: &[&str] = &[
        "                   A               ",
        "                   A               ",
        "  #################.#############  ",
        "  #.#...#...................#.#.#  ",
        "  #.#.#.###.###.###.#########.#.#  ",
        "  #.#.#.......#...#.....#.#.#...#  ",
        "  #.#########.###.#####.#.#.###.#  ",
        "  #.............#.#.....#.......#  ",
        "  ###.###########.###.#####.#.#.#  ",
        "  #.....#        A   C    #.#.#.#  ",
        "  #######        S   P    #####.#  ",
        "  #.#...#                 #......VT",
        "  #.#.#.#                 #.#####  ",
        "  #...#.#               YN....#.#  ",
        "  #.###.#                 #####.#  ",
        "DI....#.#                 #.....#  ",
        "  #####.#                 #.###.#  ",
        "ZZ......#               QG....#..AS",
        "  ###.###                 #######  ",
        "JO..#.#.#                 #.....#  ",
        "  #.#.#.#                 ###.#.#  ",
        "  #...#..DI             BU....#..LF",
        "  #####.#                 #.#####  ",
        "YN......#               VT..#....QG",
        "  #.###.#                 #.###.#  ",
        "  #.#...#                 #.....#  ",
        "  ###.###    J L     J    #.#.###  ",
        "  #.....#    O F     P    #.#...#  ",
        "  #.###.#####.#.#####.#####.###.#  ",
        "  #...#.#.#...#.....#.....#.#...#  ",
        "  #.#####.###.###.#.#.#########.#  ",
        "  #...#.#.....#...#.#.#.#.....#.#  ",
        "  #.###.#####.###.###.#.#.#######  ",
        "  #.#.........#...#.............#  ",
        "  #########.###.###.#############  ",
        "           B   J   C               ",
        "           U   P   P               ",
    ];

    #[test]
    fn test_parse_portals() {
        let donut = Donut::parse(&SMALL.join("\n")).unwrap();
        assert_eq!((donut.start, donut.finish), (Point::new(9, 2), Point::new(13, 16)));
        assert_eq!(donut.warps.len(), 6);
        // BC: inner end by the B C label, outer end on the left edge
        assert_eq!(
            donut.warps[&Point::new(9, 6)],
            Warp {
                to: Point::new(2, 8),
                depth: 1
            }
        );
        assert_eq!(donut.warps[&Point::new(2, 8)].depth, -1);
    }

    #[test]
    fn test_part1() {
        let mut small = Solver::parse(&SMALL.join("\n")).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut small).unwrap(), "23");
        let mut large = Solver::parse(&LARGE.join("\n")).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut large).unwrap(), "58");
    }

    #[test]
    fn test_part2() {
        let mut small = Solver::parse(&SMALL.join("\n")).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut small).unwrap(), "26");
        // every route out of the large maze needs an outer portal on level 0
        let mut large = Solver::parse(&LARGE.join("\n")).unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut large).is_err());
    }

    #[test]
    fn test_bad_labels() {
        let no_exit = SMALL.join("\n").replace('Z', " ");
        assert!(Solver::parse(&no_exit).is_err());
        let lonely = SMALL.join("\n").replacen("FG", "XY", 1);
        assert!(Solver::parse(&lonely).is_err());
    }
}
