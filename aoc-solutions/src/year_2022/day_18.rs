use std::collections::{HashSet, VecDeque};

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 18, tags = ["2022", "3d", "flood-fill"])]
pub struct Solver;

type Cube = [i32; 3];

fn faces(cube: Cube) -> impl Iterator<Item = Cube> {
    (0..3).flat_map(move |axis| {
        [-1, 1].map(|delta| {
            let mut next = cube;
            next[axis] += delta;
            next
        })
    })
}

fn parse_cube(line: &str) -> anyhow::Result<Cube> {
    let coords = line
        .split(',')
        .map(|n| n.trim().parse::<i32>().with_context(|| format!("invalid coordinate {n:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    match coords[..] {
        [x, y, z] => Ok([x, y, z]),
        _ => bail!("expected three coordinates in {line:?}"),
    }
}

fn surface_area(droplet: &HashSet<Cube>) -> usize {
    droplet
        .iter()
        .flat_map(|&cube| faces(cube))
        .filter(|face| !droplet.contains(face))
        .count()
}

/// Faces reachable by steam flowing in from outside the bounding box
fn exterior_surface_area(droplet: &HashSet<Cube>) -> usize {
    let Some(first) = droplet.iter().next() else {
        return 0;
    };
    let (mut low, mut high) = (*first, *first);
    for cube in droplet {
        for axis in 0..3 {
            low[axis] = low[axis].min(cube[axis] - 1);
            high[axis] = high[axis].max(cube[axis] + 1);
        }
    }
    let inside = |c: &Cube| (0..3).all(|axis| (low[axis]..=high[axis]).contains(&c[axis]));

    let mut steam = HashSet::from([low]);
    let mut queue = VecDeque::from([low]);
    let mut exposed = 0;
    while let Some(air) = queue.pop_front() {
        for next in faces(air) {
            if droplet.contains(&next) {
                exposed += 1;
            } else if inside(&next) && steam.insert(next) {
                queue.push_back(next);
            }
        }
    }
    exposed
}

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Cube>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(parse_cube)
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(surface_area(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(exterior_surface_area(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EXAMPLE: &str = "2,2,2\n1,2,2\n3,2,2\n2,1,2\n2,3,2\n2,2,1\n2,2,3\n2,2,4\n2,2,6\n\
                           1,2,5\n3,2,5\n2,1,5\n2,3,5";

    #[test]
    fn test_example() {
        let mut droplet = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut droplet).unwrap(), "64");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut droplet).unwrap(), "58");
    }

    #[test]
    fn test_two_cubes() {
        let droplet = Solver::parse("1,1,1\n2,1,1").unwrap();
        assert_eq!(surface_area(&droplet), 10);
        assert_eq!(exterior_surface_area(&droplet), 10);
        assert!(Solver::parse("1,1").is_err());
        assert!(Solver::parse("1,a,1").is_err());
    }

    #[test]
    fn test_hollow_shell() {
        // 3x3x3 block with the centre missing
        let droplet: HashSet<Cube> = (0..27)
            .map(|i| [i % 3, i / 3 % 3, i / 9])
            .filter(|&c| c != [1, 1, 1])
            .collect();
        assert_eq!(surface_area(&droplet), 54 + 6);
        assert_eq!(exterior_surface_area(&droplet), 54);
    }

    proptest! {
        #[test]
        fn exterior_never_exceeds_total(
            cubes in prop::collection::hash_set((0..5i32, 0..5i32, 0..5i32), 0..40)
        ) {
            let droplet: HashSet<Cube> = cubes.into_iter().map(|(x, y, z)| [x, y, z]).collect();
            prop_assert!(exterior_surface_area(&droplet) <= surface_area(&droplet));
        }
    }
}
