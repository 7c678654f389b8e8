use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 24, tags = ["2015", "combinatorics"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .split_whitespace()
            .map(|n| {
                n.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("invalid weight {n:?}")))
            })
            .collect()
    }
}

/// Whether `items` splits into `groups` subsets each weighing `target`
fn can_split(items: &[u64], groups: usize, target: u64) -> bool {
    if groups <= 1 {
        return items.iter().sum::<u64>() == target * groups as u64;
    }
    (1..=items.len()).any(|size| {
        (0..items.len()).combinations(size).any(|picked| {
            picked.iter().map(|&i| items[i]).sum::<u64>() == target && {
                let rest: Vec<u64> = (0..items.len())
                    .filter(|i| !picked.contains(i))
                    .map(|i| items[i])
                    .collect();
                can_split(&rest, groups - 1, target)
            }
        })
    })
}

/// Lowest quantum entanglement of a smallest front group that still lets
/// the rest balance
fn best_entanglement(parcels: &[u64], groups: usize) -> Option<u64> {
    let total: u64 = parcels.iter().sum();
    if groups == 0 || total % groups as u64 != 0 {
        return None;
    }
    let target = total / groups as u64;

    (1..=parcels.len()).find_map(|size| {
        (0..parcels.len())
            .combinations(size)
            .filter(|picked| picked.iter().map(|&i| parcels[i]).sum::<u64>() == target)
            .map(|picked| {
                let qe: u64 = picked.iter().map(|&i| parcels[i]).product();
                (qe, picked)
            })
            .sorted_unstable()
            .find(|(_, picked)| {
                let rest: Vec<u64> = (0..parcels.len())
                    .filter(|i| !picked.contains(i))
                    .map(|i| parcels[i])
                    .collect();
                can_split(&rest, groups - 1, target)
            })
            .map(|(qe, _)| qe)
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        best_entanglement(shared, 3)
            .map(|qe| qe.to_string())
            .ok_or_else(|| SolveError::failed("parcels cannot be split into 3 equal groups"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        best_entanglement(shared, 4)
            .map(|qe| qe.to_string())
            .ok_or_else(|| SolveError::failed("parcels cannot be split into 4 equal groups"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [u64; 10] = [1, 2, 3, 4, 5, 7, 8, 9, 10, 11];

    #[test]
    fn test_example() {
        assert_eq!(best_entanglement(&EXAMPLE, 3), Some(99));
        assert_eq!(best_entanglement(&EXAMPLE, 4), Some(44));
    }

    #[test]
    fn test_remainder_must_balance() {
        assert!(can_split(&[1, 1, 1, 1, 1, 1, 3, 3], 2, 6));
        assert!(!can_split(&[5, 5, 2], 2, 6));
        // 9 is a third of 27 but 6 6 6 cannot make two groups of 9
        assert_eq!(best_entanglement(&[9, 6, 6, 6], 3), None);
    }

    #[test]
    fn test_parts() {
        let mut shared = Solver::parse("1\n2\n3\n4\n5\n7\n8\n9\n10\n11\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "99");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "44");
    }
}
