use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 17, tags = ["2015", "dp", "combinatorics"])]
pub struct Solver;

const LITRES: usize = 150;

/// Ways to pick exactly `k` of `containers[i..]` holding exactly `rem` litres,
/// over the flattened index `(i, rem, k)`
struct Combinations<'a> {
    containers: &'a [usize],
    target: usize,
}

impl Combinations<'_> {
    fn index(&self, i: usize, rem: usize, k: usize) -> usize {
        let n = self.containers.len();
        (i * (self.target + 1) + rem) * (n + 1) + k
    }

    fn unpack(&self, index: usize) -> (usize, usize, usize) {
        let n = self.containers.len();
        let k = index % (n + 1);
        let rest = index / (n + 1);
        (rest / (self.target + 1), rest % (self.target + 1), k)
    }
}

impl DpProblem<usize, u64> for Combinations<'_> {
    fn deps(&self, index: &usize) -> Vec<usize> {
        let (i, rem, k) = self.unpack(*index);
        let Some(&size) = self.containers.get(i) else {
            return vec![];
        };
        let mut deps = vec![self.index(i + 1, rem, k)];
        if size <= rem && k > 0 {
            deps.push(self.index(i + 1, rem - size, k - 1));
        }
        deps
    }

    fn compute(&self, index: &usize, deps: Vec<u64>) -> u64 {
        let (i, rem, k) = self.unpack(*index);
        if i == self.containers.len() {
            return u64::from(rem == 0 && k == 0);
        }
        deps.iter().sum()
    }
}

/// `counts[k]`: combinations of exactly `k` containers holding `target`
fn counts_by_size(containers: &[usize], target: usize) -> Vec<u64> {
    let problem = Combinations { containers, target };
    let n = containers.len();
    let cache = DpCache::new(VecBackend::with_capacity((n + 1) * (target + 1) * (n + 1)), problem);
    (0..=n)
        .map(|k| cache.get(&cache.problem().index(0, target, k)))
        .collect()
}

#[derive(Debug)]
pub struct SharedData {
    containers: Vec<usize>,
    counts: Option<Vec<u64>>,
}

fn counts(shared: &mut SharedData) -> &[u64] {
    shared
        .counts
        .get_or_insert_with(|| counts_by_size(&shared.containers, LITRES))
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let containers = input
            .split_whitespace()
            .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(format!("invalid size {n:?}"))))
            .collect::<Result<_, _>>()?;
        Ok(SharedData {
            containers,
            counts: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(counts(shared).iter().sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        counts(shared)
            .iter()
            .find(|&&ways| ways > 0)
            .map(|ways| ways.to_string())
            .ok_or_else(|| SolveError::failed("no combination holds the eggnog"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example() {
        let counts = counts_by_size(&[20, 15, 10, 5, 5], 25);
        assert_eq!(counts, [0, 0, 3, 1, 0, 0]);
        assert_eq!(counts.iter().sum::<u64>(), 4);
    }

    #[test]
    fn test_index_round_trip() {
        let problem = Combinations {
            containers: &[3, 1, 4],
            target: 7,
        };
        for i in 0..=3 {
            for rem in 0..=7 {
                for k in 0..=3 {
                    assert_eq!(problem.unpack(problem.index(i, rem, k)), (i, rem, k));
                }
            }
        }
    }

    #[test]
    fn test_parts() {
        // 100+50 twice, 100+25+25, 75+50+25 four times, 50+50+25+25
        let mut shared = Solver::parse("100\n50\n50\n25\n25\n75\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "8");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "2");
    }

    #[test]
    fn test_no_combination() {
        let mut shared = Solver::parse("7 11").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "0");
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
    }
}
