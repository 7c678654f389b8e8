//! Puts results from concurrent workers back into year/day/part order
//!
//! Expected keys sit in a min-heap; results that arrive early wait in an
//! ordered map until every key before them has been emitted.

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Buffer `result` and return every result now ready, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(Reverse(next)) = self.expected.peek() {
            match self.pending.remove(next) {
                Some(result) => {
                    self.expected.pop();
                    ready.push(result);
                }
                None => break,
            }
        }
        ready
    }

    /// Whatever is still buffered, in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Whether every expected key has been emitted
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{year}/{day}/{part}")),
            solve_duration: TimeDelta::milliseconds(3),
            parse_duration: (part == 1).then(|| TimeDelta::milliseconds(1)),
            submitted_at: None,
            submission: None,
            submission_wait: None,
        }
    }

    fn keys_of(results: &[SolverResult]) -> Vec<ResultKey> {
        results.iter().map(ResultKey::from).collect()
    }

    #[test]
    fn test_in_order_passthrough() {
        let mut agg = ResultAggregator::new([key(2015, 1, 1), key(2015, 1, 2)]);
        assert_eq!(keys_of(&agg.add(result(2015, 1, 1))), vec![key(2015, 1, 1)]);
        assert_eq!(keys_of(&agg.add(result(2015, 1, 2))), vec![key(2015, 1, 2)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_is_held_back() {
        let mut agg =
            ResultAggregator::new([key(2016, 25, 1), key(2015, 1, 2), key(2015, 1, 1)]);

        assert!(agg.add(result(2016, 25, 1)).is_empty());
        assert!(agg.add(result(2015, 1, 2)).is_empty());
        assert_eq!(
            keys_of(&agg.add(result(2015, 1, 1))),
            vec![key(2015, 1, 1), key(2015, 1, 2), key(2016, 25, 1)]
        );
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_leftovers() {
        let mut agg = ResultAggregator::new([key(2015, 1, 1), key(2015, 1, 2), key(2015, 2, 1)]);
        agg.add(result(2015, 2, 1));
        agg.add(result(2015, 1, 2));

        assert!(!agg.is_complete());
        assert_eq!(
            keys_of(&agg.drain()),
            vec![key(2015, 1, 2), key(2015, 2, 1)]
        );
        assert!(agg.drain().is_empty());
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_is_emitted_sorted(
            arrival in Just((1u8..=25).flat_map(|d| [(d, 1u8), (d, 2u8)]).collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let mut agg = ResultAggregator::new(arrival.iter().map(|&(d, p)| key(2017, d, p)));
            let mut emitted = Vec::new();
            for &(d, p) in &arrival {
                emitted.extend(keys_of(&agg.add(result(2017, d, p))));
            }

            let mut sorted = emitted.clone();
            sorted.sort();
            prop_assert_eq!(emitted.len(), 50);
            prop_assert_eq!(emitted, sorted);
            prop_assert!(agg.is_complete());
        }
    }
}
