//! Memoised evaluation of DAG-shaped recurrences
//!
//! A [`DpProblem`] names the dependencies of each index and combines their
//! values; [`DpCache`] resolves dependencies recursively and computes each
//! index at most once. Storage is pluggable:
//!
//! - [`VecBackend`]: dense `usize` indices, grows on demand
//! - [`HashMapBackend`]: any `Hash + Eq` index (wire names, tuples)
//!
//! Dependencies must form a DAG; a cycle recurses until the stack overflows.
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
//!
//! struct Fibonacci;
//!
//! impl DpProblem<usize, u64> for Fibonacci {
//!     fn deps(&self, n: &usize) -> Vec<usize> {
//!         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
//!     }
//!     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
//!         if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
//!     }
//! }
//!
//! let cache = DpCache::new(VecBackend::new(), Fibonacci);
//! assert_eq!(cache.get(&50), 12_586_269_025);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::DpProblem;
