//! Single-threaded DP cache.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;

/// Lazily evaluated, memoised [`DpProblem`]
///
/// Values are computed on first request, dependencies first, and cloned out
/// of the backend afterwards.
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
///
/// struct Factorial;
///
/// impl DpProblem<u32, u64> for Factorial {
///     fn deps(&self, n: &u32) -> Vec<u32> {
///         if *n == 0 { vec![] } else { vec![n - 1] }
///     }
///     fn compute(&self, n: &u32, deps: Vec<u64>) -> u64 {
///         if *n == 0 { 1 } else { u64::from(*n) * deps[0] }
///     }
/// }
///
/// let cache = DpCache::new(HashMapBackend::new(), Factorial);
/// assert_eq!(cache.get(&5), 120);
/// ```
pub struct DpCache<I, K, B, P> {
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn new(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Value for `index`, computing it and its dependencies if needed
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // no borrow is held while dependencies recurse
        let deps = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect();
        let value = self.problem.compute(index, deps);

        self.backend.borrow_mut().insert(index.clone(), value.clone());
        value
    }

    /// The problem definition
    pub fn problem(&self) -> &P {
        &self.problem
    }
}
