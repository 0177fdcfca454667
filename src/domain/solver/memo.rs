//! Content-hash memoization in front of a solver.

use dashmap::DashMap;
use tracing::trace;

use super::{SolveResult, Solver};
use crate::domain::problem::Problem;
use crate::error::Result;

/// Caches [`SolveResult`]s keyed on [`Problem::content_hash`].
///
/// Results are pure functions of the problem, so a hit is always safe. The
/// stored problem is compared on lookup so a hash collision is a miss.
pub struct MemoizedSolver<S> {
    inner: S,
    cache: DashMap<u64, (Problem, SolveResult)>,
    max_entries: usize,
}

impl<S: Solver> MemoizedSolver<S> {
    /// Default capacity before the cache is cleared.
    pub const DEFAULT_MAX_ENTRIES: usize = 1024;

    #[must_use]
    pub fn new(inner: S) -> Self {
        Self::with_capacity(inner, Self::DEFAULT_MAX_ENTRIES)
    }

    #[must_use]
    pub fn with_capacity(inner: S, max_entries: usize) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<S: Solver> Solver for MemoizedSolver<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn solve(&self, problem: &Problem) -> Result<SolveResult> {
        let key = problem.content_hash();
        if let Some(entry) = self.cache.get(&key) {
            let (cached_problem, result) = entry.value();
            if cached_problem == problem {
                trace!(key, "solve cache hit");
                return Ok(*result);
            }
        }

        let result = self.inner.solve(problem)?;
        if self.cache.len() >= self.max_entries {
            self.cache.clear();
        }
        self.cache.insert(key, (problem.clone(), result));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::constraint::{Objective, Relation};
    use crate::domain::solver::SimplexSolver;

    struct CountingSolver {
        calls: AtomicUsize,
        inner: SimplexSolver,
    }

    impl Solver for CountingSolver {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn solve(&self, problem: &Problem) -> Result<SolveResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.solve(problem)
        }
    }

    fn counting() -> CountingSolver {
        CountingSolver {
            calls: AtomicUsize::new(0),
            inner: SimplexSolver::default(),
        }
    }

    #[test]
    fn test_hit_skips_inner_solver() {
        let solver = MemoizedSolver::new(counting());
        let mut problem = Problem::new(Objective::new(1.0, 1.0).unwrap());
        problem.add_constraint(1.0, 1.0, 4.0, Relation::Le).unwrap();

        let first = solver.solve(&problem).unwrap();
        let second = solver.solve(&problem).unwrap();

        assert_eq!(first, second);
        assert_eq!(solver.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(solver.name(), "counting");
    }

    #[test]
    fn test_edit_misses() {
        let solver = MemoizedSolver::new(counting());
        let mut problem = Problem::new(Objective::new(1.0, 1.0).unwrap());
        problem.add_constraint(1.0, 1.0, 4.0, Relation::Le).unwrap();
        solver.solve(&problem).unwrap();

        problem.add_constraint(1.0, 0.0, 1.0, Relation::Le).unwrap();
        solver.solve(&problem).unwrap();

        assert_eq!(solver.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(solver.len(), 2);
    }

    #[test]
    fn test_capacity_clears_cache() {
        let solver = MemoizedSolver::with_capacity(counting(), 1);
        let a = Problem::new(Objective::new(-1.0, -1.0).unwrap());
        let b = Problem::new(Objective::new(-2.0, -1.0).unwrap());
        solver.solve(&a).unwrap();
        solver.solve(&b).unwrap();
        assert_eq!(solver.len(), 1);
    }
}
