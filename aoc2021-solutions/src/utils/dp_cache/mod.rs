//! Memoization cache for dynamic programming over a dependency DAG
//!
//! A [`DpProblem`] states which indices a value depends on and how to combine
//! them; [`DpCache`] resolves dependencies lazily and computes each index once.
//!
//! # Backends
//!
//! - [`VecBackend`]: dense `usize` indices starting at 0, grows on demand
//! - [`HashMapBackend`]: any `Hash + Eq` index, for sparse or structured keys
//!
//! # Cycles
//!
//! There is no cycle detection. A cyclic dependency graph recurses until the
//! stack overflows, so callers must make sure dependencies form a DAG.
//!
//! # Example
//!
//! ```rust
//! use aoc2021_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
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
//! let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
//! assert_eq!(cache.get(&10), 55);
//! ```
//!
//! Closures work too, for one-off recurrences:
//!
//! ```rust
//! use aoc2021_solutions::utils::dp_cache::{DpCache, VecBackend};
//!
//! let triangle = DpCache::new(
//!     VecBackend::new(),
//!     |n: &usize| if *n == 0 { vec![] } else { vec![n - 1] },
//!     |n: &usize, deps: Vec<u64>| deps.first().map_or(0, |prev| prev + *n as u64),
//! );
//! assert_eq!(triangle.get(&4), 10);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};
