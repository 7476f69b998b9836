//! Advent of Code Solver Library
//!
//! A small, type-safe framework for Advent of Code solvers. Each problem
//! parses its input once into shared data, then solves any of its parts
//! against that data; a registry maps year/day pairs to solver factories so
//! a runner can drive solvers it only knows by number.
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad depth".into())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(4).filter(|w| w[3] > w[0]).count().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Depths>(2021, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2021, 1, "199\n200\n208\n210\n200").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "3");
//! ```
//!
//! # Key Concepts
//!
//! - [`AocParser`] parses input into `SharedData`.
//! - [`PartSolver<N>`] solves part `N`; `#[derive(AocSolver)]` stitches the
//!   parts into a [`Solver`].
//! - [`DynSolver`] erases the solver type and records parse/solve timing.
//! - `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] so
//!   [`SolverRegistryBuilder::register_all_plugins`] finds it at runtime.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the code generated from the derive macros
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
