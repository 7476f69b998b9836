//! Advent of Code 2021 solutions with automatic registration
//!
//! Every day is a `Solver` that registers itself through the
//! `AutoRegisterSolver` derive; linking this crate is enough for
//! `SolverRegistryBuilder::register_all_plugins` to find them.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
