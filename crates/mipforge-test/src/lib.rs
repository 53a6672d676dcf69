//! Shared test fixtures for MipForge crates.
//!
//! This crate provides model builders for testing. It depends only on
//! `mipforge-core` so that `mipforge-solver` can use it as a
//! dev-dependency without a cycle.
//!
//! - [`random`] - seeded random integer programs that are hard to solve
//! - [`models`] - small models with known optima
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! mipforge-test = { workspace = true }
//! ```
//!
//! ```
//! use mipforge_test::random::random_integer_program;
//!
//! let model = random_integer_program(30, 123);
//! assert_eq!(model.num_variables(), 30);
//! assert_eq!(model.num_constraints(), 29);
//! ```

pub mod models;
pub mod random;

pub use models::{infeasible_model, knapsack, small_knapsack, unconstrained_model};
pub use random::random_integer_program;
