//! Shared test fixtures for ruleforge crates.
//!
//! This crate provides datasets and a reference oracle for testing.
//!
//! - [`datasets`] - Small hand-built datasets with known optima
//! - [`random`] - Seeded random datasets
//! - [`oracle`] - Brute-force enumeration of every rule list
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! ruleforge-test = { workspace = true }
//! ```
//!
//! Then compare a search against the oracle:
//!
//! ```
//! use ruleforge_test::{brute_force, datasets};
//!
//! let dataset = datasets::singletons();
//! let best = brute_force(&dataset, 0.01);
//! assert_eq!(best.rules(), &[0, 1, 2]);
//! ```

pub mod datasets;
pub mod oracle;
pub mod random;

pub use oracle::{assert_objective_eq, brute_force, OBJECTIVE_TOLERANCE};
pub use random::{random_dataset, with_duplicate_rules};
