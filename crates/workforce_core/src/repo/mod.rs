//! Read-model access to the loaded tables.
//!
//! # Responsibility
//! - Define the `Dataset` interchange shape and its JSON loading.
//! - Expose per-person lookups to services through `WorkforceRepository`.
//!
//! # Invariants
//! - Tables are loaded once and read immutably for the rest of the run.
//! - Malformed reference data fails at load time, not during resolution.

pub mod dataset;
pub mod workforce_repo;
