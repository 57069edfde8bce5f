//! Temporal job resolution.
//!
//! # Responsibility
//! - Find the job(s) temporally closest to a reference year under a
//!   one-sided constraint.
//! - Fall back through an ordered cascade of looser strategies.
//!
//! # Invariants
//! - Unknown start years never satisfy a directional constraint and are
//!   never picked as closest.
//! - Ties on the chosen year are broken by precedence, never arbitrarily.
//! - An empty candidate set is a result (`None`), not an error.

pub mod cascade;
pub mod strategy;
