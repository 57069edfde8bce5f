//! Anomaly detection over the source tables.
//!
//! # Responsibility
//! - Classify organizations as universities or not.
//! - Cross-check categories against employers, directorship years against
//!   award years, and titles against their category vocabulary.
//! - Render findings as free text for a human reviewer.
//!
//! # Invariants
//! - Findings never abort a run.
//! - The only automatic correction is the `non-uni` rewrite, which produces
//!   a new job collection.

pub mod chronology;
pub mod consistency;
pub mod report;
pub mod reporter;
pub mod title_fit;
pub mod university;
