//! Tabular record model for people, jobs, awards and organizations.
//!
//! # Responsibility
//! - Define the records loaded once per run from external tabular sources.
//! - Keep raw (source) jobs and normalized (ranked) jobs as distinct types.
//!
//! # Invariants
//! - Year fields are `Some(yyyy)` or `None`; malformed text never survives
//!   deserialization.
//! - A `Category` can only be produced by a `Ruleset`, so every ranked job
//!   carries a member of that ruleset's fixed set.

pub mod category;
pub mod record;
pub mod year;
