//! Normalization and precedence rules.
//!
//! # Responsibility
//! - Hold the per-analysis ruleset (precedence table + collapse rules).
//! - Map raw category labels to canonical categories (Title Normalizer).
//! - Rank canonical categories and pick the most senior (Precedence Ranker).
//!
//! # Invariants
//! - Rulesets are validated at construction and never mutated afterwards.
//! - Unknown labels are excluded, never assigned a default category.

pub mod normalize;
pub mod rank;
pub mod ruleset;
