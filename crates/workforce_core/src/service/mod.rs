//! Analysis use-case services.
//!
//! # Responsibility
//! - Orchestrate the resolver and ranker across whole person histories.
//! - Produce derived tables without touching the source records.

pub mod analysis_service;
pub mod composition_service;
pub mod mobility_service;
pub mod timeline_service;
