//! Deterministic, pure logic for strategy-path extraction.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! tables and return deterministic outputs suitable for tests.

pub mod artifacts;
pub mod feasibility;
pub mod goals;
pub mod invariants;
pub mod labels;
pub mod report;
pub mod search;
pub mod states;
pub mod strategy;
pub mod types;
pub mod verification;
