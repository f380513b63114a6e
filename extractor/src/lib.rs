//! Optimal-path extraction from model-checker strategy exports.
//!
//! Given the label, state, and induced-strategy files a probabilistic model
//! checker writes for an MDP, this crate reconstructs the path from the initial
//! state to a goal that maximizes the probability of success, skipping states
//! that encode unrecoverable failure. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (parsing, goal resolution, search,
//!   rendering). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (locating and reading exports,
//!   configuration, run metadata).
//!
//! Orchestration modules ([`extract`], [`inspect`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod extract;
pub mod inspect;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
