//! Cross-file referential-integrity validator for a contest dataset.
//!
//! The dataset is a set of independently authored files: one JSON record per
//! participant or team (handles), one JSON record per sponsoring
//! organization, one CSV table of contests, and one JSON list of findings.
//! This crate loads all of them and verifies every cross-reference between
//! them before the data is published. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (record shapes, lookup indexes,
//!   the five checks). No I/O; filesystem existence is answered through an
//!   injected probe, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (layout collection, JSON and
//!   table decoding, config loading).
//!
//! The [`check`] module coordinates core logic with I/O to implement the
//! CLI command.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
