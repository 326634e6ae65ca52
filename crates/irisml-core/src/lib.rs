//! irisml core: request/response schemas, validation, and error types.
//!
//! This crate defines the domain contracts shared by the server and by test
//! tooling. It intentionally carries no runtime or ML dependencies so it can
//! be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ServeError`/`Result` so the serving
//! process does not crash on malformed input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod schema;

/// Shared result type.
pub use error::{Result, ServeError};
