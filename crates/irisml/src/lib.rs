//! Top-level facade crate for irisml.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use irisml_core::*;
}

pub mod server {
    pub use irisml_server::*;
}
