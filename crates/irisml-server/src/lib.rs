//! irisml server library entry.
//!
//! This crate wires the config layer, metrics registry, classifier, and HTTP
//! pipeline into a cohesive serving stack. It is intended to be consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod ml;
pub mod obs;
pub mod ops;
pub mod router;
