//! Request/response schemas for the prediction API.
//!
//! Validation is kept as a pure function on the deserialized request so it
//! can be tested without an HTTP layer.

pub mod classes;
pub mod request;
pub mod response;

pub use classes::IrisClass;
pub use request::PredictionRequest;
pub use response::{HealthResponse, PredictionResult, ServiceInfo};
