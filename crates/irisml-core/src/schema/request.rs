//! Prediction request schema and range validation.

use serde::Deserialize;

use crate::error::{FieldViolation, Result, ServeError};

/// One measurement's open-interval bound: `gt < value < lt`.
struct Bound {
    field: &'static str,
    gt: f64,
    lt: f64,
}

/// Documented measurement ranges in cm. These are sanity bounds, not
/// species-biology limits.
const BOUNDS: [Bound; 4] = [
    Bound { field: "sepal_length", gt: 0.0, lt: 10.0 },
    Bound { field: "sepal_width", gt: 0.0, lt: 10.0 },
    Bound { field: "petal_length", gt: 0.0, lt: 10.0 },
    Bound { field: "petal_width", gt: 0.0, lt: 5.0 },
];

/// Request body for `POST /predict`. All four fields are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictionRequest {
    /// Sepal length in cm (typically 4.3-7.9).
    pub sepal_length: f64,
    /// Sepal width in cm (typically 2.0-4.4).
    pub sepal_width: f64,
    /// Petal length in cm (typically 1.0-6.9).
    pub petal_length: f64,
    /// Petal width in cm (typically 0.1-2.5).
    pub petal_width: f64,
}

impl PredictionRequest {
    /// Validate every field against its declared open interval and return the
    /// feature vector in dataset column order.
    ///
    /// Pure function: all violations are collected so the client sees every
    /// offending field in one round trip, not just the first.
    pub fn features(&self) -> Result<[f64; 4]> {
        let values = [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ];

        let mut violations = Vec::new();
        for (bound, value) in BOUNDS.iter().zip(values.iter()) {
            if !value.is_finite() || *value <= bound.gt || *value >= bound.lt {
                violations.push(FieldViolation {
                    field: bound.field,
                    message: format!(
                        "must be greater than {} and less than {} (got {})",
                        bound.gt, bound.lt, value
                    ),
                });
            }
        }

        if violations.is_empty() {
            Ok(values)
        } else {
            Err(ServeError::Validation(violations))
        }
    }
}
