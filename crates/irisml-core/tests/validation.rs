//! Request schema and range validation vectors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use irisml_core::schema::PredictionRequest;
use irisml_core::ServeError;

#[test]
fn parse_valid_request() {
    let s = r#"{"sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4, "petal_width": 0.2}"#;
    let req: PredictionRequest = serde_json::from_str(s).unwrap();
    let features = req.features().unwrap();
    assert_eq!(features, [5.1, 3.5, 1.4, 0.2]);
}

#[test]
fn missing_field_fails_to_parse() {
    let s = r#"{"sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4}"#;
    let err = serde_json::from_str::<PredictionRequest>(s).expect_err("must fail");
    assert!(err.to_string().contains("petal_width"));
}

#[test]
fn unknown_field_fails_to_parse() {
    let s = r#"{"sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4, "petal_width": 0.2, "stem_length": 1.0}"#;
    serde_json::from_str::<PredictionRequest>(s).expect_err("must fail");
}

#[test]
fn negative_sepal_length_rejected() {
    let req = PredictionRequest {
        sepal_length: -1.0,
        sepal_width: 3.5,
        petal_length: 1.4,
        petal_width: 0.2,
    };
    let err = req.features().expect_err("must fail");
    match err {
        ServeError::Validation(violations) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, "sepal_length");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(req.features().expect_err("must fail").client_code().http_status(), 422);
}

#[test]
fn bounds_are_open_intervals() {
    // Exactly 0 and exactly the upper limit are both out of range.
    let at_zero = PredictionRequest {
        sepal_length: 0.0,
        sepal_width: 3.0,
        petal_length: 1.0,
        petal_width: 0.2,
    };
    assert!(at_zero.features().is_err());

    let at_limit = PredictionRequest {
        sepal_length: 5.0,
        sepal_width: 3.0,
        petal_length: 1.0,
        petal_width: 5.0,
    };
    assert!(at_limit.features().is_err());

    let inside = PredictionRequest {
        sepal_length: 9.9,
        sepal_width: 0.1,
        petal_length: 6.9,
        petal_width: 4.9,
    };
    assert!(inside.features().is_ok());
}

#[test]
fn petal_width_has_tighter_upper_bound() {
    let req = PredictionRequest {
        sepal_length: 6.0,
        sepal_width: 3.0,
        petal_length: 4.0,
        petal_width: 7.0, // fine for the other fields, out of range here
    };
    let err = req.features().expect_err("must fail");
    match err {
        ServeError::Validation(violations) => {
            assert_eq!(violations[0].field, "petal_width");
            assert!(violations[0].message.contains("less than 5"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn all_violations_reported_at_once() {
    let req = PredictionRequest {
        sepal_length: -1.0,
        sepal_width: 0.0,
        petal_length: 11.0,
        petal_width: 5.0,
    };
    match req.features().expect_err("must fail") {
        ServeError::Validation(violations) => {
            let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
            assert_eq!(
                fields,
                vec!["sepal_length", "sepal_width", "petal_length", "petal_width"]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_finite_values_rejected() {
    let req = PredictionRequest {
        sepal_length: f64::NAN,
        sepal_width: 3.5,
        petal_length: 1.4,
        petal_width: 0.2,
    };
    assert!(req.features().is_err());

    let req = PredictionRequest {
        sepal_length: f64::INFINITY,
        sepal_width: 3.5,
        petal_length: 1.4,
        petal_width: 0.2,
    };
    assert!(req.features().is_err());
}
