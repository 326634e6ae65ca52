#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use irisml_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8000"
model:
  nam: "iris_classifier" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8000");
    assert_eq!(cfg.model.name, "iris_classifier");
    assert_eq!(cfg.model.trees, 100);
    assert_eq!(cfg.model.seed, 42);
}

#[test]
fn rejects_unsupported_version() {
    let bad = r#"
version: 2
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn rejects_out_of_range_trees() {
    let bad = r#"
version: 1
model:
  trees: 0
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("model.trees"));
}

#[test]
fn rejects_out_of_range_max_depth() {
    let bad = r#"
version: 1
model:
  max_depth: 100
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn overrides_apply() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
model:
  name: "iris_v2"
  trees: 25
  max_depth: 5
  seed: 7
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen, "127.0.0.1:9000");
    assert_eq!(cfg.model.name, "iris_v2");
    assert_eq!(cfg.model.trees, 25);
    assert_eq!(cfg.model.max_depth, 5);
    assert_eq!(cfg.model.seed, 7);
}
