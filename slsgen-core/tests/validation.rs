//! Validation-table tests for `RawParams::validate`.
//!
//! Each `#[case]` is isolated — no shared state.

use std::path::PathBuf;

use rstest::rstest;
use slsgen_core::{ConfigError, RawParams, DEFAULT_OUTPUT_PATH, DEFAULT_RUNTIME};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn full_params() -> RawParams {
    RawParams {
        app_id: Some("Demo".into()),
        runtime: Some("nodejs10.x".into()),
        host: Some("db.internal".into()),
        port: Some("5432".into()),
        name: Some("events".into()),
        username: Some("svc".into()),
        password: Some("secret".into()),
        output_path: Some(PathBuf::from("out.yaml")),
    }
}

fn clear(params: &mut RawParams, field: &str) {
    match field {
        "appId" => params.app_id = None,
        "host" => params.host = None,
        "port" => params.port = None,
        "name" => params.name = None,
        "username" => params.username = None,
        "password" => params.password = None,
        other => panic!("unknown field {other}"),
    }
}

fn set_empty(params: &mut RawParams, field: &str) {
    match field {
        "appId" => params.app_id = Some(String::new()),
        "host" => params.host = Some(String::new()),
        "port" => params.port = Some(String::new()),
        "name" => params.name = Some(String::new()),
        "username" => params.username = Some(String::new()),
        "password" => params.password = Some(String::new()),
        other => panic!("unknown field {other}"),
    }
}

// ---------------------------------------------------------------------------
// Required fields
// ---------------------------------------------------------------------------

#[rstest]
#[case("appId")]
#[case("host")]
#[case("port")]
#[case("name")]
#[case("username")]
#[case("password")]
fn missing_field_is_rejected_by_name(#[case] field: &'static str) {
    let mut params = full_params();
    clear(&mut params, field);
    let err = params.validate().unwrap_err();
    assert_eq!(err, ConfigError::MissingParameter { name: field });
    assert!(err.to_string().contains(field), "message must name the field");
}

#[rstest]
#[case("appId")]
#[case("host")]
#[case("name")]
#[case("username")]
#[case("password")]
fn empty_field_is_rejected_by_name(#[case] field: &'static str) {
    let mut params = full_params();
    set_empty(&mut params, field);
    let err = params.validate().unwrap_err();
    assert_eq!(err, ConfigError::EmptyParameter { name: field });
}

// ---------------------------------------------------------------------------
// Ports and app ids
// ---------------------------------------------------------------------------

#[rstest]
#[case("5432")]
#[case("1")]
#[case("65535")]
fn valid_ports_pass(#[case] port: &str) {
    let mut params = full_params();
    params.port = Some(port.into());
    params.validate().expect("port should be accepted");
}

#[rstest]
#[case("0")]
#[case("65536")]
#[case("-1")]
#[case("postgres")]
#[case("54 32")]
fn invalid_ports_fail(#[case] port: &str) {
    let mut params = full_params();
    params.port = Some(port.into());
    assert_eq!(
        params.validate().unwrap_err(),
        ConfigError::InvalidPort { value: port.into() }
    );
}

#[rstest]
#[case("Demo")]
#[case("my-app_2")]
#[case("A")]
fn valid_app_ids_pass(#[case] app_id: &str) {
    let mut params = full_params();
    params.app_id = Some(app_id.into());
    params.validate().expect("app id should be accepted");
}

#[rstest]
#[case("My App")]
#[case("demo!")]
#[case("a/b")]
#[case("app.prod")]
fn invalid_app_ids_fail(#[case] app_id: &str) {
    let mut params = full_params();
    params.app_id = Some(app_id.into());
    assert_eq!(
        params.validate().unwrap_err(),
        ConfigError::InvalidAppId { value: app_id.into() }
    );
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn omitted_runtime_and_output_path_use_defaults() {
    let params = RawParams {
        runtime: None,
        output_path: None,
        ..full_params()
    };
    let config = params.validate().expect("valid");
    assert_eq!(config.runtime.0, DEFAULT_RUNTIME);
    assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
}

#[test]
fn empty_runtime_is_rejected_rather_than_defaulted() {
    let params = RawParams {
        runtime: Some(String::new()),
        ..full_params()
    };
    assert_eq!(
        params.validate().unwrap_err(),
        ConfigError::EmptyParameter { name: "runtime" }
    );
}
