//! Building routers from TOML configuration files.

use std::fs;

use route_bridge::config::{load_config, ConfigError, ValidationError};
use route_bridge::{Router, RouteOutcome};

mod common;

fn write_config(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("route-bridge.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_relative_location_resolves_against_config_dir() {
    let dir = common::template_dir(&["views/hello.html", "views/user/[name].html"]);
    let path = write_config(
        dir.path(),
        r#"
        prefix = "site"

        [templates]
        location = "views"
        "#,
    );

    let config = load_config(&path).unwrap();
    let router = Router::from_config(&config);

    assert_eq!(router.prefix(), "site");
    assert_eq!(router.patterns().collect::<Vec<_>>(), vec!["hello", "user/[name]"]);
    assert_eq!(
        config.templates.loader().location(),
        dir.path().join("views").as_path()
    );
}

#[test]
fn test_explicit_routes_and_environment() {
    let dir = common::template_dir(&["views/user/[name].html"]);
    let path = write_config(
        dir.path(),
        r#"
        [templates]
        location = "views"
        autoload = false
        identifier = "tpb"

        [[routes]]
        pattern = "profile/[id]"
        template = "user/[name]"
        methods = ["get"]

        [environment.headers]
        Tpb = "1"
        "#,
    );

    let config = load_config(&path).unwrap();
    let router = Router::from_config(&config);
    let env = config.environment.to_environment();

    assert_eq!(router.patterns().collect::<Vec<_>>(), vec!["profile/[id]"]);
    assert_eq!(router.handler("profile/[id]").unwrap().methods(), vec!["GET"]);
    assert_eq!(router.handler("profile/[id]").unwrap().identifier(), "Tpb");

    assert!(router.dispatch("profile/7", "GET", &env));
    assert!(!router.dispatch("profile/7", "POST", &env));
    assert!(!router.dispatch("profile/7", "GET", &route_bridge::Environment::new()));
    assert_eq!(router.route("/bridge/profile/7", "GET", &env), RouteOutcome::Handled);
}

#[test]
fn test_missing_location_yields_empty_router() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "[templates]\nlocation = \"absent\"\n");

    let router = Router::from_config(&load_config(&path).unwrap());
    assert!(router.is_empty());
    assert_eq!(router.prefix(), "bridge");
}

#[test]
fn test_invalid_config_reports_every_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
        [[routes]]
        pattern = "a//b"
        methods = [""]

        [observability]
        log_level = "verbose"
        "#,
    );

    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(errors.len(), 3);
            assert!(matches!(errors[0], ValidationError::InvalidPattern { .. }));
            assert!(matches!(errors[1], ValidationError::BlankMethod { .. }));
            assert_eq!(errors[2], ValidationError::LogLevel("verbose".into()));
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
}
