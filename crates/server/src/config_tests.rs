// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[test]
fn defaults_when_nothing_is_set() {
    let config = Config::from_sources(Overrides::default(), EnvSnapshot::default()).unwrap();

    assert_eq!(config.bind, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    assert_eq!(config.database, PathBuf::from("./bugtracker.db"));
    assert_eq!(config.allowed_origin, "http://localhost:5173");
    assert_eq!(config.advisor, AdvisorConfig::disabled());
}

#[test]
fn environment_overrides_defaults() {
    let env = EnvSnapshot {
        api_key: Some("sk-env".into()),
        base_url: Some("http://127.0.0.1:9999".into()),
        bind: Some("127.0.0.1:9000".into()),
        database: Some(PathBuf::from("/tmp/env.db")),
        allowed_origin: Some("https://bugs.example.com".into()),
        model: Some("env-model".into()),
    };
    let config = Config::from_sources(Overrides::default(), env).unwrap();

    assert_eq!(config.bind.port(), 9000);
    assert_eq!(config.database, PathBuf::from("/tmp/env.db"));
    assert_eq!(config.allowed_origin, "https://bugs.example.com");
    assert_eq!(config.advisor.api_key.as_deref(), Some("sk-env"));
    assert_eq!(config.advisor.base_url, "http://127.0.0.1:9999");
    assert_eq!(config.advisor.model, "env-model");
}

#[test]
fn flags_override_environment() {
    let env = EnvSnapshot {
        bind: Some("127.0.0.1:9000".into()),
        database: Some(PathBuf::from("/tmp/env.db")),
        allowed_origin: Some("https://env.example.com".into()),
        model: Some("env-model".into()),
        ..Default::default()
    };
    let overrides = Overrides {
        bind: Some("127.0.0.1:7000".parse().unwrap()),
        database: Some(PathBuf::from("/tmp/flag.db")),
        allowed_origin: Some("https://flag.example.com".into()),
        model: Some("flag-model".into()),
        advisor_timeout_secs: Some(5),
    };
    let config = Config::from_sources(overrides, env).unwrap();

    assert_eq!(config.bind.port(), 7000);
    assert_eq!(config.database, PathBuf::from("/tmp/flag.db"));
    assert_eq!(config.allowed_origin, "https://flag.example.com");
    assert_eq!(config.advisor.model, "flag-model");
    assert_eq!(config.advisor.timeout, Duration::from_secs(5));
}

#[test]
fn invalid_bind_from_env_is_rejected() {
    let env = EnvSnapshot {
        bind: Some("not-an-address".into()),
        ..Default::default()
    };
    let result = Config::from_sources(Overrides::default(), env);
    assert!(matches!(result, Err(ConfigError::InvalidBind(_))));
}

#[test]
fn zero_timeout_is_rejected() {
    let overrides = Overrides {
        advisor_timeout_secs: Some(0),
        ..Default::default()
    };
    let result = Config::from_sources(overrides, EnvSnapshot::default());
    assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
}

#[parameterized(
    localhost = { "http://localhost:5173", "http://localhost:5173" },
    https = { "https://bugs.example.com", "https://bugs.example.com" },
    trailing_slash = { "http://localhost:3000/", "http://localhost:3000" },
)]
fn origin_valid(input: &str, expected: &str) {
    assert_eq!(parse_origin(input).unwrap(), expected);
}

#[parameterized(
    no_scheme = { "localhost:5173" },
    ftp = { "ftp://example.com" },
    with_path = { "http://example.com/app" },
    empty_host = { "http://" },
    wildcard = { "*" },
)]
fn origin_invalid(input: &str) {
    assert!(matches!(
        parse_origin(input),
        Err(ConfigError::InvalidOrigin(_))
    ));
}
