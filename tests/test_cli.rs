//! Tests for CLI argument parsing and enum validation

use assert_cmd::Command;
use clap::Parser;
use crowdstorm::cli::Cli;
use crowdstorm::pipeline::{
    CovariateSet, MissingStrategy, OutcomeKind, PositionEncoding, SkinMeasure,
};
use predicates::prelude::*;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["crowdstorm"]);

    assert_eq!(cli.input, PathBuf::from("data.csv"));
    assert_eq!(cli.outcome, OutcomeKind::Logit, "default outcome should be logit");
    assert_eq!(cli.skin, SkinMeasure::Continuous);
    assert_eq!(cli.cov, CovariateSet::Performance);
    assert_eq!(cli.missing, MissingStrategy::Dropna);
    assert_eq!(cli.position, PositionEncoding::Onehot);
    assert!(!cli.scale, "scaling should default to off");
    assert_eq!(cli.model, "glm");
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "crowdstorm",
        "--outcome",
        "poisson",
        "--skin",
        "binary",
        "--cov",
        "full",
        "--missing",
        "mean",
        "--position",
        "ordinal",
        "--scale",
        "--model",
        "poisson-glm",
    ]);

    assert_eq!(cli.outcome, OutcomeKind::Poisson);
    assert_eq!(cli.skin, SkinMeasure::Binary);
    assert_eq!(cli.cov, CovariateSet::Full);
    assert_eq!(cli.missing, MissingStrategy::Mean);
    assert_eq!(cli.position, PositionEncoding::Ordinal);
    assert!(cli.scale);
    assert_eq!(cli.model, "poisson-glm");
}

#[test]
fn test_unknown_enum_values_rejected_at_parse_time() {
    assert!(Cli::try_parse_from(["crowdstorm", "--position", "unknown"]).is_err());
    assert!(Cli::try_parse_from(["crowdstorm", "--outcome", "probit"]).is_err());
    assert!(Cli::try_parse_from(["crowdstorm", "--cov", "everything"]).is_err());
    assert!(Cli::try_parse_from(["crowdstorm", "--missing", "median"]).is_err());
    assert!(Cli::try_parse_from(["crowdstorm", "--skin", "ordinal"]).is_err());
}

/// An unrecognized --position value aborts before any data is touched:
/// the process fails even though the input file does not exist.
#[test]
fn test_unknown_position_aborts_before_pipeline() {
    Command::cargo_bin("crowdstorm")
        .unwrap()
        .args(["--input", "no-such-file.csv", "--position", "unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--position"));
}

#[test]
fn test_run_from_csv_succeeds() {
    let (_dir, path) = common::write_player_csv();

    Command::cargo_bin("crowdstorm")
        .unwrap()
        .args([
            "--input",
            path.to_str().unwrap(),
            "--outcome",
            "linear",
            "--cov",
            "none",
            "--position",
            "drop",
            "--missing",
            "mean",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("redCards ~ skin"));
}

#[test]
fn test_missing_input_file_fails() {
    Command::cargo_bin("crowdstorm")
        .unwrap()
        .args(["--input", "definitely-missing.csv"])
        .assert()
        .failure();
}
