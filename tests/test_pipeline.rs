//! End-to-end pipeline scenarios

use crowdstorm::model::{fit_model, Design};
use crowdstorm::pipeline::{
    derive_columns, encode_position, handle_missing, load_dataset, scale, CovariateSet,
    MissingStrategy, ModelFormula, OutcomeKind, PositionEncoding, SkinMeasure,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

/// Scenario: `{outcome: logit, skin: binary, cov: none, missing: dropna,
/// position: drop, scale: off}` on three rows with rating means
/// [0.2, 0.6, 0.8].
#[test]
fn test_three_row_binary_scenario() {
    let df = df! {
        "rater1" => [0.1f64, 0.5, 0.7],
        "rater2" => [0.3f64, 0.7, 0.9],
        "redCards" => [0i64, 1, 0],
        "birthday" => ["01.01.1985", "02.02.1986", "03.03.1987"],
        "position" => ["A", "B", "A"],
        "games" => [5i64, 6, 7],
    }
    .unwrap();

    let df = derive_columns(df).unwrap();
    let df = encode_position(df, PositionEncoding::Drop).unwrap();
    let df = handle_missing(df, MissingStrategy::Dropna).unwrap();
    let df = scale(df, false).unwrap();

    let skin_binary = common::column_i32(&df, "skin_binary");
    assert_eq!(skin_binary, vec![0, 1, 1]);

    let formula = ModelFormula::build(
        OutcomeKind::Logit,
        SkinMeasure::Binary,
        CovariateSet::None,
    );
    assert_eq!(formula.to_string(), "red_dummy ~ skin_binary");
}

/// Scenario: the full covariate bundle renders the same tail for every
/// outcome/skin combination.
#[test]
fn test_full_bundle_formula_shape() {
    for outcome in [OutcomeKind::Linear, OutcomeKind::Logit, OutcomeKind::Poisson] {
        for skin in [SkinMeasure::Continuous, SkinMeasure::Binary] {
            let formula = ModelFormula::build(outcome, skin, CovariateSet::Full);
            let rendered = formula.to_string();
            assert!(
                rendered.ends_with(
                    "height + weight + games + goals + victories + age + yellowCards"
                ),
                "unexpected formula: {}",
                rendered
            );
        }
    }
}

/// Scenario: a full run from CSV through model fitting.
#[test]
fn test_csv_to_fitted_model() {
    let mut csv = String::from(
        "rater1,rater2,redCards,yellowCards,games,goals,victories,defeats,height,weight,birthday,position\n",
    );
    for i in 0..80 {
        let rater = 0.25 * f64::from(i % 5);
        let reds = i % 7 == 0;
        csv.push_str(&format!(
            "{r1},{r2},{red},{yellow},{games},{goals},{wins},{losses},{height},{weight},{day:02}.06.19{yy},Pos{p}\n",
            r1 = rater,
            r2 = rater,
            red = i32::from(reds),
            yellow = i % 4,
            games = 10 + i % 20,
            goals = i % 6,
            wins = 3 + i % 10,
            losses = 2 + i % 8,
            height = 170 + i % 25,
            weight = 65 + i % 30,
            day = 1 + i % 28,
            yy = 80 + i % 15,
            p = i % 3,
        ));
    }

    let (_dir, path) = common::write_csv(&csv);
    let df = load_dataset(&path).unwrap();
    let df = encode_position(df, PositionEncoding::Onehot).unwrap();
    let df = handle_missing(df, MissingStrategy::Dropna).unwrap();
    let df = scale(df, false).unwrap();

    let formula = ModelFormula::build(
        OutcomeKind::Logit,
        SkinMeasure::Continuous,
        CovariateSet::Performance,
    );
    assert_eq!(
        formula.to_string(),
        "red_dummy ~ skin + games + victories + defeats + goals"
    );

    let design = Design::from_frame(&df, &formula).unwrap();
    let summary = fit_model(&design, OutcomeKind::Logit).unwrap();

    assert_eq!(summary.model, "Logit");
    assert_eq!(summary.n_observations, 80);
    assert_eq!(summary.coefficients.len(), 6, "intercept + skin + 4 covariates");
    assert_eq!(summary.coefficients[0].name, "Intercept");
    assert_eq!(summary.coefficients[1].name, "skin");
}

/// Scenario: scaling between missing-handling and the fit leaves the
/// model solvable and the formula unchanged.
#[test]
fn test_scaled_run_still_fits() {
    let df = derive_columns(common::create_player_dataframe()).unwrap();
    let df = encode_position(df, PositionEncoding::Drop).unwrap();
    let df = handle_missing(df, MissingStrategy::Mean).unwrap();
    let df = scale(df, true).unwrap();

    let formula = ModelFormula::build(
        OutcomeKind::Linear,
        SkinMeasure::Continuous,
        CovariateSet::None,
    );
    let design = Design::from_frame(&df, &formula).unwrap();
    let summary = fit_model(&design, OutcomeKind::Linear).unwrap();

    assert_eq!(summary.model, "OLS");
    // Scaling rescales the outcome too; the fit simply runs on the
    // transformed values.
    assert_eq!(summary.n_observations, 6);
}
