//! Crowdstorm exploratory analysis
//!
//! Fixed analysis trace over the raw crowdstorming CSV: rater agreement
//! diagnostics, rating histograms, and three Poisson models with
//! interaction terms for the implicit- and explicit-bias measures.

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;

use crowdstorm::model::{fit_poisson, Design};
use crowdstorm::pipeline::{ModelFormula, Term};
use crowdstorm::report::{render_histogram, render_summary};
use crowdstorm::stats::{dagostino_k_squared, histogram, spearman};

const DATA_PATH: &str = "data/CrowdstormingDataJuly1st.csv";

const COLUMNS: &[&str] = &[
    "playerShort",
    "refNum",
    "games",
    "goals",
    "yellowCards",
    "redCards",
    "meanIAT",
    "meanExp",
    "rater1",
    "rater2",
];

fn main() -> Result<()> {
    let df = load_subset()?;

    // Drop dyads where either rater abstained, then put the mean rating
    // back on the survey's 1-5 scale.
    let df = df
        .lazy()
        .drop_nulls(Some(vec![col("rater1"), col("rater2")]))
        .collect()?;
    let df = derive_rating(df)?;

    let red_cards = column_values(&df, "redCards")?;
    println!("variance: {}", sample_variance(&red_cards));
    println!("mean: {}", mean(&red_cards));

    rater_diagnostics(&df)?;

    // Three fixed Poisson models, each centered on one moderator.
    print_question("QUESTION 1");
    let formula = interaction_formula("rating", &["games", "goals", "yellowCards", "meanIAT", "meanExp"]);
    fit_and_report(&df, &formula)?;

    print_question("QUESTION 2a");
    println!("len pre-drop: {}", df.height());
    let df_iat = df
        .clone()
        .lazy()
        .drop_nulls(Some(vec![col("meanIAT")]))
        .collect()?;
    println!("len post-drop: {}", df_iat.height());
    let formula = interaction_formula("meanIAT", &["rating", "games", "goals", "yellowCards", "meanExp"]);
    fit_and_report(&df_iat, &formula)?;

    print_question("QUESTION 2b");
    println!("len pre-drop: {}", df.height());
    let df_exp = df
        .clone()
        .lazy()
        .drop_nulls(Some(vec![col("meanExp")]))
        .collect()?;
    println!("len post-drop: {}", df_exp.height());
    let formula = interaction_formula("meanExp", &["rating", "games", "goals", "yellowCards", "meanIAT"]);
    fit_and_report(&df_exp, &formula)?;

    Ok(())
}

fn load_subset() -> Result<DataFrame> {
    let exprs: Vec<Expr> = COLUMNS.iter().map(|c| col(*c)).collect();
    LazyCsvReader::new(DATA_PATH)
        .with_infer_schema_length(Some(10_000))
        .with_null_values(Some(NullValues::AllColumns(vec!["NA".into(), "".into()])))
        .finish()
        .with_context(|| format!("Failed to open CSV file: {}", DATA_PATH))?
        .select(exprs)
        .collect()
        .with_context(|| format!("Failed to load CSV file: {}", DATA_PATH))
}

/// rating = mean(rater1, rater2) * 4 + 1, and the bias measures rescaled
/// to percentage points.
fn derive_rating(mut df: DataFrame) -> Result<DataFrame> {
    let rater1 = df.column("rater1")?.cast(&DataType::Float64)?.f64()?.clone();
    let rater2 = df.column("rater2")?.cast(&DataType::Float64)?.f64()?.clone();

    let rating: Float64Chunked = rater1
        .iter()
        .zip(rater2.iter())
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some((a + b) / 2.0 * 4.0 + 1.0),
            _ => None,
        })
        .collect();
    let mut series = rating.into_series();
    series.rename("rating".into());
    df.with_column(series)?;

    for name in ["meanIAT", "meanExp"] {
        let scaled: Float64Chunked = df
            .column(name)?
            .cast(&DataType::Float64)?
            .f64()?
            .iter()
            .map(|opt| opt.map(|v| v * 100.0))
            .collect();
        let mut series = scaled.into_series();
        series.rename(name.into());
        df.with_column(series)?;
    }

    Ok(df)
}

/// Normality tests, Spearman agreement, and histograms for the two raw
/// rater columns.
fn rater_diagnostics(df: &DataFrame) -> Result<()> {
    let rater1 = column_values(df, "rater1")?;
    let rater2 = column_values(df, "rater2")?;

    for (name, values) in [("rater1", &rater1), ("rater2", &rater2)] {
        let test = dagostino_k_squared(values)?;
        println!(
            "normaltest {}: statistic = {:.6}, p-value = {:.6e}",
            name, test.statistic, test.p_value
        );
    }

    render_histogram("rater1", &histogram(&rater1, 5, (0.0, 5.0)));
    render_histogram("rater2", &histogram(&rater2, 5, (0.0, 5.0)));
    println!();

    let agreement = spearman(&rater1, &rater2)?;
    println!(
        "Spearman: rho = {:.6}, p-value = {:.6e} (n = {})",
        agreement.rho, agreement.p_value, agreement.n
    );

    Ok(())
}

/// `redCards ~ moderator * each` expanded patsy-style: main effects first,
/// then the moderator's pairwise interactions.
fn interaction_formula(moderator: &str, others: &[&str]) -> ModelFormula {
    let mut terms = vec![Term::main(moderator)];
    terms.extend(others.iter().map(|o| Term::main(o)));
    terms.extend(others.iter().map(|o| Term::interaction(moderator, o)));
    ModelFormula::new("redCards", terms)
}

fn fit_and_report(df: &DataFrame, formula: &ModelFormula) -> Result<()> {
    println!("{}", style(formula.to_string()).white().bold());
    let design = Design::from_frame(df, formula)?;
    let summary = fit_poisson(&design)?;
    render_summary(&summary);
    Ok(())
}

fn print_question(label: &str) {
    println!();
    println!("{}", style(label).cyan().bold());
}

fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(df
        .column(name)?
        .cast(&DataType::Float64)?
        .f64()?
        .iter()
        .map(|opt| opt.unwrap_or(f64::NAN))
        .collect())
}

fn mean(values: &[f64]) -> f64 {
    let clean: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    clean.iter().sum::<f64>() / clean.len() as f64
}

fn sample_variance(values: &[f64]) -> f64 {
    let clean: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let n = clean.len() as f64;
    let mean = clean.iter().sum::<f64>() / n;
    clean.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0)
}
