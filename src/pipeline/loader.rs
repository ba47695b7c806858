//! Dataset loader: CSV ingestion and derived columns

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::path::Path;

/// Reference year for the age derivation (the 2012-2013 season)
pub const REFERENCE_YEAR: i32 = 2013;

/// Day-first date layouts accepted for the `birthday` column
const BIRTHDAY_FORMATS: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Load the player-referee dataset from a CSV file and attach the derived
/// columns (`skin`, `skin_binary`, `red_dummy`, `age`).
///
/// `NA` and empty fields are read as missing.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10_000))
        .with_null_values(Some(NullValues::AllColumns(vec!["NA".into(), "".into()])))
        .finish()
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?;

    derive_columns(df)
}

/// Attach the derived analysis columns to an already-loaded frame.
///
/// - `skin`: mean of the available rater scores (one missing rater falls
///   back to the other; both missing stays missing)
/// - `skin_binary`: 1 if `skin >= 0.5`, else 0; a missing score counts as
///   0, so the column itself is never missing
/// - `red_dummy`: 1 if `redCards > 0`, else 0, same missing convention
/// - `age`: `REFERENCE_YEAR - year(birthday)`; unparseable or missing
///   birthdays yield a missing age rather than an error
pub fn derive_columns(mut df: DataFrame) -> Result<DataFrame> {
    let rater1 = required_f64(&df, "rater1")?;
    let rater2 = required_f64(&df, "rater2")?;
    let red_cards = required_f64(&df, "redCards")?;

    let skin: Float64Chunked = rater1
        .iter()
        .zip(rater2.iter())
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some((a + b) / 2.0),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        })
        .collect();

    let skin_binary: Int32Chunked = skin
        .iter()
        .map(|s| Some(i32::from(matches!(s, Some(v) if v >= 0.5))))
        .collect();

    let red_dummy: Int32Chunked = red_cards
        .iter()
        .map(|r| Some(i32::from(matches!(r, Some(v) if v > 0.0))))
        .collect();

    let birthday = df
        .column("birthday")
        .context("required column 'birthday' missing from dataset")?
        .str()
        .context("column 'birthday' is not a string column")?
        .clone();

    let age: Int32Chunked = birthday
        .iter()
        .map(|value| {
            value
                .and_then(parse_day_first)
                .map(|date| REFERENCE_YEAR - date.year())
        })
        .collect();

    df.with_column(named_series(skin.into_series(), "skin"))?;
    df.with_column(named_series(skin_binary.into_series(), "skin_binary"))?;
    df.with_column(named_series(red_dummy.into_series(), "red_dummy"))?;
    df.with_column(named_series(age.into_series(), "age"))?;

    Ok(df)
}

/// Parse a date string with day-first conventions; `None` if no layout
/// matches.
fn parse_day_first(value: &str) -> Option<NaiveDate> {
    BIRTHDAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value.trim(), fmt).ok())
}

/// Fetch a required column as Float64, erroring when it is absent.
fn required_f64(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let column = df
        .column(name)
        .with_context(|| format!("required column '{}' missing from dataset", name))?
        .cast(&DataType::Float64)
        .with_context(|| format!("column '{}' is not numeric", name))?;
    Ok(column.f64()?.clone())
}

fn named_series(mut series: Series, name: &str) -> Series {
    series.rename(name.into());
    series
}
