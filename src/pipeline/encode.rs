//! Categorical encoding of the nominal `position` column

use anyhow::{Context, Result};
use clap::ValueEnum;
use polars::prelude::*;
use std::fmt;

/// How the nominal `position` column enters the prepared table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PositionEncoding {
    /// One indicator column per category except the first
    Onehot,
    /// Integer codes in first-seen category order
    Ordinal,
    /// Remove the column entirely
    Drop,
}

impl fmt::Display for PositionEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PositionEncoding::Onehot => "onehot",
            PositionEncoding::Ordinal => "ordinal",
            PositionEncoding::Drop => "drop",
        };
        f.write_str(name)
    }
}

/// Apply the configured encoding to the `position` column.
///
/// Categories are captured in first-seen order, which keeps the
/// column/code layout reproducible for a given input ordering. One-hot
/// indicators for a missing position are all zero; ordinal codes a
/// missing position as -1.
pub fn encode_position(df: DataFrame, mode: PositionEncoding) -> Result<DataFrame> {
    match mode {
        PositionEncoding::Onehot => one_hot(df),
        PositionEncoding::Ordinal => ordinal(df),
        PositionEncoding::Drop => df
            .drop("position")
            .context("required column 'position' missing from dataset"),
    }
}

fn position_values(df: &DataFrame) -> Result<StringChunked> {
    Ok(df
        .column("position")
        .context("required column 'position' missing from dataset")?
        .str()
        .context("column 'position' is not a string column")?
        .clone())
}

/// Distinct categories in order of first appearance.
fn categories(values: &StringChunked) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values.iter().flatten() {
        if !seen.iter().any(|c| c == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

fn one_hot(mut df: DataFrame) -> Result<DataFrame> {
    let values = position_values(&df)?;

    // Drop-first encoding: the first-seen category becomes the baseline.
    for category in categories(&values).iter().skip(1) {
        let indicator: Int32Chunked = values
            .iter()
            .map(|v| Some(i32::from(v == Some(category.as_str()))))
            .collect();
        let mut series = indicator.into_series();
        series.rename(format!("position_{}", category).into());
        df.with_column(series)?;
    }

    Ok(df.drop("position")?)
}

fn ordinal(mut df: DataFrame) -> Result<DataFrame> {
    let values = position_values(&df)?;
    let categories = categories(&values);

    let codes: Int32Chunked = values
        .iter()
        .map(|v| {
            let code = match v {
                Some(v) => categories.iter().position(|c| c == v).unwrap_or(0) as i32,
                None => -1,
            };
            Some(code)
        })
        .collect();

    let mut series = codes.into_series();
    series.rename("position".into());
    df.with_column(series)?;
    Ok(df)
}
