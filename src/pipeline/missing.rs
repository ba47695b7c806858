//! Missing-data handling: listwise deletion or mean imputation

use anyhow::Result;
use clap::ValueEnum;
use polars::prelude::*;
use std::fmt;

/// Strategy for rows/cells with missing values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MissingStrategy {
    /// Remove every row containing at least one missing value
    Dropna,
    /// Replace missing values in numeric columns with the column mean
    Mean,
}

impl fmt::Display for MissingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingStrategy::Dropna => "dropna",
            MissingStrategy::Mean => "mean",
        };
        f.write_str(name)
    }
}

/// Apply the configured missing-data strategy.
///
/// `Dropna` considers every column, derived ones included, and can shrink
/// the sample substantially. `Mean` keeps the row count unchanged: numeric
/// columns are cast to Float64 and nulls replaced with the mean of the
/// non-missing values; non-numeric columns are left untouched and may
/// still contain missing values afterwards.
pub fn handle_missing(df: DataFrame, strategy: MissingStrategy) -> Result<DataFrame> {
    match strategy {
        MissingStrategy::Dropna => Ok(df.lazy().drop_nulls(None).collect()?),
        MissingStrategy::Mean => impute_means(df),
    }
}

fn impute_means(mut df: DataFrame) -> Result<DataFrame> {
    let numeric_cols: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect();

    for name in numeric_cols {
        // Cast before filling so integer columns take a fractional mean.
        let filled = df
            .column(&name)?
            .cast(&DataType::Float64)?
            .as_materialized_series()
            .fill_null(FillNullStrategy::Mean)?;
        df.with_column(filled)?;
    }

    Ok(df)
}
