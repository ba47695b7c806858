//! Standardization of numeric columns

use anyhow::Result;
use polars::prelude::*;
use rayon::prelude::*;

/// Standardize every numeric column to zero mean and unit variance
/// (population standard deviation). Disabled runs return the frame
/// unchanged.
///
/// All numeric columns are rescaled, outcome and dummy columns included;
/// that changes their interpretation in a fitted model and is preserved
/// deliberately. Zero-variance columns are centered only. Non-numeric
/// columns are untouched.
pub fn scale(mut df: DataFrame, enabled: bool) -> Result<DataFrame> {
    if !enabled {
        return Ok(df);
    }

    let numeric_cols: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect();

    let scaled: Vec<PolarsResult<Series>> = numeric_cols
        .par_iter()
        .map(|name| standardize_column(&df, name))
        .collect();

    for series in scaled {
        df.with_column(series?)?;
    }

    Ok(df)
}

fn standardize_column(df: &DataFrame, name: &str) -> PolarsResult<Series> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let ca = column.f64()?;

    // Two-pass mean and population standard deviation over the
    // non-missing values.
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in ca.iter().flatten() {
        sum += value;
        count += 1;
    }

    if count == 0 {
        let mut series = ca.clone().into_series();
        series.rename(name.into());
        return Ok(series);
    }

    let mean = sum / count as f64;

    let mut sum_sq_dev = 0.0;
    for value in ca.iter().flatten() {
        let dev = value - mean;
        sum_sq_dev += dev * dev;
    }
    let std = (sum_sq_dev / count as f64).sqrt();
    let divisor = if std > 0.0 { std } else { 1.0 };

    let standardized: Float64Chunked = ca
        .iter()
        .map(|opt| opt.map(|v| (v - mean) / divisor))
        .collect();

    let mut series = standardized.into_series();
    series.rename(name.into());
    Ok(series)
}
