//! Design-matrix construction from a prepared frame and a formula

use crate::model::error::{ModelError, ModelResult};
use crate::pipeline::formula::{ModelFormula, Term};
use faer::Mat;
use polars::prelude::*;

/// Response vector and design matrix extracted for one model fit.
///
/// Rows with a missing or non-finite value in any used column are
/// removed before the matrix is assembled; `n_dropped` records how many.
/// The first matrix column is the intercept.
#[derive(Debug)]
pub struct Design {
    pub response: Vec<f64>,
    pub matrix: Mat<f64>,
    /// Column names, "Intercept" first, then one per formula term
    pub names: Vec<String>,
    pub n_dropped: usize,
}

impl Design {
    pub fn from_frame(df: &DataFrame, formula: &ModelFormula) -> ModelResult<Self> {
        // Every column the formula touches, outcome first, deduplicated
        // in order of first reference.
        let mut needed: Vec<&str> = vec![formula.outcome.as_str()];
        for term in &formula.terms {
            match term {
                Term::Main(name) => push_unique(&mut needed, name),
                Term::Interaction(a, b) => {
                    push_unique(&mut needed, a);
                    push_unique(&mut needed, b);
                }
            }
        }

        let mut columns: Vec<(&str, Vec<Option<f64>>)> = Vec::with_capacity(needed.len());
        for name in needed {
            let column = df
                .column(name)
                .map_err(|_| ModelError::MissingColumn(name.to_string()))?
                .cast(&DataType::Float64)
                .map_err(|_| ModelError::NonNumericColumn(name.to_string()))?;
            let values: Vec<Option<f64>> = column
                .f64()
                .map_err(|_| ModelError::NonNumericColumn(name.to_string()))?
                .iter()
                .collect();
            columns.push((name, values));
        }

        let n_rows = df.height();
        let valid: Vec<usize> = (0..n_rows)
            .filter(|&i| {
                columns
                    .iter()
                    .all(|(_, values)| matches!(values[i], Some(v) if v.is_finite()))
            })
            .collect();

        if valid.is_empty() {
            return Err(ModelError::NoValidData);
        }

        let value_at = |name: &str, row: usize| -> f64 {
            let (_, values) = columns.iter().find(|(n, _)| *n == name).expect("column collected");
            values[row].expect("row validated")
        };

        let n_valid = valid.len();
        let n_params = formula.terms.len() + 1;
        if n_valid <= n_params {
            return Err(ModelError::InsufficientData {
                rows: n_valid,
                params: n_params,
            });
        }

        let response: Vec<f64> = valid
            .iter()
            .map(|&row| value_at(&formula.outcome, row))
            .collect();

        let matrix = Mat::from_fn(n_valid, n_params, |i, j| {
            if j == 0 {
                return 1.0;
            }
            let row = valid[i];
            match &formula.terms[j - 1] {
                Term::Main(name) => value_at(name, row),
                Term::Interaction(a, b) => value_at(a, row) * value_at(b, row),
            }
        });

        let mut names = vec!["Intercept".to_string()];
        names.extend(formula.terms.iter().map(Term::label));

        Ok(Design {
            response,
            matrix,
            names,
            n_dropped: n_rows - n_valid,
        })
    }

    pub fn n_observations(&self) -> usize {
        self.response.len()
    }

    pub fn n_params(&self) -> usize {
        self.matrix.ncols()
    }
}

fn push_unique<'a>(list: &mut Vec<&'a str>, name: &'a str) {
    if !list.contains(&name) {
        list.push(name);
    }
}
