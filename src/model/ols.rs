//! Ordinary least squares with t-based inference

use crate::model::design::Design;
use crate::model::error::{ModelError, ModelResult};
use crate::model::solve::{factor_spd, verified_inverse};
use crate::model::summary::{Coefficient, FitSummary};
use crate::stats::distribution::{f_sf, student_t_quantile, student_t_two_sided_p};
use faer::linalg::solvers::Solve;
use faer::Mat;
use std::f64::consts::PI;

/// Confidence level of the reported intervals
const CONFIDENCE_LEVEL: f64 = 0.95;

/// Fit an ordinary least squares model on the prepared design.
///
/// Solves the normal equations by Cholesky; a factorization failure or a
/// non-finite solution surfaces as `SingularMatrix`.
pub fn fit_ols(design: &Design) -> ModelResult<FitSummary> {
    let n = design.n_observations();
    let p = design.n_params();
    let x = &design.matrix;

    let y = Mat::from_fn(n, 1, |i, _| design.response[i]);
    let xtx = x.transpose() * x.as_ref();
    let xty = x.transpose() * y.as_ref();

    let llt = factor_spd(&xtx)?;
    let xtx_inv = verified_inverse(&xtx, &llt)?;
    let beta = llt.solve(xty.as_ref());

    if (0..p).any(|j| !beta[(j, 0)].is_finite()) {
        return Err(ModelError::SingularMatrix);
    }

    // Residual and total sums of squares.
    let fitted = x.as_ref() * beta.as_ref();
    let mut rss = 0.0;
    for i in 0..n {
        let r = design.response[i] - fitted[(i, 0)];
        rss += r * r;
    }

    let mean_y: f64 = design.response.iter().sum::<f64>() / n as f64;
    let tss: f64 = design
        .response
        .iter()
        .map(|v| (v - mean_y) * (v - mean_y))
        .sum();

    let df_resid = n - p;
    let sigma2 = rss / df_resid as f64;
    let t_crit = student_t_quantile(1.0 - (1.0 - CONFIDENCE_LEVEL) / 2.0, df_resid as f64);

    let coefficients: Vec<Coefficient> = (0..p)
        .map(|j| {
            let estimate = beta[(j, 0)];
            let std_error = (sigma2 * xtx_inv[(j, j)]).sqrt();
            let statistic = estimate / std_error;
            Coefficient {
                name: design.names[j].clone(),
                estimate,
                std_error,
                statistic,
                p_value: student_t_two_sided_p(statistic, df_resid as f64),
                ci_lower: estimate - t_crit * std_error,
                ci_upper: estimate + t_crit * std_error,
            }
        })
        .collect();

    if coefficients.iter().any(|c| !c.std_error.is_finite()) {
        return Err(ModelError::SingularMatrix);
    }

    let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { 0.0 };
    let adj_r_squared =
        1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / (n as f64 - p as f64);

    let f_statistic = if p > 1 && r_squared < 1.0 {
        let df_model = (p - 1) as f64;
        let f = (r_squared / df_model) / ((1.0 - r_squared) / df_resid as f64);
        Some((f, f_sf(f, df_model, df_resid as f64)))
    } else {
        None
    };

    // Gaussian log-likelihood at the MLE variance rss / n.
    let log_likelihood = -0.5 * n as f64 * ((2.0 * PI).ln() + (rss / n as f64).ln() + 1.0);
    let aic = 2.0 * p as f64 - 2.0 * log_likelihood;

    Ok(FitSummary {
        model: "OLS",
        statistic_label: "t",
        n_observations: n,
        n_dropped: design.n_dropped,
        df_resid,
        coefficients,
        log_likelihood,
        aic,
        confidence_level: CONFIDENCE_LEVEL,
        r_squared: Some(r_squared),
        adj_r_squared: Some(adj_r_squared),
        f_statistic,
        deviance: None,
        null_deviance: None,
        pseudo_r_squared: None,
        iterations: None,
    })
}
