//! Logistic and Poisson regression via iteratively reweighted least
//! squares, with z-based inference

use crate::model::design::Design;
use crate::model::error::{ModelError, ModelResult};
use crate::model::solve::{factor_spd, verified_inverse};
use crate::model::summary::{Coefficient, FitSummary};
use crate::stats::distribution::{ln_gamma, normal_quantile, normal_sf};
use faer::linalg::solvers::Solve;
use faer::Mat;

const CONFIDENCE_LEVEL: f64 = 0.95;
const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-8;

/// Bounds keeping the mean away from the boundary of the parameter space
const MU_FLOOR: f64 = 1e-10;
const MU_CEIL: f64 = 1e10;

/// GLM family fitted by the IRLS loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Binomial response, logit link
    Logit,
    /// Count response, log link
    Poisson,
}

impl Family {
    fn label(&self) -> &'static str {
        match self {
            Family::Logit => "Logit",
            Family::Poisson => "Poisson",
        }
    }

    /// Mean response under the inverse link.
    fn mean(&self, eta: f64) -> f64 {
        match self {
            Family::Logit => {
                let mu = 1.0 / (1.0 + (-eta).exp());
                mu.clamp(MU_FLOOR, 1.0 - MU_FLOOR)
            }
            Family::Poisson => eta.exp().clamp(MU_FLOOR, MU_CEIL),
        }
    }

    /// IRLS working weight at the current mean. For the canonical links
    /// used here this is the variance function.
    fn weight(&self, mu: f64) -> f64 {
        match self {
            Family::Logit => mu * (1.0 - mu),
            Family::Poisson => mu,
        }
    }

    fn validate_response(&self, y: &[f64]) -> ModelResult<()> {
        match self {
            Family::Logit => {
                if y.iter().any(|&v| !(0.0..=1.0).contains(&v)) {
                    return Err(ModelError::InvalidResponse {
                        family: "logistic",
                        message: "response values must lie in [0, 1]".to_string(),
                    });
                }
            }
            Family::Poisson => {
                if y.iter().any(|&v| v < 0.0) {
                    return Err(ModelError::InvalidResponse {
                        family: "Poisson",
                        message: "response values must be non-negative".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Deviance of the fitted means against the observed response.
    fn deviance(&self, y: &[f64], mu: &[f64]) -> f64 {
        match self {
            Family::Logit => {
                -2.0 * y
                    .iter()
                    .zip(mu.iter())
                    .map(|(&yi, &mi)| yi * mi.ln() + (1.0 - yi) * (1.0 - mi).ln())
                    .sum::<f64>()
            }
            Family::Poisson => {
                2.0 * y
                    .iter()
                    .zip(mu.iter())
                    .map(|(&yi, &mi)| {
                        if yi > 0.0 {
                            yi * (yi / mi).ln() - (yi - mi)
                        } else {
                            mi
                        }
                    })
                    .sum::<f64>()
            }
        }
    }

    fn log_likelihood(&self, y: &[f64], mu: &[f64]) -> f64 {
        match self {
            Family::Logit => y
                .iter()
                .zip(mu.iter())
                .map(|(&yi, &mi)| yi * mi.ln() + (1.0 - yi) * (1.0 - mi).ln())
                .sum(),
            Family::Poisson => y
                .iter()
                .zip(mu.iter())
                .map(|(&yi, &mi)| yi * mi.ln() - mi - ln_gamma(yi + 1.0))
                .sum(),
        }
    }
}

/// Fit a logistic regression (binomial family, logit link).
pub fn fit_logit(design: &Design) -> ModelResult<FitSummary> {
    fit_glm(design, Family::Logit)
}

/// Fit a Poisson regression (log link).
pub fn fit_poisson(design: &Design) -> ModelResult<FitSummary> {
    fit_glm(design, Family::Poisson)
}

/// IRLS loop shared by both families: at each step solve the weighted
/// normal equations XᵀWX β = XᵀWz for the working response z, until the
/// deviance stabilizes.
pub fn fit_glm(design: &Design, family: Family) -> ModelResult<FitSummary> {
    let n = design.n_observations();
    let p = design.n_params();
    let x = &design.matrix;
    let y = &design.response;

    family.validate_response(y)?;

    let mut beta = Mat::<f64>::zeros(p, 1);
    let mut eta = vec![0.0; n];
    let mut mu: Vec<f64> = eta.iter().map(|&e| family.mean(e)).collect();
    let mut deviance = family.deviance(y, &mu);
    let mut iterations = 0;
    let mut converged = false;
    let mut last_factor = None;

    while iterations < MAX_ITERATIONS {
        iterations += 1;

        // Working weights and working response at the current estimate.
        let weights: Vec<f64> = mu.iter().map(|&m| family.weight(m).max(MU_FLOOR)).collect();
        let z: Vec<f64> = (0..n)
            .map(|i| eta[i] + (y[i] - mu[i]) / weights[i])
            .collect();

        let (xtwx, xtwz) = weighted_normal_equations(x, &weights, &z);
        let llt = factor_spd(&xtwx)?;
        beta = llt.solve(xtwz.as_ref());

        if (0..p).any(|j| !beta[(j, 0)].is_finite()) {
            return Err(ModelError::SingularMatrix);
        }

        let linear = x.as_ref() * beta.as_ref();
        eta = (0..n).map(|i| linear[(i, 0)]).collect();
        if eta.iter().any(|e| !e.is_finite()) {
            return Err(ModelError::NotConverged {
                iterations,
                tolerance: TOLERANCE,
            });
        }

        mu = eta.iter().map(|&e| family.mean(e)).collect();
        let new_deviance = family.deviance(y, &mu);

        let change = (new_deviance - deviance).abs() / (new_deviance.abs() + 0.1);
        deviance = new_deviance;
        last_factor = Some((xtwx, llt));

        if change < TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        return Err(ModelError::NotConverged {
            iterations,
            tolerance: TOLERANCE,
        });
    }

    // Covariance of the estimates from the final weighted factorization.
    let (xtwx, llt) = last_factor.expect("at least one IRLS iteration ran");
    let covariance = verified_inverse(&xtwx, &llt)?;

    let z_crit = normal_quantile(1.0 - (1.0 - CONFIDENCE_LEVEL) / 2.0);
    let coefficients: Vec<Coefficient> = (0..p)
        .map(|j| {
            let estimate = beta[(j, 0)];
            let std_error = covariance[(j, j)].sqrt();
            let statistic = estimate / std_error;
            Coefficient {
                name: design.names[j].clone(),
                estimate,
                std_error,
                statistic,
                p_value: 2.0 * normal_sf(statistic.abs()),
                ci_lower: estimate - z_crit * std_error,
                ci_upper: estimate + z_crit * std_error,
            }
        })
        .collect();

    if coefficients.iter().any(|c| !c.std_error.is_finite()) {
        return Err(ModelError::SingularMatrix);
    }

    // Null model: intercept only, mean response everywhere.
    let mean_y: f64 = y.iter().sum::<f64>() / n as f64;
    let mu_null: Vec<f64> = match family {
        Family::Logit => vec![mean_y.clamp(MU_FLOOR, 1.0 - MU_FLOOR); n],
        Family::Poisson => vec![mean_y.max(MU_FLOOR); n],
    };
    let null_deviance = family.deviance(y, &mu_null);
    let pseudo_r_squared = if null_deviance > 0.0 {
        1.0 - deviance / null_deviance
    } else {
        0.0
    };

    let log_likelihood = family.log_likelihood(y, &mu);
    let aic = 2.0 * p as f64 - 2.0 * log_likelihood;

    Ok(FitSummary {
        model: family.label(),
        statistic_label: "z",
        n_observations: n,
        n_dropped: design.n_dropped,
        df_resid: n - p,
        coefficients,
        log_likelihood,
        aic,
        confidence_level: CONFIDENCE_LEVEL,
        r_squared: None,
        adj_r_squared: None,
        f_statistic: None,
        deviance: Some(deviance),
        null_deviance: Some(null_deviance),
        pseudo_r_squared: Some(pseudo_r_squared),
        iterations: Some(iterations),
    })
}

/// Accumulate XᵀWX and XᵀWz in one pass over the rows.
fn weighted_normal_equations(x: &Mat<f64>, weights: &[f64], z: &[f64]) -> (Mat<f64>, Mat<f64>) {
    let n = x.nrows();
    let p = x.ncols();

    let mut xtwx = Mat::<f64>::zeros(p, p);
    let mut xtwz = Mat::<f64>::zeros(p, 1);

    for i in 0..n {
        let w = weights[i];
        for j in 0..p {
            let xij = x[(i, j)];
            xtwz[(j, 0)] += w * xij * z[i];
            for k in j..p {
                xtwx[(j, k)] += w * xij * x[(i, k)];
            }
        }
    }
    for j in 0..p {
        for k in 0..j {
            xtwx[(j, k)] = xtwx[(k, j)];
        }
    }

    (xtwx, xtwz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::formula::{ModelFormula, Term};
    use polars::prelude::*;

    #[test]
    fn test_logit_separates_low_and_high() {
        let x: Vec<f64> = (0..40).map(|v| v as f64 / 4.0).collect();
        // Outcome flips from mostly-0 to mostly-1 around x = 5.
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let noisy = i % 7 == 0;
                if (v > 5.0) != noisy {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();

        let df = df! { "y" => y, "x" => x }.unwrap();
        let formula = ModelFormula::new("y", vec![Term::main("x")]);
        let design = Design::from_frame(&df, &formula).unwrap();
        let fit = fit_logit(&design).unwrap();

        assert_eq!(fit.model, "Logit");
        assert!(fit.coefficients[1].estimate > 0.0, "slope should be positive");
        assert!(fit.iterations.unwrap() <= MAX_ITERATIONS);
        assert!(fit.pseudo_r_squared.unwrap() > 0.1);
    }

    #[test]
    fn test_poisson_recovers_log_linear_rates() {
        // Counts generated from rate exp(0.5 + 0.3 x), rounded determin-
        // istically so the fixture is stable.
        let x: Vec<f64> = (0..60).map(|v| v as f64 / 10.0).collect();
        let y: Vec<f64> = x.iter().map(|&v| (0.5 + 0.3 * v).exp().round()).collect();

        let df = df! { "y" => y, "x" => x }.unwrap();
        let formula = ModelFormula::new("y", vec![Term::main("x")]);
        let design = Design::from_frame(&df, &formula).unwrap();
        let fit = fit_poisson(&design).unwrap();

        assert!((fit.coefficients[0].estimate - 0.5).abs() < 0.15, "intercept");
        assert!((fit.coefficients[1].estimate - 0.3).abs() < 0.05, "slope");
        assert!(fit.deviance.unwrap() < fit.null_deviance.unwrap());
    }

    #[test]
    fn test_poisson_rejects_negative_counts() {
        let df = df! {
            "y" => [1.0f64, 2.0, -1.0, 3.0, 4.0, 2.0],
            "x" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
        }
        .unwrap();
        let formula = ModelFormula::new("y", vec![Term::main("x")]);
        let design = Design::from_frame(&df, &formula).unwrap();

        assert!(matches!(
            fit_poisson(&design),
            Err(ModelError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_logit_rejects_out_of_range_response() {
        let df = df! {
            "y" => [0.0f64, 1.0, 2.0, 1.0, 0.0, 1.0],
            "x" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0],
        }
        .unwrap();
        let formula = ModelFormula::new("y", vec![Term::main("x")]);
        let design = Design::from_frame(&df, &formula).unwrap();

        assert!(matches!(
            fit_logit(&design),
            Err(ModelError::InvalidResponse { .. })
        ));
    }
}
