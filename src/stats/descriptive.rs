//! Descriptive statistics for the exploratory analysis
//!
//! - D'Agostino K-squared omnibus normality test
//! - Spearman rank correlation
//! - Fixed-range histogram binning

use crate::stats::distribution::{chi_squared_sf, student_t_two_sided_p};
use anyhow::{bail, Result};

/// Result of the D'Agostino K-squared normality test
#[derive(Debug, Clone)]
pub struct NormalityTest {
    /// K-squared statistic
    pub statistic: f64,
    /// p-value (chi-squared with 2 df)
    pub p_value: f64,
    /// Skewness z-score
    pub z_skewness: f64,
    /// Kurtosis z-score
    pub z_kurtosis: f64,
    /// Number of observations
    pub n: usize,
}

/// Result of a Spearman rank correlation test
#[derive(Debug, Clone)]
pub struct RankCorrelation {
    /// Correlation coefficient
    pub rho: f64,
    /// t statistic of the correlation
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Number of paired observations
    pub n: usize,
}

/// Histogram counts over equal-width bins
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Count per bin
    pub counts: Vec<usize>,
    /// Bin edges, `counts.len() + 1` entries
    pub edges: Vec<f64>,
}

fn filter_nan(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| !x.is_nan()).collect()
}

/// Central moments m2, m3, m4 about the mean, each divided by n.
fn central_moments(data: &[f64]) -> (f64, f64, f64) {
    let n = data.len() as f64;
    let mean: f64 = data.iter().sum::<f64>() / n;

    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    for &x in data {
        let d = x - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    (m2 / n, m3 / n, m4 / n)
}

/// D'Agostino-Pearson K-squared omnibus test, combining the skewness and
/// kurtosis z-scores. Requires at least 8 observations.
pub fn dagostino_k_squared(data: &[f64]) -> Result<NormalityTest> {
    let clean = filter_nan(data);
    let n = clean.len();
    if n < 8 {
        bail!("D'Agostino K-squared test requires at least 8 observations, got {}", n);
    }

    let (m2, m3, m4) = central_moments(&clean);
    if m2 == 0.0 {
        bail!("D'Agostino K-squared test is undefined for constant data");
    }

    let z_skewness = skewness_z(m3 / m2.powf(1.5), n as f64);
    let z_kurtosis = kurtosis_z(m4 / (m2 * m2), n as f64);

    let statistic = z_skewness * z_skewness + z_kurtosis * z_kurtosis;
    let p_value = chi_squared_sf(statistic, 2.0);

    Ok(NormalityTest {
        statistic,
        p_value,
        z_skewness,
        z_kurtosis,
        n,
    })
}

/// Transformed skewness z-score (D'Agostino 1970).
fn skewness_z(b1: f64, n: f64) -> f64 {
    let mut y = b1 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    if y == 0.0 {
        y = 1.0;
    }
    delta * (y / alpha + ((y / alpha) * (y / alpha) + 1.0).sqrt()).ln()
}

/// Transformed kurtosis z-score (Anscombe & Glynn 1983).
fn kurtosis_z(b2: f64, n: f64) -> f64 {
    let expected = 3.0 * (n - 1.0) / (n + 1.0);
    let variance = 24.0 * n * (n - 2.0) * (n - 3.0) / ((n + 1.0) * (n + 1.0) * (n + 3.0) * (n + 5.0));
    let x = (b2 - expected) / variance.sqrt();

    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0 + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());

    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();

    (term1 - term2) / (2.0 / (9.0 * a)).sqrt()
}

/// Spearman rank correlation with average ranks for ties. NaN pairs are
/// dropped; at least 3 valid pairs are required. The p-value uses the t
/// approximation with n - 2 degrees of freedom.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<RankCorrelation> {
    if x.len() != y.len() {
        bail!(
            "Spearman correlation requires equal length vectors, got {} and {}",
            x.len(),
            y.len()
        );
    }

    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(a, b)| (*a, *b))
        .collect();

    let n = pairs.len();
    if n < 3 {
        bail!("Spearman correlation requires at least 3 valid pairs, got {}", n);
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
    let rank_x = average_ranks(&xs);
    let rank_y = average_ranks(&ys);

    let rho = pearson_of(&rank_x, &rank_y);

    let (statistic, p_value) = if rho.abs() >= 1.0 {
        (f64::INFINITY, 0.0)
    } else {
        let df = (n - 2) as f64;
        let t = rho * (df / (1.0 - rho * rho)).sqrt();
        (t, student_t_two_sided_p(t, df))
    };

    Ok(RankCorrelation {
        rho,
        statistic,
        p_value,
        n,
    })
}

/// Ranks starting at 1, ties receiving the average of their positions.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start;
        while end + 1 < n && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        // Positions are 1-based; a tie run shares the average position.
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = rank;
        }
        start = end + 1;
    }
    ranks
}

fn pearson_of(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x: f64 = x.iter().sum::<f64>() / n;
    let mean_y: f64 = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}

/// Bin `data` into `bins` equal-width bins over `range`. Values outside
/// the range are ignored; the final bin includes its upper edge.
pub fn histogram(data: &[f64], bins: usize, range: (f64, f64)) -> Histogram {
    let (lo, hi) = range;
    let width = (hi - lo) / bins as f64;

    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];

    for &value in data {
        if value.is_nan() || value < lo || value > hi {
            continue;
        }
        let bin = if value >= hi {
            bins - 1
        } else {
            ((value - lo) / width) as usize
        };
        counts[bin.min(bins - 1)] += 1;
    }

    Histogram { counts, edges }
}
