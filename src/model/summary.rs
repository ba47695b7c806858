//! Fitted-model result types consumed by the report layer

/// One fitted coefficient with its inference statistics
#[derive(Debug, Clone)]
pub struct Coefficient {
    /// Design-matrix column name ("Intercept" first)
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    /// t statistic (OLS) or z statistic (GLM)
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Everything the run reports about a fitted model. Produced once per run
/// and only consumed for display.
#[derive(Debug, Clone)]
pub struct FitSummary {
    /// Model family label ("OLS", "Logit", "Poisson")
    pub model: &'static str,
    /// Label of the per-coefficient statistic column ("t" or "z")
    pub statistic_label: &'static str,
    /// Observations entering the fit after listwise deletion
    pub n_observations: usize,
    /// Rows dropped for missing values while building the design
    pub n_dropped: usize,
    /// Residual degrees of freedom
    pub df_resid: usize,
    pub coefficients: Vec<Coefficient>,
    pub log_likelihood: f64,
    pub aic: f64,
    /// Confidence level of the reported intervals
    pub confidence_level: f64,

    // Linear-model statistics
    pub r_squared: Option<f64>,
    pub adj_r_squared: Option<f64>,
    /// (F statistic, p-value)
    pub f_statistic: Option<(f64, f64)>,

    // GLM statistics
    pub deviance: Option<f64>,
    pub null_deviance: Option<f64>,
    /// McFadden pseudo R-squared
    pub pseudo_r_squared: Option<f64>,
    /// IRLS iterations until convergence
    pub iterations: Option<usize>,
}
