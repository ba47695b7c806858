//! Run configuration enums and the model-formula builder

use clap::ValueEnum;
use std::fmt;

/// Statistical family of the outcome variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutcomeKind {
    /// Ordinary least squares on the raw red-card count
    Linear,
    /// Logistic regression on the binarized red-card flag
    Logit,
    /// Poisson regression on the raw red-card count
    Poisson,
}

/// Representation of the skin-tone predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SkinMeasure {
    /// Mean of the two rater scores
    Continuous,
    /// Mean score thresholded at 0.5
    Binary,
}

/// Named covariate bundle appended to the formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CovariateSet {
    /// Predictor only, no covariates
    None,
    /// height + weight + age
    Physical,
    /// games + victories + defeats + goals
    Performance,
    /// height + weight + games + goals + victories + age + yellowCards
    Full,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Linear => "linear",
            OutcomeKind::Logit => "logit",
            OutcomeKind::Poisson => "poisson",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SkinMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkinMeasure::Continuous => "continuous",
            SkinMeasure::Binary => "binary",
        };
        f.write_str(name)
    }
}

impl fmt::Display for CovariateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CovariateSet::None => "none",
            CovariateSet::Physical => "physical",
            CovariateSet::Performance => "performance",
            CovariateSet::Full => "full",
        };
        f.write_str(name)
    }
}

impl OutcomeKind {
    /// Column the model regresses on
    pub fn outcome_column(&self) -> &'static str {
        match self {
            OutcomeKind::Linear | OutcomeKind::Poisson => "redCards",
            OutcomeKind::Logit => "red_dummy",
        }
    }
}

impl SkinMeasure {
    /// Column used as the main predictor
    pub fn predictor_column(&self) -> &'static str {
        match self {
            SkinMeasure::Continuous => "skin",
            SkinMeasure::Binary => "skin_binary",
        }
    }
}

impl CovariateSet {
    /// Covariate columns appended after the main predictor
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            CovariateSet::None => &[],
            CovariateSet::Physical => &["height", "weight", "age"],
            CovariateSet::Performance => &["games", "victories", "defeats", "goals"],
            CovariateSet::Full => &[
                "height",
                "weight",
                "games",
                "goals",
                "victories",
                "age",
                "yellowCards",
            ],
        }
    }
}

/// A single right-hand-side term of a model formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A column referenced by name
    Main(String),
    /// Elementwise product of two columns, rendered `a:b`
    Interaction(String, String),
}

impl Term {
    pub fn main(name: &str) -> Self {
        Term::Main(name.to_string())
    }

    pub fn interaction(a: &str, b: &str) -> Self {
        Term::Interaction(a.to_string(), b.to_string())
    }

    /// Display label, also used to name the design-matrix column
    pub fn label(&self) -> String {
        match self {
            Term::Main(name) => name.clone(),
            Term::Interaction(a, b) => format!("{}:{}", a, b),
        }
    }
}

/// A fully resolved model specification: outcome column plus ordered
/// right-hand-side terms. Construction is pure; the same configuration
/// always yields the same formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFormula {
    pub outcome: String,
    pub terms: Vec<Term>,
}

impl ModelFormula {
    /// Build the replication formula from the configured outcome family,
    /// skin-tone representation, and covariate bundle.
    pub fn build(outcome: OutcomeKind, skin: SkinMeasure, cov: CovariateSet) -> Self {
        let mut terms = vec![Term::main(skin.predictor_column())];
        terms.extend(cov.columns().iter().map(|c| Term::main(c)));

        ModelFormula {
            outcome: outcome.outcome_column().to_string(),
            terms,
        }
    }

    /// Assemble a formula from explicit parts (used by the exploratory
    /// interaction models).
    pub fn new(outcome: &str, terms: Vec<Term>) -> Self {
        ModelFormula {
            outcome: outcome.to_string(),
            terms,
        }
    }
}

impl fmt::Display for ModelFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rhs: Vec<String> = self.terms.iter().map(Term::label).collect();
        write!(f, "{} ~ {}", self.outcome, rhs.join(" + "))
    }
}
