//! Command-line argument definitions using clap

use crate::pipeline::{CovariateSet, MissingStrategy, OutcomeKind, PositionEncoding, SkinMeasure};
use clap::Parser;
use std::path::PathBuf;

/// Crowdstorm - replicate the red-card analysis with configurable
/// preprocessing and model choices
#[derive(Parser, Debug)]
#[command(name = "crowdstorm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file path
    #[arg(short, long, default_value = "data.csv")]
    pub input: PathBuf,

    /// Outcome family: linear (OLS on counts), logit (binary flag),
    /// or poisson (counts)
    #[arg(long, value_enum, default_value_t = OutcomeKind::Logit)]
    pub outcome: OutcomeKind,

    /// Skin-tone predictor: the continuous mean score or the 0.5-
    /// thresholded binary flag
    #[arg(long, value_enum, default_value_t = SkinMeasure::Continuous)]
    pub skin: SkinMeasure,

    /// Covariate bundle appended to the model formula
    #[arg(long, value_enum, default_value_t = CovariateSet::Performance)]
    pub cov: CovariateSet,

    /// Missing-data strategy applied after encoding
    #[arg(long, value_enum, default_value_t = MissingStrategy::Dropna)]
    pub missing: MissingStrategy,

    /// Encoding of the nominal position column
    #[arg(long, value_enum, default_value_t = PositionEncoding::Onehot)]
    pub position: PositionEncoding,

    /// Standardize all numeric columns before fitting
    #[arg(long, default_value = "false")]
    pub scale: bool,

    /// Model label echoed in the configuration card (display only)
    #[arg(long, default_value = "glm")]
    pub model: String,
}
