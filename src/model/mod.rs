//! Model module - design-matrix construction and regression fitting

pub mod design;
pub mod error;
pub mod glm;
pub mod ols;
mod solve;
pub mod summary;

pub use design::*;
pub use error::*;
pub use glm::*;
pub use ols::*;
pub use summary::*;

use crate::pipeline::formula::OutcomeKind;

/// Dispatch to the fitting routine selected by the configured outcome
/// family: logit and Poisson use maximum likelihood through IRLS,
/// anything else is ordinary least squares.
pub fn fit_model(design: &Design, outcome: OutcomeKind) -> ModelResult<FitSummary> {
    match outcome {
        OutcomeKind::Logit => fit_logit(design),
        OutcomeKind::Poisson => fit_poisson(design),
        OutcomeKind::Linear => fit_ols(design),
    }
}
