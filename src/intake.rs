mod error;
mod field;
mod form;

#[cfg(test)]
mod tests;

use log::debug;
use serde::Serialize;

use crate::assessment::{ClinicalObservation, RiskAssessment, RiskEvaluator};

pub use error::{IntakeError, MalformedField, MalformedReason};
pub use field::{Field, FieldKind};
pub use form::IntakeForm;

/// A parsed form together with its assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// The submitted form with every value trimmed.
    pub form: IntakeForm,
    pub observation: ClinicalObservation,
    pub assessment: RiskAssessment,
}

pub fn evaluate_form(form: &IntakeForm) -> Result<Evaluation, IntakeError> {
    evaluate_form_with(&RiskEvaluator::new(), form)
}

pub fn evaluate_form_with(
    evaluator: &RiskEvaluator,
    form: &IntakeForm,
) -> Result<Evaluation, IntakeError> {
    let observation = form.parse().map_err(|err| {
        debug!("Rejected intake form: {}", err);
        err
    })?;
    let assessment = evaluator.evaluate(&observation);
    Ok(Evaluation {
        form: form.trimmed(),
        observation,
        assessment,
    })
}
