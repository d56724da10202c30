pub mod assessment;
pub mod batch;
pub mod config;
pub mod export;
pub mod intake;
pub mod report;

pub use assessment::{
    evaluate, ClinicalObservation, Finding, RiskAssessment, RiskEvaluator, RiskTier, RuleId,
};
pub use batch::{
    evaluate_batch, evaluate_csv, evaluate_rows, BatchError, BatchInput, BatchOutcome, BatchSummary,
};
pub use config::{IntakeConfig, INTAKE_CONFIG};
pub use export::{export_to_file, write_csv, ExportError, ExportRecord, EXPORT_COLUMNS};
pub use intake::{
    evaluate_form, Evaluation, Field, IntakeError, IntakeForm, MalformedField, MalformedReason,
};
pub use report::{render_json, render_text};

#[cfg(feature = "cli")]
mod cli;

#[cfg(feature = "cli")]
pub use cli::run;
