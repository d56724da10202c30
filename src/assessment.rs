mod evaluator;
mod rules;
mod tier;
pub mod types;


pub use evaluator::{evaluate, RiskEvaluator};
pub use rules::{Rule, STANDARD_RULES};
pub use tier::RiskTier;
pub use types::{ClinicalObservation, Finding, RiskAssessment, RuleId};
