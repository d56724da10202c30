use log::{debug, trace};

use super::rules::{Rule, STANDARD_RULES};
use super::tier::RiskTier;
use super::types::{ClinicalObservation, Finding, RiskAssessment};

/// Stateless scorer over a fixed rule table. Safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct RiskEvaluator {
    rules: &'static [Rule],
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskEvaluator {
    pub const fn new() -> Self {
        Self::with_rules(STANDARD_RULES)
    }

    pub const fn with_rules(rules: &'static [Rule]) -> Self {
        RiskEvaluator { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    pub fn evaluate(&self, observation: &ClinicalObservation) -> RiskAssessment {
        let mut score: u8 = 0;
        let mut findings = Vec::new();

        for rule in self.rules {
            if (rule.fires)(observation) {
                trace!("rule {:?} fired (+{})", rule.id, rule.weight);
                score = score.saturating_add(rule.weight);
                findings.push(Finding {
                    rule_id: rule.id,
                    weight: rule.weight,
                    message: rule.message,
                });
            }
        }

        let tier = RiskTier::from_score(score);
        debug!(
            "evaluated observation: score={} tier={} findings={}",
            score,
            tier,
            findings.len()
        );

        RiskAssessment {
            tier,
            score,
            findings,
        }
    }
}

/// Evaluate against the standard rule table.
pub fn evaluate(observation: &ClinicalObservation) -> RiskAssessment {
    RiskEvaluator::new().evaluate(observation)
}
