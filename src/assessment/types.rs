use serde::{Deserialize, Serialize};

use super::tier::RiskTier;

/// Vital signs captured at intake. `None` means the value was not measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalObservation {
    pub blood_loss_ml: Option<f64>,
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    pub heart_rate: Option<f64>,
    pub spo2_pct: Option<f64>,
    pub hemoglobin_gdl: Option<f64>,
    pub age_years: Option<f64>,
    pub postpartum_day: Option<u32>,
}

impl ClinicalObservation {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.blood_loss_ml.is_none()
            && self.systolic_bp.is_none()
            && self.diastolic_bp.is_none()
            && self.heart_rate.is_none()
            && self.spo2_pct.is_none()
            && self.hemoglobin_gdl.is_none()
            && self.age_years.is_none()
            && self.postpartum_day.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    ExcessiveBloodLoss,
    LowSystolicBp,
    LowDiastolicBp,
    HighHeartRate,
    LowSpo2,
    LowHemoglobin,
    AgeOutsideSafeRange,
    EarlyPostpartumDay,
}

/// One triggered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_id: RuleId,
    pub weight: u8,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub score: u8,
    /// Triggered rules in rule-table order.
    pub findings: Vec<Finding>,
}

impl RiskAssessment {
    pub fn messages(&self) -> Vec<&'static str> {
        self.findings.iter().map(|finding| finding.message).collect()
    }

    pub fn has_finding(&self, rule_id: RuleId) -> bool {
        self.findings.iter().any(|finding| finding.rule_id == rule_id)
    }
}
