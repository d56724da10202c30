use super::types::{ClinicalObservation, RuleId};

/// A scoring rule. Fires only when its field is present and past the threshold.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    pub weight: u8,
    pub message: &'static str,
    pub fires: fn(&ClinicalObservation) -> bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("weight", &self.weight)
            .field("message", &self.message)
            .finish()
    }
}

/// Findings are emitted in this order.
pub const STANDARD_RULES: &[Rule] = &[
    Rule {
        id: RuleId::ExcessiveBloodLoss,
        weight: 2,
        message: "Excessive blood loss",
        fires: excessive_blood_loss,
    },
    Rule {
        id: RuleId::LowSystolicBp,
        weight: 1,
        message: "Low systolic BP",
        fires: low_systolic_bp,
    },
    Rule {
        id: RuleId::LowDiastolicBp,
        weight: 1,
        message: "Low diastolic BP",
        fires: low_diastolic_bp,
    },
    Rule {
        id: RuleId::HighHeartRate,
        weight: 1,
        message: "High heart rate",
        fires: high_heart_rate,
    },
    Rule {
        id: RuleId::LowSpo2,
        weight: 1,
        message: "Low SpO₂",
        fires: low_spo2,
    },
    Rule {
        id: RuleId::LowHemoglobin,
        weight: 1,
        message: "Low hemoglobin",
        fires: low_hemoglobin,
    },
    Rule {
        id: RuleId::AgeOutsideSafeRange,
        weight: 1,
        message: "Risk due to age",
        fires: age_outside_safe_range,
    },
    Rule {
        id: RuleId::EarlyPostpartumDay,
        weight: 1,
        message: "Early postpartum days",
        fires: early_postpartum_day,
    },
];

const BLOOD_LOSS_LIMIT_ML: f64 = 1000.0;
const SYSTOLIC_FLOOR: f64 = 90.0;
const DIASTOLIC_FLOOR: f64 = 60.0;
const HEART_RATE_CEILING: f64 = 100.0;
const SPO2_FLOOR: f64 = 92.0;
const HEMOGLOBIN_FLOOR: f64 = 10.0;
const SAFE_AGE_MIN: f64 = 18.0;
const SAFE_AGE_MAX: f64 = 35.0;
const EARLY_POSTPARTUM_DAYS: u32 = 3;

fn excessive_blood_loss(obs: &ClinicalObservation) -> bool {
    obs.blood_loss_ml.is_some_and(|ml| ml > BLOOD_LOSS_LIMIT_ML)
}

fn low_systolic_bp(obs: &ClinicalObservation) -> bool {
    obs.systolic_bp.is_some_and(|bp| bp < SYSTOLIC_FLOOR)
}

fn low_diastolic_bp(obs: &ClinicalObservation) -> bool {
    obs.diastolic_bp.is_some_and(|bp| bp < DIASTOLIC_FLOOR)
}

fn high_heart_rate(obs: &ClinicalObservation) -> bool {
    obs.heart_rate.is_some_and(|bpm| bpm > HEART_RATE_CEILING)
}

fn low_spo2(obs: &ClinicalObservation) -> bool {
    obs.spo2_pct.is_some_and(|pct| pct < SPO2_FLOOR)
}

fn low_hemoglobin(obs: &ClinicalObservation) -> bool {
    obs.hemoglobin_gdl.is_some_and(|gdl| gdl < HEMOGLOBIN_FLOOR)
}

fn age_outside_safe_range(obs: &ClinicalObservation) -> bool {
    obs.age_years
        .is_some_and(|age| age < SAFE_AGE_MIN || age > SAFE_AGE_MAX)
}

// Inclusive: day 3 still counts as early.
fn early_postpartum_day(obs: &ClinicalObservation) -> bool {
    obs.postpartum_day
        .is_some_and(|day| day <= EARLY_POSTPARTUM_DAYS)
}
