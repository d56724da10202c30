use serde::{Deserialize, Serialize};

use super::error::{IntakeError, MalformedField, MalformedReason};
use super::field::Field;
use crate::assessment::ClinicalObservation;

/// Raw text as typed into the intake form. Empty (after trimming) means unknown.
///
/// Deserializes from JSON with snake_case keys, or from CSV rows using the
/// export column headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeForm {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Reg No")]
    pub reg_no: String,
    #[serde(alias = "Blood Loss")]
    pub blood_loss_ml: String,
    #[serde(alias = "Systolic BP")]
    pub systolic_bp: String,
    #[serde(alias = "Diastolic BP")]
    pub diastolic_bp: String,
    #[serde(alias = "Heart Rate")]
    pub heart_rate: String,
    #[serde(alias = "SpO2")]
    pub spo2_pct: String,
    #[serde(alias = "Hemoglobin")]
    pub hemoglobin_gdl: String,
    #[serde(alias = "Age")]
    pub age_years: String,
    #[serde(alias = "POD")]
    pub postpartum_day: String,
}

impl IntakeForm {
    pub fn raw(&self, field: Field) -> &str {
        match field {
            Field::BloodLoss => &self.blood_loss_ml,
            Field::SystolicBp => &self.systolic_bp,
            Field::DiastolicBp => &self.diastolic_bp,
            Field::HeartRate => &self.heart_rate,
            Field::Spo2 => &self.spo2_pct,
            Field::Hemoglobin => &self.hemoglobin_gdl,
            Field::Age => &self.age_years,
            Field::PostpartumDay => &self.postpartum_day,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> &mut Self {
        let slot = match field {
            Field::BloodLoss => &mut self.blood_loss_ml,
            Field::SystolicBp => &mut self.systolic_bp,
            Field::DiastolicBp => &mut self.diastolic_bp,
            Field::HeartRate => &mut self.heart_rate,
            Field::Spo2 => &mut self.spo2_pct,
            Field::Hemoglobin => &mut self.hemoglobin_gdl,
            Field::Age => &mut self.age_years,
            Field::PostpartumDay => &mut self.postpartum_day,
        };
        *slot = value.into();
        self
    }

    /// Builder-style variant of [`IntakeForm::set`].
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn trimmed(&self) -> IntakeForm {
        let mut form = IntakeForm {
            name: self.name.trim().to_string(),
            reg_no: self.reg_no.trim().to_string(),
            ..IntakeForm::default()
        };
        for field in Field::ALL {
            form.set(field, self.raw(field).trim());
        }
        form
    }

    /// Parse every field, collecting all malformed values before failing.
    pub fn parse(&self) -> Result<ClinicalObservation, IntakeError> {
        let mut errors = Vec::new();
        let mut decimal = |field: Field| match parse_decimal(field, self.raw(field)) {
            Ok(value) => value,
            Err(err) => {
                errors.push(err);
                None
            }
        };

        let mut observation = ClinicalObservation {
            blood_loss_ml: decimal(Field::BloodLoss),
            systolic_bp: decimal(Field::SystolicBp),
            diastolic_bp: decimal(Field::DiastolicBp),
            heart_rate: decimal(Field::HeartRate),
            spo2_pct: decimal(Field::Spo2),
            hemoglobin_gdl: decimal(Field::Hemoglobin),
            age_years: decimal(Field::Age),
            postpartum_day: None,
        };

        match parse_whole(Field::PostpartumDay, self.raw(Field::PostpartumDay)) {
            Ok(day) => observation.postpartum_day = day,
            Err(err) => errors.push(err),
        }

        if errors.is_empty() {
            Ok(observation)
        } else {
            Err(IntakeError::MalformedFields(errors))
        }
    }
}

fn malformed(field: Field, raw: &str, reason: MalformedReason) -> MalformedField {
    MalformedField {
        field,
        raw: raw.to_string(),
        reason,
    }
}

fn parse_decimal(field: Field, raw: &str) -> Result<Option<f64>, MalformedField> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| malformed(field, trimmed, MalformedReason::NotANumber))?;
    if !value.is_finite() {
        return Err(malformed(field, trimmed, MalformedReason::NotFinite));
    }
    if value < 0.0 {
        return Err(malformed(field, trimmed, MalformedReason::Negative));
    }
    Ok(Some(value))
}

fn parse_whole(field: Field, raw: &str) -> Result<Option<u32>, MalformedField> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        // "-0" reads as 0, matching the decimal fields.
        return match u32::try_from(value) {
            Ok(day) => Ok(Some(day)),
            Err(_) if value < 0 => Err(malformed(field, trimmed, MalformedReason::Negative)),
            Err(_) => Err(malformed(field, trimmed, MalformedReason::OutOfRange)),
        };
    }

    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let reason = if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        // Plain digits that overflow i64.
        if trimmed.starts_with('-') {
            MalformedReason::Negative
        } else {
            MalformedReason::OutOfRange
        }
    } else {
        match trimmed.parse::<f64>() {
            Err(_) => MalformedReason::NotANumber,
            Ok(value) if !value.is_finite() => MalformedReason::NotFinite,
            Ok(value) if value < 0.0 => MalformedReason::Negative,
            Ok(value) if value.fract() != 0.0 => MalformedReason::NotAWholeNumber,
            // Whole-valued but not written as digits, e.g. "2.0" or "1e1".
            Ok(_) => MalformedReason::NotAnInteger,
        }
    };
    Err(malformed(field, trimmed, reason))
}
