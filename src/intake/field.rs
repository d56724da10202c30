use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Decimal,
    WholeNumber,
}

/// The eight scored inputs of the intake form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BloodLoss,
    SystolicBp,
    DiastolicBp,
    HeartRate,
    Spo2,
    Hemoglobin,
    Age,
    PostpartumDay,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::BloodLoss,
        Field::SystolicBp,
        Field::DiastolicBp,
        Field::HeartRate,
        Field::Spo2,
        Field::Hemoglobin,
        Field::Age,
        Field::PostpartumDay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::BloodLoss => "Estimated Blood Loss",
            Field::SystolicBp => "Systolic Blood Pressure",
            Field::DiastolicBp => "Diastolic Blood Pressure",
            Field::HeartRate => "Heart Rate",
            Field::Spo2 => "SpO₂ - Oxygen Saturation",
            Field::Hemoglobin => "Hemoglobin Level",
            Field::Age => "Mother's Age",
            Field::PostpartumDay => "POD - Post Delivery Day",
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            Field::BloodLoss => Some("mL"),
            Field::SystolicBp | Field::DiastolicBp => Some("mmHg"),
            Field::HeartRate => Some("bpm"),
            Field::Spo2 => Some("%"),
            Field::Hemoglobin => Some("g/dL"),
            Field::Age => Some("years"),
            Field::PostpartumDay => None,
        }
    }

    /// Reference range shown next to the input.
    pub fn hint(self) -> &'static str {
        match self {
            Field::BloodLoss => "Normal: <500 mL (normal delivery), <1000 mL (C-section)",
            Field::SystolicBp => "Normal: 90–120 mmHg",
            Field::DiastolicBp => "Normal: 60–80 mmHg",
            Field::HeartRate => "Normal: 60–100 bpm",
            Field::Spo2 => "Normal: 95–100%. Below 92% is low.",
            Field::Hemoglobin => "Normal: 11–13 g/dL during pregnancy",
            Field::Age => "Safe age: 18–35 years",
            Field::PostpartumDay => "Higher bleeding risk within 3 days after delivery",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::PostpartumDay => FieldKind::WholeNumber,
            _ => FieldKind::Decimal,
        }
    }

    /// Column header used in CSV exports.
    pub fn column(self) -> &'static str {
        match self {
            Field::BloodLoss => "Blood Loss",
            Field::SystolicBp => "Systolic BP",
            Field::DiastolicBp => "Diastolic BP",
            Field::HeartRate => "Heart Rate",
            Field::Spo2 => "SpO2",
            Field::Hemoglobin => "Hemoglobin",
            Field::Age => "Age",
            Field::PostpartumDay => "POD",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit() {
            Some(unit) => write!(f, "{} ({})", self.label(), unit),
            None => f.write_str(self.label()),
        }
    }
}
