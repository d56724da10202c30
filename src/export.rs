use std::fmt::Write as _;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use chrono::NaiveDateTime;
use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::intake::{Evaluation, Field};

/// Header row of every export, in order.
pub const EXPORT_COLUMNS: [&str; 12] = [
    "Name",
    "Reg No",
    "Date",
    "Blood Loss",
    "Systolic BP",
    "Diastolic BP",
    "Heart Rate",
    "SpO2",
    "Hemoglobin",
    "Age",
    "POD",
    "Risk Level",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid date format {0:?}")]
    DateFormat(String),
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode export: {0}")]
    Csv(#[from] csv::Error),
}

/// One exported evaluation. Field order matches [`EXPORT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Reg No")]
    pub reg_no: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Blood Loss")]
    pub blood_loss: String,
    #[serde(rename = "Systolic BP")]
    pub systolic_bp: String,
    #[serde(rename = "Diastolic BP")]
    pub diastolic_bp: String,
    #[serde(rename = "Heart Rate")]
    pub heart_rate: String,
    #[serde(rename = "SpO2")]
    pub spo2: String,
    #[serde(rename = "Hemoglobin")]
    pub hemoglobin: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "POD")]
    pub pod: String,
    #[serde(rename = "Risk Level")]
    pub risk_level: String,
}

impl ExportRecord {
    /// `at` is the caller's timestamp for the evaluation; scoring never reads the clock.
    pub fn from_evaluation(
        evaluation: &Evaluation,
        at: NaiveDateTime,
        date_format: &str,
    ) -> Result<Self, ExportError> {
        let mut date = String::new();
        write!(date, "{}", at.format(date_format))
            .map_err(|_| ExportError::DateFormat(date_format.to_string()))?;

        let form = &evaluation.form;
        let raw = |field: Field| form.raw(field).trim().to_string();
        Ok(ExportRecord {
            name: form.name.trim().to_string(),
            reg_no: form.reg_no.trim().to_string(),
            date,
            blood_loss: raw(Field::BloodLoss),
            systolic_bp: raw(Field::SystolicBp),
            diastolic_bp: raw(Field::DiastolicBp),
            heart_rate: raw(Field::HeartRate),
            spo2: raw(Field::Spo2),
            hemoglobin: raw(Field::Hemoglobin),
            age: raw(Field::Age),
            pod: raw(Field::PostpartumDay),
            risk_level: evaluation.assessment.tier.label().to_string(),
        })
    }
}

pub fn write_csv<W: io::Write>(writer: W, records: &[ExportRecord]) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(EXPORT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `records` to `path`, replacing any existing file.
pub fn export_to_file(path: &Path, records: &[ExportRecord]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_csv(file, records)?;
    info!("Exported {} record(s) to {}", records.len(), path.display());
    Ok(())
}

pub fn to_csv_string(records: &[ExportRecord]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    String::from_utf8(buffer).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
}
