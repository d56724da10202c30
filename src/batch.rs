use std::fs::File;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use log::{debug, info, warn};
#[cfg(feature = "parallel-batch")]
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::assessment::{RiskEvaluator, RiskTier};
use crate::config::IntakeConfig;
use crate::export::{ExportError, ExportRecord};
use crate::intake::{evaluate_form_with, Evaluation, IntakeError, IntakeForm};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to open batch input: {0}")]
    Io(#[from] io::Error),
    #[error("failed to read batch input: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to start evaluation pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A decoded input row, or the reason it could not be decoded.
pub type BatchInput = Result<IntakeForm, IntakeError>;

/// Outcome for one input row. `row` counts data rows from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub row: usize,
    pub outcome: Result<Evaluation, IntakeError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub rejected: usize,
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub rows: Vec<BatchRow>,
}

impl BatchOutcome {
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.rows.len(),
            ..BatchSummary::default()
        };
        for row in &self.rows {
            match &row.outcome {
                Ok(evaluation) => match evaluation.assessment.tier {
                    RiskTier::Low => summary.low += 1,
                    RiskTier::Moderate => summary.moderate += 1,
                    RiskTier::High => summary.high += 1,
                },
                Err(_) => summary.rejected += 1,
            }
        }
        summary
    }

    pub fn evaluations(&self) -> impl Iterator<Item = &Evaluation> {
        self.rows.iter().filter_map(|row| row.outcome.as_ref().ok())
    }

    pub fn rejections(&self) -> impl Iterator<Item = (usize, &IntakeError)> {
        self.rows
            .iter()
            .filter_map(|row| row.outcome.as_ref().err().map(|err| (row.row, err)))
    }

    /// Export rows for every accepted evaluation, stamped with `at`.
    pub fn export_records(
        &self,
        at: NaiveDateTime,
        date_format: &str,
    ) -> Result<Vec<ExportRecord>, ExportError> {
        self.evaluations()
            .map(|evaluation| ExportRecord::from_evaluation(evaluation, at, date_format))
            .collect()
    }
}

// Elapsed time at each named stage of a batch run.
struct StageTimer {
    started: Instant,
    stages: Vec<(&'static str, Duration)>,
}

impl StageTimer {
    fn start() -> Self {
        StageTimer {
            started: Instant::now(),
            stages: Vec::new(),
        }
    }

    fn mark(&mut self, stage: &'static str) {
        self.stages.push((stage, self.started.elapsed()));
    }

    fn total(&self) -> Duration {
        self.started.elapsed()
    }

    fn describe(&self) -> String {
        self.stages
            .iter()
            .map(|(stage, at)| format!("{stage}@{at:?}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Decode every data row. A row that cannot be decoded becomes an
/// `UnreadableRow` entry; only an unreadable header fails the whole read.
pub fn read_forms<R: io::Read>(reader: R) -> Result<Vec<BatchInput>, BatchError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.byte_headers()?.clone();
    let mut forms = Vec::new();
    for record in reader.byte_records() {
        let form = record
            .and_then(|record| record.deserialize::<IntakeForm>(Some(&headers)))
            .map_err(|err| IntakeError::UnreadableRow(err.to_string()));
        forms.push(form);
    }
    Ok(forms)
}

/// Evaluate already-decoded forms; row order is preserved.
pub fn evaluate_batch(
    forms: &[IntakeForm],
    config: &IntakeConfig,
) -> Result<BatchOutcome, BatchError> {
    let inputs: Vec<BatchInput> = forms.iter().cloned().map(Ok).collect();
    evaluate_rows(&inputs, config)
}

/// Evaluate each row independently. Undecodable rows pass through as rejections.
pub fn evaluate_rows(
    inputs: &[BatchInput],
    config: &IntakeConfig,
) -> Result<BatchOutcome, BatchError> {
    let evaluator = RiskEvaluator::new();
    let mut timer = StageTimer::start();

    let evaluate = |(index, input): (usize, &BatchInput)| BatchRow {
        row: index + 1,
        outcome: match input {
            Ok(form) => evaluate_form_with(&evaluator, form),
            Err(err) => Err(err.clone()),
        },
    };

    #[cfg(feature = "parallel-batch")]
    let rows: Vec<BatchRow> = {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_parallel_evaluations.max(1))
            .build()?;
        timer.mark("pool");
        pool.install(|| inputs.par_iter().enumerate().map(evaluate).collect())
    };

    #[cfg(not(feature = "parallel-batch"))]
    let rows: Vec<BatchRow> = {
        let _ = config;
        inputs.iter().enumerate().map(evaluate).collect()
    };

    timer.mark("evaluated");
    let outcome = BatchOutcome { rows };

    for (row, err) in outcome.rejections() {
        warn!("Batch row {} rejected: {}", row, err);
    }

    let summary = outcome.summary();
    debug!("Batch stages: {}", timer.describe());
    info!(
        "Evaluated {} row(s) in {:?}: {} high, {} moderate, {} low, {} rejected",
        summary.total,
        timer.total(),
        summary.high,
        summary.moderate,
        summary.low,
        summary.rejected
    );
    Ok(outcome)
}

pub fn evaluate_csv(input: &Path, config: &IntakeConfig) -> Result<BatchOutcome, BatchError> {
    let file = File::open(input)?;
    let inputs = read_forms(file)?;
    evaluate_rows(&inputs, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_timer_keeps_marks_in_order() {
        let mut timer = StageTimer::start();
        timer.mark("pool");
        timer.mark("evaluated");
        let names: Vec<&str> = timer.stages.iter().map(|(stage, _)| *stage).collect();
        assert_eq!(names, vec!["pool", "evaluated"]);
        assert!(timer.stages[0].1 <= timer.stages[1].1);
        assert!(timer.total() >= timer.stages[1].1);
        assert!(timer.describe().starts_with("pool@"));
    }

    #[test]
    fn undecodable_row_does_not_hide_its_neighbours() {
        let input: &[u8] = b"Name,Blood Loss\nA,1200\nB,\xff\xfe\nC,1500\n";
        let inputs = read_forms(input).unwrap();
        assert_eq!(inputs.len(), 3);
        assert!(matches!(inputs[1], Err(IntakeError::UnreadableRow(_))));

        let outcome = evaluate_rows(&inputs, &IntakeConfig::default()).unwrap();
        let accepted: Vec<&str> = outcome.evaluations().map(|e| e.form.name.as_str()).collect();
        assert_eq!(accepted, vec!["A", "C"]);
        let rejected: Vec<usize> = outcome.rejections().map(|(row, _)| row).collect();
        assert_eq!(rejected, vec![2]);
        assert_eq!(outcome.summary().rejected, 1);
    }
}
