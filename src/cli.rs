use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use log::debug;
use thiserror::Error;

use crate::batch::{evaluate_csv, BatchError};
use crate::config::{IntakeConfig, INTAKE_CONFIG};
use crate::export::{export_to_file, ExportError, ExportRecord};
use crate::intake::{evaluate_form, Field, IntakeError, IntakeForm};
use crate::report::{render_json, render_text};

const EXIT_FAILURE: u8 = 1;
const EXIT_MALFORMED: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "pph-risk",
    version,
    about = "Postpartum hemorrhage risk screening",
    long_about = "Scores postpartum hemorrhage risk from optional vital signs.\n\n\
        Leave a value out when it was not measured. Any value that is given\n\
        must be a number.\n\n\
        EXAMPLES:\n\
        \n  pph-risk assess --blood-loss 1200 --systolic 85\n\
        \n  pph-risk assess --heart-rate 110 --spo2 90 --json\n\
        \n  pph-risk batch intake.csv -o assessed.csv"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assess a single patient
    Assess(AssessArgs),
    /// Assess every row of an intake CSV
    Batch(BatchArgs),
    /// List the intake fields with their normal ranges
    Fields,
}

#[derive(Debug, Args)]
struct AssessArgs {
    /// Patient name (report labelling only)
    #[arg(long, default_value = "")]
    name: String,
    /// Registration number (report labelling only)
    #[arg(long = "reg-no", default_value = "")]
    reg_no: String,
    /// Estimated blood loss in mL
    #[arg(long, value_name = "ML", allow_hyphen_values = true)]
    blood_loss: Option<String>,
    /// Systolic blood pressure in mmHg
    #[arg(long, value_name = "MMHG", allow_hyphen_values = true)]
    systolic: Option<String>,
    /// Diastolic blood pressure in mmHg
    #[arg(long, value_name = "MMHG", allow_hyphen_values = true)]
    diastolic: Option<String>,
    /// Heart rate in bpm
    #[arg(long, value_name = "BPM", allow_hyphen_values = true)]
    heart_rate: Option<String>,
    /// Oxygen saturation in percent
    #[arg(long, value_name = "PCT", allow_hyphen_values = true)]
    spo2: Option<String>,
    /// Hemoglobin in g/dL
    #[arg(long, value_name = "G_DL", allow_hyphen_values = true)]
    hemoglobin: Option<String>,
    /// Mother's age in years
    #[arg(long, value_name = "YEARS", allow_hyphen_values = true)]
    age: Option<String>,
    /// Days since delivery
    #[arg(long, value_name = "DAYS", allow_hyphen_values = true)]
    pod: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Write a CSV record (defaults to the configured export path)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    export: Option<Option<PathBuf>>,
}

impl AssessArgs {
    fn to_form(&self) -> IntakeForm {
        let mut form = IntakeForm {
            name: self.name.clone(),
            reg_no: self.reg_no.clone(),
            ..IntakeForm::default()
        };
        let values = [
            (Field::BloodLoss, &self.blood_loss),
            (Field::SystolicBp, &self.systolic),
            (Field::DiastolicBp, &self.diastolic),
            (Field::HeartRate, &self.heart_rate),
            (Field::Spo2, &self.spo2),
            (Field::Hemoglobin, &self.hemoglobin),
            (Field::Age, &self.age),
            (Field::PostpartumDay, &self.pod),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set(field, value.as_str());
            }
        }
        form
    }
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Intake CSV with a header row (export column names or snake_case keys)
    input: PathBuf,
    /// Write assessed rows to this CSV
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Malformed(#[from] IntakeError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config: &IntakeConfig = &INTAKE_CONFIG;
    debug!("Using configuration: {:?}", config);

    let result = match &cli.command {
        Command::Assess(args) => assess(args, config),
        Command::Batch(args) => batch(args, config),
        Command::Fields => {
            print_fields();
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(CliError::Malformed(err)) => {
            if err.fields().is_empty() {
                eprintln!("error: {}", err);
            }
            for field in err.fields() {
                eprintln!("error: {}", field);
            }
            ExitCode::from(EXIT_MALFORMED)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn assess(args: &AssessArgs, config: &IntakeConfig) -> Result<ExitCode, CliError> {
    let evaluation = evaluate_form(&args.to_form())?;

    if args.json {
        println!("{}", render_json(&evaluation)?);
    } else {
        println!("{}", render_text(&evaluation.assessment));
    }

    if let Some(target) = &args.export {
        let path = target.clone().unwrap_or_else(|| config.export_path());
        let record = ExportRecord::from_evaluation(
            &evaluation,
            Local::now().naive_local(),
            &config.date_format,
        )?;
        export_to_file(&path, &[record])?;
        eprintln!("Saved record to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn batch(args: &BatchArgs, config: &IntakeConfig) -> Result<ExitCode, CliError> {
    let outcome = evaluate_csv(&args.input, config)?;

    for (row, err) in outcome.rejections() {
        if err.fields().is_empty() {
            eprintln!("row {}: {}", row, err);
        }
        for field in err.fields() {
            eprintln!("row {}: {}", row, field);
        }
    }

    let summary = outcome.summary();
    println!(
        "{} row(s): {} high, {} moderate, {} low, {} rejected",
        summary.total, summary.high, summary.moderate, summary.low, summary.rejected
    );

    if let Some(output) = &args.output {
        let records = outcome.export_records(Local::now().naive_local(), &config.date_format)?;
        export_to_file(output, &records)?;
    }

    if summary.rejected > 0 {
        Ok(ExitCode::from(EXIT_MALFORMED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_fields() {
    for field in Field::ALL {
        println!("{:<13} {}: {}", field.column(), field, field.hint());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn assess_flags_map_onto_form_fields() {
        let cli = Cli::parse_from([
            "pph-risk",
            "assess",
            "--blood-loss",
            "1200",
            "--pod",
            "2",
            "--heart-rate",
            "-5",
            "--export",
        ]);
        let Command::Assess(args) = cli.command else {
            panic!("expected assess subcommand");
        };
        let form = args.to_form();
        assert_eq!(form.raw(Field::BloodLoss), "1200");
        assert_eq!(form.raw(Field::PostpartumDay), "2");
        assert_eq!(form.raw(Field::HeartRate), "-5");
        assert_eq!(form.raw(Field::Age), "");
        assert_eq!(args.export, Some(None));
    }
}
