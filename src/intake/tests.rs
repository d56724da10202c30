#![cfg(test)]

use super::*;
use crate::assessment::RiskTier;

#[test]
fn blank_form_parses_to_empty_observation() {
    let form = IntakeForm::default().with(Field::BloodLoss, "   ");
    let observation = form.parse().unwrap();
    assert!(observation.is_empty());
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let form = IntakeForm::default()
        .with(Field::BloodLoss, " 1200 \t")
        .with(Field::PostpartumDay, "\n2 ");
    let observation = form.parse().unwrap();
    assert_eq!(observation.blood_loss_ml, Some(1200.0));
    assert_eq!(observation.postpartum_day, Some(2));
    assert_eq!(observation.systolic_bp, None);
}

#[test]
fn non_numeric_value_is_malformed_not_absent() {
    let form = IntakeForm::default().with(Field::BloodLoss, "abc");
    let err = form.parse().unwrap_err();
    let malformed = err.for_field(Field::BloodLoss).unwrap();
    assert_eq!(malformed.raw, "abc");
    assert_eq!(malformed.reason, MalformedReason::NotANumber);
    assert_eq!(err.fields().len(), 1);
}

#[test]
fn evaluate_form_returns_no_assessment_on_malformed_input() {
    let form = IntakeForm::default()
        .with(Field::BloodLoss, "abc")
        .with(Field::SystolicBp, "85");
    assert!(evaluate_form(&form).is_err());
}

#[test]
fn every_malformed_field_is_reported() {
    let form = IntakeForm::default()
        .with(Field::Age, "forty")
        .with(Field::PostpartumDay, "two")
        .with(Field::HeartRate, "110");
    let err = form.parse().unwrap_err();
    let fields: Vec<Field> = err.fields().iter().map(|m| m.field).collect();
    assert_eq!(fields, vec![Field::Age, Field::PostpartumDay]);
}

#[test]
fn postpartum_day_must_be_whole() {
    let err = IntakeForm::default()
        .with(Field::PostpartumDay, "2.5")
        .parse()
        .unwrap_err();
    assert_eq!(
        err.for_field(Field::PostpartumDay).unwrap().reason,
        MalformedReason::NotAWholeNumber
    );
}

#[test]
fn negative_and_non_finite_values_are_rejected() {
    let err = IntakeForm::default()
        .with(Field::HeartRate, "-5")
        .with(Field::Spo2, "NaN")
        .with(Field::Hemoglobin, "inf")
        .with(Field::PostpartumDay, "-1")
        .parse()
        .unwrap_err();
    assert_eq!(
        err.for_field(Field::HeartRate).unwrap().reason,
        MalformedReason::Negative
    );
    assert_eq!(
        err.for_field(Field::Spo2).unwrap().reason,
        MalformedReason::NotFinite
    );
    assert_eq!(
        err.for_field(Field::Hemoglobin).unwrap().reason,
        MalformedReason::NotFinite
    );
    assert_eq!(
        err.for_field(Field::PostpartumDay).unwrap().reason,
        MalformedReason::Negative
    );
}

#[test]
fn huge_postpartum_day_is_out_of_range() {
    let err = IntakeForm::default()
        .with(Field::PostpartumDay, "99999999999")
        .parse()
        .unwrap_err();
    assert_eq!(
        err.for_field(Field::PostpartumDay).unwrap().reason,
        MalformedReason::OutOfRange
    );
}

#[test]
fn error_message_names_field_and_value() {
    let err = IntakeForm::default()
        .with(Field::BloodLoss, "abc")
        .parse()
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Estimated Blood Loss (mL)"), "{message}");
    assert!(message.contains("\"abc\""), "{message}");
}

#[test]
fn evaluation_keeps_trimmed_form() {
    let mut form = IntakeForm {
        name: "  Amina ".into(),
        reg_no: " R-17 ".into(),
        ..IntakeForm::default()
    };
    form.set(Field::BloodLoss, " 1200 ").set(Field::SystolicBp, "85");

    let evaluation = evaluate_form(&form).unwrap();
    assert_eq!(evaluation.form.name, "Amina");
    assert_eq!(evaluation.form.reg_no, "R-17");
    assert_eq!(evaluation.form.blood_loss_ml, "1200");
    assert_eq!(evaluation.assessment.score, 3);
    assert_eq!(evaluation.assessment.tier, RiskTier::Moderate);
}

#[test]
fn form_deserializes_from_json_with_missing_keys() {
    let form: IntakeForm =
        serde_json::from_str(r#"{"name": "Test", "heart_rate": "110"}"#).unwrap();
    assert_eq!(form.heart_rate, "110");
    assert_eq!(form.blood_loss_ml, "");
}

#[test]
fn field_catalogue_is_in_form_order() {
    let columns: Vec<&str> = Field::ALL.iter().map(|f| f.column()).collect();
    assert_eq!(
        columns,
        vec![
            "Blood Loss",
            "Systolic BP",
            "Diastolic BP",
            "Heart Rate",
            "SpO2",
            "Hemoglobin",
            "Age",
            "POD"
        ]
    );
    assert_eq!(Field::PostpartumDay.kind(), FieldKind::WholeNumber);
    assert_eq!(Field::Age.kind(), FieldKind::Decimal);
}

#[test]
fn postpartum_day_reasons_match_how_it_was_written() {
    let day = |raw: &str| IntakeForm::default().with(Field::PostpartumDay, raw).parse();
    let reason = |raw: &str| {
        day(raw)
            .unwrap_err()
            .for_field(Field::PostpartumDay)
            .map(|m| m.reason)
    };

    assert_eq!(day("-0").unwrap().postpartum_day, Some(0));
    assert_eq!(day("+3").unwrap().postpartum_day, Some(3));
    assert_eq!(reason("1e1"), Some(MalformedReason::NotAnInteger));
    assert_eq!(reason("2.0"), Some(MalformedReason::NotAnInteger));
    assert_eq!(reason("2.5"), Some(MalformedReason::NotAWholeNumber));
    assert_eq!(reason("-99999999999999999999"), Some(MalformedReason::Negative));
    assert_eq!(reason("99999999999999999999"), Some(MalformedReason::OutOfRange));
    assert_eq!(reason("two"), Some(MalformedReason::NotANumber));
}

#[test]
fn unreadable_row_has_no_field_errors() {
    let err = IntakeError::UnreadableRow("invalid utf-8".into());
    assert!(err.fields().is_empty());
    assert!(err.to_string().contains("invalid utf-8"));
}
