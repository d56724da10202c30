use serde::Serialize;

use crate::assessment::{Finding, RiskAssessment, RiskTier};
use crate::intake::Evaluation;

const URGENT_MARKER: &str = "🔴";
const WARNING_MARKER: &str = "⚠️";

fn finding_marker(finding: &Finding) -> &'static str {
    if finding.weight >= 2 {
        URGENT_MARKER
    } else {
        WARNING_MARKER
    }
}

/// Headline plus one line per finding, in rule order.
pub fn render_text(assessment: &RiskAssessment) -> String {
    let mut out = format!("{} {}", assessment.tier.marker(), assessment.tier.advice());
    for finding in &assessment.findings {
        out.push('\n');
        out.push_str(finding_marker(finding));
        out.push(' ');
        out.push_str(finding.message);
        out.push('.');
    }
    out
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    name: &'a str,
    reg_no: &'a str,
    tier: RiskTier,
    score: u8,
    advice: &'static str,
    findings: &'a [Finding],
}

pub fn render_json(evaluation: &Evaluation) -> Result<String, serde_json::Error> {
    let assessment = &evaluation.assessment;
    serde_json::to_string_pretty(&JsonReport {
        name: &evaluation.form.name,
        reg_no: &evaluation.form.reg_no,
        tier: assessment.tier,
        score: assessment.score,
        advice: assessment.tier.advice(),
        findings: &assessment.findings,
    })
}
