use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 4 {
            RiskTier::High
        } else if score == 3 {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    /// Short label used in exports.
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::High => "HIGH",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            RiskTier::High => "HIGH RISK: Please visit hospital urgently.",
            RiskTier::Moderate => "MODERATE RISK: Monitor closely and consult a doctor.",
            RiskTier::Low => "LOW RISK: No immediate danger, keep observing.",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            RiskTier::High => "🔴",
            RiskTier::Moderate => "🟠",
            RiskTier::Low => "🟢",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
