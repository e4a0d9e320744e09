use std::fmt::{self, Display};

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLabel {
    Safe,
    #[serde(rename = "Adjust Dosage")]
    AdjustDosage,
    Toxic,
    Ineffective,
    Unknown,
}

impl RiskLabel {
    pub const fn label(&self) -> &'static str {
        match self {
            RiskLabel::Safe => "Safe",
            RiskLabel::AdjustDosage => "Adjust Dosage",
            RiskLabel::Toxic => "Toxic",
            RiskLabel::Ineffective => "Ineffective",
            RiskLabel::Unknown => "Unknown",
        }
    }
}

impl Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

///
/// Severity of a risk, ordered from `None` to `Critical`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_label: RiskLabel,
    /// Always within `[0, 1]`.
    pub confidence_score: f64,
    pub severity: Severity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClinicalRecommendation {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosing_adjustment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_drugs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_severity_ordering() {
        assert!(Severity::None < Severity::Low);
        assert!(Severity::Low < Severity::Moderate);
        assert!(Severity::Moderate < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[rstest]
    fn test_assessment_serialization() {
        let assessment = RiskAssessment {
            risk_label: RiskLabel::AdjustDosage,
            confidence_score: 0.8,
            severity: Severity::Moderate,
        };
        let json = serde_json::to_value(assessment).unwrap();
        assert_eq!(json["risk_label"], "Adjust Dosage");
        assert_eq!(json["severity"], "moderate");
        assert_eq!(json["confidence_score"], 0.8);
    }
}
