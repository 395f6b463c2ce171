//! Risk classification of per-airport risk scores
//!
//! The three-way split (`> 0`, `== 0`, `< 0`) is the single source of the
//! risk boundaries. Route verdicts and both report projections derive from
//! [`RiskLevel`], never from the raw score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete risk level, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// Severity color token shared by every projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Success,
    Warning,
    Danger,
}

impl RiskLevel {
    /// Classify a risk score. Scores outside -1..=1 are classified by sign.
    #[must_use]
    pub fn classify(risk_score: i64) -> Self {
        match risk_score {
            s if s > 0 => RiskLevel::High,
            0 => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        }
    }

    /// Label shown in tables and badges
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }

    #[must_use]
    pub fn color(self) -> SeverityColor {
        match self {
            RiskLevel::Low => SeverityColor::Success,
            RiskLevel::Moderate => SeverityColor::Warning,
            RiskLevel::High => SeverityColor::Danger,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl SeverityColor {
    /// CSS custom property for the interactive page
    #[must_use]
    pub fn css_var(self) -> &'static str {
        match self {
            SeverityColor::Success => "var(--success)",
            SeverityColor::Warning => "var(--warning)",
            SeverityColor::Danger => "var(--danger)",
        }
    }

    /// Badge class for the interactive page
    #[must_use]
    pub fn badge_class(self) -> &'static str {
        match self {
            SeverityColor::Success => "badge-success",
            SeverityColor::Warning => "badge-warning",
            SeverityColor::Danger => "badge-danger",
        }
    }

    /// 8-bit RGB for the printable document
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            SeverityColor::Success => (46, 204, 113),
            SeverityColor::Warning => (243, 156, 18),
            SeverityColor::Danger => (231, 76, 60),
        }
    }

    /// Hex form of [`Self::rgb`], used as the CSS variable value
    #[must_use]
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Classify a risk score
#[must_use]
pub fn classify(risk_score: i64) -> RiskLevel {
    RiskLevel::classify(risk_score)
}

/// Color token of a risk level
#[must_use]
pub fn color_of(level: RiskLevel) -> SeverityColor {
    level.color()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-1, RiskLevel::Low)]
    #[case(0, RiskLevel::Moderate)]
    #[case(1, RiskLevel::High)]
    #[case(2, RiskLevel::High)]
    #[case(-7, RiskLevel::Low)]
    #[case(i64::MAX, RiskLevel::High)]
    #[case(i64::MIN, RiskLevel::Low)]
    fn test_classify(#[case] score: i64, #[case] expected: RiskLevel) {
        assert_eq!(classify(score), expected);
    }

    #[test]
    fn test_severity_order() {
        assert!(RiskLevel::High > RiskLevel::Moderate);
        assert!(RiskLevel::Moderate > RiskLevel::Low);
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(color_of(RiskLevel::High), SeverityColor::Danger);
        assert_eq!(color_of(RiskLevel::Moderate), SeverityColor::Warning);
        assert_eq!(color_of(RiskLevel::Low), SeverityColor::Success);

        assert_eq!(SeverityColor::Danger.css_var(), "var(--danger)");
        assert_eq!(SeverityColor::Danger.badge_class(), "badge-danger");
        assert_eq!(SeverityColor::Danger.rgb(), (231, 76, 60));
        assert_eq!(SeverityColor::Success.hex(), "#2ecc71");
    }

    #[test]
    fn test_labels() {
        assert_eq!(RiskLevel::High.to_string(), "High Risk");
        assert_eq!(RiskLevel::Moderate.label(), "Moderate Risk");
        assert_eq!(RiskLevel::Low.label(), "Low Risk");
    }
}
