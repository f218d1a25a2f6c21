//! Keyword triage of free-text symptom descriptions.
//!
//! The classifier is a pure function: it looks for fixed keywords in a
//! lowercased copy of the input and returns at most one [`Alert`]. Tiers
//! are checked in [`Severity::TRIAGE_ORDER`] and the first tier with a
//! hit wins, so "severe headache" is an emergency even though "headache"
//! alone is only a warning.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// How urgent a message looks.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Needs immediate medical attention.
    Emergency,
    /// Worth monitoring, possibly a doctor's visit.
    Warning,
    /// General wellness guidance was asked for.
    Info,
    /// Likely manageable at home.
    Safe,
}

const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "severe",
    "unconscious",
    "difficulty breathing",
    "bleeding",
    "heart attack",
    "seizure",
];

const WARNING_KEYWORDS: &[&str] = &[
    "fever", "cough", "headache", "nausea", "fatigue", "pain", "vomit",
    "dizzy",
];

const INFO_KEYWORDS: &[&str] = &["wellness", "tips", "healthy", "diet"];

const SAFE_KEYWORDS: &[&str] =
    &["mild", "slight", "normal", "cold", "tired", "sleep"];

impl Severity {
    /// The order tiers are evaluated in.
    pub const TRIAGE_ORDER: [Severity; 4] = [
        Severity::Emergency,
        Severity::Warning,
        Severity::Info,
        Severity::Safe,
    ];

    /// Returns the lowercase keywords that select this tier.
    #[inline]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Severity::Emergency => EMERGENCY_KEYWORDS,
            Severity::Warning => WARNING_KEYWORDS,
            Severity::Info => INFO_KEYWORDS,
            Severity::Safe => SAFE_KEYWORDS,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Emergency => "emergency",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Safe => "safe",
        };
        f.write_str(name)
    }
}

/// A severity alert attached to an advisor reply.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alert {
    /// The tier that matched.
    pub severity: Severity,
    /// Short heading.
    pub title: String,
    /// What the user should do.
    pub description: String,
}

impl Alert {
    /// Returns the fixed alert for a tier.
    pub fn for_severity(severity: Severity) -> Self {
        let (title, description) = match severity {
            Severity::Emergency => (
                "🚨 Emergency",
                "Please seek immediate medical attention or call emergency \
                 services.",
            ),
            Severity::Warning => (
                "⚠️ Warning",
                "Your symptoms may require attention. Monitor them closely \
                 and consider consulting a doctor.",
            ),
            Severity::Info => (
                "ℹ️ Health Guidance",
                "Here is some general wellness guidance. It does not \
                 replace advice from a medical professional.",
            ),
            Severity::Safe => (
                "✅ Likely Manageable",
                "Your symptoms seem mild and can likely be managed at home. \
                 Monitor and rest.",
            ),
        };
        Self {
            severity,
            title: title.to_owned(),
            description: description.to_owned(),
        }
    }
}

/// Returns the tier the text falls into, if any.
pub fn severity_of(text: &str) -> Option<Severity> {
    let text = text.to_lowercase();
    Severity::TRIAGE_ORDER.into_iter().find(|severity| {
        severity
            .keywords()
            .iter()
            .any(|keyword| text.contains(keyword))
    })
}

/// Classifies the text into zero or one alert.
///
/// Text that matches no tier yields an empty list.
pub fn classify(text: &str) -> Vec<Alert> {
    severity_of(text)
        .map(Alert::for_severity)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn severities(text: &str) -> Vec<Severity> {
        classify(text).into_iter().map(|a| a.severity).collect()
    }

    #[test]
    fn test_chest_pain_is_emergency_in_any_case() {
        for text in [
            "I have chest pain",
            "CHEST PAIN since morning",
            "sudden Chest Pain after climbing stairs",
        ] {
            assert_eq!(severities(text), vec![Severity::Emergency], "{text}");
        }
    }

    #[test]
    fn test_emergency_beats_warning() {
        assert_eq!(
            severities("severe headache and fever"),
            vec![Severity::Emergency]
        );
        assert_eq!(
            severities("cough with bleeding"),
            vec![Severity::Emergency]
        );
    }

    #[test]
    fn test_tier_order() {
        assert_eq!(severities("I have a fever"), vec![Severity::Warning]);
        // "pain" is a warning keyword on its own.
        assert_eq!(severities("knee pain"), vec![Severity::Warning]);
        assert_eq!(
            severities("healthy diet tips please"),
            vec![Severity::Info]
        );
        // Info is checked before safe.
        assert_eq!(severities("tips for better sleep"), vec![Severity::Info]);
        assert_eq!(severities("just a mild cold"), vec![Severity::Safe]);
        // Warning is checked before safe.
        assert_eq!(
            severities("slight cough and tired"),
            vec![Severity::Warning]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(classify("hello doctor").is_empty());
        assert!(classify("").is_empty());
        assert!(classify("வணக்கம்").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let text = "Difficulty breathing at night";
        assert_eq!(classify(text), classify(text));
        assert_eq!(classify(text).len(), 1);
    }

    #[test]
    fn test_alert_text() {
        let alert = &classify("unconscious")[0];
        assert_eq!(alert.title, "🚨 Emergency");
        assert!(alert.description.contains("immediate medical attention"));
        assert_eq!(Severity::Safe.to_string(), "safe");
    }
}
