//! Fraud report as returned by the analysis service.
//!
//! Every field is optional: the service owns the shape and consumers must
//! branch on presence before enumerating anything.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Success body of `POST /analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    pub report: Option<Report>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Report {
    pub fraud_indicators: Option<Vec<FraudIndicator>>,
    pub plagiarism_summary: Option<PlagiarismSummary>,
    pub resume_vs_jd_similarity: Option<String>,
    pub education_anomalies: Option<Vec<String>>,
    pub final_recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudIndicator {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: IndicatorStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasoning: String,
    pub flags: Option<Vec<String>>,
}

impl FraudIndicator {
    /// Flags worth showing; `None` when absent or empty.
    pub fn visible_flags(&self) -> Option<&[String]> {
        self.flags.as_deref().filter(|flags| !flags.is_empty())
    }
}

/// Binary classification: exactly `"suspicious"` or anything else.
///
/// `Other` keeps the raw text so the badge can show what the service sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndicatorStatus {
    Suspicious,
    Other(String),
}

impl IndicatorStatus {
    pub fn is_suspicious(&self) -> bool {
        matches!(self, IndicatorStatus::Suspicious)
    }

    pub fn as_str(&self) -> &str {
        match self {
            IndicatorStatus::Suspicious => "suspicious",
            IndicatorStatus::Other(raw) => raw,
        }
    }
}

impl Default for IndicatorStatus {
    fn default() -> Self {
        IndicatorStatus::Other(String::new())
    }
}

impl From<String> for IndicatorStatus {
    fn from(raw: String) -> Self {
        if raw == "suspicious" {
            IndicatorStatus::Suspicious
        } else {
            IndicatorStatus::Other(raw)
        }
    }
}

impl From<IndicatorStatus> for String {
    fn from(status: IndicatorStatus) -> Self {
        match status {
            IndicatorStatus::Suspicious => "suspicious".to_string(),
            IndicatorStatus::Other(raw) => raw,
        }
    }
}

/// The service sends either per-source matches or a single prose summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlagiarismSummary {
    Entries(Vec<PlagiarismEntry>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_file: String,
    pub score: Option<Score>,
}

/// Similarity score, shown exactly as sent (number or pre-formatted text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(serde_json::Number),
    Text(String),
    /// Anything else is shown as its JSON text.
    Other(serde_json::Value),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Number(n) => write!(f, "{n}"),
            Score::Text(s) => f.write_str(s),
            Score::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
