use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

/// Severity classes of the SST sanctions regime, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Serious,
    VerySerious,
}

impl Severity {
    /// All severities in ascending regulatory weight.
    pub const ALL: [Severity; 3] = [Severity::Minor, Severity::Serious, Severity::VerySerious];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Minor => write!(f, "minor"),
            Severity::Serious => write!(f, "serious"),
            Severity::VerySerious => write!(f, "very_serious"),
        }
    }
}

/// Company size category. Determines which rate table applies and whether
/// the simplified MYPE exemptions are in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyCategory {
    Micro,
    Small,
    General,
}

impl CompanyCategory {
    /// Micro and small companies fall under the simplified MYPE regime.
    pub fn is_mype(self) -> bool {
        matches!(self, CompanyCategory::Micro | CompanyCategory::Small)
    }
}

impl fmt::Display for CompanyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanyCategory::Micro => write!(f, "micro"),
            CompanyCategory::Small => write!(f, "small"),
            CompanyCategory::General => write!(f, "general"),
        }
    }
}

impl FromStr for CompanyCategory {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "micro" => Ok(CompanyCategory::Micro),
            "small" => Ok(CompanyCategory::Small),
            "general" => Ok(CompanyCategory::General),
            other => Err(ConfigurationError::UnknownCategory(other.to_string())),
        }
    }
}

/// Fatal data defects in the category/rate configuration. Everything else
/// in the calculation degrades gracefully instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown company category: {0:?}")]
    UnknownCategory(String),

    #[error("no rate band covers {workers} workers in the {category} table")]
    MissingBand {
        category: CompanyCategory,
        workers: u32,
    },
}

/// One infraction record from the violation catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub question_id: String,
    pub severity: Severity,
    pub description: String,
    /// Legal basis, e.g. "Ley 29783 art. 22"
    pub statute: String,
}

/// Violation tallies per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub minor: u32,
    pub serious: u32,
    pub very_serious: u32,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Minor => self.minor += 1,
            Severity::Serious => self.serious += 1,
            Severity::VerySerious => self.very_serious += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Minor => self.minor,
            Severity::Serious => self.serious,
            Severity::VerySerious => self.very_serious,
        }
    }

    pub fn total(&self) -> u32 {
        self.minor + self.serious + self.very_serious
    }

    /// Highest severity with a non-zero count.
    pub fn max_severity(&self) -> Option<Severity> {
        if self.very_serious > 0 {
            Some(Severity::VerySerious)
        } else if self.serious > 0 {
            Some(Severity::Serious)
        } else if self.minor > 0 {
            Some(Severity::Minor)
        } else {
            None
        }
    }
}

/// Questionnaire answers in the order the client sent them.
///
/// Serializes as a JSON object. A plain `HashMap` would lose the submission
/// order, which the diagnosis detail list must preserve, so deserialization
/// goes through a map visitor that keeps entries as they arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet(Vec<(String, String)>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0
            .iter()
            .map(|(question_id, answer)| (question_id.as_str(), answer.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<(String, String)>> for AnswerSheet {
    fn from(entries: Vec<(String, String)>) -> Self {
        Self(entries)
    }
}

impl FromIterator<(String, String)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for AnswerSheet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (question_id, answer) in &self.0 {
            map.serialize_entry(question_id, answer)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerSheet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SheetVisitor;

        impl<'de> serde::de::Visitor<'de> for SheetVisitor {
            type Value = AnswerSheet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of question ids to answers")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, String>()? {
                    entries.push(entry);
                }
                Ok(AnswerSheet(entries))
            }
        }

        deserializer.deserialize_map(SheetVisitor)
    }
}

/// Everything the fine calculation needs about one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisInput {
    pub company_category: CompanyCategory,
    pub worker_count: u32,
    pub answers: AnswerSheet,
}

/// Outcome of one diagnosis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisResult {
    pub counts: SeverityCounts,
    /// Catalog records for every counted violation, in submission order.
    pub violations: Vec<Violation>,
    /// `None` when no violation was recorded.
    pub max_severity: Option<Severity>,
    /// Accumulated fine in soles. Zero without workers or violations.
    pub fine_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_parses_known_values() {
        assert_eq!("micro".parse(), Ok(CompanyCategory::Micro));
        assert_eq!("small".parse(), Ok(CompanyCategory::Small));
        assert_eq!("general".parse(), Ok(CompanyCategory::General));
    }

    #[test]
    fn category_rejects_unknown_values() {
        let err = "corporation".parse::<CompanyCategory>().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownCategory("corporation".to_string())
        );
    }

    #[test]
    fn mype_covers_micro_and_small_only() {
        assert!(CompanyCategory::Micro.is_mype());
        assert!(CompanyCategory::Small.is_mype());
        assert!(!CompanyCategory::General.is_mype());
    }

    #[test]
    fn max_severity_prefers_the_highest_class() {
        let mut counts = SeverityCounts::default();
        assert_eq!(counts.max_severity(), None);

        counts.record(Severity::Minor);
        assert_eq!(counts.max_severity(), Some(Severity::Minor));

        counts.record(Severity::Serious);
        assert_eq!(counts.max_severity(), Some(Severity::Serious));

        counts.record(Severity::VerySerious);
        assert_eq!(counts.max_severity(), Some(Severity::VerySerious));
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn answer_sheet_preserves_submission_order() {
        let json = r#"{"q9":"no","q1":"yes","q5":"no"}"#;
        let sheet: AnswerSheet = serde_json::from_str(json).unwrap();

        let order: Vec<&str> = sheet.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["q9", "q1", "q5"]);

        // And survives a round-trip untouched.
        let back = serde_json::to_string(&sheet).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn severity_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Severity::VerySerious).unwrap(),
            "\"very_serious\""
        );
        assert_eq!(Severity::VerySerious.to_string(), "very_serious");
    }
}
