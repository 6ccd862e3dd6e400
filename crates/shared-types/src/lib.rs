pub mod types;

pub use types::{
    AnswerSheet, CompanyCategory, ConfigurationError, DiagnosisInput, DiagnosisResult, Severity,
    SeverityCounts, Violation,
};
