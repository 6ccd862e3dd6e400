//! Data models for the diagnosis API

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared_types::{AnswerSheet, CompanyCategory, DiagnosisResult, Severity};

use crate::error::FieldError;

/// Incoming questionnaire submission.
///
/// Unknown fields are rejected outright so lead payloads cannot smuggle
/// extra columns into the downstream automation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosisRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub job_title: String,
    pub worker_count: u32,
    pub company_category: String,
    pub answers: AnswerSheet,
}

impl DiagnosisRequest {
    /// Semantic checks the schema cannot express. Returns the parsed
    /// category on success, or one diagnostic per offending field.
    pub fn validate(&self) -> Result<CompanyCategory, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }
        if self.company_name.trim().is_empty() {
            errors.push(FieldError::new("company_name", "must not be empty"));
        }

        match self.company_category.parse::<CompanyCategory>() {
            Ok(category) if errors.is_empty() => Ok(category),
            Ok(_) => Err(errors),
            Err(err) => {
                errors.push(FieldError::new("company_category", err.to_string()));
                Err(errors)
            }
        }
    }
}

/// The part of the result echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisSummary {
    pub max_severity: Option<Severity>,
    pub total_violations: u32,
    pub fine_amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub diagnosis: DiagnosisSummary,
}

/// Flat lead record relayed to the automation webhook.
#[derive(Debug, Clone, Serialize)]
pub struct LeadRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub job_title: String,
    pub worker_count: u32,
    pub company_category: CompanyCategory,
    pub max_severity: Option<Severity>,
    pub fine_amount: Decimal,
    pub total_violations: u32,
    pub result: DiagnosisResult,
    pub created_at: DateTime<Utc>,
}
