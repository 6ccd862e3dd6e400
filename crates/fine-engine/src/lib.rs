//! Fine-calculation engine for the SST compliance questionnaire.
//!
//! Translates a set of yes/no answers into a severity profile and an
//! accumulated monetary penalty, using the violation catalog and the
//! tiered rate tables for the company's size category. The whole engine
//! is pure and synchronous: no I/O, no retained state between calls.

pub mod catalog;
pub mod rates;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared_types::{
    CompanyCategory, ConfigurationError, DiagnosisInput, DiagnosisResult, Severity, SeverityCounts,
};

/// Fine calculator over the static catalog and rate tables.
///
/// Stateless and `Send + Sync`; a single instance can serve any number of
/// concurrent callers without locking.
#[derive(Debug, Clone)]
pub struct FineEngine {
    uit: Decimal,
}

impl FineEngine {
    /// Engine with the UIT value currently in force.
    pub fn new() -> Self {
        Self { uit: dec!(5350) }
    }

    /// Engine with an explicit UIT value (yearly adjustment, tests).
    pub fn with_uit(uit: Decimal) -> Self {
        Self { uit }
    }

    pub fn uit(&self) -> Decimal {
        self.uit
    }

    /// Per-violation rate in soles for one category, workforce and severity.
    pub fn rate(
        &self,
        category: CompanyCategory,
        worker_count: u32,
        severity: Severity,
    ) -> Result<Decimal, ConfigurationError> {
        let band = rates::table_for(category)
            .band_for(worker_count)
            .ok_or(ConfigurationError::MissingBand {
                category,
                workers: worker_count,
            })?;
        Ok(band.rate(severity) * self.uit)
    }

    /// Run the diagnosis for one submission.
    ///
    /// Answers are scanned in submission order; a "no" (case-insensitive)
    /// to a cataloged question records one violation of that question's
    /// severity, except for MYPE-exempt questions when the company is
    /// micro or small. Unrecognized question ids are ignored. The fine is
    /// zero without workers or without violations; otherwise it is the
    /// per-severity rate of the selected band times each tally, summed.
    pub fn diagnose(&self, input: &DiagnosisInput) -> Result<DiagnosisResult, ConfigurationError> {
        let mut counts = SeverityCounts::default();
        let mut violations = Vec::new();

        for (question_id, answer) in input.answers.iter() {
            if !is_no(answer) {
                continue;
            }
            if input.company_category.is_mype() && catalog::is_exempt(question_id) {
                continue;
            }
            let Some(violation) = catalog::lookup(question_id) else {
                continue;
            };
            counts.record(violation.severity);
            violations.push(violation.clone());
        }

        let max_severity = counts.max_severity();

        let fine_amount = if input.worker_count == 0 || counts.total() == 0 {
            Decimal::ZERO
        } else {
            let band = rates::table_for(input.company_category)
                .band_for(input.worker_count)
                .ok_or(ConfigurationError::MissingBand {
                    category: input.company_category,
                    workers: input.worker_count,
                })?;
            Severity::ALL
                .iter()
                .map(|&severity| {
                    Decimal::from(counts.get(severity)) * band.rate(severity) * self.uit
                })
                .sum()
        };

        Ok(DiagnosisResult {
            counts,
            violations,
            max_severity,
            fine_amount,
        })
    }
}

impl Default for FineEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn is_no(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("no")
}
