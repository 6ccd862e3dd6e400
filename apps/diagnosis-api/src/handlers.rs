//! HTTP handlers for the diagnosis API

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{DiagnosisRequest, DiagnosisResponse, DiagnosisSummary, LeadRecord};
use crate::state::AppState;
use crate::webhook;
use shared_types::DiagnosisInput;

/// Health check endpoint
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 404 for unmatched API routes; keeps the SPA fallback from swallowing
/// them with index.html.
pub async fn api_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" })))
}

/// Run the questionnaire diagnosis and queue the lead for delivery.
pub async fn run_diagnosis(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DiagnosisRequest>, JsonRejection>,
) -> Result<Json<DiagnosisResponse>, ApiError> {
    let Json(request) = payload?;
    let company_category = request.validate().map_err(ApiError::Validation)?;

    let input = DiagnosisInput {
        company_category,
        worker_count: request.worker_count,
        answers: request.answers.clone(),
    };
    let result = state.engine.diagnose(&input)?;

    tracing::info!(
        company = %request.company_name,
        category = %company_category,
        violations = result.counts.total(),
        fine = %result.fine_amount,
        "diagnosis processed"
    );

    let summary = DiagnosisSummary {
        max_severity: result.max_severity,
        total_violations: result.counts.total(),
        fine_amount: result.fine_amount,
    };

    // Queue delivery after answering; the caller never waits on the
    // webhook outcome.
    if let Some(config) = state.webhook.clone() {
        let lead = LeadRecord {
            name: request.name,
            email: request.email,
            phone: request.phone,
            company_name: request.company_name.clone(),
            job_title: request.job_title,
            worker_count: request.worker_count,
            company_category,
            max_severity: result.max_severity,
            fine_amount: result.fine_amount,
            total_violations: result.counts.total(),
            result,
            created_at: Utc::now(),
        };
        let payload = serde_json::to_value(&lead).map_err(anyhow::Error::from)?;
        tokio::spawn(webhook::deliver(
            state.http.clone(),
            config,
            payload,
            lead.company_name,
        ));
        tracing::info!(company = %request.company_name, "lead delivery queued");
    } else {
        tracing::warn!(
            company = %request.company_name,
            "lead delivery skipped - webhook not configured"
        );
    }

    Ok(Json(DiagnosisResponse {
        status: "success",
        message: "Diagnosis received and processed.",
        diagnosis: summary,
    }))
}
