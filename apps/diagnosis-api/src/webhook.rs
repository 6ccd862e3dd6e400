//! Fire-and-forget lead delivery to the automation webhook.
//!
//! Delivery runs detached from the request that produced the lead: the
//! caller gets its response first and never waits on, or fails with, the
//! webhook. Server-side failures and timeouts are retried with doubling
//! delays; rate limiting honors the server's wait hint; other client-side
//! rejections are terminal.

use std::time::Duration;

use reqwest::{header, StatusCode};
use tracing::{error, info, warn};

const MAX_ATTEMPTS: u32 = 3;
const BASE_DELAY: Duration = Duration::from_secs(2);
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub auth_token: Option<String>,
}

impl WebhookConfig {
    /// Reads `WEBHOOK_URL` and `WEBHOOK_AUTH_TOKEN`. Returns `None` when
    /// the URL is missing or uses plain HTTP outside localhost, in which
    /// case leads are computed but never relayed.
    pub fn from_env() -> Option<Self> {
        let url = match std::env::var("WEBHOOK_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => {
                warn!("WEBHOOK_URL not configured - lead delivery disabled");
                return None;
            }
        };

        if is_insecure(&url) {
            error!("WEBHOOK_URL uses plain HTTP outside localhost - lead delivery disabled");
            return None;
        }

        let auth_token = std::env::var("WEBHOOK_AUTH_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        if auth_token.is_none() {
            warn!("WEBHOOK_AUTH_TOKEN not set - delivering without authentication");
        }

        info!("lead delivery enabled");
        Some(Self { url, auth_token })
    }
}

/// Plain HTTP is only acceptable against a local development target.
fn is_insecure(url: &str) -> bool {
    url.starts_with("http://") && !url.contains("localhost") && !url.contains("127.0.0.1")
}

#[derive(Debug, PartialEq, Eq)]
enum Attempt {
    Delivered,
    Terminal(String),
    Retryable { reason: String, delay: Duration },
}

/// Exponential backoff schedule: 2s after the first attempt, 4s after the
/// second.
fn backoff(attempt: u32) -> Duration {
    BASE_DELAY * 2u32.pow(attempt.saturating_sub(1))
}

fn classify(status: StatusCode, retry_after_secs: Option<u64>, attempt: u32) -> Attempt {
    if status.is_success() {
        Attempt::Delivered
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        let delay = retry_after_secs
            .map(|secs| Duration::from_secs(secs).min(MAX_RATE_LIMIT_WAIT))
            .unwrap_or_else(|| backoff(attempt));
        Attempt::Retryable {
            reason: "rate limited".to_string(),
            delay,
        }
    } else if status.is_server_error() {
        Attempt::Retryable {
            reason: format!("HTTP {status}"),
            delay: backoff(attempt),
        }
    } else {
        Attempt::Terminal(format!("HTTP {status}"))
    }
}

async fn attempt_once(
    client: &reqwest::Client,
    config: &WebhookConfig,
    payload: &serde_json::Value,
    attempt: u32,
) -> Attempt {
    let mut request = client.post(&config.url).json(payload);
    if let Some(token) = &config.auth_token {
        request = request.header("X-Webhook-Token", token);
    }

    match request.send().await {
        Ok(response) => {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            classify(response.status(), retry_after, attempt)
        }
        Err(err) if err.is_timeout() => Attempt::Retryable {
            reason: "timeout".to_string(),
            delay: backoff(attempt),
        },
        Err(err) => Attempt::Retryable {
            reason: err.to_string(),
            delay: backoff(attempt),
        },
    }
}

/// Deliver one lead payload, retrying up to three times.
pub async fn deliver(
    client: reqwest::Client,
    config: WebhookConfig,
    payload: serde_json::Value,
    company: String,
) {
    if is_insecure(&config.url) {
        error!(%company, "lead delivery blocked: insecure webhook URL");
        return;
    }

    for attempt in 1..=MAX_ATTEMPTS {
        match attempt_once(&client, &config, &payload, attempt).await {
            Attempt::Delivered => {
                info!(%company, attempt, "lead delivered to webhook");
                return;
            }
            Attempt::Terminal(reason) => {
                error!(%company, attempt, %reason, "lead delivery rejected - not retrying");
                return;
            }
            Attempt::Retryable { reason, delay } => {
                if attempt < MAX_ATTEMPTS {
                    warn!(
                        %company,
                        attempt,
                        %reason,
                        "lead delivery failed - retrying in {}s",
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                } else {
                    error!(
                        %company,
                        attempt,
                        %reason,
                        "lead delivery failed on the last attempt - dropping payload"
                    );
                }
            }
        }
    }
}
