//! Application state and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use fine_engine::FineEngine;
use rust_decimal::Decimal;

use crate::webhook::WebhookConfig;

pub struct AppState {
    pub engine: FineEngine,
    /// Shared outbound client: pooled connections, bounded timeouts.
    pub http: reqwest::Client,
    pub webhook: Option<WebhookConfig>,
    pub static_dir: Option<PathBuf>,
    pub allowed_origins: Vec<HeaderValue>,
}

impl AppState {
    pub fn from_env() -> Result<Self> {
        let engine = match std::env::var("UIT_VALUE") {
            Ok(raw) => {
                let uit: Decimal = raw
                    .parse()
                    .with_context(|| format!("invalid UIT_VALUE {raw:?}"))?;
                tracing::info!("using UIT value S/ {uit}");
                FineEngine::with_uit(uit)
            }
            Err(_) => FineEngine::new(),
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(20)
            .build()?;

        let webhook = WebhookConfig::from_env();

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));
        let static_dir = static_dir.is_dir().then_some(static_dir);
        if static_dir.is_none() {
            tracing::info!("no static directory found - running API-only");
        }

        let allowed_origins = match std::env::var("ALLOWED_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .filter_map(|origin| {
                    let origin = origin.trim();
                    if origin.is_empty() {
                        return None;
                    }
                    match origin.parse::<HeaderValue>() {
                        Ok(value) => Some(value),
                        Err(_) => {
                            tracing::warn!("ignoring malformed origin in ALLOWED_ORIGINS: {origin}");
                            None
                        }
                    }
                })
                .collect(),
            Err(_) => Vec::new(),
        };

        Ok(Self {
            engine,
            http,
            webhook,
            static_dir,
            allowed_origins,
        })
    }
}
