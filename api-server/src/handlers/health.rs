//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use loglite_core::logic::explain::AttributionMode;
use loglite_core::ModelMetadata;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    attribution: AttributionMode,
    num_classes: usize,
    model: Option<ModelMetadata>,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let analyzer = &state.analyzer;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        attribution: analyzer.attribution().mode(),
        num_classes: analyzer.labels().len(),
        model: analyzer.classifier().metadata().cloned(),
    })
}
