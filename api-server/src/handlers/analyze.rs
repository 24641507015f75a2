//! Log analysis handlers

use axum::{extract::State, Json};

use loglite_core::{AnalysisResponse, LogAnalyzer};

use crate::models::LogPayload;
use crate::{AppError, AppResult, AppState};

/// Analyze a single line, a pasted block, or an uploaded file
pub async fn analyze(
    State(state): State<AppState>,
    payload: LogPayload,
) -> AppResult<Json<AnalysisResponse>> {
    let analyzer = state.analyzer.clone();

    // Inference is CPU-bound
    let response = tokio::task::spawn_blocking(move || run(&analyzer, payload))
        .await
        .map_err(|e| AppError::InternalError(format!("Analysis task failed: {}", e)))??;

    tracing::debug!(
        "Analyzed {} line(s), health {}",
        response.results.len(),
        response.health_status
    );

    Ok(Json(response))
}

fn run(analyzer: &LogAnalyzer, payload: LogPayload) -> AppResult<AnalysisResponse> {
    match payload {
        LogPayload::File(content) => Ok(analyzer.analyze_batch(&content)?.into()),
        LogPayload::Text(text) if text.contains('\n') => Ok(analyzer.analyze_batch(&text)?.into()),
        LogPayload::Text(text) => {
            if text.trim().is_empty() {
                return Err(AppError::NoLogData);
            }
            let result = analyzer.analyze_line(&text)?;
            Ok(AnalysisResponse::single_line(result))
        }
    }
}
