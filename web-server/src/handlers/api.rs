//! JSON API handlers

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use validator::Validate;
use urlsentry_core::to_csv_bytes;

use super::upload;
use crate::models::{
    BatchResponse, FeatureImportance, ModelResponse, PredictRequest, PredictResponse,
};
use crate::{AppResult, AppState};

/// Model metadata, schema and runtime stats
pub async fn model_info(State(state): State<AppState>) -> Json<ModelResponse> {
    let classifier = state.engine.classifier();

    let mut feature_importances: Vec<FeatureImportance> = classifier
        .feature_importances()
        .map(|weights| {
            state
                .engine
                .schema()
                .names()
                .zip(weights.iter().copied())
                .map(|(name, importance)| FeatureImportance { name, importance })
                .collect()
        })
        .unwrap_or_default();
    feature_importances.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    Json(ModelResponse {
        info: classifier.info().clone(),
        status: state.engine.status(),
        feature_importances,
    })
}

/// Classify a single URL
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    req.validate()?;

    let verdict = state.engine.classify(&req.url)?;
    let explanation = state.engine.explain(&verdict.features).contributions;

    tracing::debug!(label = %verdict.prediction.label, "API prediction for {}", verdict.url);

    Ok(Json(PredictResponse::new(
        verdict,
        explanation,
        state.config.show_confidence,
    )))
}

/// Score an uploaded CSV and return the report
pub async fn batch(State(state): State<AppState>, multipart: Multipart) -> AppResult<Json<BatchResponse>> {
    let upload = upload::read_csv(multipart).await?;
    let report = upload::score(state.engine.clone(), upload.data).await?;

    let response = BatchResponse::new(report, upload.filename, state.config.show_confidence);
    tracing::info!(
        batch_id = %response.id,
        rows = response.total,
        malicious = response.distribution.malicious,
        "Batch scored"
    );

    Ok(Json(response))
}

/// Score an uploaded CSV and return it with prediction columns appended
pub async fn export(State(state): State<AppState>, multipart: Multipart) -> AppResult<Response> {
    let upload = upload::read_csv(multipart).await?;
    let report = upload::score(state.engine.clone(), upload.data).await?;
    let csv = to_csv_bytes(&report)?;

    let disposition = format!("attachment; filename=\"predictions-{}.csv\"", Uuid::new_v4());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
