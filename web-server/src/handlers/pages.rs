//! HTML page handlers
//!
//! Failures render as a banner on the page instead of a JSON error body.
//! The banner carries the underlying error text, server errors included.

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use urlsentry_core::to_csv_bytes;

use super::upload;
use crate::models::PredictForm;
use crate::views::{self, Banner, BannerKind, BatchView};
use crate::{AppError, AppState};

pub async fn index() -> Html<String> {
    Html(views::index_page(None))
}

pub async fn predict(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Response {
    if form.url.is_empty() {
        let banner = Banner::new(BannerKind::Warning, "🚨 Please enter a URL to analyze.");
        return Html(views::index_page(Some(&banner))).into_response();
    }

    match state.engine.classify(&form.url) {
        Ok(verdict) => {
            tracing::info!(
                label = %verdict.prediction.label,
                p_malicious = verdict.prediction.malicious_probability,
                "Classified {}",
                verdict.url
            );
            let explained = state.engine.explain(&verdict.features);
            Html(views::prediction_page(&verdict, &explained, state.config.show_confidence))
                .into_response()
        }
        Err(e) => error_page(AppError::from(e)),
    }
}

pub async fn batch(State(state): State<AppState>, multipart: Multipart) -> Response {
    match run_batch(&state, multipart).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_page(e),
    }
}

async fn run_batch(state: &AppState, multipart: Multipart) -> Result<String, AppError> {
    let upload = upload::read_csv(multipart).await?;
    let report = upload::score(state.engine.clone(), upload.data).await?;
    let csv = to_csv_bytes(&report)?;

    Ok(views::batch_page(&BatchView {
        report: &report,
        filename: upload.filename.as_deref(),
        csv: &csv,
        show_confidence: state.config.show_confidence,
    }))
}

fn error_page(err: AppError) -> Response {
    let status = err.status();
    let message = format!("Error processing request: {}", err);
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), "{}", message);
    } else {
        tracing::warn!(status = status.as_u16(), "{}", message);
    }

    let banner = Banner::text(BannerKind::Error, &message);
    (status, Html(views::index_page(Some(&banner)))).into_response()
}
