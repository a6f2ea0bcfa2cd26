use crate::analyzer::{Analyzer, MarketInput};
use crate::error::AppError;
use crate::render::{SignalPayload, SnapshotPayload, signal_payload, snapshot_payload};
use crate::web::AppState;
use crate::web::template::DASHBOARD_HTML;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
pub struct SignalQuery {
    pub hours: Option<String>,
}

/// Every failure becomes a 400 carrying the original message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!("Request failed: {}", self);
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

pub async fn signal(
    State(state): State<AppState>,
    Query(query): Query<SignalQuery>,
) -> Result<Json<SignalPayload>, AppError> {
    build_signal_payload(&state, query.hours.as_deref())
        .await
        .map(Json)
}

pub async fn snapshot(State(state): State<AppState>) -> Result<Json<SnapshotPayload>, AppError> {
    build_snapshot_payload(&state).await.map(Json)
}

/// Fetch, classify and serialize for `/api/signal`.
pub async fn build_signal_payload(
    state: &AppState,
    hours_param: Option<&str>,
) -> Result<SignalPayload, AppError> {
    let hours = match hours_param {
        None => state.default_hours,
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::InvalidParameter("hours must be a number".into()))?,
    };

    let series = state.source.fetch_price_points(hours).await?;
    let signal = state.analyzer.signal(&series)?;
    info!(
        "Signal for {}h ({} points): {}",
        hours,
        series.len(),
        signal.sentiment
    );
    Ok(signal_payload(&signal, Utc::now()))
}

pub async fn build_snapshot_payload(state: &AppState) -> Result<SnapshotPayload, AppError> {
    let snapshot = state.source.fetch_snapshot().await?;
    let input = MarketInput::Snapshot(snapshot.clone());
    let recommendation = state.analyzer.recommend(&input)?;
    info!("Snapshot recommendation: {}", recommendation.label());
    Ok(snapshot_payload(&snapshot, &recommendation, Utc::now()))
}
