use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::services::AppState;

pub async fn get_weather_alerts(State(state): State<Arc<AppState>>) -> Json<Value> {
    let alerts = state.weather.current_alerts();
    tracing::debug!(count = alerts.len(), live = state.weather.is_configured(), "Weather alerts served");
    Json(json!({ "alerts": alerts }))
}
