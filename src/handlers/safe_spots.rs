use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::AppError;
use crate::services::safe_spots::DEFAULT_RADIUS_KM;
use crate::services::AppState;
use crate::utils::validate_coordinates;

#[derive(Debug, Deserialize)]
pub struct SafeSpotQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub disaster_type: Option<String>,
    pub radius: Option<f64>,
}

pub async fn get_safe_spots(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SafeSpotQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;

    let (Some(lat), Some(lng)) = (query.lat, query.lng) else {
        return Err(AppError::bad_request("Latitude and longitude are required"));
    };
    if !validate_coordinates(lat, lng) {
        return Err(AppError::bad_request("Invalid coordinates"));
    }

    let radius = query.radius.unwrap_or(DEFAULT_RADIUS_KM);
    if radius.is_nan() || radius <= 0.0 {
        return Err(AppError::bad_request("radius must be positive"));
    }
    let disaster_type = query.disaster_type.as_deref().unwrap_or("earthquake");

    let spots = state.safe_spots.find_safe_spots(lat, lng, disaster_type, radius);
    Ok(Json(json!({ "safe_spots": spots })))
}
