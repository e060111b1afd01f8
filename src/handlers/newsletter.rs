use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{parse_id, AppError};
use crate::models::newsletter::NewsletterSubscription;
use crate::services::AppState;
use crate::utils::validate_email;

#[derive(Debug, Deserialize)]
pub struct SubscribeBody {
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubscribeBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = payload?;
    let email = body
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| validate_email(e))
        .ok_or_else(|| AppError::bad_request("Valid email is required"))?;

    let existing = state
        .store
        .find_subscription(&email)
        .await
        .map_err(AppError::internal("Failed to subscribe to newsletter"))?;

    match existing {
        Some(subscription) if subscription.is_active => {
            return Err(AppError::bad_request("Email already subscribed"));
        }
        Some(_) => state
            .store
            .reactivate_subscription(&email)
            .await
            .map_err(AppError::internal("Failed to subscribe to newsletter"))?,
        None => {
            let subscription = NewsletterSubscription::new(&email, body.name);
            state
                .store
                .insert_subscription(&subscription)
                .await
                .map_err(AppError::internal("Failed to subscribe to newsletter"))?
        }
    }

    tracing::info!(email = %email, "Newsletter subscription");
    Ok(Json(json!({ "success": true, "message": "Successfully subscribed to newsletter" })))
}

pub async fn unsubscribe(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let token = parse_id(&token, "Subscription not found")?;

    let deactivated = state
        .store
        .deactivate_subscription(token)
        .await
        .map_err(AppError::internal("Failed to unsubscribe from newsletter"))?;

    if !deactivated {
        return Err(AppError::not_found("Subscription not found"));
    }

    Ok(Json(json!({ "success": true, "message": "Successfully unsubscribed from newsletter" })))
}
