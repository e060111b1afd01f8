use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::{parse_id, required, AppError};
use crate::models::emergency_kit::EmergencyKitRecord;
use crate::models::kit::{BudgetTier, DisasterType, KitRequest, KitResult};
use crate::services::{kit_generator, AppState};
use crate::utils::validate_email;

/// Largest household count or duration that still fits the stored `INTEGER` columns.
const MAX_COUNT: u32 = i32::MAX as u32;

#[derive(Debug, Default, Deserialize)]
pub struct KitRequestBody {
    pub family_size: Option<u32>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub seniors: Option<u32>,
    #[serde(default, alias = "has_medical")]
    pub has_medical_conditions: bool,
    #[serde(default)]
    pub has_disabilities: bool,
    #[serde(default)]
    pub has_pets: bool,
    pub kit_duration: Option<u32>,
    pub budget_range: Option<String>,
    pub disaster_type: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

impl KitRequestBody {
    /// Checks required fields and ranges, in the order clients list them.
    pub fn validate(self) -> Result<(KitRequest, Option<String>), AppError> {
        let family_size = required(self.family_size, "family_size")?;
        let adults = required(self.adults, "adults")?;
        let children = required(self.children, "children")?;
        let seniors = required(self.seniors, "seniors")?;
        let duration = required(self.kit_duration, "kit_duration")?;
        let budget_range = required(self.budget_range, "budget_range")?;
        let disaster_type = required(self.disaster_type, "disaster_type")?;

        if duration == 0 {
            return Err(AppError::bad_request("kit_duration must be at least 1 day"));
        }
        for (value, field) in [
            (family_size, "family_size"),
            (adults, "adults"),
            (children, "children"),
            (seniors, "seniors"),
            (duration, "kit_duration"),
        ] {
            if value > MAX_COUNT {
                return Err(AppError::bad_request(format!("{} is out of range", field)));
            }
        }

        let user_email = self.user_email.filter(|e| !e.trim().is_empty());
        if let Some(email) = &user_email {
            if !validate_email(email) {
                return Err(AppError::bad_request("Invalid email format"));
            }
        }

        let request = KitRequest {
            disaster_type: DisasterType::parse(&disaster_type),
            family_size,
            adults,
            children,
            seniors,
            has_medical: self.has_medical_conditions,
            has_disabilities: self.has_disabilities,
            has_pets: self.has_pets,
            duration,
            budget_range: BudgetTier::parse(&budget_range),
        };

        Ok((request, user_email))
    }
}

#[derive(Serialize)]
pub struct KitResponse {
    pub success: bool,
    pub kit_id: Uuid,
    pub kit_items: KitResult,
    pub message: &'static str,
}

pub async fn generate_emergency_kit(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<KitRequestBody>, JsonRejection>,
) -> Result<Json<KitResponse>, AppError> {
    let Json(body) = payload?;
    let (request, user_email) = body.validate()?;

    let kit_items = kit_generator::generate(&request);

    let record = EmergencyKitRecord::new(&request, &kit_items, user_email)
        .map_err(AppError::internal("Failed to generate emergency kit"))?;
    state
        .store
        .insert_kit(&record)
        .await
        .map_err(AppError::internal("Failed to generate emergency kit"))?;

    tracing::info!(
        kit_id = %record.kit_id,
        disaster_type = %request.disaster_type,
        total_items = kit_items.total_items,
        "Emergency kit generated"
    );

    Ok(Json(KitResponse {
        success: true,
        kit_id: record.kit_id,
        kit_items,
        message: "Emergency kit generated successfully",
    }))
}

pub async fn get_emergency_kit(
    State(state): State<Arc<AppState>>,
    Path(kit_id): Path<String>,
) -> Result<Json<EmergencyKitRecord>, AppError> {
    let kit_id = parse_id(&kit_id, "Emergency kit not found")?;

    state
        .store
        .find_kit(kit_id)
        .await
        .map_err(AppError::internal("Failed to fetch emergency kit"))?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Emergency kit not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_body() -> KitRequestBody {
        KitRequestBody {
            family_size: Some(4),
            adults: Some(2),
            children: Some(2),
            seniors: Some(0),
            kit_duration: Some(3),
            budget_range: Some("standard".into()),
            disaster_type: Some("Flood".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_body_validates() {
        let (request, email) = complete_body().validate().unwrap();
        assert_eq!(request.disaster_type, DisasterType::Flood);
        assert_eq!(request.budget_range, BudgetTier::Standard);
        assert_eq!(request.duration, 3);
        assert!(email.is_none());
    }

    #[test]
    fn test_missing_field_is_named() {
        let body = KitRequestBody { seniors: None, ..complete_body() };
        let err = body.validate().unwrap_err();
        assert_eq!(err.to_string(), "seniors is required");
    }

    #[test]
    fn test_zero_duration_rejected() {
        let body = KitRequestBody { kit_duration: Some(0), ..complete_body() };
        assert!(matches!(body.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_counts_beyond_storage_range_rejected() {
        let body = KitRequestBody { family_size: Some(u32::MAX), ..complete_body() };
        let err = body.validate().unwrap_err();
        assert_eq!(err.to_string(), "family_size is out of range");

        let body = KitRequestBody { kit_duration: Some(MAX_COUNT + 1), ..complete_body() };
        assert_eq!(body.validate().unwrap_err().to_string(), "kit_duration is out of range");

        let body = KitRequestBody { family_size: Some(MAX_COUNT), ..complete_body() };
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_medical_alias_accepted() {
        let body: KitRequestBody = serde_json::from_value(serde_json::json!({
            "family_size": 1, "adults": 1, "children": 0, "seniors": 0,
            "kit_duration": 2, "budget_range": "basic", "disaster_type": "Cyclone",
            "has_medical": true
        }))
        .unwrap();
        let (request, _) = body.validate().unwrap();
        assert!(request.has_medical);
    }
}
