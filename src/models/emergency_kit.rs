use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::kit::{KitRequest, KitResult};

/// A generated kit as persisted: the request fields plus the result blob.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct EmergencyKitRecord {
    pub kit_id: Uuid,
    pub user_email: Option<String>,
    pub family_size: i32,
    pub adults: i32,
    pub children: i32,
    pub seniors: i32,
    pub has_medical_conditions: bool,
    pub has_disabilities: bool,
    pub has_pets: bool,
    pub kit_duration: i32,
    pub budget_range: String,
    pub disaster_type: String,
    pub kit_items: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl EmergencyKitRecord {
    pub fn new(
        request: &KitRequest,
        result: &KitResult,
        user_email: Option<String>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            kit_id: Uuid::new_v4(),
            user_email,
            family_size: i32::try_from(request.family_size)?,
            adults: i32::try_from(request.adults)?,
            children: i32::try_from(request.children)?,
            seniors: i32::try_from(request.seniors)?,
            has_medical_conditions: request.has_medical,
            has_disabilities: request.has_disabilities,
            has_pets: request.has_pets,
            kit_duration: i32::try_from(request.duration)?,
            budget_range: request.budget_range.to_string(),
            disaster_type: request.disaster_type.to_string(),
            kit_items: serde_json::to_value(result)?,
            created_at: Utc::now(),
        })
    }
}
