use async_trait::async_trait;
use uuid::Uuid;

use super::{KitRepository, PgStore};
use crate::models::emergency_kit::EmergencyKitRecord;

#[async_trait]
impl KitRepository for PgStore {
    async fn insert_kit(&self, kit: &EmergencyKitRecord) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO emergency_kits \
             (kit_id, user_email, family_size, adults, children, seniors, has_medical_conditions, \
              has_disabilities, has_pets, kit_duration, budget_range, disaster_type, kit_items, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(kit.kit_id)
        .bind(&kit.user_email)
        .bind(kit.family_size)
        .bind(kit.adults)
        .bind(kit.children)
        .bind(kit.seniors)
        .bind(kit.has_medical_conditions)
        .bind(kit.has_disabilities)
        .bind(kit.has_pets)
        .bind(kit.kit_duration)
        .bind(&kit.budget_range)
        .bind(&kit.disaster_type)
        .bind(&kit.kit_items)
        .bind(kit.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to insert emergency kit: {}", e))?;

        Ok(())
    }

    async fn find_kit(&self, kit_id: Uuid) -> anyhow::Result<Option<EmergencyKitRecord>> {
        let kit = sqlx::query_as::<_, EmergencyKitRecord>(
            "SELECT kit_id, user_email, family_size, adults, children, seniors, \
             has_medical_conditions, has_disabilities, has_pets, kit_duration, budget_range, \
             disaster_type, kit_items, created_at \
             FROM emergency_kits WHERE kit_id = $1",
        )
        .bind(kit_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(kit)
    }
}
