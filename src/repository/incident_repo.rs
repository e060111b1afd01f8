use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use super::{IncidentRepository, PgStore};
use crate::models::incident::{IncidentPage, IncidentReport, IncidentStatus};

#[derive(sqlx::FromRow)]
struct IncidentRow {
    report_id: Uuid,
    email: String,
    incident_type: String,
    location: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    datetime_occurred: Option<DateTime<Utc>>,
    description: String,
    media_files: Json<Vec<String>>,
    consent: bool,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IncidentRow> for IncidentReport {
    type Error = anyhow::Error;

    fn try_from(row: IncidentRow) -> Result<Self, Self::Error> {
        Ok(IncidentReport {
            report_id: row.report_id,
            email: row.email,
            incident_type: row.incident_type,
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            datetime_occurred: row.datetime_occurred,
            description: row.description,
            media_files: row.media_files.0,
            consent: row.consent,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl IncidentRepository for PgStore {
    async fn insert_incident(&self, incident: &IncidentReport) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO incident_reports \
             (report_id, email, incident_type, location, latitude, longitude, \
              datetime_occurred, description, media_files, consent, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(incident.report_id)
        .bind(&incident.email)
        .bind(&incident.incident_type)
        .bind(&incident.location)
        .bind(incident.latitude)
        .bind(incident.longitude)
        .bind(incident.datetime_occurred)
        .bind(&incident.description)
        .bind(Json(&incident.media_files))
        .bind(incident.consent)
        .bind(incident.status.as_str())
        .bind(incident.created_at)
        .bind(incident.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to insert incident report: {}", e))?;

        Ok(())
    }

    async fn list_incidents(
        &self,
        status: Option<IncidentStatus>,
        page: u64,
        per_page: u64,
    ) -> anyhow::Result<IncidentPage> {
        let status = status.map(|s| s.as_str());
        let limit = i64::try_from(per_page)?;
        let offset = IncidentPage::offset(page, per_page).and_then(|o| i64::try_from(o).ok());

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM incident_reports WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let Some(offset) = offset else {
            return Ok(IncidentPage::new(Vec::new(), u64::try_from(total)?, page, per_page));
        };

        let rows: Vec<IncidentRow> = sqlx::query_as(
            "SELECT report_id, email, incident_type, location, latitude, longitude, \
             datetime_occurred, description, media_files, consent, status, created_at, updated_at \
             FROM incident_reports WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let incidents = rows
            .into_iter()
            .map(IncidentReport::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(IncidentPage::new(incidents, u64::try_from(total)?, page, per_page))
    }

    async fn update_incident_status(
        &self,
        report_id: Uuid,
        status: IncidentStatus,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE incident_reports SET status = $2, updated_at = now() WHERE report_id = $1",
        )
        .bind(report_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn append_media(&self, report_id: Uuid, files: &[String]) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE incident_reports SET media_files = media_files || $2::jsonb, updated_at = now() \
             WHERE report_id = $1",
        )
        .bind(report_id)
        .bind(Json(files))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn incident_exists(&self, report_id: Uuid) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM incident_reports WHERE report_id = $1)",
        )
        .bind(report_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
