use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use super::{parse_id, required_text, AppError};
use crate::models::incident::{
    parse_occurred_at, IncidentPage, IncidentReport, IncidentStatus, NewIncident,
};
use crate::services::mail::EmailMessage;
use crate::services::AppState;
use crate::utils::{validate_coordinates, validate_email};

const DEFAULT_PER_PAGE: u64 = 10;
const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct IncidentReportBody {
    pub email: Option<String>,
    pub incident_type: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub datetime: Option<String>,
    #[serde(default)]
    pub consent: bool,
}

impl IncidentReportBody {
    pub fn validate(self) -> Result<NewIncident, AppError> {
        let email = required_text(self.email, "email")?;
        let incident_type = required_text(self.incident_type, "incident_type")?;
        let location = required_text(self.location, "location")?;
        let description = required_text(self.description, "description")?;

        if !validate_email(email.trim()) {
            return Err(AppError::bad_request("Invalid email format"));
        }

        if let (Some(lat), Some(lng)) = (self.latitude, self.longitude) {
            if !validate_coordinates(lat, lng) {
                return Err(AppError::bad_request("Invalid coordinates"));
            }
        }

        let datetime_occurred = match self.datetime.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(
                parse_occurred_at(raw)
                    .ok_or_else(|| AppError::bad_request("Invalid datetime format"))?,
            ),
            _ => None,
        };

        Ok(NewIncident {
            email: email.trim().to_string(),
            incident_type,
            location,
            latitude: self.latitude,
            longitude: self.longitude,
            datetime_occurred,
            description,
            consent: self.consent,
        })
    }
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub report_id: Uuid,
    pub message: &'static str,
}

pub async fn submit_incident_report(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IncidentReportBody>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(body) = payload?;
    let incident = IncidentReport::new(body.validate()?);

    state
        .store
        .insert_incident(&incident)
        .await
        .map_err(AppError::internal("Failed to submit incident report"))?;

    state.mail.queue(EmailMessage {
        to: incident.email.clone(),
        subject: "Incident Report Confirmation".to_string(),
        body: incident.confirmation_body(),
    });

    tracing::info!(report_id = %incident.report_id, "Incident report submitted");

    Ok(Json(SubmitResponse {
        success: true,
        report_id: incident.report_id,
        message: "Incident report submitted successfully",
    }))
}

#[derive(Debug, Deserialize)]
pub struct ListIncidentsQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub status: Option<String>,
}

pub async fn list_incidents(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListIncidentsQuery>, QueryRejection>,
) -> Result<Json<IncidentPage>, AppError> {
    let Query(query) = query?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<IncidentStatus>()
                .map_err(|_| AppError::bad_request("Invalid status"))?,
        ),
    };

    let incidents = state
        .store
        .list_incidents(status, page, per_page)
        .await
        .map_err(AppError::internal("Failed to fetch incidents"))?;

    Ok(Json(incidents))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateBody {
    pub status: Option<String>,
}

pub async fn update_incident_status(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<String>,
    payload: Result<Json<StatusUpdateBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = payload?;
    let status = body
        .status
        .as_deref()
        .and_then(|s| s.parse::<IncidentStatus>().ok())
        .ok_or_else(|| AppError::bad_request("Invalid status"))?;
    let report_id = parse_id(&report_id, "Incident not found")?;

    let updated = state
        .store
        .update_incident_status(report_id, status)
        .await
        .map_err(AppError::internal("Failed to update status"))?;

    if !updated {
        return Err(AppError::not_found("Incident not found"));
    }

    tracing::info!(%report_id, %status, "Incident status updated");
    Ok(Json(json!({ "success": true, "message": "Status updated successfully" })))
}
