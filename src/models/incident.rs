use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Pending,
    Verified,
    Resolved,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Pending => "pending",
            IncidentStatus::Verified => "verified",
            IncidentStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(IncidentStatus::Pending),
            "verified" => Ok(IncidentStatus::Verified),
            "resolved" => Ok(IncidentStatus::Resolved),
            other => Err(anyhow::anyhow!("unknown incident status: {}", other)),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct IncidentReport {
    pub report_id: Uuid,
    pub email: String,
    pub incident_type: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub datetime_occurred: Option<DateTime<Utc>>,
    pub description: String,
    pub media_files: Vec<String>,
    pub consent: bool,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the reporter; everything else is assigned on creation.
#[derive(Clone, Debug, Default)]
pub struct NewIncident {
    pub email: String,
    pub incident_type: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub datetime_occurred: Option<DateTime<Utc>>,
    pub description: String,
    pub consent: bool,
}

impl IncidentReport {
    pub fn new(incident: NewIncident) -> Self {
        let now = Utc::now();
        Self {
            report_id: Uuid::new_v4(),
            email: incident.email,
            incident_type: incident.incident_type,
            location: incident.location,
            latitude: incident.latitude,
            longitude: incident.longitude,
            datetime_occurred: incident.datetime_occurred,
            description: incident.description,
            media_files: Vec::new(),
            consent: incident.consent,
            status: IncidentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn confirmation_body(&self) -> String {
        format!(
            "Thank you for reporting the incident. Your report has been received and assigned ID: {}\n\n\
             Incident Details:\n\
             - Type: {}\n\
             - Location: {}\n\
             - Description: {}\n\
             - Status: {}\n\n\
             We will review your report and contact you if additional information is needed.\n\n\
             Stay safe,\n\
             DisasterSense Team\n",
            self.report_id, self.incident_type, self.location, self.description, self.status
        )
    }
}

/// Accepts RFC 3339 timestamps as well as the naive `YYYY-MM-DDTHH:MM[:SS]`
/// values produced by HTML datetime inputs, which are taken as UTC.
pub fn parse_occurred_at(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// One page of incidents, newest first.
#[derive(Clone, Debug, Serialize)]
pub struct IncidentPage {
    pub incidents: Vec<IncidentReport>,
    pub total: u64,
    pub pages: u64,
    pub current_page: u64,
}

impl IncidentPage {
    /// Rows to skip before `page`, or `None` when the page lies beyond any
    /// addressable row.
    pub fn offset(page: u64, per_page: u64) -> Option<u64> {
        page.saturating_sub(1).checked_mul(per_page)
    }

    pub fn new(incidents: Vec<IncidentReport>, total: u64, page: u64, per_page: u64) -> Self {
        Self {
            incidents,
            total,
            pages: total.div_ceil(per_page.max(1)),
            current_page: page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_starts_pending() {
        let report = IncidentReport::new(NewIncident {
            email: "a@example.com".into(),
            incident_type: "flood".into(),
            location: "Mumbai".into(),
            description: "Water rising".into(),
            ..Default::default()
        });
        assert_eq!(report.status, IncidentStatus::Pending);
        assert!(report.media_files.is_empty());
        assert!(report.confirmation_body().contains(&report.report_id.to_string()));
    }

    #[test]
    fn test_parse_occurred_at_formats() {
        assert!(parse_occurred_at("2024-07-01T10:30:00Z").is_some());
        assert!(parse_occurred_at("2024-07-01T10:30").is_some());
        assert!(parse_occurred_at("2024-07-01T10:30:15.250").is_some());
        assert!(parse_occurred_at("yesterday").is_none());
    }

    #[test]
    fn test_offset_overflow_is_past_the_end() {
        assert_eq!(IncidentPage::offset(1, 10), Some(0));
        assert_eq!(IncidentPage::offset(3, 10), Some(20));
        assert_eq!(IncidentPage::offset(u64::MAX, 100), None);
        assert_eq!(IncidentPage::offset(u64::MAX, 1), Some(u64::MAX - 1));
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(IncidentPage::new(vec![], 21, 1, 10).pages, 3);
        assert_eq!(IncidentPage::new(vec![], 0, 1, 10).pages, 0);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("verified".parse::<IncidentStatus>().unwrap(), IncidentStatus::Verified);
        assert!("closed".parse::<IncidentStatus>().is_err());
    }
}
