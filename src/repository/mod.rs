pub mod incident_repo;
pub mod kit_repo;
pub mod memory;
pub mod newsletter_repo;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::emergency_kit::EmergencyKitRecord;
use crate::models::incident::{IncidentPage, IncidentReport, IncidentStatus};
use crate::models::newsletter::NewsletterSubscription;

pub use memory::MemoryStore;

#[async_trait]
pub trait IncidentRepository: Send + Sync {
    async fn insert_incident(&self, incident: &IncidentReport) -> anyhow::Result<()>;

    /// `page` is 1-based.
    async fn list_incidents(
        &self,
        status: Option<IncidentStatus>,
        page: u64,
        per_page: u64,
    ) -> anyhow::Result<IncidentPage>;

    /// Returns false when no report has this id.
    async fn update_incident_status(
        &self,
        report_id: Uuid,
        status: IncidentStatus,
    ) -> anyhow::Result<bool>;

    /// Returns false when no report has this id.
    async fn append_media(&self, report_id: Uuid, files: &[String]) -> anyhow::Result<bool>;

    async fn incident_exists(&self, report_id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    async fn find_subscription(&self, email: &str)
        -> anyhow::Result<Option<NewsletterSubscription>>;

    async fn insert_subscription(&self, subscription: &NewsletterSubscription)
        -> anyhow::Result<()>;

    async fn reactivate_subscription(&self, email: &str) -> anyhow::Result<()>;

    /// Returns false when the token is unknown.
    async fn deactivate_subscription(&self, token: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait KitRepository: Send + Sync {
    async fn insert_kit(&self, kit: &EmergencyKitRecord) -> anyhow::Result<()>;

    async fn find_kit(&self, kit_id: Uuid) -> anyhow::Result<Option<EmergencyKitRecord>>;
}

/// Everything the HTTP layer persists.
#[async_trait]
pub trait Store: IncidentRepository + NewsletterRepository + KitRepository {
    async fn ping(&self) -> anyhow::Result<()>;
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
