//! Process-local store used when no database is configured, and by tests.
//! Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{IncidentRepository, KitRepository, NewsletterRepository, Store};
use crate::models::emergency_kit::EmergencyKitRecord;
use crate::models::incident::{IncidentPage, IncidentReport, IncidentStatus};
use crate::models::newsletter::NewsletterSubscription;

#[derive(Default)]
pub struct MemoryStore {
    // Insertion order, oldest first.
    incidents: RwLock<Vec<IncidentReport>>,
    subscriptions: DashMap<String, NewsletterSubscription>,
    kits: DashMap<Uuid, EmergencyKitRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incident(&self, report_id: Uuid) -> Option<IncidentReport> {
        self.incidents
            .read()
            .iter()
            .find(|i| i.report_id == report_id)
            .cloned()
    }

    pub fn kit_count(&self) -> usize {
        self.kits.len()
    }
}

#[async_trait]
impl IncidentRepository for MemoryStore {
    async fn insert_incident(&self, incident: &IncidentReport) -> anyhow::Result<()> {
        self.incidents.write().push(incident.clone());
        Ok(())
    }

    async fn list_incidents(
        &self,
        status: Option<IncidentStatus>,
        page: u64,
        per_page: u64,
    ) -> anyhow::Result<IncidentPage> {
        let incidents = self.incidents.read();
        let matching: Vec<&IncidentReport> = incidents
            .iter()
            .rev()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .collect();

        let take = usize::try_from(per_page)?;
        let items = match IncidentPage::offset(page, per_page).and_then(|o| usize::try_from(o).ok()) {
            Some(skip) => matching.iter().skip(skip).take(take).map(|i| (*i).clone()).collect(),
            None => Vec::new(),
        };

        Ok(IncidentPage::new(items, matching.len() as u64, page, per_page))
    }

    async fn update_incident_status(
        &self,
        report_id: Uuid,
        status: IncidentStatus,
    ) -> anyhow::Result<bool> {
        let mut incidents = self.incidents.write();
        match incidents.iter_mut().find(|i| i.report_id == report_id) {
            Some(incident) => {
                incident.status = status;
                incident.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn append_media(&self, report_id: Uuid, files: &[String]) -> anyhow::Result<bool> {
        let mut incidents = self.incidents.write();
        match incidents.iter_mut().find(|i| i.report_id == report_id) {
            Some(incident) => {
                incident.media_files.extend_from_slice(files);
                incident.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn incident_exists(&self, report_id: Uuid) -> anyhow::Result<bool> {
        Ok(self.incidents.read().iter().any(|i| i.report_id == report_id))
    }
}

#[async_trait]
impl NewsletterRepository for MemoryStore {
    async fn find_subscription(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<NewsletterSubscription>> {
        Ok(self.subscriptions.get(email).map(|s| s.value().clone()))
    }

    async fn insert_subscription(
        &self,
        subscription: &NewsletterSubscription,
    ) -> anyhow::Result<()> {
        if self.subscriptions.contains_key(&subscription.email) {
            anyhow::bail!("subscription for {} already exists", subscription.email);
        }
        self.subscriptions
            .insert(subscription.email.clone(), subscription.clone());
        Ok(())
    }

    async fn reactivate_subscription(&self, email: &str) -> anyhow::Result<()> {
        if let Some(mut subscription) = self.subscriptions.get_mut(email) {
            subscription.is_active = true;
            subscription.subscribed_at = Utc::now();
        }
        Ok(())
    }

    async fn deactivate_subscription(&self, token: Uuid) -> anyhow::Result<bool> {
        for mut subscription in self.subscriptions.iter_mut() {
            if subscription.unsubscribe_token == token {
                subscription.is_active = false;
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[async_trait]
impl KitRepository for MemoryStore {
    async fn insert_kit(&self, kit: &EmergencyKitRecord) -> anyhow::Result<()> {
        self.kits.insert(kit.kit_id, kit.clone());
        Ok(())
    }

    async fn find_kit(&self, kit_id: Uuid) -> anyhow::Result<Option<EmergencyKitRecord>> {
        Ok(self.kits.get(&kit_id).map(|k| k.value().clone()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::incident::NewIncident;

    fn report(kind: &str) -> IncidentReport {
        IncidentReport::new(NewIncident {
            email: "r@example.com".into(),
            incident_type: kind.into(),
            location: "Pune".into(),
            description: "desc".into(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paged() {
        let store = MemoryStore::new();
        for kind in ["a", "b", "c"] {
            store.insert_incident(&report(kind)).await.unwrap();
        }

        let first = store.list_incidents(None, 1, 2).await.unwrap();
        let kinds: Vec<_> = first.incidents.iter().map(|i| i.incident_type.as_str()).collect();
        assert_eq!(kinds, vec!["c", "b"]);
        assert_eq!(first.total, 3);
        assert_eq!(first.pages, 2);

        let second = store.list_incidents(None, 2, 2).await.unwrap();
        assert_eq!(second.incidents.len(), 1);
        assert_eq!(second.incidents[0].incident_type, "a");

        let beyond = store.list_incidents(None, 5, 2).await.unwrap();
        assert!(beyond.incidents.is_empty());

        let unaddressable = store.list_incidents(None, u64::MAX, 100).await.unwrap();
        assert!(unaddressable.incidents.is_empty());
        assert_eq!(unaddressable.total, 3);
    }

    #[tokio::test]
    async fn test_status_filter_and_update() {
        let store = MemoryStore::new();
        let first = report("flood");
        let id = first.report_id;
        store.insert_incident(&first).await.unwrap();
        store.insert_incident(&report("fire")).await.unwrap();

        assert!(store.update_incident_status(id, IncidentStatus::Verified).await.unwrap());
        assert!(!store
            .update_incident_status(Uuid::new_v4(), IncidentStatus::Verified)
            .await
            .unwrap());

        let verified = store
            .list_incidents(Some(IncidentStatus::Verified), 1, 10)
            .await
            .unwrap();
        assert_eq!(verified.total, 1);
        assert_eq!(verified.incidents[0].report_id, id);
    }

    #[tokio::test]
    async fn test_subscription_lifecycle() {
        let store = MemoryStore::new();
        let sub = NewsletterSubscription::new("n@example.com", None);
        let token = sub.unsubscribe_token;
        store.insert_subscription(&sub).await.unwrap();
        assert!(store.insert_subscription(&sub).await.is_err());

        assert!(store.deactivate_subscription(token).await.unwrap());
        let found = store.find_subscription("n@example.com").await.unwrap().unwrap();
        assert!(!found.is_active);

        store.reactivate_subscription("n@example.com").await.unwrap();
        let found = store.find_subscription("n@example.com").await.unwrap().unwrap();
        assert!(found.is_active);
    }

    #[test]
    fn test_kit_round_trip() {
        use crate::models::kit::{BudgetTier, DisasterType, KitRequest};
        use crate::services::kit_generator::generate;
        use tokio_test::{assert_ok, block_on};

        let request = KitRequest {
            disaster_type: DisasterType::Cyclone,
            family_size: 2,
            adults: 2,
            children: 0,
            seniors: 0,
            has_medical: false,
            has_disabilities: false,
            has_pets: false,
            duration: 2,
            budget_range: BudgetTier::Basic,
        };
        let record = assert_ok!(EmergencyKitRecord::new(&request, &generate(&request), None));
        let store = MemoryStore::new();

        assert_ok!(block_on(store.insert_kit(&record)));
        let found = assert_ok!(block_on(store.find_kit(record.kit_id)));
        assert_eq!(found.map(|k| k.disaster_type), Some("Cyclone".to_string()));
        assert!(assert_ok!(block_on(store.find_kit(Uuid::new_v4()))).is_none());
        assert_eq!(store.kit_count(), 1);
    }
}
