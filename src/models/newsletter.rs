use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct NewsletterSubscription {
    pub email: String,
    pub name: Option<String>,
    pub subscribed_at: DateTime<Utc>,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub unsubscribe_token: Uuid,
    pub last_email_sent: Option<DateTime<Utc>>,
}

impl NewsletterSubscription {
    pub fn new(email: &str, name: Option<String>) -> Self {
        Self {
            email: email.to_string(),
            name,
            subscribed_at: Utc::now(),
            is_active: true,
            unsubscribe_token: Uuid::new_v4(),
            last_email_sent: None,
        }
    }
}
