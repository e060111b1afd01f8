use async_trait::async_trait;
use uuid::Uuid;

use super::{NewsletterRepository, PgStore};
use crate::models::newsletter::NewsletterSubscription;

#[async_trait]
impl NewsletterRepository for PgStore {
    async fn find_subscription(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<NewsletterSubscription>> {
        let subscription = sqlx::query_as::<_, NewsletterSubscription>(
            "SELECT email, name, subscribed_at, is_active, unsubscribe_token, last_email_sent \
             FROM newsletter_subscriptions WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    async fn insert_subscription(
        &self,
        subscription: &NewsletterSubscription,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO newsletter_subscriptions \
             (email, name, subscribed_at, is_active, unsubscribe_token, last_email_sent) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&subscription.email)
        .bind(&subscription.name)
        .bind(subscription.subscribed_at)
        .bind(subscription.is_active)
        .bind(subscription.unsubscribe_token)
        .bind(subscription.last_email_sent)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to insert subscription: {}", e))?;

        Ok(())
    }

    async fn reactivate_subscription(&self, email: &str) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE newsletter_subscriptions SET is_active = TRUE, subscribed_at = now() \
             WHERE email = $1",
        )
        .bind(email)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn deactivate_subscription(&self, token: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE newsletter_subscriptions SET is_active = FALSE WHERE unsubscribe_token = $1",
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
