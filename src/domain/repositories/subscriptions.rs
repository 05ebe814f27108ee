use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::{
    InsertSubscriptionEntity, SubscriptionEntity, UpdateSubscriptionEntity,
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// All rows, newest first.
    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>>;

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    async fn create(&self, insert_subscription_entity: InsertSubscriptionEntity) -> Result<Uuid>;

    /// Returns the number of rows matched (0 when the id does not exist).
    async fn update(
        &self,
        subscription_id: Uuid,
        update_subscription_entity: UpdateSubscriptionEntity,
    ) -> Result<usize>;

    async fn delete(&self, subscription_id: Uuid) -> Result<usize>;

    async fn set_logo_url(&self, subscription_id: Uuid, logo_url: &str) -> Result<usize>;
}
