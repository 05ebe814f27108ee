use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

#[async_trait]
#[automock]
pub trait LogoStorageClient: Send + Sync {
    /// Uploads the logo bytes under a per-subscription object key and returns
    /// the public URL the record should point at.
    async fn upload_logo(
        &self,
        subscription_id: Uuid,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String>;
}
