use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::repositories::{
    logo_storage::LogoStorageClient, subscriptions::SubscriptionRepository,
};

pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/png", "image/jpeg", "image/webp", "image/svg+xml"];

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("subscription not found")]
    NotFound,
    #[error("unsupported logo content type: {0}")]
    UnsupportedContentType(String),
    #[error("logo payload is empty")]
    EmptyPayload,
    #[error("logo exceeds the upload size limit")]
    TooLarge,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl LogoError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            LogoError::NotFound => StatusCode::NOT_FOUND,
            LogoError::UnsupportedContentType(_) | LogoError::EmptyPayload => {
                StatusCode::BAD_REQUEST
            }
            LogoError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            LogoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type LogoResult<T> = std::result::Result<T, LogoError>;

pub struct LogoUseCase<S, L>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    L: LogoStorageClient + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    logo_storage: Arc<L>,
}

impl<S, L> LogoUseCase<S, L>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    L: LogoStorageClient + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>, logo_storage: Arc<L>) -> Self {
        Self {
            subscription_repo,
            logo_storage,
        }
    }

    /// Uploads a replacement logo and points the record at its public URL.
    pub async fn upload_logo(
        &self,
        subscription_id: Uuid,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> LogoResult<String> {
        if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
            warn!(
                %subscription_id,
                content_type,
                "logos: rejected upload with unsupported content type"
            );
            return Err(LogoError::UnsupportedContentType(content_type.to_string()));
        }
        if bytes.is_empty() {
            warn!(%subscription_id, "logos: rejected empty upload");
            return Err(LogoError::EmptyPayload);
        }
        if bytes.len() > MAX_LOGO_BYTES {
            warn!(
                %subscription_id,
                byte_count = bytes.len(),
                "logos: rejected oversized upload"
            );
            return Err(LogoError::TooLarge);
        }

        self.subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "logos: failed to load subscription before upload"
                );
                LogoError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%subscription_id, "logos: upload for unknown subscription");
                LogoError::NotFound
            })?;

        let logo_url = self
            .logo_storage
            .upload_logo(subscription_id, bytes, content_type)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    error = ?err,
                    "logos: storage upload failed"
                );
                LogoError::Internal(err)
            })?;

        let affected = self
            .subscription_repo
            .set_logo_url(subscription_id, &logo_url)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "logos: failed to persist logo url"
                );
                LogoError::Internal(err)
            })?;

        if affected == 0 {
            warn!(%subscription_id, "logos: record vanished before logo url persisted");
            return Err(LogoError::NotFound);
        }

        info!(%subscription_id, logo_url = %logo_url, "logos: logo updated");
        Ok(logo_url)
    }
}
