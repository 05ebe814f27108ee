use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::{
    error::{ProvideErrorMetadata, SdkError},
    operation::put_object::PutObjectError,
    primitives::ByteStream,
};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::repositories::logo_storage::LogoStorageClient;

use super::s3::{S3Config, build_s3_client};

#[derive(Debug, Clone)]
pub struct SupabaseLogoStorageConfig {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    /// Base of the public object URLs, e.g.
    /// `https://<project>.supabase.co/storage/v1/object/public`.
    pub public_base_url: String,
}

pub struct SupabaseLogoStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl SupabaseLogoStorage {
    /// Supabase Storage S3-compatible API reference:
    /// https://supabase.com/docs/guides/storage/s3/compatibility
    pub async fn new(config: SupabaseLogoStorageConfig) -> Result<Self> {
        let client = build_s3_client(&S3Config::new(
            config.endpoint,
            config.region,
            config.access_key,
            config.secret_key,
        ))
        .await
        .context("failed to build Supabase s3 client")?;

        Ok(Self {
            client,
            bucket: config.bucket,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LogoStorageClient for SupabaseLogoStorage {
    async fn upload_logo(
        &self,
        subscription_id: Uuid,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        // Timestamped key so a replacement upload never collides with (or is
        // cached as) the previous logo.
        let object_key = format!(
            "{}_{}.{}",
            subscription_id,
            Utc::now().timestamp_millis(),
            extension_for(content_type)
        );
        let body = ByteStream::from(bytes);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|err| map_put_object_error(err, &self.bucket, &object_key))?;

        Ok(format!(
            "{}/{}/{}",
            self.public_base_url, self.bucket, object_key
        ))
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}

fn map_put_object_error(
    err: SdkError<PutObjectError>,
    bucket: &str,
    object_key: &str,
) -> anyhow::Error {
    if let SdkError::ServiceError(service_err) = &err {
        let raw = service_err.raw();
        let status = raw.status().as_u16();
        let code = service_err.err().code().unwrap_or("unknown");
        let message = service_err.err().message().unwrap_or_default();

        let mut detail = format!(
            "failed to upload logo to Supabase Storage (status {}, code {})",
            status, code
        );

        if !message.is_empty() {
            detail.push_str(&format!(": {}", message));
        }

        detail.push_str(&format!(" [bucket={}, key={}]", bucket, object_key));

        return anyhow::anyhow!(detail);
    }

    anyhow::Error::new(err).context("failed to upload logo to Supabase Storage")
}
