use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    application::usecases::logos::LogoUseCase,
    domain::repositories::{
        logo_storage::LogoStorageClient, subscriptions::SubscriptionRepository,
    },
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{
            postgres_connection::PgPoolSquad, repositories::subscriptions::SubscriptionPostgres,
        },
        storage::supabase_logos::SupabaseLogoStorage,
    },
};

#[derive(Debug, Deserialize)]
pub struct UploadLogoBody {
    pub content_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, logo_storage: Arc<SupabaseLogoStorage>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let logo_usecase = LogoUseCase::new(Arc::new(subscription_repository), logo_storage);

    Router::new()
        .route("/:subscription_id/logo", post(upload_logo))
        .with_state(Arc::new(logo_usecase))
}

pub async fn upload_logo<S, L>(
    State(usecase): State<Arc<LogoUseCase<S, L>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
    Json(body): Json<UploadLogoBody>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    L: LogoStorageClient + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "logos: upload request received");

    let bytes = match BASE64.decode(body.data.as_bytes()) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!(%user_id, %subscription_id, "logos: payload is not valid base64");
            return (
                StatusCode::BAD_REQUEST,
                "logo payload is not valid base64".to_string(),
            )
                .into_response();
        }
    };

    match usecase
        .upload_logo(subscription_id, &body.content_type, bytes)
        .await
    {
        Ok(logo_url) => Json(json!({ "logo": logo_url })).into_response(),
        Err(err) => {
            warn!(
                %user_id,
                %subscription_id,
                error = %err,
                "logos: upload rejected"
            );
            err.into_response()
        }
    }
}
