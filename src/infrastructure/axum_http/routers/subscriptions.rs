use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usecases::subscriptions::{SubscriptionUseCase, UtcClock},
    domain::{
        repositories::subscriptions::SubscriptionRepository,
        value_objects::{
            enums::{
                sort_keys::{SortKey, SortOrder},
                status_filters::StatusFilter,
            },
            subscription_filters::SubscriptionFilter,
            subscriptions::{InsertSubscriptionModel, UpdateSubscriptionModel},
        },
    },
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{
            postgres_connection::PgPoolSquad, repositories::subscriptions::SubscriptionPostgres,
        },
    },
};

#[derive(Debug, Deserialize)]
pub struct ListSubscriptionsQuery {
    search: Option<String>,
    status: Option<String>,
    due_soon: Option<bool>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

impl ListSubscriptionsQuery {
    // Unknown enum values fall back to the defaults rather than failing the
    // request, mirroring the dropdowns they come from.
    fn into_filter(self) -> SubscriptionFilter {
        SubscriptionFilter {
            search: self.search.unwrap_or_default(),
            status: self
                .status
                .as_deref()
                .map(StatusFilter::from_str)
                .unwrap_or_default(),
            due_soon_only: self.due_soon.unwrap_or(false),
            sort_by: self
                .sort_by
                .as_deref()
                .map(SortKey::from_str)
                .unwrap_or_default(),
            sort_order: self
                .sort_order
                .as_deref()
                .map(SortOrder::from_str)
                .unwrap_or_default(),
        }
    }
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let subscription_usecase =
        SubscriptionUseCase::new(Arc::new(subscription_repository), Arc::new(UtcClock));

    Router::new()
        .route("/", get(list_subscriptions).post(create_subscription))
        .route("/stats", get(dashboard_stats))
        .route(
            "/:subscription_id",
            get(get_subscription)
                .put(update_subscription)
                .delete(delete_subscription),
        )
        .with_state(Arc::new(subscription_usecase))
}

pub async fn list_subscriptions<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    AuthUser { user_id, .. }: AuthUser,
    Query(query): Query<ListSubscriptionsQuery>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(%user_id, "subscriptions: list request received");
    let filter = query.into_filter();

    match usecase.list_subscriptions(&filter).await {
        Ok(records) => Json(records).into_response(),
        Err(err) => {
            error!(%user_id, error = %err, "subscriptions: failed to list records");
            err.into_response()
        }
    }
}

pub async fn dashboard_stats<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(%user_id, "subscriptions: stats request received");
    match usecase.dashboard_stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => {
            error!(%user_id, error = %err, "subscriptions: failed to load stats");
            err.into_response()
        }
    }
}

pub async fn get_subscription<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "subscriptions: detail request received");
    match usecase.get_subscription(subscription_id).await {
        Ok(record) => Json(record).into_response(),
        Err(err) => {
            warn!(
                %user_id,
                %subscription_id,
                error = %err,
                "subscriptions: failed to load record"
            );
            err.into_response()
        }
    }
}

pub async fn create_subscription<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(insert_subscription_model): Json<InsertSubscriptionModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(%user_id, "subscriptions: create request received");
    match usecase.create_subscription(insert_subscription_model).await {
        Ok(subscription_id) => (
            StatusCode::CREATED,
            Json(json!({ "id": subscription_id })),
        )
            .into_response(),
        Err(err) => {
            warn!(%user_id, error = %err, "subscriptions: create rejected");
            err.into_response()
        }
    }
}

pub async fn update_subscription<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
    Json(update_subscription_model): Json<UpdateSubscriptionModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "subscriptions: update request received");
    match usecase
        .update_subscription(subscription_id, update_subscription_model)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            warn!(
                %user_id,
                %subscription_id,
                error = %err,
                "subscriptions: update rejected"
            );
            err.into_response()
        }
    }
}

pub async fn delete_subscription<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "subscriptions: delete request received");
    match usecase.delete_subscription(subscription_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            warn!(
                %user_id,
                %subscription_id,
                error = %err,
                "subscriptions: delete rejected"
            );
            err.into_response()
        }
    }
}
