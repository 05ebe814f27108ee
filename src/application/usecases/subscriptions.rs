use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, UpdateSubscriptionEntity},
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        dashboard::{self, DashboardStatsModel},
        due_dates,
        subscription_filters::{self, SubscriptionFilter},
        subscriptions::{
            InsertSubscriptionModel, SubscriptionModel, UpdateSubscriptionModel, transform_all,
        },
    },
};

/// Injected "today" so derivation is testable against a pinned date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("subscription not found")]
    NotFound,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("next_payment_date must be a YYYY-MM-DD date")]
    InvalidDueDate,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::NotFound => StatusCode::NOT_FOUND,
            SubscriptionError::MissingField(_) | SubscriptionError::InvalidDueDate => {
                StatusCode::BAD_REQUEST
            }
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            subscription_repo,
            clock,
        }
    }

    pub async fn list_subscriptions(
        &self,
        filter: &SubscriptionFilter,
    ) -> UseCaseResult<Vec<SubscriptionModel>> {
        info!("subscriptions: listing records");
        let entities = self.subscription_repo.list_all().await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to load rows");
            SubscriptionError::Internal(err)
        })?;

        let today = self.clock.today();
        let records = transform_all(&entities, today);
        let mut records = subscription_filters::apply(records, filter);
        subscription_filters::sort(&mut records, filter.sort_by, filter.sort_order);

        info!(
            record_count = records.len(),
            "subscriptions: list ready after filtering"
        );
        Ok(records)
    }

    pub async fn get_subscription(&self, subscription_id: Uuid) -> UseCaseResult<SubscriptionModel> {
        let entity = self
            .subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to load row"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%subscription_id, "subscriptions: record not found");
                SubscriptionError::NotFound
            })?;

        let today = self.clock.today();
        Ok(match SubscriptionModel::from_entity(&entity, today) {
            Ok(model) => model,
            Err(err) => {
                warn!(
                    %subscription_id,
                    error = %err,
                    "subscriptions: returning fallback record for malformed row"
                );
                SubscriptionModel::fallback(&entity)
            }
        })
    }

    pub async fn create_subscription(
        &self,
        insert_subscription_model: InsertSubscriptionModel,
    ) -> UseCaseResult<Uuid> {
        let entity = validate_insert(insert_subscription_model)?;

        let subscription_id = self.subscription_repo.create(entity).await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to insert row");
            SubscriptionError::Internal(err)
        })?;

        info!(%subscription_id, "subscriptions: record created");
        Ok(subscription_id)
    }

    pub async fn update_subscription(
        &self,
        subscription_id: Uuid,
        update_subscription_model: UpdateSubscriptionModel,
    ) -> UseCaseResult<()> {
        let changes = validate_update(update_subscription_model)?;

        let affected = self
            .subscription_repo
            .update(subscription_id, changes)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to update row"
                );
                SubscriptionError::Internal(err)
            })?;

        if affected == 0 {
            warn!(%subscription_id, "subscriptions: update matched no row");
            return Err(SubscriptionError::NotFound);
        }

        info!(%subscription_id, "subscriptions: record updated");
        Ok(())
    }

    pub async fn delete_subscription(&self, subscription_id: Uuid) -> UseCaseResult<()> {
        let affected = self
            .subscription_repo
            .delete(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to delete row"
                );
                SubscriptionError::Internal(err)
            })?;

        if affected == 0 {
            warn!(%subscription_id, "subscriptions: delete matched no row");
            return Err(SubscriptionError::NotFound);
        }

        info!(%subscription_id, "subscriptions: record deleted");
        Ok(())
    }

    pub async fn dashboard_stats(&self) -> UseCaseResult<DashboardStatsModel> {
        let entities = self.subscription_repo.list_all().await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to load rows for stats");
            SubscriptionError::Internal(err)
        })?;

        let records = transform_all(&entities, self.clock.today());
        Ok(dashboard::count_records(&records))
    }
}

fn validate_insert(model: InsertSubscriptionModel) -> UseCaseResult<InsertSubscriptionEntity> {
    let company_name = required_text(model.company_name, "company_name")?;
    let client_name = required_text(model.client_name, "client_name")?;
    let next_payment_date = valid_due_date(model.next_payment_date)?;

    Ok(InsertSubscriptionEntity {
        company_name: Some(company_name),
        client_name: Some(client_name),
        whatsapp_number: optional_text(model.whatsapp_number),
        website_url: optional_text(model.website_url),
        admin_url: optional_text(model.admin_url),
        notion_url: model.notion_url.and_then(optional_text),
        next_payment_date: Some(next_payment_date),
        notes: model.notes.and_then(optional_text),
    })
}

fn validate_update(model: UpdateSubscriptionModel) -> UseCaseResult<UpdateSubscriptionEntity> {
    let company_name = required_text(model.company_name, "company_name")?;
    let client_name = required_text(model.client_name, "client_name")?;
    let next_payment_date = valid_due_date(model.next_payment_date)?;

    Ok(UpdateSubscriptionEntity {
        company_name: Some(company_name),
        client_name: Some(client_name),
        whatsapp_number: optional_text(model.whatsapp_number),
        website_url: optional_text(model.website_url),
        admin_url: optional_text(model.admin_url),
        notion_url: model.notion_url.and_then(optional_text),
        next_payment_date: Some(next_payment_date),
        notes: model.notes.and_then(optional_text),
    })
}

fn required_text(value: String, field: &'static str) -> UseCaseResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        warn!(field, "subscriptions: rejected write with missing field");
        return Err(SubscriptionError::MissingField(field));
    }
    Ok(trimmed)
}

fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

fn valid_due_date(value: String) -> UseCaseResult<String> {
    let trimmed = value.trim().to_string();
    if due_dates::parse_due_date(&trimmed).is_none() {
        warn!(
            raw_due_date = %trimmed,
            "subscriptions: rejected write with unparseable due date"
        );
        return Err(SubscriptionError::InvalidDueDate);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use mockall::predicate::eq;

    use crate::domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::subscriptions::MockSubscriptionRepository,
        value_objects::enums::{
            payment_statuses::PaymentStatus, sort_keys::SortKey, status_filters::StatusFilter,
        },
    };

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn usecase(
        subscription_repo: MockSubscriptionRepository,
    ) -> SubscriptionUseCase<MockSubscriptionRepository> {
        SubscriptionUseCase::new(Arc::new(subscription_repo), Arc::new(FixedClock(fixed_today())))
    }

    fn sample_entity(company: &str, due_date: Option<&str>) -> SubscriptionEntity {
        let now = DateTime::parse_from_rfc3339("2025-06-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        SubscriptionEntity {
            id: Uuid::new_v4(),
            company_name: Some(company.to_string()),
            client_name: Some("Jean Dupont".to_string()),
            logo: None,
            whatsapp_number: Some("+33 6 12 34 56 78".to_string()),
            website_url: Some("https://www.exemple.com".to_string()),
            admin_url: Some("https://admin.exemple.com".to_string()),
            notion_url: None,
            next_payment_date: due_date.map(str::to_string),
            days_remaining: None,
            payment_status: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_insert_model() -> InsertSubscriptionModel {
        InsertSubscriptionModel {
            company_name: "Acme".to_string(),
            client_name: "Jean Dupont".to_string(),
            whatsapp_number: "+33 6 12 34 56 78".to_string(),
            website_url: "https://www.exemple.com".to_string(),
            admin_url: "https://admin.exemple.com".to_string(),
            notion_url: None,
            next_payment_date: "2025-07-01".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn list_transforms_filters_and_sorts() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let entities = vec![
            sample_entity("Gamma", Some("2025-06-25")),
            sample_entity("Alpha", Some("2025-06-14")),
            sample_entity("Beta", Some("2025-06-18")),
        ];
        subscription_repo.expect_list_all().returning(move || {
            let entities = entities.clone();
            Box::pin(async move { Ok(entities) })
        });

        let filter = SubscriptionFilter {
            status: StatusFilter::Paid,
            sort_by: SortKey::DaysRemaining,
            ..Default::default()
        };
        let records = usecase(subscription_repo)
            .list_subscriptions(&filter)
            .await
            .unwrap();

        let companies: Vec<&str> = records.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(companies, vec!["Beta", "Gamma"]);
        assert_eq!(records[0].days_remaining, 3);
        assert_eq!(records[0].payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn list_keeps_malformed_rows_visible_as_fallbacks() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let entities = vec![
            sample_entity("Good", Some("2025-06-20")),
            sample_entity("Broken", None),
        ];
        subscription_repo.expect_list_all().returning(move || {
            let entities = entities.clone();
            Box::pin(async move { Ok(entities) })
        });

        let filter = SubscriptionFilter {
            sort_by: SortKey::CompanyName,
            ..Default::default()
        };
        let records = usecase(subscription_repo)
            .list_subscriptions(&filter)
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.company_name == "Unknown Company"
            && r.payment_status == PaymentStatus::Overdue));
    }

    #[tokio::test]
    async fn get_returns_derived_record() {
        let entity = sample_entity("Acme", Some("2025-06-30"));
        let subscription_id = entity.id;

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_id()
            .with(eq(subscription_id))
            .returning(move |_| {
                let entity = entity.clone();
                Box::pin(async move { Ok(Some(entity)) })
            });

        let record = usecase(subscription_repo)
            .get_subscription(subscription_id)
            .await
            .unwrap();

        assert_eq!(record.days_remaining, 15);
        assert_eq!(record.payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn get_maps_missing_row_to_not_found() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let err = usecase(subscription_repo)
            .get_subscription(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::NotFound));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_persists_editable_fields_only() {
        let new_id = Uuid::new_v4();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_create()
            .withf(|entity| {
                entity.company_name.as_deref() == Some("Acme")
                    && entity.next_payment_date.as_deref() == Some("2025-07-01")
            })
            .returning(move |_| Box::pin(async move { Ok(new_id) }));

        let created = usecase(subscription_repo)
            .create_subscription(sample_insert_model())
            .await
            .unwrap();

        assert_eq!(created, new_id);
    }

    #[tokio::test]
    async fn create_rejects_blank_company_name() {
        let subscription_repo = MockSubscriptionRepository::new();
        let mut model = sample_insert_model();
        model.company_name = "   ".to_string();

        let err = usecase(subscription_repo)
            .create_subscription(model)
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::MissingField("company_name")));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_unparseable_due_date() {
        let subscription_repo = MockSubscriptionRepository::new();
        let mut model = sample_insert_model();
        model.next_payment_date = "soon".to_string();

        let err = usecase(subscription_repo)
            .create_subscription(model)
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::InvalidDueDate));
    }

    #[tokio::test]
    async fn update_maps_zero_affected_rows_to_not_found() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_update()
            .returning(|_, _| Box::pin(async { Ok(0) }));

        let model = UpdateSubscriptionModel {
            company_name: "Acme".to_string(),
            client_name: "Jean Dupont".to_string(),
            whatsapp_number: String::new(),
            website_url: String::new(),
            admin_url: String::new(),
            notion_url: None,
            next_payment_date: "2025-07-01".to_string(),
            notes: None,
        };
        let err = usecase(subscription_repo)
            .update_subscription(Uuid::new_v4(), model)
            .await
            .unwrap_err();

        assert!(matches!(err, SubscriptionError::NotFound));
    }

    #[tokio::test]
    async fn delete_succeeds_when_a_row_matched() {
        let subscription_id = Uuid::new_v4();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_delete()
            .with(eq(subscription_id))
            .returning(|_| Box::pin(async { Ok(1) }));

        usecase(subscription_repo)
            .delete_subscription(subscription_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn stats_count_derived_statuses() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let entities = vec![
            sample_entity("A", Some("2025-06-30")),
            sample_entity("B", Some("2025-06-18")),
            sample_entity("C", Some("2025-06-15")),
            sample_entity("D", Some("2025-06-10")),
        ];
        subscription_repo.expect_list_all().returning(move || {
            let entities = entities.clone();
            Box::pin(async move { Ok(entities) })
        });

        let stats = usecase(subscription_repo).dashboard_stats().await.unwrap();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.paid, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.due_soon, 1);
    }
}
