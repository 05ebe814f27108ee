use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::SubscriptionEntity,
    value_objects::{
        due_dates::{self, INVALID_DATE_DAYS},
        enums::payment_statuses::PaymentStatus,
    },
};

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

/// Application-level view of a subscription row. `days_remaining` and
/// `payment_status` are recomputed from `next_payment_date` on every read and
/// are never taken from storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub company_name: String,
    pub client_name: String,
    pub logo: Option<String>,
    pub whatsapp_number: String,
    pub website_url: String,
    pub admin_url: String,
    pub notion_url: Option<String>,
    pub next_payment_date: String,
    pub days_remaining: i64,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionModel {
    /// Fails only when the row carries no due date at all; field-level
    /// problems (blank names, a garbled date string) degrade in place.
    pub fn from_entity(entity: &SubscriptionEntity, today: NaiveDate) -> Result<Self> {
        let next_payment_date = entity
            .next_payment_date
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("subscription row is missing its due date"))?;

        Ok(Self {
            id: entity.id,
            company_name: display_name(entity.company_name.as_deref(), UNKNOWN_COMPANY),
            client_name: display_name(entity.client_name.as_deref(), UNKNOWN_CLIENT),
            logo: entity.logo.clone(),
            whatsapp_number: entity.whatsapp_number.clone().unwrap_or_default(),
            website_url: entity.website_url.clone().unwrap_or_default(),
            admin_url: entity.admin_url.clone().unwrap_or_default(),
            notion_url: entity.notion_url.clone(),
            days_remaining: due_dates::days_until(&next_payment_date, today),
            payment_status: due_dates::derive_payment_status(&next_payment_date, today),
            next_payment_date,
            notes: entity.notes.clone(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Clearly-marked substitute for a row that could not be transformed.
    pub fn fallback(entity: &SubscriptionEntity) -> Self {
        Self {
            id: entity.id,
            company_name: UNKNOWN_COMPANY.to_string(),
            client_name: UNKNOWN_CLIENT.to_string(),
            logo: None,
            whatsapp_number: String::new(),
            website_url: String::new(),
            admin_url: String::new(),
            notion_url: None,
            next_payment_date: String::new(),
            days_remaining: INVALID_DATE_DAYS,
            payment_status: PaymentStatus::Overdue,
            notes: None,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

fn display_name(raw: Option<&str>, fallback: &str) -> String {
    match raw {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => fallback.to_string(),
    }
}

/// One output record per input row, in input order. A row that fails to
/// transform is replaced by a fallback record instead of aborting the batch.
pub fn transform_all(entities: &[SubscriptionEntity], today: NaiveDate) -> Vec<SubscriptionModel> {
    entities
        .iter()
        .map(|entity| match SubscriptionModel::from_entity(entity, today) {
            Ok(model) => model,
            Err(err) => {
                warn!(
                    subscription_id = %entity.id,
                    error = %err,
                    "subscriptions: replacing malformed row with fallback record"
                );
                SubscriptionModel::fallback(entity)
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertSubscriptionModel {
    pub company_name: String,
    pub client_name: String,
    pub whatsapp_number: String,
    pub website_url: String,
    pub admin_url: String,
    pub notion_url: Option<String>,
    pub next_payment_date: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubscriptionModel {
    pub company_name: String,
    pub client_name: String,
    pub whatsapp_number: String,
    pub website_url: String,
    pub admin_url: String,
    pub notion_url: Option<String>,
    pub next_payment_date: String,
    pub notes: Option<String>,
}
