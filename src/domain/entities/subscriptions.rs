use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::subscriptions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscriptions)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub client_name: Option<String>,
    pub logo: Option<String>,
    pub whatsapp_number: Option<String>,
    pub website_url: Option<String>,
    pub admin_url: Option<String>,
    pub notion_url: Option<String>,
    pub next_payment_date: Option<String>,
    // Legacy columns kept for older rows; status and day counts are derived
    // from next_payment_date on every read.
    pub days_remaining: Option<i32>,
    pub payment_status: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub struct InsertSubscriptionEntity {
    pub company_name: Option<String>,
    pub client_name: Option<String>,
    pub whatsapp_number: Option<String>,
    pub website_url: Option<String>,
    pub admin_url: Option<String>,
    pub notion_url: Option<String>,
    pub next_payment_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = subscriptions, treat_none_as_null = true)]
pub struct UpdateSubscriptionEntity {
    pub company_name: Option<String>,
    pub client_name: Option<String>,
    pub whatsapp_number: Option<String>,
    pub website_url: Option<String>,
    pub admin_url: Option<String>,
    pub notion_url: Option<String>,
    pub next_payment_date: Option<String>,
    pub notes: Option<String>,
}
