use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    enums::payment_statuses::PaymentStatus, subscription_filters::is_due_soon,
    subscriptions::SubscriptionModel,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStatsModel {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub overdue: usize,
    pub due_soon: usize,
}

pub fn count_records(records: &[SubscriptionModel]) -> DashboardStatsModel {
    DashboardStatsModel {
        total: records.len(),
        paid: count_with_status(records, PaymentStatus::Paid),
        pending: count_with_status(records, PaymentStatus::Pending),
        overdue: count_with_status(records, PaymentStatus::Overdue),
        due_soon: records
            .iter()
            .filter(|record| is_due_soon(record.days_remaining))
            .count(),
    }
}

fn count_with_status(records: &[SubscriptionModel], status: PaymentStatus) -> usize {
    records
        .iter()
        .filter(|record| record.payment_status == status)
        .count()
}
