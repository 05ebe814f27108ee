use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    enums::{
        sort_keys::{SortKey, SortOrder},
        status_filters::StatusFilter,
    },
    subscriptions::SubscriptionModel,
};

pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionFilter {
    pub search: String,
    pub status: StatusFilter,
    pub due_soon_only: bool,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

/// Strictly future-but-near. Overdue and due-today records already sit in a
/// more urgent bucket, and the invalid-date sentinel never qualifies.
pub fn is_due_soon(days_remaining: i64) -> bool {
    days_remaining > 0 && days_remaining <= DUE_SOON_WINDOW_DAYS
}

pub fn matches(record: &SubscriptionModel, filter: &SubscriptionFilter) -> bool {
    let search = filter.search.trim().to_lowercase();
    let matches_search = search.is_empty()
        || record.company_name.to_lowercase().contains(&search)
        || record.client_name.to_lowercase().contains(&search);
    let matches_status = filter.status.matches(record.payment_status);
    let matches_due_soon = !filter.due_soon_only || is_due_soon(record.days_remaining);

    matches_search && matches_status && matches_due_soon
}

/// Keeps the records passing every predicate, in their input order. Sorting
/// is a separate concern layered on top via [`sort`].
pub fn apply(
    records: Vec<SubscriptionModel>,
    filter: &SubscriptionFilter,
) -> Vec<SubscriptionModel> {
    records
        .into_iter()
        .filter(|record| matches(record, filter))
        .collect()
}

/// Stable sort, so records comparing equal keep their relative order.
pub fn sort(records: &mut [SubscriptionModel], sort_by: SortKey, sort_order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = match sort_by {
            SortKey::CompanyName => a
                .company_name
                .to_lowercase()
                .cmp(&b.company_name.to_lowercase()),
            SortKey::DaysRemaining => a.days_remaining.cmp(&b.days_remaining),
            SortKey::NextPaymentDate => a.next_payment_date.cmp(&b.next_payment_date),
        };
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;

    fn record(company: &str, client: &str, days: i64, status: PaymentStatus) -> SubscriptionModel {
        let now = DateTime::parse_from_rfc3339("2025-06-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        SubscriptionModel {
            id: Uuid::new_v4(),
            company_name: company.to_string(),
            client_name: client.to_string(),
            logo: None,
            whatsapp_number: String::new(),
            website_url: String::new(),
            admin_url: String::new(),
            notion_url: None,
            next_payment_date: "2025-06-20".to_string(),
            days_remaining: days,
            payment_status: status,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn due_soon_keeps_only_strictly_future_near_records() {
        let records: Vec<SubscriptionModel> = [-1, 0, 3, 7, 8, 30]
            .into_iter()
            .map(|days| record("Acme", "Client", days, PaymentStatus::Paid))
            .collect();

        let filter = SubscriptionFilter {
            due_soon_only: true,
            ..Default::default()
        };
        let kept = apply(records, &filter);

        let days: Vec<i64> = kept.iter().map(|r| r.days_remaining).collect();
        assert_eq!(days, vec![3, 7]);
    }

    #[test]
    fn search_matches_company_or_client_case_insensitively() {
        let records = vec![
            record("EasyWeb SARL", "Jean Dupont", 10, PaymentStatus::Paid),
            record("Acme", "Marie Martin", 10, PaymentStatus::Paid),
            record("Dupont & Fils", "Luc Bernard", 10, PaymentStatus::Paid),
        ];

        let filter = SubscriptionFilter {
            search: "dupont".to_string(),
            ..Default::default()
        };
        let kept = apply(records, &filter);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].client_name, "Jean Dupont");
        assert_eq!(kept[1].company_name, "Dupont & Fils");
    }

    #[test]
    fn status_filter_all_passes_everything() {
        let records = vec![
            record("A", "a", 5, PaymentStatus::Paid),
            record("B", "b", 0, PaymentStatus::Pending),
            record("C", "c", -3, PaymentStatus::Overdue),
        ];

        assert_eq!(apply(records.clone(), &SubscriptionFilter::default()).len(), 3);

        let filter = SubscriptionFilter {
            status: StatusFilter::Overdue,
            ..Default::default()
        };
        let kept = apply(records, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].company_name, "C");
    }

    #[test]
    fn apply_preserves_input_order() {
        let records = vec![
            record("Zeta", "z", 9, PaymentStatus::Paid),
            record("Alpha", "a", 2, PaymentStatus::Paid),
            record("Mid", "m", 5, PaymentStatus::Paid),
        ];

        let kept = apply(records, &SubscriptionFilter::default());
        let companies: Vec<&str> = kept.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(companies, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn sorts_by_each_key_in_both_orders() {
        let mut records = vec![
            record("beta", "b", 8, PaymentStatus::Paid),
            record("Alpha", "a", -2, PaymentStatus::Overdue),
            record("gamma", "c", 3, PaymentStatus::Paid),
        ];

        sort(&mut records, SortKey::CompanyName, SortOrder::Asc);
        let companies: Vec<&str> = records.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(companies, vec!["Alpha", "beta", "gamma"]);

        sort(&mut records, SortKey::DaysRemaining, SortOrder::Desc);
        let days: Vec<i64> = records.iter().map(|r| r.days_remaining).collect();
        assert_eq!(days, vec![8, 3, -2]);
    }

    #[test]
    fn sort_is_stable_on_equal_keys() {
        let mut records = vec![
            record("First", "a", 5, PaymentStatus::Paid),
            record("Second", "b", 5, PaymentStatus::Paid),
            record("Third", "c", 5, PaymentStatus::Paid),
        ];

        sort(&mut records, SortKey::DaysRemaining, SortOrder::Asc);
        let companies: Vec<&str> = records.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(companies, vec!["First", "Second", "Third"]);
    }
}
