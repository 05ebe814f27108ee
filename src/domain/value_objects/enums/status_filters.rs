use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Pending,
    Overdue,
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filter = match self {
            StatusFilter::All => "all",
            StatusFilter::Paid => "paid",
            StatusFilter::Pending => "pending",
            StatusFilter::Overdue => "overdue",
        };
        write!(f, "{}", filter)
    }
}

impl StatusFilter {
    pub fn from_str(value: &str) -> Self {
        match value {
            "all" => StatusFilter::All,
            "paid" => StatusFilter::Paid,
            "pending" => StatusFilter::Pending,
            "overdue" => StatusFilter::Overdue,
            _ => StatusFilter::All,
        }
    }

    pub fn matches(&self, status: PaymentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Paid => status == PaymentStatus::Paid,
            StatusFilter::Pending => status == PaymentStatus::Pending,
            StatusFilter::Overdue => status == PaymentStatus::Overdue,
        }
    }
}
