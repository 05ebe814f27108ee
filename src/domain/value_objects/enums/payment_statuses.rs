use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Display/filter label derived from the due date. Never persisted as ground
/// truth; a row can move between any two states by editing its due date.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    #[default]
    Overdue,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        };
        write!(f, "{}", status)
    }
}

impl PaymentStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "paid" => PaymentStatus::Paid,
            "pending" => PaymentStatus::Pending,
            _ => PaymentStatus::Overdue,
        }
    }
}
