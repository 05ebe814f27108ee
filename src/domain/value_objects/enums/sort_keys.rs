use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CompanyName,
    #[default]
    DaysRemaining,
    NextPaymentDate,
}

impl SortKey {
    pub fn from_str(value: &str) -> Self {
        match value {
            "company_name" => SortKey::CompanyName,
            "days_remaining" => SortKey::DaysRemaining,
            "next_payment_date" => SortKey::NextPaymentDate,
            _ => SortKey::DaysRemaining,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_str(value: &str) -> Self {
        match value {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}
