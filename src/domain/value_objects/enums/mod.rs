pub mod payment_statuses;
pub mod sort_keys;
pub mod status_filters;
