pub mod dashboard;
pub mod due_dates;
pub mod enums;
pub mod subscription_filters;
pub mod subscriptions;
