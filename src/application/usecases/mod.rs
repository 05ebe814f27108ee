pub mod logos;
pub mod subscriptions;
