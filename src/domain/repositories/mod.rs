pub mod logo_storage;
pub mod subscriptions;
