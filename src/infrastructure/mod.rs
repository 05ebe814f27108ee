pub mod axum_http;
pub mod postgres;
pub mod storage;
