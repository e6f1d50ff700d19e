pub mod axum_http;
pub mod mux;
pub mod postgres;
