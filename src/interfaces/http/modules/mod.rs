pub mod games;
pub mod health;
pub mod metrics;
pub mod request_id;
