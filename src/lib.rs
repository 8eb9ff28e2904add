pub mod checkout;
pub mod config;
pub mod error;
pub mod events;
pub mod grace;
pub mod handlers;
pub mod machine;
pub mod models;
pub mod payment;
pub mod query;
pub mod stores;
pub mod utils;

pub const DEFAULT_GRACE_PERIOD_MS: u64 = 5_000;
pub const DEFAULT_PROCESSED_BY: &str = "System";
