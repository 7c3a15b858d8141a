//! KV store adapters and the well-known keys the service uses

mod memory;
mod overrides;
mod redis;

pub use memory::InMemoryKvStore;
pub use overrides::{
    CancelledAdsRepo, EditedAdsRepo, SentReportsRepo, CANCELLED_ADS_KEY, EDITED_ADS_KEY,
    SENT_REPORTS_KEY,
};
pub use redis::RedisKvStore;

/// Key for the site configuration document
pub const SITE_CONFIG_KEY: &str = "site_config";

/// Prefix for transient orders awaiting payment
pub const ORDER_KEY_PREFIX: &str = "order_";

/// Prefix for durable completed-order records
pub const COMPLETED_KEY_PREFIX: &str = "completed_";

/// KV key for a transient order awaiting payment
pub fn order_key(session_id: &str) -> String {
    format!("{ORDER_KEY_PREFIX}{session_id}")
}

/// KV key for a completed order record
pub fn completed_key(session_id: &str) -> String {
    format!("{COMPLETED_KEY_PREFIX}{session_id}")
}
