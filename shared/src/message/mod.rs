//! Change notification payloads
//!
//! Broadcast by the server whenever a pricing input changes so that
//! subscribed dashboards re-run their estimates against fresh data.

use serde::{Deserialize, Serialize};

/// Resource names carried in [`SyncPayload::resource`]
pub mod resource {
    pub const PRICING_CONFIG: &str = "pricing_config";
    pub const COUPON: &str = "coupon";
    pub const ACCOUNT: &str = "account";
    pub const CAMPAIGN: &str = "campaign";
}

/// Sync signal (server -> clients)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type (see [`resource`])
    pub resource: String,
    /// Monotonic per-resource version
    pub version: u64,
    /// Change type ("created", "updated", "deleted")
    pub action: String,
    /// Record ID (coupon code, account id, ...)
    pub id: String,
    /// Record data (None for deletions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
