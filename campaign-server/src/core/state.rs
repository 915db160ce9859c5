use std::sync::Arc;

use anyhow::Context;
use dashmap::DashMap;
use shared::message::SyncPayload;
use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::core::{Config, Result};
use crate::db::DbService;

/// Per-resource version counters
///
/// Every [`ServerState::broadcast_sync`] bumps the counter of its resource
/// so subscribers can tell stale notifications from fresh ones.
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new version (first call returns 1)
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version, 0 for resources never changed
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// Shared server state
///
/// Cheap to clone; every field is a handle.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | Immutable configuration |
/// | db | DbService | SQLite pool |
/// | resource_versions | Arc<ResourceVersions> | Sync version counters |
/// | events | broadcast::Sender<SyncPayload> | Change notifications |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub resource_versions: Arc<ResourceVersions>,
    pub events: broadcast::Sender<SyncPayload>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let (events, _) = broadcast::channel(config.event_channel_capacity);
        Self {
            config,
            db,
            resource_versions: Arc::new(ResourceVersions::new()),
            events,
        }
    }

    /// Prepare the working directory and open the database
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .with_context(|| format!("Cannot create work dir {}", config.work_dir))?;

        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db))
    }

    pub fn pool(&self) -> SqlitePool {
        self.db.pool.clone()
    }

    /// New receiver for change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.events.subscribe()
    }

    /// Notify subscribers that a pricing input changed
    ///
    /// Sending with no subscriber is not an error.
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        let receivers = self.events.send(payload).unwrap_or(0);
        tracing::debug!(resource, action, id, version, receivers, "Sync broadcast");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::resource;

    #[test]
    fn test_versions_increment_per_resource() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get(resource::COUPON), 0);
        assert_eq!(versions.increment(resource::COUPON), 1);
        assert_eq!(versions.increment(resource::COUPON), 2);
        assert_eq!(versions.increment(resource::ACCOUNT), 1);
        assert_eq!(versions.get(resource::COUPON), 2);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let db = DbService::in_memory().await.unwrap();
        let state = ServerState::new(Config::with_overrides("/tmp/vk-state", 0), db);
        let mut rx = state.subscribe();

        state.broadcast_sync(resource::COUPON, "updated", "REEL10", Some(&serde_json::json!({ "used": 3 })));
        state.broadcast_sync::<()>(resource::COUPON, "deleted", "REEL10", None);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.version, 1);
        assert_eq!(first.id, "REEL10");
        assert!(first.data.is_some());

        let second = rx.recv().await.unwrap();
        assert_eq!(second.version, 2);
        assert_eq!(second.action, "deleted");
        assert!(second.data.is_none());
    }

    #[tokio::test]
    async fn test_broadcast_without_subscribers() {
        let db = DbService::in_memory().await.unwrap();
        let state = ServerState::new(Config::with_overrides("/tmp/vk-state", 0), db);
        state.broadcast_sync::<()>(resource::PRICING_CONFIG, "updated", "1", None);
        assert_eq!(state.resource_versions.get(resource::PRICING_CONFIG), 1);
    }
}
