//! Pricing Configuration Repository
//!
//! Single-row configuration (id = 1) plus its tier set. Replacing the
//! configuration swaps the whole tier set in one transaction.

use async_trait::async_trait;
use shared::models::{DiscountTier, PricingConfig};
use sqlx::SqlitePool;

use super::{PricingConfigStore, RepoError, RepoResult};

const CONFIG_ID: i64 = 1;

#[derive(Clone)]
pub struct PricingConfigRepository {
    pool: SqlitePool,
}

impl PricingConfigRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read the current configuration with tiers in insertion order
    pub async fn get(&self) -> RepoResult<PricingConfig> {
        let row: Option<(f64, i64)> =
            sqlx::query_as("SELECT price_per_reel, updated_at FROM pricing_config WHERE id = ?")
                .bind(CONFIG_ID)
                .fetch_optional(&self.pool)
                .await?;

        // Seeded by the initial migration; absence means an unpriced service
        let (price_per_reel, updated_at) = row.unwrap_or((0.0, 0));

        let discount_tiers = sqlx::query_as::<_, DiscountTier>(
            "SELECT reels_threshold, discount_percent FROM discount_tier ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(PricingConfig {
            price_per_reel,
            discount_tiers,
            updated_at,
        })
    }

    /// Replace price and tier set
    pub async fn replace(&self, config: &PricingConfig) -> RepoResult<PricingConfig> {
        config
            .validate()
            .map_err(|e| RepoError::Validation(e.message))?;

        let now = shared::util::now_millis();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO pricing_config (id, price_per_reel, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET price_per_reel = excluded.price_per_reel, updated_at = excluded.updated_at",
        )
        .bind(CONFIG_ID)
        .bind(config.price_per_reel)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM discount_tier")
            .execute(&mut *tx)
            .await?;

        for tier in &config.discount_tiers {
            sqlx::query("INSERT INTO discount_tier (reels_threshold, discount_percent) VALUES (?, ?)")
                .bind(tier.reels_threshold)
                .bind(tier.discount_percent)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            price_per_reel = config.price_per_reel,
            tiers = config.discount_tiers.len(),
            "Pricing configuration replaced"
        );

        self.get().await
    }
}

#[async_trait]
impl PricingConfigStore for PricingConfigRepository {
    async fn current_config(&self) -> RepoResult<PricingConfig> {
        self.get().await
    }
}
