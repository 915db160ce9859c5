//! Coupon Repository

use async_trait::async_trait;
use shared::models::{
    Coupon, CouponCreate, CouponUpdate, UsageLimit, is_valid_percent, normalize_code,
};
use sqlx::{SqliteConnection, SqlitePool};

use super::{CouponStore, RepoError, RepoResult};

#[derive(sqlx::FromRow)]
struct CouponRow {
    code: String,
    discount_percent: f64,
    usage_limit: Option<i64>,
    used_count: i64,
    is_active: bool,
    created_at: i64,
    updated_at: i64,
}

impl CouponRow {
    fn into_coupon(self) -> Coupon {
        Coupon {
            code: self.code,
            discount_percent: self.discount_percent,
            usage_limit: UsageLimit::from_column(self.usage_limit),
            used_count: self.used_count,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const COLUMNS: &str =
    "code, discount_percent, usage_limit, used_count, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
}

impl CouponRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All coupons, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Coupon>> {
        let rows = sqlx::query_as::<_, CouponRow>(&format!(
            "SELECT {COLUMNS} FROM coupon ORDER BY created_at DESC, code"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CouponRow::into_coupon).collect())
    }

    /// Find by code (case-insensitive)
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Coupon>> {
        let row = sqlx::query_as::<_, CouponRow>(&format!(
            "SELECT {COLUMNS} FROM coupon WHERE code = ?"
        ))
        .bind(normalize_code(code))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(CouponRow::into_coupon))
    }

    /// Create a coupon; the code is stored normalized and must be unique
    pub async fn create(&self, data: CouponCreate) -> RepoResult<Coupon> {
        let code = normalize_code(&data.code);
        if code.is_empty() {
            return Err(RepoError::Validation("coupon code must not be empty".into()));
        }
        validate_shape(data.discount_percent, data.usage_limit)?;

        if self.find_by_code(&code).await?.is_some() {
            return Err(RepoError::Duplicate(format!("Coupon '{code}' already exists")));
        }

        let now = shared::util::now_millis();
        let coupon = Coupon {
            code,
            discount_percent: data.discount_percent,
            usage_limit: data.usage_limit,
            used_count: 0,
            is_active: data.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO coupon ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&coupon.code)
        .bind(coupon.discount_percent)
        .bind(coupon.usage_limit.to_column())
        .bind(coupon.used_count)
        .bind(coupon.is_active)
        .bind(coupon.created_at)
        .bind(coupon.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(coupon)
    }

    /// Partial update; the code itself never changes
    pub async fn update(&self, code: &str, data: CouponUpdate) -> RepoResult<Coupon> {
        let existing = self
            .find_by_code(code)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Coupon {code} not found")))?;

        let discount_percent = data.discount_percent.unwrap_or(existing.discount_percent);
        let usage_limit = data.usage_limit.unwrap_or(existing.usage_limit);
        let is_active = data.is_active.unwrap_or(existing.is_active);
        validate_shape(discount_percent, usage_limit)?;

        sqlx::query(
            "UPDATE coupon SET discount_percent = ?, usage_limit = ?, is_active = ?, updated_at = ? WHERE code = ?",
        )
        .bind(discount_percent)
        .bind(usage_limit.to_column())
        .bind(is_active)
        .bind(shared::util::now_millis())
        .bind(&existing.code)
        .execute(&self.pool)
        .await?;

        self.find_by_code(&existing.code)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Coupon {code} not found")))
    }

    /// Soft delete: deactivate so past campaigns keep their reference
    pub async fn deactivate(&self, code: &str) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE coupon SET is_active = 0, updated_at = ? WHERE code = ?")
            .bind(shared::util::now_millis())
            .bind(normalize_code(code))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count one redemption inside the caller's transaction.
    ///
    /// Returns false when the coupon is inactive, unknown or already at its
    /// limit, so concurrent submissions can never overshoot the limit.
    pub async fn consume(conn: &mut SqliteConnection, code: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE coupon SET used_count = used_count + 1, updated_at = ? \
             WHERE code = ? AND is_active = 1 AND (usage_limit IS NULL OR used_count < usage_limit)",
        )
        .bind(shared::util::now_millis())
        .bind(normalize_code(code))
        .execute(conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

fn validate_shape(discount_percent: f64, usage_limit: UsageLimit) -> RepoResult<()> {
    if !is_valid_percent(discount_percent) {
        return Err(RepoError::Validation(format!(
            "discount must be within 0-100, got {discount_percent}"
        )));
    }
    if let UsageLimit::Limited(limit) = usage_limit
        && limit <= 0
    {
        return Err(RepoError::Validation(format!(
            "usage limit must be positive, got {limit}"
        )));
    }
    Ok(())
}

#[async_trait]
impl CouponStore for CouponRepository {
    async fn find_coupon(&self, code: &str) -> RepoResult<Option<Coupon>> {
        self.find_by_code(code).await
    }
}
