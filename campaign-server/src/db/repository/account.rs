//! Account Repository
//!
//! Balances are only ever changed with guarded single-statement updates,
//! so a debit can never take a balance below zero and a deposit can never
//! take it above `MAX_MONEY_AMOUNT`.

use async_trait::async_trait;
use shared::error::ErrorCode;
use shared::models::{Account, AccountCreate, MAX_MONEY_AMOUNT, validate_amount};
use sqlx::{SqliteConnection, SqlitePool};

use super::{BalanceStore, RepoError, RepoResult};

#[derive(Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, name, balance, created_at, updated_at FROM account WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    pub async fn create(&self, data: AccountCreate) -> RepoResult<Account> {
        let balance = data.initial_balance.unwrap_or(0.0);
        validate_amount(balance, "initial_balance", MAX_MONEY_AMOUNT, ErrorCode::ValidationFailed)
            .map_err(|e| RepoError::Validation(e.message))?;

        let now = shared::util::now_millis();
        let account = Account {
            id: shared::util::snowflake_id(),
            name: data.name.trim().to_string(),
            balance,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO account (id, name, balance, created_at, updated_at) VALUES (?, ?, ROUND(?, 2), ?, ?)",
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(account.balance)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(account.id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }

    /// Add funds; returns the updated account
    pub async fn deposit(&self, id: i64, amount: f64) -> RepoResult<Account> {
        validate_amount(amount, "amount", MAX_MONEY_AMOUNT, ErrorCode::DepositInvalidAmount)
            .map_err(|e| RepoError::Validation(e.message))?;
        if amount == 0.0 {
            return Err(RepoError::Validation(
                "deposit amount must be positive, got 0".to_string(),
            ));
        }

        let result = sqlx::query(
            "UPDATE account SET balance = ROUND(balance + ?1, 2), updated_at = ?2 \
             WHERE id = ?3 AND balance + ?1 <= ?4",
        )
        .bind(amount)
        .bind(shared::util::now_millis())
        .bind(id)
        .bind(MAX_MONEY_AMOUNT)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(id).await? {
                Some(account) => Err(RepoError::Validation(format!(
                    "deposit would take the balance above {MAX_MONEY_AMOUNT} (current {})",
                    account.balance
                ))),
                None => Err(RepoError::NotFound(format!("Account {id} not found"))),
            };
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Account {id} not found")))
    }

    /// Take `amount` off the balance inside the caller's transaction.
    ///
    /// Returns false, leaving the balance untouched, when funds are short.
    pub async fn debit(conn: &mut SqliteConnection, id: i64, amount: f64) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE account SET balance = ROUND(balance - ?1, 2), updated_at = ?2 \
             WHERE id = ?3 AND balance >= ?1",
        )
        .bind(amount)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl BalanceStore for AccountRepository {
    async fn balance_of(&self, account_id: i64) -> RepoResult<Option<f64>> {
        let balance: Option<(f64,)> = sqlx::query_as("SELECT balance FROM account WHERE id = ?")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(balance.map(|(b,)| b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> AccountRepository {
        let db = DbService::in_memory().await.unwrap();
        AccountRepository::new(db.pool)
    }

    fn brand(balance: Option<f64>) -> AccountCreate {
        AccountCreate {
            name: "Acme Shoes".to_string(),
            initial_balance: balance,
        }
    }

    #[tokio::test]
    async fn test_create_and_read_balance() {
        let repo = repo().await;
        let account = repo.create(brand(Some(500.0))).await.unwrap();
        assert_eq!(account.balance, 500.0);
        assert_eq!(repo.balance_of(account.id).await.unwrap(), Some(500.0));
        assert_eq!(repo.balance_of(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_balance() {
        let err = repo().await.create(brand(Some(-1.0))).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn test_deposit() {
        let repo = repo().await;
        let account = repo.create(brand(None)).await.unwrap();
        let account = repo.deposit(account.id, 0.1).await.unwrap();
        let account = repo.deposit(account.id, 0.2).await.unwrap();
        assert_eq!(account.balance, 0.3);

        assert!(matches!(repo.deposit(account.id, 0.0).await, Err(RepoError::Validation(_))));
        assert!(matches!(repo.deposit(7, 10.0).await, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_balance_limit() {
        let repo = repo().await;
        let err = repo.create(brand(Some(1e30))).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        let account = repo.create(brand(Some(MAX_MONEY_AMOUNT - 1.0))).await.unwrap();
        assert!(matches!(repo.deposit(account.id, 1e30).await, Err(RepoError::Validation(_))));
        assert!(matches!(repo.deposit(account.id, 2.0).await, Err(RepoError::Validation(_))));
        assert_eq!(repo.balance_of(account.id).await.unwrap(), Some(MAX_MONEY_AMOUNT - 1.0));

        let account = repo.deposit(account.id, 1.0).await.unwrap();
        assert_eq!(account.balance, MAX_MONEY_AMOUNT);
    }

    #[tokio::test]
    async fn test_debit_is_guarded() {
        let repo = repo().await;
        let account = repo.create(brand(Some(720.0))).await.unwrap();

        let mut conn = repo.pool.acquire().await.unwrap();
        assert!(!AccountRepository::debit(&mut *conn, account.id, 720.01).await.unwrap());
        assert!(AccountRepository::debit(&mut *conn, account.id, 720.0).await.unwrap());
        assert!(!AccountRepository::debit(&mut *conn, account.id, 0.01).await.unwrap());
        drop(conn);

        assert_eq!(repo.balance_of(account.id).await.unwrap(), Some(0.0));
    }
}
