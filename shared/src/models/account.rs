//! Account Model
//!
//! A brand account and its spendable balance.

use serde::{Deserialize, Serialize};

/// Account entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub name: String,
    /// Spendable balance
    pub balance: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub name: String,
    pub initial_balance: Option<f64>,
}

/// Deposit payload (POST /api/accounts/{id}/deposit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositRequest {
    pub amount: f64,
}

/// Balance read result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account_id: i64,
    pub balance: f64,
}
