use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::credits::UserCreditsRow;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreditBalance {
    pub total_credits: i32,
    pub used_credits: i32,
}

impl CreditBalance {
    pub fn remaining(&self) -> i32 {
        (self.total_credits - self.used_credits).max(0)
    }
}

impl From<UserCreditsRow> for CreditBalance {
    fn from(row: UserCreditsRow) -> Self {
        Self {
            total_credits: row.total_credits,
            used_credits: row.used_credits,
        }
    }
}

/// Checks a deduction against a balance and returns the balance after it.
/// Every ledger applies this rule inside its own atomic step.
pub fn apply_deduction(balance: CreditBalance, amount: i32) -> Result<CreditBalance, AppError> {
    if amount <= 0 {
        return Err(AppError::Validation(format!(
            "Credit deduction must be positive, got {amount}"
        )));
    }
    if balance.remaining() < amount {
        return Err(AppError::InsufficientCredits {
            required: amount,
            available: balance.remaining(),
        });
    }
    Ok(CreditBalance {
        total_credits: balance.total_credits,
        used_credits: balance.used_credits + amount,
    })
}

/// Credit storage. `deduct` must be atomic against concurrent calls for the
/// same user: two 10-credit deductions on a 10-credit balance yield exactly
/// one success.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Missing users have a zero balance.
    async fn balance(&self, user_id: Uuid) -> Result<CreditBalance, AppError>;

    async fn deduct(&self, user_id: Uuid, amount: i32) -> Result<CreditBalance, AppError>;

    /// Gives back credits for an operation that failed after deducting.
    /// Never takes `used_credits` below zero.
    async fn refund(&self, user_id: Uuid, amount: i32) -> Result<CreditBalance, AppError>;

    /// Creates the user's ledger row with `amount` credits. No-op if one exists.
    async fn grant_initial(&self, user_id: Uuid, amount: i32) -> Result<(), AppError>;
}

/// Refunds after a failed paid operation. A refund failure is logged, not
/// surfaced, so the caller still sees the original error.
pub async fn refund_quietly(ledger: &dyn CreditLedger, user_id: Uuid, amount: i32) {
    match ledger.refund(user_id, amount).await {
        Ok(balance) => info!(
            "Refunded {amount} credits to user {user_id} ({} remaining)",
            balance.remaining()
        ),
        Err(e) => warn!("Failed to refund {amount} credits to user {user_id}: {e}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres ledger
// ────────────────────────────────────────────────────────────────────────────

pub struct PgCreditLedger {
    pool: PgPool,
}

impl PgCreditLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditLedger for PgCreditLedger {
    async fn balance(&self, user_id: Uuid) -> Result<CreditBalance, AppError> {
        let row = sqlx::query_as::<_, UserCreditsRow>("SELECT * FROM user_credits WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(CreditBalance::from).unwrap_or_default())
    }

    async fn deduct(&self, user_id: Uuid, amount: i32) -> Result<CreditBalance, AppError> {
        if amount <= 0 {
            return apply_deduction(CreditBalance::default(), amount);
        }

        // Check and write in one statement; row locking serialises concurrent callers.
        let updated = sqlx::query_as::<_, UserCreditsRow>(
            r#"
            UPDATE user_credits
            SET used_credits = used_credits + $2, updated_at = NOW()
            WHERE user_id = $1 AND total_credits - used_credits >= $2
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(row) => {
                let balance = CreditBalance::from(row);
                info!(
                    "Deducted {amount} credits from user {user_id} ({} remaining)",
                    balance.remaining()
                );
                Ok(balance)
            }
            None => {
                let current = self.balance(user_id).await?;
                Err(AppError::InsufficientCredits {
                    required: amount,
                    available: current.remaining(),
                })
            }
        }
    }

    async fn refund(&self, user_id: Uuid, amount: i32) -> Result<CreditBalance, AppError> {
        let row = sqlx::query_as::<_, UserCreditsRow>(
            r#"
            UPDATE user_credits
            SET used_credits = GREATEST(used_credits - $2, 0), updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No credit ledger for user {user_id}")))?;
        Ok(row.into())
    }

    async fn grant_initial(&self, user_id: Uuid, amount: i32) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_credits (user_id, total_credits, used_credits)
            VALUES ($1, $2, 0)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            info!("Granted {amount} initial credits to user {user_id}");
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Ledger held in memory; the mutex makes each call one atomic step.
    #[derive(Default)]
    pub(crate) struct InMemoryCreditLedger {
        balances: Mutex<HashMap<Uuid, CreditBalance>>,
    }

    impl InMemoryCreditLedger {
        pub(crate) async fn with_balance(user_id: Uuid, total: i32, used: i32) -> Self {
            let ledger = Self::default();
            ledger.balances.lock().await.insert(
                user_id,
                CreditBalance {
                    total_credits: total,
                    used_credits: used,
                },
            );
            ledger
        }
    }

    #[async_trait]
    impl CreditLedger for InMemoryCreditLedger {
        async fn balance(&self, user_id: Uuid) -> Result<CreditBalance, AppError> {
            Ok(self
                .balances
                .lock()
                .await
                .get(&user_id)
                .copied()
                .unwrap_or_default())
        }

        async fn deduct(&self, user_id: Uuid, amount: i32) -> Result<CreditBalance, AppError> {
            let mut balances = self.balances.lock().await;
            let current = balances.get(&user_id).copied().unwrap_or_default();
            let next = apply_deduction(current, amount)?;
            balances.insert(user_id, next);
            Ok(next)
        }

        async fn refund(&self, user_id: Uuid, amount: i32) -> Result<CreditBalance, AppError> {
            let mut balances = self.balances.lock().await;
            let entry = balances
                .get_mut(&user_id)
                .ok_or_else(|| AppError::NotFound(format!("No credit ledger for user {user_id}")))?;
            entry.used_credits = (entry.used_credits - amount).max(0);
            Ok(*entry)
        }

        async fn grant_initial(&self, user_id: Uuid, amount: i32) -> Result<(), AppError> {
            self.balances
                .lock()
                .await
                .entry(user_id)
                .or_insert(CreditBalance {
                    total_credits: amount,
                    used_credits: 0,
                });
            Ok(())
        }
    }

    #[test]
    fn test_apply_deduction_allows_exact_balance() {
        let balance = CreditBalance {
            total_credits: 30,
            used_credits: 20,
        };
        let next = apply_deduction(balance, 10).unwrap();
        assert_eq!(next.used_credits, 30);
        assert_eq!(next.remaining(), 0);
    }

    #[test]
    fn test_apply_deduction_rejects_overdraw() {
        let balance = CreditBalance {
            total_credits: 30,
            used_credits: 25,
        };
        match apply_deduction(balance, 10) {
            Err(AppError::InsufficientCredits {
                required,
                available,
            }) => {
                assert_eq!(required, 10);
                assert_eq!(available, 5);
            }
            other => panic!("expected InsufficientCredits, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_deduction_rejects_non_positive_amounts() {
        assert!(matches!(
            apply_deduction(CreditBalance::default(), 0),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_remaining_never_negative() {
        let corrupt = CreditBalance {
            total_credits: 5,
            used_credits: 9,
        };
        assert_eq!(corrupt.remaining(), 0);
    }

    // Checks the handler-facing contract only: this ledger serialises through
    // its mutex. In Postgres the guarantee is the conditional UPDATE in
    // `PgCreditLedger::deduct`, exercised by the ignored live test below.
    #[tokio::test]
    async fn test_concurrent_deductions_only_one_succeeds() {
        let user_id = Uuid::new_v4();
        let ledger = Arc::new(InMemoryCreditLedger::with_balance(user_id, 10, 0).await);

        let a = tokio::spawn({
            let ledger = ledger.clone();
            async move { ledger.deduct(user_id, 10).await }
        });
        let b = tokio::spawn({
            let ledger = ledger.clone();
            async move { ledger.deduct(user_id, 10).await }
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let insufficient = results
            .iter()
            .filter(|r| matches!(r, Err(AppError::InsufficientCredits { .. })))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(insufficient, 1);
        assert_eq!(ledger.balance(user_id).await.unwrap().used_credits, 10);
    }

    #[tokio::test]
    async fn test_refund_restores_credits_without_going_negative() {
        let user_id = Uuid::new_v4();
        let ledger = InMemoryCreditLedger::with_balance(user_id, 30, 10).await;

        let after = ledger.refund(user_id, 10).await.unwrap();
        assert_eq!(after.used_credits, 0);

        let again = ledger.refund(user_id, 10).await.unwrap();
        assert_eq!(again.used_credits, 0);
    }

    #[tokio::test]
    async fn test_grant_initial_is_idempotent() {
        let user_id = Uuid::new_v4();
        let ledger = InMemoryCreditLedger::default();

        ledger.grant_initial(user_id, 30).await.unwrap();
        ledger.deduct(user_id, 10).await.unwrap();
        ledger.grant_initial(user_id, 30).await.unwrap();

        let balance = ledger.balance(user_id).await.unwrap();
        assert_eq!(balance.total_credits, 30);
        assert_eq!(balance.used_credits, 10);
    }

    #[tokio::test]
    async fn test_unknown_user_has_zero_balance() {
        let ledger = InMemoryCreditLedger::default();
        let balance = ledger.balance(Uuid::new_v4()).await.unwrap();
        assert_eq!(balance, CreditBalance::default());
    }

    #[tokio::test]
    #[ignore = "needs Postgres with the user_credits table at DATABASE_URL"]
    async fn test_pg_ledger_concurrent_deductions_only_one_succeeds() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(4)
            .connect(&url)
            .await
            .unwrap();
        let ledger = Arc::new(PgCreditLedger::new(pool.clone()));
        let user_id = Uuid::new_v4();
        ledger.grant_initial(user_id, 10).await.unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ledger = ledger.clone();
                tokio::spawn(async move { ledger.deduct(user_id, 10).await })
            })
            .collect();
        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::InsufficientCredits { available, .. }) => assert_eq!(available, 0),
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(successes, 1);
        let balance = ledger.balance(user_id).await.unwrap();
        assert_eq!(balance.used_credits, 10);

        sqlx::query("DELETE FROM user_credits WHERE user_id = $1")
            .bind(user_id)
            .execute(&pool)
            .await
            .unwrap();
    }
}
