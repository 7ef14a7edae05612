use std::collections::HashMap;

use chrono::{Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::repos::DynTransactionRepo;

use super::reports::{CarbonFootprint, EsgReport, SustainabilityRating};

/// The trailing window used for carbon footprint reports when the caller
/// doesn't specify one.
pub const DEFAULT_CARBON_PERIOD_DAYS: u32 = 365;

/// A service object computing sustainability metrics over an account's
/// transaction history.
#[derive(Clone)]
pub struct AnalyticsService {
    transaction_repo: DynTransactionRepo,
}

impl AnalyticsService {
    pub fn new(transaction_repo: DynTransactionRepo) -> Self {
        Self { transaction_repo }
    }

    /// Compute the value weighted average ESG score for an account.
    ///
    /// Returns `None` when the account has no transactions at all. Otherwise
    /// the average is taken over the transactions that carry an ESG score,
    /// weighted by their amounts; transactions without a score are excluded
    /// from both sides of the division, and `scored_value_share` reports how
    /// much of the account's value they represent. A zero weight total yields
    /// a score of zero rather than a division error.
    pub async fn portfolio_esg(&self, account_id: Uuid) -> anyhow::Result<Option<EsgReport>> {
        let transactions = self
            .transaction_repo
            .list_transactions_for_account(account_id)
            .await?;

        if transactions.is_empty() {
            debug!(%account_id, "No transactions to score.");

            return Ok(None);
        }

        let mut total_value = 0.0;
        let mut scored_value = 0.0;
        let mut weighted_sum = 0.0;

        for transaction in &transactions {
            total_value += transaction.amount.abs();

            if let Some(score) = transaction.esg_score {
                scored_value += transaction.amount;
                weighted_sum += transaction.amount * score;
            }
        }

        let weighted_score = if scored_value == 0.0 {
            0.0
        } else {
            round2(weighted_sum / scored_value)
        };

        let scored_value_share = if total_value == 0.0 {
            0.0
        } else {
            round2(scored_value.abs() / total_value)
        };

        Ok(Some(EsgReport {
            weighted_score,
            scored_value_share,
            rating: SustainabilityRating::from_score(Some(weighted_score)),
            transaction_count: transactions.len(),
        }))
    }

    /// Total the CO2 impact of an account's transactions over the trailing
    /// `period_days` window, with a per-ticker breakdown.
    pub async fn carbon_footprint(
        &self,
        account_id: Uuid,
        period_days: u32,
    ) -> anyhow::Result<CarbonFootprint> {
        let cutoff = Utc::now() - Duration::days(i64::from(period_days));

        let transactions = self
            .transaction_repo
            .list_transactions_since(account_id, cutoff)
            .await?;

        let mut total = 0.0;
        let mut by_ticker: HashMap<String, f64> = HashMap::new();

        for transaction in &transactions {
            if let Some(kg) = transaction.co2_impact {
                total += kg;

                if let Some(ticker) = transaction.asset_ticker.as_deref() {
                    *by_ticker.entry(ticker.to_owned()).or_insert(0.0) += kg;
                }
            }
        }

        for kg in by_ticker.values_mut() {
            *kg = round2(*kg);
        }

        Ok(CarbonFootprint {
            total_kg: round2(total),
            period_days,
            by_ticker,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::{
        portfolio::domain::transactions::{NewTransaction, Transaction, TransactionType},
        repos::{TransactionPersistenceError, TransactionRepo},
    };

    struct FakeTransactionRepo {
        transactions: Vec<Transaction>,
    }

    #[async_trait]
    impl TransactionRepo for FakeTransactionRepo {
        async fn persist_transaction(
            &self,
            _transaction: &NewTransaction,
        ) -> Result<Transaction, TransactionPersistenceError> {
            unimplemented!("not needed for analytics tests")
        }

        async fn get_transaction(
            &self,
            _transaction_id: Uuid,
        ) -> anyhow::Result<Option<Transaction>> {
            unimplemented!("not needed for analytics tests")
        }

        async fn list_transactions_for_account(
            &self,
            account_id: Uuid,
        ) -> anyhow::Result<Vec<Transaction>> {
            Ok(self
                .transactions
                .iter()
                .filter(|t| t.account_id == account_id)
                .cloned()
                .collect())
        }

        async fn list_transactions_since(
            &self,
            account_id: Uuid,
            cutoff: DateTime<Utc>,
        ) -> anyhow::Result<Vec<Transaction>> {
            Ok(self
                .transactions
                .iter()
                .filter(|t| t.account_id == account_id && t.timestamp >= cutoff)
                .cloned()
                .collect())
        }

        async fn delete_transaction(&self, _transaction_id: Uuid) -> anyhow::Result<()> {
            unimplemented!("not needed for analytics tests")
        }
    }

    fn transaction(
        account_id: Uuid,
        amount: f64,
        esg_score: Option<f64>,
        co2_impact: Option<f64>,
        asset_ticker: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            account_id,
            amount,
            currency: "EUR".to_owned(),
            transaction_type: TransactionType::Buy,
            asset_name: None,
            asset_ticker: asset_ticker.map(str::to_owned),
            esg_score,
            co2_impact,
            timestamp,
            notes: None,
            created_at: timestamp,
        }
    }

    fn service(transactions: Vec<Transaction>) -> AnalyticsService {
        AnalyticsService::new(Arc::new(FakeTransactionRepo { transactions }))
    }

    #[tokio::test]
    async fn esg_without_transactions_is_none() {
        let service = service(vec![]);

        let report = service
            .portfolio_esg(Uuid::new_v4())
            .await
            .expect("scoring should not error");

        assert_eq!(None, report);
    }

    #[tokio::test]
    async fn esg_is_weighted_by_transaction_value() {
        let account_id = Uuid::new_v4();
        let now = Utc::now();
        let service = service(vec![
            transaction(account_id, 100.0, Some(80.0), None, None, now),
            transaction(account_id, 100.0, Some(40.0), None, None, now),
        ]);

        let report = service
            .portfolio_esg(account_id)
            .await
            .expect("scoring should not error")
            .expect("account has transactions");

        assert_eq!(60.0, report.weighted_score);
        assert_eq!(SustainabilityRating::B, report.rating);
        assert_eq!(2, report.transaction_count);
        assert_eq!(1.0, report.scored_value_share);
    }

    #[tokio::test]
    async fn esg_weighting_favors_larger_positions() {
        let account_id = Uuid::new_v4();
        let now = Utc::now();
        let service = service(vec![
            transaction(account_id, 300.0, Some(90.0), None, None, now),
            transaction(account_id, 100.0, Some(50.0), None, None, now),
        ]);

        let report = service
            .portfolio_esg(account_id)
            .await
            .expect("scoring should not error")
            .expect("account has transactions");

        // (300 * 90 + 100 * 50) / 400 = 80
        assert_eq!(80.0, report.weighted_score);
        assert_eq!(SustainabilityRating::A, report.rating);
    }

    #[tokio::test]
    async fn esg_with_zero_total_value_is_zero() {
        let account_id = Uuid::new_v4();
        let now = Utc::now();
        let service = service(vec![transaction(
            account_id,
            0.0,
            Some(80.0),
            None,
            None,
            now,
        )]);

        let report = service
            .portfolio_esg(account_id)
            .await
            .expect("scoring should not error")
            .expect("account has transactions");

        assert_eq!(0.0, report.weighted_score);
    }

    #[tokio::test]
    async fn esg_excludes_unscored_transactions_from_average() {
        let account_id = Uuid::new_v4();
        let now = Utc::now();
        let service = service(vec![
            transaction(account_id, 100.0, Some(80.0), None, None, now),
            transaction(account_id, 300.0, None, None, None, now),
        ]);

        let report = service
            .portfolio_esg(account_id)
            .await
            .expect("scoring should not error")
            .expect("account has transactions");

        // The unscored 300 must not drag the average towards zero.
        assert_eq!(80.0, report.weighted_score);
        assert_eq!(0.25, report.scored_value_share);
        assert_eq!(2, report.transaction_count);
    }

    #[tokio::test]
    async fn esg_ignores_other_accounts() {
        let account_id = Uuid::new_v4();
        let now = Utc::now();
        let service = service(vec![
            transaction(account_id, 100.0, Some(40.0), None, None, now),
            transaction(Uuid::new_v4(), 1000.0, Some(100.0), None, None, now),
        ]);

        let report = service
            .portfolio_esg(account_id)
            .await
            .expect("scoring should not error")
            .expect("account has transactions");

        assert_eq!(40.0, report.weighted_score);
        assert_eq!(1, report.transaction_count);
    }

    #[tokio::test]
    async fn esg_score_is_rounded_to_two_decimals() {
        let account_id = Uuid::new_v4();
        let now = Utc::now();
        let service = service(vec![
            transaction(account_id, 100.0, Some(70.0), None, None, now),
            transaction(account_id, 200.0, Some(80.0), None, None, now),
        ]);

        let report = service
            .portfolio_esg(account_id)
            .await
            .expect("scoring should not error")
            .expect("account has transactions");

        // (100 * 70 + 200 * 80) / 300 = 76.666...
        assert_eq!(76.67, report.weighted_score);
    }

    #[tokio::test]
    async fn carbon_footprint_sums_and_breaks_down_by_ticker() {
        let account_id = Uuid::new_v4();
        let now = Utc::now();
        let service = service(vec![
            transaction(account_id, 100.0, None, Some(12.5), Some("TSLA"), now),
            transaction(
                account_id,
                50.0,
                None,
                Some(3.25),
                Some("TSLA"),
                now - Duration::days(10),
            ),
            transaction(
                account_id,
                75.0,
                None,
                Some(8.0),
                Some("AAPL"),
                now - Duration::days(30),
            ),
            // No ticker: counted in the total but not the breakdown.
            transaction(account_id, 20.0, None, Some(1.0), None, now),
            // No CO2 figure: ignored entirely.
            transaction(account_id, 20.0, None, None, Some("VWCE"), now),
        ]);

        let footprint = service
            .carbon_footprint(account_id, 365)
            .await
            .expect("footprint should not error");

        assert_eq!(24.75, footprint.total_kg);
        assert_eq!(365, footprint.period_days);
        assert_eq!(2, footprint.by_ticker.len());
        assert_eq!(Some(&15.75), footprint.by_ticker.get("TSLA"));
        assert_eq!(Some(&8.0), footprint.by_ticker.get("AAPL"));
    }

    #[tokio::test]
    async fn carbon_footprint_excludes_transactions_outside_window() {
        let account_id = Uuid::new_v4();
        let now = Utc::now();
        let service = service(vec![
            transaction(
                account_id,
                100.0,
                None,
                Some(5.0),
                Some("TSLA"),
                now - Duration::days(10),
            ),
            transaction(
                account_id,
                100.0,
                None,
                Some(50.0),
                Some("XOM"),
                now - Duration::days(400),
            ),
        ]);

        let footprint = service
            .carbon_footprint(account_id, 365)
            .await
            .expect("footprint should not error");

        assert_eq!(5.0, footprint.total_kg);
        assert!(footprint.by_ticker.contains_key("TSLA"));
        assert!(
            !footprint.by_ticker.contains_key("XOM"),
            "tickers outside the window must not appear in the breakdown"
        );
    }

    #[tokio::test]
    async fn carbon_footprint_with_no_transactions_is_zero() {
        let service = service(vec![]);

        let footprint = service
            .carbon_footprint(Uuid::new_v4(), 30)
            .await
            .expect("footprint should not error");

        assert_eq!(0.0, footprint.total_kg);
        assert!(footprint.by_ticker.is_empty());
    }
}
