use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One-time configuration a plan is generated from.
///
/// Dates are optional because the configuration form may be half filled in;
/// the generator rejects a config with a missing date or a zero amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// First day of the plan (inclusive)
    pub start_date: Option<NaiveDate>,

    /// Last day of the plan (inclusive)
    pub end_date: Option<NaiveDate>,

    /// Bankroll on day one
    #[serde(with = "rust_decimal::serde::str")]
    pub initial_bankroll: Decimal,

    /// Stake placed every day before compounding
    #[serde(with = "rust_decimal::serde::str")]
    pub base_stake: Decimal,

    /// Fixed decimal odd every stake is placed at
    #[serde(with = "rust_decimal::serde::str")]
    pub fixed_odd: Decimal,
}

impl PlanConfig {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        initial_bankroll: Decimal,
        base_stake: Decimal,
        fixed_odd: Decimal,
    ) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            initial_bankroll,
            base_stake,
            fixed_odd,
        }
    }
}

impl Default for PlanConfig {
    /// Starts today with a 1000 bankroll, a 100 stake and a 1.15 odd.
    /// The end date is left for the user to pick.
    fn default() -> Self {
        Self {
            start_date: Some(chrono::Utc::now().date_naive()),
            end_date: None,
            initial_bankroll: Decimal::ONE_THOUSAND,
            base_stake: Decimal::ONE_HUNDRED,
            fixed_odd: Decimal::new(115, 2),
        }
    }
}
