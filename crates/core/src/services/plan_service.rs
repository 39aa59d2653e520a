use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{ConfigError, CoreError};
use crate::models::config::PlanConfig;
use crate::models::plan::PlanEntry;

use super::odd_validator::validate_odd;

/// Longest plan that may be generated, in days (about 10 years).
pub const MAX_PLAN_DAYS: i64 = 3660;

/// Decimal places kept on predicted profits.
pub const PROFIT_DECIMALS: u32 = 8;

/// Builds and repairs compounding staking plans.
///
/// Pure business logic with no I/O and no shared state. Both operations take
/// the plan by value or exclusive borrow, so each plan has a single writer.
/// All money arithmetic is checked; overflow is an error, never a panic.
pub struct PlanService;

impl PlanService {
    pub fn new() -> Self {
        Self
    }

    /// Generate one entry per calendar day from `start_date` to `end_date`
    /// inclusive, at most [`MAX_PLAN_DAYS`] days.
    ///
    /// Each day stakes `base_stake` plus the previous day's predicted profit.
    /// Every day after the first starts locked. Validation happens before
    /// anything is built, so a rejected config produces nothing. Amounts too
    /// large for a `Decimal` fail with `AmountOverflow`.
    pub fn generate(&self, config: &PlanConfig) -> Result<Vec<PlanEntry>, CoreError> {
        let (start, end) = self.validate_config(config)?;
        let days = (end - start).num_days() as usize + 1;

        let mut plan: Vec<PlanEntry> = Vec::with_capacity(days);
        for (day, date) in start.iter_days().take(days).enumerate() {
            let overflow = || {
                tracing::warn!(day, "plan amounts overflowed during generation");
                CoreError::AmountOverflow(day)
            };
            let (initial_bankroll, staked_value) = match plan.last() {
                None => (config.initial_bankroll, config.base_stake),
                Some(prev) => (
                    prev.final_bankroll,
                    config
                        .base_stake
                        .checked_add(prev.predicted_profit)
                        .ok_or_else(overflow)?,
                ),
            };
            let predicted_profit =
                predicted_profit(staked_value, config.fixed_odd).ok_or_else(overflow)?;
            let final_bankroll = initial_bankroll
                .checked_add(predicted_profit)
                .ok_or_else(overflow)?;
            let is_locked = !plan.is_empty();

            plan.push(PlanEntry {
                date,
                initial_bankroll,
                staked_value,
                predicted_profit,
                actual_profit: None,
                is_win: false,
                final_bankroll,
                is_locked,
            });
        }

        tracing::debug!(%start, %end, entries = plan.len(), "plan generated");
        Ok(plan)
    }

    /// Record the outcome of day `index` and re-derive every later day.
    ///
    /// The edited day's final bankroll treats a missing outcome as zero profit.
    /// Later days fall back to their predicted profit instead.
    ///
    /// A recorded (non-`None`) outcome unlocks the following day; nothing
    /// ever locks a day again. Entries before `index` are not touched.
    ///
    /// The repair is computed on a copy of the affected days. If any amount
    /// overflows, `AmountOverflow` is returned and `plan` is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds. That is a caller bug, not a
    /// business error.
    pub fn update(
        &self,
        plan: &mut [PlanEntry],
        index: usize,
        actual_profit: Option<Decimal>,
        is_win: bool,
        base_stake: Decimal,
        fixed_odd: Decimal,
    ) -> Result<(), CoreError> {
        assert!(
            index < plan.len(),
            "plan index {index} out of bounds for a plan of {} entries",
            plan.len()
        );

        let tail = repair(&plan[index..], actual_profit, is_win, base_stake, fixed_odd)
            .map_err(|offset| {
                tracing::warn!(index, day = index + offset, "plan amounts overflowed during update");
                CoreError::AmountOverflow(index + offset)
            })?;
        plan[index..].clone_from_slice(&tail);

        tracing::info!(
            index,
            recorded = actual_profit.is_some(),
            is_win,
            repaired = plan.len() - index - 1,
            "plan entry updated"
        );
        Ok(())
    }

    /// Validate a config in the order the form reports problems:
    /// odd, missing fields, signs, date order, span.
    fn validate_config(
        &self,
        config: &PlanConfig,
    ) -> Result<(chrono::NaiveDate, chrono::NaiveDate), CoreError> {
        if let Err(e) = validate_odd(config.fixed_odd) {
            tracing::warn!(odd = %config.fixed_odd, error = %e, "plan config rejected");
            return Err(e.into());
        }

        check_fields(config).map_err(|e| {
            tracing::warn!(error = %e, "plan config rejected");
            CoreError::from(e)
        })
    }
}

impl Default for PlanService {
    fn default() -> Self {
        Self::new()
    }
}

/// `stake * (odd - 1)`, rounded to [`PROFIT_DECIMALS`] places.
/// `None` if the product does not fit in a `Decimal`.
#[must_use]
pub fn predicted_profit(stake: Decimal, odd: Decimal) -> Option<Decimal> {
    stake
        .checked_mul(odd.checked_sub(Decimal::ONE)?)
        .map(|p| p.round_dp_with_strategy(PROFIT_DECIMALS, RoundingStrategy::MidpointAwayFromZero))
}

/// Apply an outcome to `days[0]` and re-derive the rest, on a copy.
/// On overflow returns the offset of the day that could not be computed.
fn repair(
    days: &[PlanEntry],
    actual_profit: Option<Decimal>,
    is_win: bool,
    base_stake: Decimal,
    fixed_odd: Decimal,
) -> Result<Vec<PlanEntry>, usize> {
    let mut tail = days.to_vec();

    let edited = &mut tail[0];
    edited.actual_profit = actual_profit;
    edited.is_win = is_win;
    edited.final_bankroll = edited
        .initial_bankroll
        .checked_add(actual_profit.unwrap_or(Decimal::ZERO))
        .ok_or(0usize)?;

    if actual_profit.is_some() {
        if let Some(next) = tail.get_mut(1) {
            next.is_locked = false;
        }
    }

    for i in 1..tail.len() {
        let (prev_final, carry) = {
            let prev = &tail[i - 1];
            (prev.final_bankroll, prev.carried_profit())
        };
        let entry = &mut tail[i];
        entry.initial_bankroll = prev_final;
        entry.staked_value = base_stake.checked_add(carry).ok_or(i)?;
        entry.predicted_profit = predicted_profit(entry.staked_value, fixed_odd).ok_or(i)?;
        entry.final_bankroll = entry
            .initial_bankroll
            .checked_add(entry.carried_profit())
            .ok_or(i)?;
    }
    Ok(tail)
}

fn check_fields(
    config: &PlanConfig,
) -> Result<(chrono::NaiveDate, chrono::NaiveDate), ConfigError> {
    let start = config
        .start_date
        .ok_or(ConfigError::MissingField { field: "start_date" })?;
    let end = config
        .end_date
        .ok_or(ConfigError::MissingField { field: "end_date" })?;

    for (field, amount) in [
        ("initial_bankroll", config.initial_bankroll),
        ("base_stake", config.base_stake),
    ] {
        if amount.is_zero() {
            return Err(ConfigError::MissingField { field });
        }
        if amount.is_sign_negative() {
            return Err(ConfigError::NonPositiveAmount { field });
        }
    }

    if start > end {
        return Err(ConfigError::InvertedDateRange);
    }

    let days = (end - start).num_days() + 1;
    if days > MAX_PLAN_DAYS {
        return Err(ConfigError::RangeTooLong {
            days,
            max: MAX_PLAN_DAYS,
        });
    }

    Ok((start, end))
}
