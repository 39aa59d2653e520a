use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::CoreError;
use crate::models::plan::PlanEntry;
use crate::models::summary::PlanSummary;

/// Computes progress summaries over a plan.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Summarize a plan. Fails with `NoPlan` on an empty plan and with
    /// `AmountOverflow` if a total does not fit in a `Decimal`.
    pub fn summarize(&self, plan: &[PlanEntry]) -> Result<PlanSummary, CoreError> {
        let (first, last) = match (plan.first(), plan.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(CoreError::NoPlan),
        };

        let last_index = plan.len() - 1;
        let mut wins = 0;
        let mut losses = 0;
        let mut total_actual_profit = Decimal::ZERO;
        let mut total_predicted_profit = Decimal::ZERO;
        let mut last_recorded_index = None;
        for (i, entry) in plan.iter().enumerate() {
            total_predicted_profit = total_predicted_profit
                .checked_add(entry.predicted_profit)
                .ok_or(CoreError::AmountOverflow(i))?;
            if let Some(profit) = entry.actual_profit {
                total_actual_profit = total_actual_profit
                    .checked_add(profit)
                    .ok_or(CoreError::AmountOverflow(i))?;
                last_recorded_index = Some(i);
                if entry.is_win {
                    wins += 1;
                } else {
                    losses += 1;
                }
            }
        }

        let starting_bankroll = first.initial_bankroll;
        let current_bankroll = last_recorded_index
            .map(|i| plan[i].final_bankroll)
            .unwrap_or(starting_bankroll);
        let projected_final_bankroll = last.final_bankroll;
        let projected_return_pct = if starting_bankroll.is_zero() {
            Decimal::ZERO
        } else {
            projected_final_bankroll
                .checked_sub(starting_bankroll)
                .and_then(|gain| gain.checked_div(starting_bankroll))
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or(CoreError::AmountOverflow(last_index))?
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        Ok(PlanSummary {
            days_planned: plan.len(),
            days_recorded: wins + losses,
            wins,
            losses,
            last_recorded_index,
            starting_bankroll,
            current_bankroll,
            projected_final_bankroll,
            total_actual_profit,
            total_predicted_profit,
            projected_return_pct,
        })
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
