use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Progress snapshot of a staking plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Number of days in the plan
    pub days_planned: usize,

    /// Days with a recorded outcome
    pub days_recorded: usize,

    /// Recorded days flagged as wins
    pub wins: usize,

    /// Recorded days not flagged as wins
    pub losses: usize,

    /// Index of the latest day with a recorded outcome
    pub last_recorded_index: Option<usize>,

    /// Bankroll on day one
    pub starting_bankroll: Decimal,

    /// Final bankroll of the latest recorded day, or the starting bankroll
    pub current_bankroll: Decimal,

    /// Final bankroll of the last day of the plan
    pub projected_final_bankroll: Decimal,

    /// Sum of recorded profits
    pub total_actual_profit: Decimal,

    /// Sum of predicted profits across every day
    pub total_predicted_profit: Decimal,

    /// (projected - starting) / starting × 100, rounded half away from zero to 2 places
    pub projected_return_pct: Decimal,
}
