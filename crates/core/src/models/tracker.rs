use serde::{Deserialize, Serialize};

use super::config::PlanConfig;
use super::plan::PlanEntry;
use super::settings::Settings;

/// The main data container. Everything in here gets serialized,
/// encrypted, and saved to the portable `.btrk` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Configuration the current plan was generated from
    pub config: PlanConfig,

    /// Day-by-day plan, chronological. Empty until a plan is generated.
    pub plan: Vec<PlanEntry>,

    /// User settings (API keys, mentor model)
    pub settings: Settings,
}
