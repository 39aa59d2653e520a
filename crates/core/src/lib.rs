pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use rust_decimal::Decimal;

use errors::{CoreError, OddError};
use models::{
    config::PlanConfig,
    plan::PlanEntry,
    settings::Settings,
    summary::PlanSummary,
    tracker::TrackerState,
};
use services::{
    mentor_service::MentorService,
    odd_validator,
    plan_service::PlanService,
    summary_service::SummaryService,
};
use storage::manager::StorageManager;

/// Main entry point for the Bet Tracker core library.
/// Holds the tracking session's plan and all services needed to operate on it.
///
/// The plan is owned exclusively by this value; every mutation goes through
/// `&mut self`, which gives each plan a single writer.
#[must_use]
pub struct BetTracker {
    state: TrackerState,
    plan_service: PlanService,
    summary_service: SummaryService,
    mentor_service: MentorService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for BetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BetTracker")
            .field("entries", &self.state.plan.len())
            .field("config", &self.state.config)
            .field("mentor", &self.mentor_service.provider_name())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl BetTracker {
    /// Start a fresh session with the default configuration and no plan.
    pub fn create_new() -> Self {
        Self::build(TrackerState::default())
    }

    /// Load a session from encrypted bytes (password required).
    /// Use this for WASM / Tauri where the frontend handles file I/O.
    pub fn load_from_bytes(encrypted: &[u8], password: &str) -> Result<Self, CoreError> {
        let state = StorageManager::load_from_bytes(encrypted, password)?;
        Ok(Self::build(state))
    }

    /// Save the session to encrypted bytes. Clears the unsaved-changes flag.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.state, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Self, CoreError> {
        let state = StorageManager::load_from_file(path, password)?;
        Ok(Self::build(state))
    }

    /// Save to an encrypted file on disk (native only). Clears the unsaved-changes flag.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.state, path, password)?;
        self.dirty = false;
        Ok(())
    }

    // ── Plan ────────────────────────────────────────────────────────

    /// Check an odd against the accepted band without generating anything.
    pub fn validate_odd(&self, odd: Decimal) -> Result<(), OddError> {
        odd_validator::validate_odd(odd)
    }

    /// Generate a new plan from `config`, replacing the current one.
    ///
    /// All-or-nothing: if the config is rejected, the existing plan and
    /// config are left exactly as they were.
    pub fn generate_plan(&mut self, config: PlanConfig) -> Result<&[PlanEntry], CoreError> {
        let plan = self.plan_service.generate(&config)?;
        self.state.plan = plan;
        self.state.config = config;
        self.dirty = true;
        Ok(self.state.plan.as_slice())
    }

    /// Record the real outcome of day `index`, then re-derive every later day.
    ///
    /// Refuses locked days: an outcome can only be entered once the previous
    /// day's outcome has been recorded.
    pub fn record_outcome(
        &mut self,
        index: usize,
        actual_profit: Option<Decimal>,
        is_win: bool,
    ) -> Result<&PlanEntry, CoreError> {
        let entry = self.entry(index).ok_or(CoreError::EntryNotFound(index))?;
        if entry.is_locked {
            return Err(CoreError::EntryLocked(index));
        }
        self.update_entry(index, actual_profit, is_win)
    }

    /// Like [`record_outcome`](Self::record_outcome) but ignores the lock.
    /// Meant for corrections, not for normal data entry.
    ///
    /// An outcome whose recalculation overflows fails with `AmountOverflow`
    /// and leaves the plan untouched.
    pub fn update_entry(
        &mut self,
        index: usize,
        actual_profit: Option<Decimal>,
        is_win: bool,
    ) -> Result<&PlanEntry, CoreError> {
        if index >= self.state.plan.len() {
            return Err(CoreError::EntryNotFound(index));
        }
        let config = &self.state.config;
        self.plan_service.update(
            &mut self.state.plan,
            index,
            actual_profit,
            is_win,
            config.base_stake,
            config.fixed_odd,
        )?;
        self.dirty = true;
        Ok(&self.state.plan[index])
    }

    /// The current plan, chronological. Empty before the first generation.
    #[must_use]
    pub fn plan(&self) -> &[PlanEntry] {
        &self.state.plan
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&PlanEntry> {
        self.state.plan.get(index)
    }

    /// Configuration the current plan was generated from.
    #[must_use]
    pub fn config(&self) -> &PlanConfig {
        &self.state.config
    }

    /// Drop the current plan. The configuration is kept.
    pub fn clear_plan(&mut self) {
        if !self.state.plan.is_empty() {
            self.state.plan.clear();
            self.dirty = true;
        }
    }

    /// Progress summary of the current plan.
    pub fn summary(&self) -> Result<PlanSummary, CoreError> {
        self.summary_service.summarize(&self.state.plan)
    }

    // ── Mentor ──────────────────────────────────────────────────────

    /// Ask the betting mentor. Never fails: provider problems yield a fixed apology.
    pub async fn ask_mentor(&self, prompt: &str) -> String {
        self.mentor_service.ask(prompt).await
    }

    #[must_use]
    pub fn is_mentor_available(&self) -> bool {
        self.mentor_service.is_configured()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Set an API key for a provider (e.g., "gemini").
    /// Rebuilds the mentor so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.state.settings.api_keys.insert(provider, key);
        self.mentor_service = MentorService::from_settings(&self.state.settings);
        self.dirty = true;
    }

    /// Remove an API key. Returns whether a key was present.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.state.settings.api_keys.remove(provider).is_some();
        if removed {
            self.mentor_service = MentorService::from_settings(&self.state.settings);
            self.dirty = true;
        }
        removed
    }

    pub fn set_mentor_model(&mut self, model: String) {
        self.state.settings.mentor_model = model;
        self.mentor_service = MentorService::from_settings(&self.state.settings);
        self.dirty = true;
    }

    /// Returns `true` if the session has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the plan as a JSON array (dates as `DD/MM/YYYY`, amounts as strings).
    pub fn export_plan_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state.plan)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize plan to JSON: {e}")))
    }

    /// Export the plan as CSV.
    /// Columns: date, initial_bankroll, staked_value, predicted_profit,
    /// actual_profit, is_win, final_bankroll, is_locked
    #[must_use]
    pub fn export_plan_to_csv(&self) -> String {
        let mut csv = String::from(
            "date,initial_bankroll,staked_value,predicted_profit,actual_profit,is_win,final_bankroll,is_locked\n",
        );
        for e in &self.state.plan {
            let actual = e.actual_profit.map(|p| p.to_string()).unwrap_or_default();
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                e.formatted_date(),
                e.initial_bankroll,
                e.staked_value,
                e.predicted_profit,
                actual,
                e.is_win,
                e.final_bankroll,
                e.is_locked,
            ));
        }
        csv
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(state: TrackerState) -> Self {
        let mentor_service = MentorService::from_settings(&state.settings);
        Self {
            state,
            plan_service: PlanService::new(),
            summary_service: SummaryService::new(),
            mentor_service,
            dirty: false,
        }
    }
}
