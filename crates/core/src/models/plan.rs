use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display format for plan dates: day/month/year, no time zone.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One calendar day of a staking plan.
///
/// Entries are created in bulk by the plan generator and only ever mutated
/// in place by the recalculator. They are never inserted, removed, or
/// reordered; index `i` is the day offset from the plan's start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Calendar day (serialized as `DD/MM/YYYY`)
    #[serde(with = "date_dmy")]
    pub date: NaiveDate,

    /// Bankroll at the start of the day
    #[serde(with = "rust_decimal::serde::str")]
    pub initial_bankroll: Decimal,

    /// Amount wagered this day
    #[serde(with = "rust_decimal::serde::str")]
    pub staked_value: Decimal,

    /// `staked_value * (odd - 1)`: profit if the fixed odd wins
    #[serde(with = "rust_decimal::serde::str")]
    pub predicted_profit: Decimal,

    /// Recorded real-world profit. `None` until the user records an outcome.
    #[serde(with = "rust_decimal::serde::str_option")]
    pub actual_profit: Option<Decimal>,

    /// Informational win flag set alongside the outcome; never used in arithmetic.
    pub is_win: bool,

    /// Bankroll at the end of the day
    #[serde(with = "rust_decimal::serde::str")]
    pub final_bankroll: Decimal,

    /// Whether an outcome may be submitted for this day yet.
    /// Starts `true` for every day but the first and only ever flips to `false`.
    pub is_locked: bool,
}

impl PlanEntry {
    /// The date rendered as `DD/MM/YYYY`.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Profit carried into the next day's stake: the recorded outcome when
    /// present, otherwise the prediction.
    #[must_use]
    pub fn carried_profit(&self) -> Decimal {
        self.actual_profit.unwrap_or(self.predicted_profit)
    }

    /// Whether an outcome has been recorded for this day.
    #[must_use]
    pub fn is_recorded(&self) -> bool {
        self.actual_profit.is_some()
    }
}

mod date_dmy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
