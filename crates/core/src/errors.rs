use thiserror::Error;

/// Why a plan configuration was rejected before generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing configuration field: {field} (fill in every configuration field)")]
    MissingField { field: &'static str },

    #[error("Configuration field {field} must be positive")]
    NonPositiveAmount { field: &'static str },

    #[error("Start date must not be after end date")]
    InvertedDateRange,

    #[error("Plan range of {days} days exceeds maximum of {max} days")]
    RangeTooLong { days: i64, max: i64 },
}

/// Odd outside the accepted band. Produced by the odd validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OddError {
    #[error("Invalid odd: values below 1.10 are not part of the strategy")]
    TooLow,

    #[error("Odds above 1.20 carry a high risk of loss")]
    TooHigh,
}

/// Credential and session failures from the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("No user is logged in")]
    NotAuthenticated,
}

/// Unified error type for the entire bet-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Plan ────────────────────────────────────────────────────────
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Odd(#[from] OddError),

    #[error("No plan entry at index {0}")]
    EntryNotFound(usize),

    #[error("Plan entry {0} is locked until the previous day's outcome is recorded")]
    EntryLocked(usize),

    #[error("No plan has been generated yet")]
    NoPlan,

    #[error("Amount out of range: plan arithmetic overflowed at entry {0}")]
    AmountOverflow(usize),

    // ── Auth ────────────────────────────────────────────────────────
    #[error(transparent)]
    Auth(#[from] AuthError),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong password or corrupted file")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No mentor provider configured")]
    NoProvider,
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; never echo a query string back.
        let msg = e.to_string();
        let sanitized = match msg.find('?') {
            Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
            None => msg,
        };
        CoreError::Network(sanitized)
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
