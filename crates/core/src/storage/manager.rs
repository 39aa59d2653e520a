use crate::errors::CoreError;
use crate::models::tracker::TrackerState;

use super::encryption::{self, KdfParams};
use super::format;

/// Save/load tracker state to/from encrypted bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// TrackerState → bincode → AES-256-GCM(Argon2id(password)) → BTRK bytes
    pub fn save_to_bytes(state: &TrackerState, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_with_params(state, password, &KdfParams::default())
    }

    /// Same as [`save_to_bytes`](Self::save_to_bytes) with explicit KDF costs.
    pub fn save_with_params(
        state: &TrackerState,
        password: &str,
        kdf_params: &KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize tracker state: {e}")))?;

        let salt = encryption::random_bytes::<16>()?;
        let nonce = encryption::random_bytes::<12>()?;
        let key = encryption::derive_key(password, &salt, kdf_params)?;
        let ciphertext = encryption::encrypt(&plaintext, &key, &nonce)?;

        tracing::debug!(
            entries = state.plan.len(),
            bytes = ciphertext.len(),
            "tracker state encrypted"
        );
        Ok(format::write_file(
            format::CURRENT_VERSION,
            kdf_params,
            &salt,
            &nonce,
            &ciphertext,
        ))
    }

    /// BTRK bytes → header → Argon2id(password, salt) → AES-256-GCM → bincode → TrackerState
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<TrackerState, CoreError> {
        let (header, ciphertext) = format::read_file(data)?;
        let key = encryption::derive_key(password, &header.salt, &header.kdf_params)?;
        let plaintext = encryption::decrypt(ciphertext, &key, &header.nonce)?;

        bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize tracker state: {e}")))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(state: &TrackerState, path: &str, password: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(state, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<TrackerState, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
