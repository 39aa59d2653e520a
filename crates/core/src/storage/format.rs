use crate::errors::CoreError;
use super::encryption::KdfParams;

/// Magic bytes identifying a BTRK (Bet Tracker) file.
pub const MAGIC: &[u8; 4] = b"BTRK";

/// Current file format version.
pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf_params(12) + salt(16) + nonce(12) + ciphertext_len(8) = 54
pub const MIN_HEADER_SIZE: usize = 54;

/// Header of an encrypted `.btrk` file.
#[derive(Debug)]
pub struct FileHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; 16],
    pub nonce: [u8; 12],
    pub ciphertext_len: u64,
}

/// Serialize a header and ciphertext into file bytes.
///
/// Layout (all integers little-endian):
/// ```text
/// [BTRK: 4B] [version: 2B] [memory_cost: 4B] [time_cost: 4B]
/// [parallelism: 4B] [salt: 16B] [nonce: 12B] [ciphertext_len: 8B]
/// [ciphertext: variable]
/// ```
pub fn write_file(
    version: u16,
    kdf_params: &KdfParams,
    salt: &[u8; 16],
    nonce: &[u8; 12],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MIN_HEADER_SIZE + ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    for cost in [kdf_params.memory_cost, kdf_params.time_cost, kdf_params.parallelism] {
        buf.extend_from_slice(&cost.to_le_bytes());
    }
    buf.extend_from_slice(salt);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(ciphertext);
    buf
}

/// Forward-only reader over the header bytes.
struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl Cursor<'_> {
    fn take<const N: usize>(&mut self, what: &str) -> Result<[u8; N], CoreError> {
        let end = self.offset + N;
        let bytes: [u8; N] = self
            .data
            .get(self.offset..end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| CoreError::InvalidFileFormat(format!("Failed to read {what}")))?;
        self.offset = end;
        Ok(bytes)
    }

    fn u16(&mut self, what: &str) -> Result<u16, CoreError> {
        self.take::<2>(what).map(u16::from_le_bytes)
    }

    fn u32(&mut self, what: &str) -> Result<u32, CoreError> {
        self.take::<4>(what).map(u32::from_le_bytes)
    }

    fn u64(&mut self, what: &str) -> Result<u64, CoreError> {
        self.take::<8>(what).map(u64::from_le_bytes)
    }
}

/// Parse file bytes into a header and the ciphertext slice.
pub fn read_file(data: &[u8]) -> Result<(FileHeader, &[u8]), CoreError> {
    if data.len() < MIN_HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a valid BTRK file".into(),
        ));
    }

    let mut cursor = Cursor { data, offset: 0 };
    if &cursor.take::<4>("magic bytes")? != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not a BTRK file".into(),
        ));
    }

    let version = cursor.u16("version")?;
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let kdf_params = KdfParams {
        memory_cost: cursor.u32("KDF memory_cost")?,
        time_cost: cursor.u32("KDF time_cost")?,
        parallelism: cursor.u32("KDF parallelism")?,
    };
    check_kdf_bounds(&kdf_params)?;

    let salt = cursor.take::<16>("salt")?;
    let nonce = cursor.take::<12>("nonce")?;
    let ciphertext_len = cursor.u64("ciphertext length")?;

    let start = cursor.offset;
    let available = (data.len() - start) as u64;
    if available < ciphertext_len {
        return Err(CoreError::InvalidFileFormat(format!(
            "File truncated: expected {ciphertext_len} bytes of ciphertext, got {available}"
        )));
    }
    let ciphertext = &data[start..start + ciphertext_len as usize];

    let header = FileHeader {
        version,
        kdf_params,
        salt,
        nonce,
        ciphertext_len,
    };
    Ok((header, ciphertext))
}

/// Reject crafted headers that would make key derivation exhaust memory or CPU.
fn check_kdf_bounds(params: &KdfParams) -> Result<(), CoreError> {
    let checks = [
        ("memory_cost", params.memory_cost, 8, 1_048_576),
        ("time_cost", params.time_cost, 1, 20),
        ("parallelism", params.parallelism, 1, 16),
    ];
    for (name, value, min, max) in checks {
        if !(min..=max).contains(&value) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF {name} out of safe range: {value} (expected {min}..={max})"
            )));
        }
    }
    Ok(())
}
