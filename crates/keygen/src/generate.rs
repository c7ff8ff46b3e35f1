//! Random key generation and `APP_KEY` rendering.

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::Zeroizing;

/// Encoding applied to the raw random bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KeyFormat {
    /// Standard base64 with padding.
    Base64,
    /// Lowercase hexadecimal.
    Hex,
}

impl std::fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            KeyFormat::Base64 => "base64",
            KeyFormat::Hex => "hex",
        })
    }
}

/// Draw `length` bytes from the OS CSPRNG and encode them as `format`.
///
/// # Errors
///
/// Returns an error if `length` is zero or the OS random source fails.
pub fn generate_key(length: usize, format: KeyFormat) -> Result<String> {
    if length == 0 {
        anyhow::bail!("key length must be a positive integer");
    }

    let bytes = random_bytes(length)?;
    Ok(match format {
        KeyFormat::Base64 => STANDARD.encode(bytes.as_slice()),
        KeyFormat::Hex => hex::encode(bytes.as_slice()),
    })
}

/// Raw key bytes, wiped when dropped; only the encoded form leaves the crate.
fn random_bytes(length: usize) -> Result<Zeroizing<Vec<u8>>> {
    let mut bytes = Zeroizing::new(vec![0u8; length]);
    getrandom::getrandom(bytes.as_mut_slice())
        .map_err(|e| anyhow::anyhow!("failed to read random bytes from the OS: {e}"))?;
    Ok(bytes)
}

/// Render a key as a dotenv line.
pub fn render_env_line(key: &str) -> String {
    format!("APP_KEY=\"{key}\"")
}
