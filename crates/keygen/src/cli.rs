use clap::Parser;

use crate::generate::KeyFormat;

/// Generate a random APP_KEY for the encryptor service
#[derive(Debug, Parser)]
#[command(name = "encryptor-keygen", version, about, long_about = None)]
pub struct Cli {
    /// Key length in bytes, before encoding
    #[arg(short, long, default_value_t = 32)]
    pub length: usize,

    /// Output encoding
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = KeyFormat::Base64)]
    pub format: KeyFormat,
}
