use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

use crate::core::engine::ZeroTransferPolicy;

#[derive(Debug)]
pub struct Config {
    pub log_level: String,
    pub ledger_path: Option<String>,
    pub zero_transfers: ZeroTransferPolicy,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            ledger_path: env::var("LEDGER_PATH").ok().filter(|p| !p.trim().is_empty()),
            zero_transfers: Self::zero_transfer_policy(env::var("EMIT_ZERO_TRANSFERS").ok().as_deref()),
        }
    }

    fn zero_transfer_policy(value: Option<&str>) -> ZeroTransferPolicy {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "false" | "0" | "no") => ZeroTransferPolicy::Skip,
            _ => ZeroTransferPolicy::Emit,
        }
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
