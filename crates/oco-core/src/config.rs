//! Configuration parsing for the OCO runner.
//!
//! Settings come from a single JSON file. Every section is optional: a missing
//! `validation` block means the permissive default policy, and a missing
//! `instrument` must then be given on the command line.
//!
//! # Example config
//!
//! ```json
//! {
//!   "Oco": { "module_name": "oco_runner", "log_path": "/tmp/log" },
//!   "instrument": { "exchange": "binance", "base": "BTC", "counter": "USDT" },
//!   "validation": { "reject_empty_bracket": true, "require_numeric": true }
//! }
//! ```

use serde::Deserialize;

use crate::types::TickTrigger;
use crate::validate::ValidationPolicy;

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Module metadata (name, log path).
    #[serde(rename = "Oco")]
    pub oco: Option<ModuleMeta>,

    /// Default selected instrument.
    pub instrument: Option<TickTrigger>,

    /// What the runner rejects before submitting.
    pub validation: ValidationPolicy,
}

/// Module metadata block.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleMeta {
    pub module_name: Option<String>,
    pub log_path: Option<String>,
}

impl AppConfig {
    /// Returns the module name, defaulting to `oco-runner`.
    pub fn module_name(&self) -> String {
        self.oco
            .as_ref()
            .and_then(|m| m.module_name.clone())
            .unwrap_or_else(|| "oco-runner".to_string())
    }

    /// Returns the log path.
    pub fn log_path(&self) -> Option<String> {
        self.oco.as_ref().and_then(|m| m.log_path.clone())
    }
}

/// Load and parse a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
