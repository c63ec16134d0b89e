//! Token configuration with TOML file support.
//!
//! TOML integers are 64-bit, so amounts here are `u64` and widened when the
//! [`ProtocolParams`] are built.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::VotableError;
use votable_types::{Address, CurrencyAmount, Price, ProtocolParams, TokenAmount, SECONDS_PER_WEEK};

/// Construction parameters as written in the config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsConfig {
    /// Initial price in currency units per token.
    #[serde(default = "default_initial_price")]
    pub initial_price: u64,

    /// Tokens minted to the owner at construction.
    #[serde(default = "default_owner_initial_supply")]
    pub owner_initial_supply: u64,

    /// Buy fee in basis points of the tokens bought.
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u32,

    #[serde(default = "default_week")]
    pub epoch_duration_secs: u64,

    #[serde(default = "default_week")]
    pub burn_window_secs: u64,
}

/// Configuration for a token instance.
///
/// Can be loaded from a TOML file via [`TokenConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Owner identity: `0x`-prefixed hex or a label.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Currency the treasury holds before the first buy.
    #[serde(default)]
    pub treasury_reserve: u64,

    /// Where the CLI keeps the token snapshot.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub params: ParamsConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_initial_price() -> u64 {
    2
}

fn default_owner_initial_supply() -> u64 {
    50_000
}

fn default_fee_bps() -> u32 {
    100
}

fn default_week() -> u64 {
    SECONDS_PER_WEEK
}

fn default_owner() -> String {
    "owner".to_string()
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./votable_state.bin")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ParamsConfig {
    /// Validated protocol parameters.
    pub fn to_params(&self) -> Result<ProtocolParams, VotableError> {
        let initial_price = Price::new(u128::from(self.initial_price))
            .ok_or_else(|| VotableError::Config("initial_price must be non-zero".into()))?;
        let params = ProtocolParams {
            initial_price,
            owner_initial_supply: TokenAmount::new(u128::from(self.owner_initial_supply)),
            fee_bps: self.fee_bps,
            epoch_duration_secs: self.epoch_duration_secs,
            burn_window_secs: self.burn_window_secs,
        };
        params.validate()?;
        Ok(params)
    }
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            initial_price: default_initial_price(),
            owner_initial_supply: default_owner_initial_supply(),
            fee_bps: default_fee_bps(),
            epoch_duration_secs: default_week(),
            burn_window_secs: default_week(),
        }
    }
}

impl TokenConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, VotableError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| VotableError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, VotableError> {
        toml::from_str(s).map_err(|e| VotableError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, VotableError> {
        toml::to_string_pretty(self).map_err(|e| VotableError::Config(e.to_string()))
    }

    pub fn protocol_params(&self) -> Result<ProtocolParams, VotableError> {
        self.params.to_params()
    }

    pub fn owner_address(&self) -> Result<Address, VotableError> {
        Ok(Address::resolve(&self.owner)?)
    }

    pub fn treasury_reserve(&self) -> CurrencyAmount {
        CurrencyAmount::new(u128::from(self.treasury_reserve))
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            treasury_reserve: 0,
            state_file: default_state_file(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            params: ParamsConfig::default(),
        }
    }
}
