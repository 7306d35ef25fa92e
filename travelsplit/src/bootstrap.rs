use std::{borrow::Cow, env};
use tracing_subscriber::EnvFilter;
use travelsplit_domain::{Money, SettlementContext};
use travelsplit_presentation::SummaryStyle;

pub const SCALE_VAR: &str = "TRAVELSPLIT_SCALE";
pub const TOLERANCE_VAR: &str = "TRAVELSPLIT_TOLERANCE";
pub const CURRENCY_VAR: &str = "TRAVELSPLIT_CURRENCY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub scale: u32,
    pub tolerance: Money,
    pub currency: String,
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SettlementContext::default();

        let scale = match lookup(SCALE_VAR) {
            None => defaults.scale,
            Some(value) => match value.trim().parse::<u32>() {
                Ok(scale) if scale <= SettlementContext::MAX_SCALE => scale,
                Ok(_) => return Err(invalid(SCALE_VAR, value, "scale is too large")),
                Err(_) => return Err(invalid(SCALE_VAR, value, "expected an integer")),
            },
        };

        let tolerance = match lookup(TOLERANCE_VAR) {
            None => defaults.tolerance,
            Some(value) => match value.parse::<Money>() {
                Ok(tolerance) if tolerance.is_positive() => tolerance,
                Ok(_) => return Err(invalid(TOLERANCE_VAR, value, "must be greater than zero")),
                Err(_) => return Err(invalid(TOLERANCE_VAR, value, "expected a decimal")),
            },
        };

        let currency = lookup(CURRENCY_VAR).unwrap_or_else(|| "$".to_string());

        Ok(Self {
            scale,
            tolerance,
            currency,
        })
    }

    pub fn context(&self) -> SettlementContext {
        SettlementContext {
            scale: self.scale,
            tolerance: self.tolerance,
        }
    }

    pub fn summary_style(&self) -> SummaryStyle {
        SummaryStyle {
            currency: Cow::Owned(self.currency.clone()),
            scale: self.scale,
        }
    }
}

fn invalid(key: &'static str, value: String, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue { key, value, reason }
}

/// Initialize logging and tracing
///
/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
