use rust_decimal::Decimal;
use std::{env, str::FromStr};
use tabsplit_domain::{Money, RoundingMode, SettlementContext, SettlementContextError};

const SCALE_VAR: &str = "TABSPLIT_SCALE";
const THRESHOLD_VAR: &str = "TABSPLIT_TRANSFER_THRESHOLD";
const ROUNDING_VAR: &str = "TABSPLIT_ROUNDING";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("TABSPLIT_SCALE must be a non-negative integer (got '{0}')")]
    InvalidScale(String),
    #[error("TABSPLIT_SCALE must be at most {max_supported} (got {scale})")]
    UnsupportedScale { scale: u32, max_supported: u32 },
    #[error("TABSPLIT_TRANSFER_THRESHOLD must be a decimal amount (got '{0}')")]
    InvalidThreshold(String),
    #[error("TABSPLIT_TRANSFER_THRESHOLD must not be negative (got {0})")]
    NegativeThreshold(Money),
    #[error("TABSPLIT_ROUNDING must be 'half-up' or 'half-even' (got '{0}')")]
    InvalidRounding(String),
}

impl From<SettlementContextError> for ConfigError {
    fn from(err: SettlementContextError) -> Self {
        match err {
            SettlementContextError::UnsupportedScale {
                scale,
                max_supported,
            } => ConfigError::UnsupportedScale {
                scale,
                max_supported,
            },
            SettlementContextError::NegativeThreshold(threshold) => {
                ConfigError::NegativeThreshold(threshold)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub context: SettlementContext,
}

impl AppConfig {
    /// Reads overrides from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut context = SettlementContext::two_decimal_default();

        if let Some(raw) = lookup(SCALE_VAR) {
            context.scale = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidScale(raw.clone()))?;
        }
        if let Some(raw) = lookup(THRESHOLD_VAR) {
            let threshold = Decimal::from_str(raw.trim())
                .map_err(|_| ConfigError::InvalidThreshold(raw.clone()))?;
            context.transfer_threshold = Money::from_decimal(threshold);
        }
        if let Some(raw) = lookup(ROUNDING_VAR) {
            context.rounding_mode = match raw.trim().to_ascii_lowercase().as_str() {
                "half-up" => RoundingMode::HalfUp,
                "half-even" => RoundingMode::HalfEven,
                _ => return Err(ConfigError::InvalidRounding(raw)),
            };
        }

        let context = context.validate()?;
        tracing::debug!(
            scale = context.scale,
            rounding_mode = ?context.rounding_mode,
            transfer_threshold = %context.transfer_threshold,
            "Settlement settings loaded"
        );
        Ok(Self { context })
    }
}
