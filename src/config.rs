use crate::error::ConfigError;
use crate::{BPS_DENOMINATOR, DEFAULT_SLIPPAGE_BPS, MAX_SLIPPAGE_BPS};
use serde::{Deserialize, Serialize};

/// Tunables of the quote layer.
///
/// Every field has a default, so a partial JSON document such as
/// `{"default_slippage_bps": 30}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Applied when the caller's slippage is missing, negative or not a number.
    pub default_slippage_bps: u32,
    /// Upper clamp for any requested slippage.
    pub max_slippage_bps: u32,
    /// Lower clamp of the concentration multiplier in APR estimates.
    pub min_range_boost: f64,
    /// Upper clamp of the concentration multiplier in APR estimates.
    pub max_range_boost: f64,
    pub days_per_year: f64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl QuoteConfig {
    pub const DEFAULT: Self = Self {
        default_slippage_bps: DEFAULT_SLIPPAGE_BPS,
        max_slippage_bps: MAX_SLIPPAGE_BPS,
        min_range_boost: 0.2,
        max_range_boost: 25.0,
        days_per_year: 365.0,
    };

    /// Parses and validates a JSON configuration.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_slippage_bps > BPS_DENOMINATOR {
            return Err(ConfigError::MaxSlippageTooLarge(self.max_slippage_bps));
        }
        if self.default_slippage_bps > self.max_slippage_bps {
            return Err(ConfigError::SlippageAboveMax {
                default_bps: self.default_slippage_bps,
                max_bps: self.max_slippage_bps,
            });
        }
        let bounds_ok = self.min_range_boost.is_finite()
            && self.max_range_boost.is_finite()
            && self.min_range_boost > 0.0
            && self.min_range_boost <= self.max_range_boost;
        if !bounds_ok {
            return Err(ConfigError::InvalidBoostBounds {
                min: self.min_range_boost,
                max: self.max_range_boost,
            });
        }
        Ok(())
    }

    /// Resolves a user supplied slippage into whole basis points.
    ///
    /// Missing, negative and non-finite values fall back to
    /// `default_slippage_bps`; everything else is floored and clamped to
    /// `max_slippage_bps`.
    pub fn slippage_bps(&self, requested: Option<f64>) -> u32 {
        match requested {
            Some(bps) if bps.is_finite() && bps >= 0.0 => {
                // saturating cast, bps is non-negative here
                (bps.floor() as u32).min(self.max_slippage_bps)
            }
            _ => self.default_slippage_bps.min(self.max_slippage_bps),
        }
    }
}
