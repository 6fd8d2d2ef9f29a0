//! Application-level configuration constants and the page configuration block.

use crate::pricing::{Money, TicketSettings};
use serde::Deserialize;
use std::fmt;

// Ticket defaults
pub const DEFAULT_MIN_TICKETS: u32 = 1;
pub const DEFAULT_MAX_TICKETS: u32 = 10;
pub const CLASSIC_UNIT_PRICE: f64 = 3.0;
pub const CLASSIC_FRACTION_DIGITS: u8 = 0;
pub const ANIMATED_UNIT_PRICE: f64 = 3.5;
pub const ANIMATED_FRACTION_DIGITS: u8 = 2;

// Animation timing
pub const COUNTER_DURATION_MS: f64 = 1400.0;
pub const REVEAL_THRESHOLD: f64 = 0.2;
pub const COUNTER_THRESHOLD: f64 = 0.35;

// Decorative effects
pub const NAV_SCROLL_THRESHOLD_PX: f64 = 12.0;
pub const TILT_MAX_DEG: f64 = 8.0;
pub const DEFAULT_PARALLAX_STRENGTH: f64 = 10.0;

// DOM contract
pub const CONFIG_SCRIPT_ID: &str = "page-config";
pub const WIDGET_ROOT_ID: &str = "purchase-widget";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const VISIBLE_CLASS: &str = "is-visible";
pub const SCROLLED_CLASS: &str = "is-scrolled";
pub const ACTIVE_CLASS: &str = "is-active";

/// Which of the two page variants the defaults are taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Ticket widget and anchor scrolling only, whole-euro prices.
    Classic,
    /// Full page with reveal animations and decorative effects.
    #[default]
    Animated,
}

/// Raw configuration as found in the page's JSON block. Every field is
/// optional; unset fields fall back to the preset.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub preset: Preset,
    pub min_tickets: Option<u32>,
    pub max_tickets: Option<u32>,
    pub unit_price: Option<f64>,
    pub fraction_digits: Option<u8>,
    pub effects: Option<bool>,
    pub counter_duration_ms: Option<f64>,
    pub tilt_max_deg: Option<f64>,
    pub log_level: Option<String>,
}

/// Settings consumed by the reveal animator and the decorative handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSettings {
    pub enabled: bool,
    pub counter_duration_ms: f64,
    pub reveal_threshold: f64,
    pub counter_threshold: f64,
    pub nav_threshold_px: f64,
    pub tilt_max_deg: f64,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            counter_duration_ms: COUNTER_DURATION_MS,
            reveal_threshold: REVEAL_THRESHOLD,
            counter_threshold: COUNTER_THRESHOLD,
            nav_threshold_px: NAV_SCROLL_THRESHOLD_PX,
            tilt_max_deg: TILT_MAX_DEG,
        }
    }
}

/// Fully validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub tickets: TicketSettings,
    pub effects: EffectSettings,
    pub log_level: log::LevelFilter,
}

#[derive(Debug)]
pub enum ConfigError {
    Malformed(String),
    InvalidBounds { min: u32, max: u32 },
    InvalidPrice(f64),
    UnsupportedFractionDigits(u8),
    InvalidDuration(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Malformed(msg) => write!(f, "Malformed page config: {}", msg),
            ConfigError::InvalidBounds { min, max } => write!(
                f,
                "Invalid ticket bounds: min {} and max {} (need 1 <= min <= max)",
                min, max
            ),
            ConfigError::InvalidPrice(p) => write!(f, "Invalid unit price: {}", p),
            ConfigError::UnsupportedFractionDigits(d) => {
                write!(f, "Unsupported fraction digits: {} (use 0 or 2)", d)
            }
            ConfigError::InvalidDuration(ms) => write!(f, "Invalid counter duration: {}ms", ms),
        }
    }
}

impl std::error::Error for ConfigError {}

impl PageConfig {
    /// Parse the JSON configuration block.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Apply preset defaults and validate the overrides.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let (price, digits, effects) = match self.preset {
            Preset::Classic => (CLASSIC_UNIT_PRICE, CLASSIC_FRACTION_DIGITS, false),
            Preset::Animated => (ANIMATED_UNIT_PRICE, ANIMATED_FRACTION_DIGITS, true),
        };

        let min = self.min_tickets.unwrap_or(DEFAULT_MIN_TICKETS);
        let max = self.max_tickets.unwrap_or(DEFAULT_MAX_TICKETS);
        if min == 0 || min > max {
            return Err(ConfigError::InvalidBounds { min, max });
        }

        let unit_price = self.unit_price.unwrap_or(price);
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(ConfigError::InvalidPrice(unit_price));
        }

        let fraction_digits = self.fraction_digits.unwrap_or(digits);
        if fraction_digits != 0 && fraction_digits != 2 {
            return Err(ConfigError::UnsupportedFractionDigits(fraction_digits));
        }

        let counter_duration_ms = self.counter_duration_ms.unwrap_or(COUNTER_DURATION_MS);
        if !counter_duration_ms.is_finite() || counter_duration_ms <= 0.0 {
            return Err(ConfigError::InvalidDuration(counter_duration_ms));
        }

        let log_level = self
            .log_level
            .as_deref()
            .and_then(|lvl| lvl.parse().ok())
            .unwrap_or(log::LevelFilter::Info);

        Ok(ResolvedConfig {
            tickets: TicketSettings {
                min,
                max,
                unit_price: Money::from_decimal(unit_price),
                fraction_digits,
            },
            effects: EffectSettings {
                enabled: self.effects.unwrap_or(effects),
                counter_duration_ms,
                tilt_max_deg: self.tilt_max_deg.unwrap_or(TILT_MAX_DEG),
                ..EffectSettings::default()
            },
            log_level,
        })
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            tickets: TicketSettings::default(),
            effects: EffectSettings::default(),
            log_level: log::LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_resolves_to_animated_preset() {
        let cfg = PageConfig::from_json("{}").unwrap().resolve().unwrap();
        assert_eq!(cfg.tickets.min, 1);
        assert_eq!(cfg.tickets.max, 10);
        assert_eq!(cfg.tickets.unit_price, Money::from_cents(350));
        assert_eq!(cfg.tickets.fraction_digits, 2);
        assert!(cfg.effects.enabled);
        assert_eq!(cfg.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn classic_preset_uses_whole_euros_without_effects() {
        let cfg = PageConfig::from_json(r#"{"preset":"classic"}"#)
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(cfg.tickets.unit_price, Money::from_cents(300));
        assert_eq!(cfg.tickets.fraction_digits, 0);
        assert!(!cfg.effects.enabled);
    }

    #[test]
    fn overrides_win_over_preset() {
        let cfg = PageConfig::from_json(
            r#"{"preset":"classic","max_tickets":25,"unit_price":4.25,"fraction_digits":2,"effects":true,"log_level":"debug"}"#,
        )
        .unwrap()
        .resolve()
        .unwrap();
        assert_eq!(cfg.tickets.max, 25);
        assert_eq!(cfg.tickets.unit_price, Money::from_cents(425));
        assert_eq!(cfg.tickets.fraction_digits, 2);
        assert!(cfg.effects.enabled);
        assert_eq!(cfg.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = PageConfig::from_json(r#"{"min_tickets":5,"max_tickets":2}"#)
            .unwrap()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { min: 5, max: 2 }));
    }

    #[test]
    fn rejects_zero_minimum_and_odd_precision() {
        let zero = PageConfig {
            min_tickets: Some(0),
            ..PageConfig::default()
        };
        assert!(matches!(zero.resolve(), Err(ConfigError::InvalidBounds { .. })));

        let digits = PageConfig {
            fraction_digits: Some(1),
            ..PageConfig::default()
        };
        assert!(matches!(
            digits.resolve(),
            Err(ConfigError::UnsupportedFractionDigits(1))
        ));
    }

    #[test]
    fn default_matches_resolved_empty_config() {
        assert_eq!(ResolvedConfig::default(), PageConfig::default().resolve().unwrap());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            PageConfig::from_json("{preset:"),
            Err(ConfigError::Malformed(_))
        ));
        assert!(PageConfig::from_json(r#"{"preset":"neon"}"#).is_err());
    }
}
