//! Site configuration.
//!
//! Every field has a default, so an empty document is a valid config. The
//! browser passes JSON across the wasm boundary; TOML is accepted for
//! configs kept next to the site sources.
//!
//! ```toml
//! [gradient]
//! speed = 0.05
//!
//! [form]
//! failure_probability = 0.0
//! ```

use crate::animation::GradientAnimation;
use crate::form::FormTimings;
use crate::gradient::{Palette, DEFAULT_PALETTE, DEFAULT_SPEED};
use crate::nav::NavLayout;
use crate::theme::{ThemeChoice, DEFAULT_STORAGE_KEY};
use crate::transport::SimulatedTransport;
use crate::ColorParseError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed TOML
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    /// Malformed JSON
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    /// Palette entry is not `#rrggbb`
    #[error("gradient.palette: {0}")]
    Palette(#[from] ColorParseError),
    /// Field outside its accepted range
    #[error("{field}: {reason}")]
    OutOfRange {
        /// Dotted field path
        field: &'static str,
        /// What was wrong
        reason: String,
    },
}

/// Background gradient settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    /// Four `#rrggbb` colours, one per blob
    pub palette: [String; 4],
    /// Clock increment per frame
    pub speed: f64,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.map(String::from),
            speed: DEFAULT_SPEED,
        }
    }
}

/// Theme persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preference store key
    pub storage_key: String,
    /// Choice used when nothing is stored
    pub default: ThemeChoice,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default: ThemeChoice::Dark,
        }
    }
}

/// Contact form settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Simulated send latency
    pub send_delay_ms: u64,
    /// Chance a simulated send fails
    pub failure_probability: f64,
    /// Delay before the submit button is re-enabled after success
    pub release_delay_ms: u64,
    /// How long a banner stays up
    pub message_ttl_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            send_delay_ms: 1500,
            failure_probability: 0.1,
            release_delay_ms: 2000,
            message_ttl_ms: 5000,
        }
    }
}

/// Top-level site configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Background gradient
    pub gradient: GradientConfig,
    /// Theme persistence
    pub theme: ThemeConfig,
    /// Nav highlight geometry
    pub nav: NavLayout,
    /// Contact form
    pub form: FormConfig,
}

impl SiteConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and colours.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Palette::from_hex(&self.gradient.palette)?;
        if !(self.gradient.speed.is_finite() && self.gradient.speed > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "gradient.speed",
                reason: format!("must be a positive number, got {}", self.gradient.speed),
            });
        }
        if self.theme.storage_key.is_empty() {
            return Err(ConfigError::OutOfRange {
                field: "theme.storage_key",
                reason: "must not be empty".into(),
            });
        }
        let slot_width = self.nav.slot_width;
        if !(slot_width.is_finite() && slot_width >= 0.0 && self.nav.margin.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "nav",
                reason: format!(
                    "slot_width must be finite and >= 0, margin finite, got {} / {}",
                    self.nav.slot_width, self.nav.margin
                ),
            });
        }
        let p = self.form.failure_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::OutOfRange {
                field: "form.failure_probability",
                reason: format!("must be within [0, 1], got {p}"),
            });
        }
        Ok(())
    }

    /// Palette parsed from hex. Falls back to the default palette if the
    /// config was never validated and holds a bad entry.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::from_hex(&self.gradient.palette).unwrap_or_else(|e| {
            log::warn!("bad palette ({e}), using default");
            Palette::default()
        })
    }

    /// Gradient animation built from this config.
    #[must_use]
    pub fn animation(&self) -> GradientAnimation {
        GradientAnimation::new(self.palette(), self.gradient.speed)
    }

    /// Form delays.
    #[must_use]
    pub const fn form_timings(&self) -> FormTimings {
        FormTimings {
            release_delay: Duration::from_millis(self.form.release_delay_ms),
            message_ttl: Duration::from_millis(self.form.message_ttl_ms),
        }
    }

    /// Simulated transport.
    #[must_use]
    pub fn transport(&self) -> SimulatedTransport {
        SimulatedTransport::new(
            Duration::from_millis(self.form.send_delay_ms),
            self.form.failure_probability,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.gradient.palette[0], "#006400");
        assert_eq!(config.gradient.speed, 0.025);
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.theme.default, ThemeChoice::Dark);
        assert_eq!(config.nav, NavLayout::default());
        assert_eq!(config.form_timings(), FormTimings::default());
        assert_eq!(config.transport(), SimulatedTransport::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_documents_are_default() {
        assert_eq!(SiteConfig::from_toml_str("").unwrap(), SiteConfig::default());
        assert_eq!(SiteConfig::from_json_str("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = SiteConfig::from_toml_str(
            r##"
            [gradient]
            speed = 0.05
            palette = ["#000000", "#111111", "#222222", "#333333"]

            [theme]
            default = "system"

            [nav]
            slot_width = 120.0

            [form]
            failure_probability = 0.0
            "##,
        )
        .unwrap();

        assert_eq!(config.gradient.speed, 0.05);
        assert_eq!(config.palette().get(1).map(|c| c.to_hex()), Some("#111111".into()));
        assert_eq!(config.theme.default, ThemeChoice::System);
        assert_eq!(config.nav.slot_width, 120.0);
        assert_eq!(config.nav.margin, 4.0);
        assert_eq!(config.transport().failure_probability(), 0.0);
        assert_eq!(config.form.send_delay_ms, 1500);
    }

    #[test]
    fn test_json_override() {
        let config =
            SiteConfig::from_json_str(r#"{"form": {"send_delay_ms": 10, "message_ttl_ms": 50}}"#)
                .unwrap();
        assert_eq!(config.transport().delay(), Duration::from_millis(10));
        assert_eq!(config.form_timings().message_ttl, Duration::from_millis(50));
    }

    #[test]
    fn test_rejects_bad_palette() {
        let err = SiteConfig::from_json_str(
            r##"{"gradient": {"palette": ["#000000", "#111111", "blue", "#333333"]}}"##,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Palette(_)));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = SiteConfig::from_json_str(r#"{"form": {"failure_probability": 1.5}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "form.failure_probability",
                ..
            }
        ));

        let err = SiteConfig::from_toml_str("[gradient]\nspeed = 0.0").unwrap_err();
        assert!(err.to_string().starts_with("gradient.speed"));

        let err = SiteConfig::from_toml_str("[theme]\nstorage_key = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "theme.storage_key", .. }));
    }

    #[test]
    fn test_rejects_infinite_nav_slot() {
        let err = SiteConfig::from_toml_str("[nav]\nslot_width = inf").unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "nav", .. }));
        assert!(SiteConfig::from_toml_str("[nav]\nmargin = nan").is_err());
    }

    #[test]
    fn test_rejects_signed_palette_entry() {
        let err = SiteConfig::from_json_str(
            r##"{"gradient": {"palette": ["#+f+f+f", "#111111", "#222222", "#333333"]}}"##,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Palette(ColorParseError::InvalidHex(_))));
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(matches!(
            SiteConfig::from_json_str(r#"{"theme": {"default": "sepia"}}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_palette_fallback_when_unvalidated() {
        let mut config = SiteConfig::default();
        config.gradient.palette[0] = "oops".into();
        assert_eq!(config.palette(), Palette::default());
    }
}
