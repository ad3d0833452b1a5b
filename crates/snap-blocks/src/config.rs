//! Accordion runtime configuration.
//!
//! The defaults reproduce the markup the block save functions emit, so most
//! pages never need a config file. A config can be loaded from TOML:
//!
//! ```
//! use snap_blocks::config::AccordionConfig;
//!
//! let config = AccordionConfig::from_toml_str(
//!     r#"
//!     open_tick_ms = 16
//!     scroll_behavior = "instant"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.open_tick_ms, 16);
//! assert_eq!(config.item_selector, "[data-accordion]");
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dom::ScrollBehavior;

/// Errors raised while loading or validating an [`AccordionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML was malformed or had fields of the wrong type.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be written as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value the runtime cannot use.
    #[error("invalid value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

/// Selectors, attribute names and timings used to bind accordions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    /// Selector for group containers.
    pub group_selector: String,
    /// Selector for items inside a group.
    pub item_selector: String,
    /// Group attribute holding `"true"` when several items may be open.
    pub multiple_attribute: String,
    /// Item attribute holding `"true"` when the item asks to start open.
    pub initially_open_attribute: String,
    /// Appended to the item id to find its trigger.
    pub trigger_suffix: String,
    /// Appended to the item id to find its panel.
    pub panel_suffix: String,
    /// Custom property on the panel holding the collapse duration.
    pub timing_property: String,
    /// Delay between revealing a panel and marking it open.
    pub open_tick_ms: u64,
    /// Animation used for scroll compensation.
    pub scroll_behavior: ScrollBehavior,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            group_selector: "[data-accordion-group]".to_string(),
            item_selector: "[data-accordion]".to_string(),
            multiple_attribute: "data-is-multiple".to_string(),
            initially_open_attribute: "data-is-initially-open".to_string(),
            trigger_suffix: "-trigger".to_string(),
            panel_suffix: "-panel".to_string(),
            timing_property: "--snap-accordion-open-close-timing".to_string(),
            open_tick_ms: 1,
            scroll_behavior: ScrollBehavior::Smooth,
        }
    }
}

impl AccordionConfig {
    /// Parse and validate a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: "snap_blocks::page", path = %path.display(), "loaded accordion config");
        Ok(config)
    }

    /// Render the config as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check that every name and selector is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, selector) in [
            ("group_selector", &self.group_selector),
            ("item_selector", &self.item_selector),
        ] {
            if let Err(e) = snap_blocks_style::selector::SelectorList::parse(selector) {
                return Err(ConfigError::Invalid {
                    field,
                    message: e.to_string(),
                });
            }
        }

        for (field, value) in [
            ("multiple_attribute", &self.multiple_attribute),
            ("initially_open_attribute", &self.initially_open_attribute),
            ("trigger_suffix", &self.trigger_suffix),
            ("panel_suffix", &self.panel_suffix),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    message: "must not be empty".to_string(),
                });
            }
        }

        if self.trigger_suffix == self.panel_suffix {
            return Err(ConfigError::Invalid {
                field: "panel_suffix",
                message: "must differ from trigger_suffix".to_string(),
            });
        }

        if !self.timing_property.starts_with("--") {
            return Err(ConfigError::Invalid {
                field: "timing_property",
                message: format!("'{}' is not a custom property", self.timing_property),
            });
        }

        Ok(())
    }

    /// The open tick as a duration.
    pub fn open_tick(&self) -> Duration {
        Duration::from_millis(self.open_tick_ms)
    }
}
