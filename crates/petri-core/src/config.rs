//! Configuration loading and typed config structures for the Petri
//! simulation.
//!
//! The canonical configuration lives in `petri-config.yaml` at the working
//! directory. This module defines strongly-typed structs that mirror the
//! YAML structure, provides a loader, and validates the geometry before
//! the engine starts. Grid dimensions are derived, not configured: the
//! viewport size in pixels divided by the square size.

use std::path::Path;

use serde::Deserialize;

use petri_grid::pattern::{InjectionConfig, MIN_MARGIN};

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unusable simulation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `petri-config.yaml`. Every field has a
/// default, so a missing file (or any missing section) yields a working
/// 50x25 board ticking once per second.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// World geometry and tick cadence.
    #[serde(default)]
    pub world: WorldConfig,

    /// Pattern injection cadence and geometry.
    #[serde(default)]
    pub injection: InjectionConfig,

    /// Network bind settings.
    #[serde(default)]
    pub server: ServerSettings,
}

impl SimulationConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the square size or tick
    /// interval is zero, the derived grid is empty, the injection margin
    /// is smaller than the stamp geometry requires, or the grid is too
    /// small to hold the margin on both sides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.square_size == 0 {
            return Err(ConfigError::Invalid {
                reason: "square_size must be at least 1 pixel".to_owned(),
            });
        }
        if self.world.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "tick_interval_ms must be at least 1".to_owned(),
            });
        }
        if self.injection.interval_ticks == 0 {
            return Err(ConfigError::Invalid {
                reason: "injection interval_ticks must be at least 1".to_owned(),
            });
        }
        if self.injection.margin < MIN_MARGIN {
            return Err(ConfigError::Invalid {
                reason: format!("injection margin must be at least {MIN_MARGIN}"),
            });
        }

        let (width, height) = (self.grid_width(), self.grid_height());
        if width == 0 || height == 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "derived grid is empty ({width}x{height}): viewport smaller than one square"
                ),
            });
        }
        let needed = self.injection.margin.saturating_mul(2);
        if width < needed || height < needed {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "grid {width}x{height} too small for injection margin {}",
                    self.injection.margin
                ),
            });
        }
        Ok(())
    }

    /// Derived grid width: viewport width in pixels, floor-divided by the
    /// square size.
    pub const fn grid_width(&self) -> usize {
        if self.world.square_size == 0 {
            return 0;
        }
        (self.world.window_width / self.world.square_size) as usize
    }

    /// Derived grid height: viewport height in pixels, floor-divided by
    /// the square size.
    pub const fn grid_height(&self) -> usize {
        if self.world.square_size == 0 {
            return 0;
        }
        (self.world.window_height / self.world.square_size) as usize
    }
}

/// World geometry and tick cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Display name for the board (status page only).
    pub name: String,
    /// Viewport width in pixels.
    pub window_width: u32,
    /// Viewport height in pixels.
    pub window_height: u32,
    /// Pixel size of one cell; also the divisor for click coordinates.
    pub square_size: u32,
    /// Wall-clock delay between generations, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: String::from("petri"),
            window_width: 800,
            window_height: 400,
            square_size: 16,
            tick_interval_ms: 1000,
        }
    }
}

/// Network bind settings for the viewer server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host address to bind (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 5000,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_derive_a_50_by_25_grid() {
        let config = SimulationConfig::default();
        assert_eq!(config.grid_width(), 50);
        assert_eq!(config.grid_height(), 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_yaml_with_defaults() {
        let yaml = "world:\n  square_size: 8\n  tick_interval_ms: 250\n";
        let config: SimulationConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.world.square_size, 8);
        assert_eq!(config.world.tick_interval_ms, 250);
        // Untouched sections keep their defaults.
        assert_eq!(config.world.window_width, 800);
        assert_eq!(config.injection.interval_ticks, 100);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.grid_width(), 100);
    }

    #[test]
    fn parses_full_yaml() {
        let yaml = concat!(
            "world:\n",
            "  name: dish\n",
            "  window_width: 640\n",
            "  window_height: 480\n",
            "  square_size: 16\n",
            "  tick_interval_ms: 500\n",
            "injection:\n",
            "  interval_ticks: 50\n",
            "  margin: 5\n",
            "  block_pairs: 2\n",
            "  blinkers: 3\n",
            "server:\n",
            "  host: 127.0.0.1\n",
            "  port: 9000\n",
        );
        let config: SimulationConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.world.name, "dish");
        assert_eq!(config.grid_width(), 40);
        assert_eq!(config.grid_height(), 30);
        assert_eq!(config.injection.margin, 5);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_square_size_is_invalid() {
        let config: SimulationConfig =
            serde_yml::from_str("world:\n  square_size: 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_tick_interval_is_invalid() {
        let config: SimulationConfig =
            serde_yml::from_str("world:\n  tick_interval_ms: 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn viewport_smaller_than_a_square_is_invalid() {
        let config: SimulationConfig =
            serde_yml::from_str("world:\n  window_width: 10\n  square_size: 16\n").unwrap();
        assert_eq!(config.grid_width(), 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn margin_below_stamp_geometry_is_invalid() {
        let config: SimulationConfig =
            serde_yml::from_str("injection:\n  margin: 2\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn grid_too_small_for_margin_is_invalid() {
        // 128 / 16 = 8 columns, margin 4 needs at least 8 in both axes;
        // the 96-pixel height only yields 6 rows.
        let yaml = "world:\n  window_width: 128\n  window_height: 96\n";
        let config: SimulationConfig = serde_yml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }
}
