//! Layered configuration loader with locked requirements.
//!
//! Discovers configuration layers (system/user/cwd/runtime), validates their
//! schema, merges them under optional requirements, and produces a final
//! `FeedTrackConfig`.

mod layer_io;
mod merge;
mod schema;
mod utils;

#[cfg(test)]
mod tests;

use crate::{ConfigError, FeedTrackConfig};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename in local layers.
const DEFAULT_CONFIG_FILE: &str = "feedtrack.json5";
/// Default config directory under the user home.
const DEFAULT_CONFIG_DIR: &str = ".feedtrack";

#[cfg(unix)]
/// Default system config path on Unix.
const SYSTEM_CONFIG_PATH: &str = "/etc/feedtrack/feedtrack.json5";
#[cfg(unix)]
/// Default requirements path on Unix.
const SYSTEM_REQUIREMENTS_PATH: &str = "/etc/feedtrack/requirements.json5";
#[cfg(windows)]
/// Default system config path on Windows.
const SYSTEM_CONFIG_PATH: &str = "C:\\ProgramData\\feedtrack\\feedtrack.json5";
#[cfg(windows)]
/// Default requirements path on Windows.
const SYSTEM_REQUIREMENTS_PATH: &str = "C:\\ProgramData\\feedtrack\\requirements.json5";

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: FeedTrackConfig,
    /// Metadata for each layer that contributed.
    pub layers: Vec<ConfigLayer>,
}

/// Origin for a single config layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// Locked settings that later layers cannot override.
    Requirements,
    /// System-wide configuration.
    System,
    /// User-specific configuration.
    User,
    /// Current working directory configuration.
    Cwd,
    /// Runtime overrides (highest precedence).
    Runtime,
}

/// Metadata about a loaded config layer.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: Option<PathBuf>,
}

/// Schema validation mode for layered configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaMode {
    /// A single layer, which may omit anything.
    Partial,
    /// The merged effective config.
    Full,
}

/// Options controlling layered config discovery and overrides.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Working directory holding the cwd layer.
    pub cwd: PathBuf,
    /// Optional system config path (defaults to `/etc/feedtrack/feedtrack.json5` on Unix).
    pub system_config_path: Option<PathBuf>,
    /// Optional user config path (defaults to `~/.feedtrack/feedtrack.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Optional requirements path for locked settings.
    pub requirements_path: Option<PathBuf>,
    /// Runtime override config paths applied last.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Create options with default layer locations for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            system_config_path: layer_io::default_system_config_path(),
            user_config_path: layer_io::default_user_config_path(),
            requirements_path: layer_io::default_requirements_path(),
            runtime_paths: Vec::new(),
        }
    }

    /// Add a runtime override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl FeedTrackConfig {
    /// Load a single config from a path (no layering).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadLayer {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = json5::from_str(&contents)?;
        config_from_value(value, "config")
    }

    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value, "config")
    }

    /// Load a layered config stack using the default layer locations.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        info!(
            "loading layered config with defaults (cwd={})",
            cwd.as_ref().display()
        );
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load a layered config stack using explicit layer locations.
    ///
    /// Layer precedence (low -> high): system, user, cwd, runtime overrides.
    /// Keys present in the requirements layer cannot be overridden.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = utils::normalize_path(&options.cwd)?;
        let mut layers = Vec::new();
        let mut merge_layers = Vec::new();
        let mut seen_paths = HashSet::new();

        let requirements = layer_io::load_optional_layer(
            ConfigLayerSource::Requirements,
            options.requirements_path.as_deref(),
        )?;
        let requirements_value = requirements.as_ref().map(|layer| layer.value.clone());
        if let Some(layer) = requirements {
            debug!("loaded requirements layer");
            layers.push(layer.meta);
        }

        let cwd_path = cwd.join(DEFAULT_CONFIG_FILE);
        let candidates = [
            (
                ConfigLayerSource::System,
                options.system_config_path.as_deref(),
            ),
            (ConfigLayerSource::User, options.user_config_path.as_deref()),
            (ConfigLayerSource::Cwd, Some(cwd_path.as_path())),
        ];
        for (source, path) in candidates {
            let Some(path) = path else {
                continue;
            };
            if path.exists() && !seen_paths.insert(utils::unique_path(path)) {
                debug!(
                    "skipping duplicate layer (source={:?}, path={})",
                    source,
                    path.display()
                );
                continue;
            }
            if let Some(layer) = layer_io::load_optional_layer(source, Some(path))? {
                debug!("loaded {:?} layer", source);
                layers.push(layer.meta.clone());
                merge_layers.push(layer);
            }
        }

        for runtime_path in &options.runtime_paths {
            let loaded = layer_io::load_required_layer(ConfigLayerSource::Runtime, runtime_path)?;
            debug!("loaded runtime layer (path={})", runtime_path.display());
            layers.push(loaded.meta.clone());
            merge_layers.push(loaded);
        }

        let mut merged = Value::Object(serde_json::Map::new());
        if let Some(requirements_value) = &requirements_value {
            merge::merge_json_values(&mut merged, requirements_value);
        }
        for layer in merge_layers {
            merge::merge_json_with_constraints(
                &mut merged,
                &layer.value,
                requirements_value.as_ref(),
            );
        }

        let config = config_from_value(merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ai.models.is_empty() {
            return Err(ConfigError::Invalid(
                "ai.models must list at least one model".to_string(),
            ));
        }
        if self.ai.models.iter().any(|model| model.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "ai.models entries cannot be blank".to_string(),
            ));
        }
        if self.ai.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "ai.request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.insights.window == 0 {
            return Err(ConfigError::Invalid(
                "insights.window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Internal representation of a loaded config layer.
#[derive(Debug, Clone)]
struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

fn config_from_value(value: Value, label: &str) -> Result<FeedTrackConfig, ConfigError> {
    schema::validate_layer_schema(&value, SchemaMode::Full, label)?;
    let config: FeedTrackConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
