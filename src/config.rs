//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgchart/orgchart.toml`
//! 3. Local config: `<dir>/.orgchart.toml` (`-C` directory or cwd)
//! 4. Environment variables: `ORGCHART_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// How the org chart is printed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Render employees as `name (#id)` instead of `name`
    pub show_ids: bool,
    /// Print the move history after `apply`
    pub show_history: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_ids: true,
            show_history: true,
        }
    }
}

/// Raw display config for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub show_ids: Option<bool>,
    pub show_history: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub org_file: Option<PathBuf>,
    #[serde(default)]
    pub display: RawDisplayConfig,
}

impl DisplayConfig {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawDisplayConfig) -> Self {
        Self {
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
            show_history: overlay.show_history.unwrap_or(self.show_history),
        }
    }
}

/// Unified configuration for orgchart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Org chart used when no `--file` is given
    pub org_file: Option<PathBuf>,
    /// Output settings
    pub display: DisplayConfig,
}

/// Get the XDG config directory for orgchart.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgchart").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgchart.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".orgchart.toml")
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables are left as written.
pub fn expand_env_vars(s: &str) -> String {
    shellexpand::full(s)
        .map(|expanded| expanded.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(org_file) = &self.org_file {
            let expanded = expand_env_vars(org_file.to_string_lossy().as_ref());
            self.org_file = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay config onto self: scalars from the overlay win if specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            org_file: overlay.org_file.clone().or_else(|| self.org_file.clone()),
            display: self.display.merge(&overlay.display),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.orgchart.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/orgchart/orgchart.toml`
    /// 3. Local config: `<local_dir>/.orgchart.toml`
    /// 4. Environment variables: `ORGCHART_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply ORGCHART_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`, e.g. `ORGCHART_DISPLAY__SHOW_IDS=false`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("ORGCHART")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("org_file") {
            settings.org_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("display.show_ids") {
            settings.display.show_ids = val;
        }
        if let Ok(val) = config.get_bool("display.show_history") {
            settings.display.show_history = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orgchart configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/orgchart/orgchart.toml
#   Local:  <dir>/.orgchart.toml            (dir = -C or current directory)
#   Env:    ORGCHART_* environment variables (ORGCHART_DISPLAY__SHOW_IDS=false)

# Org chart used when --file is not given (.json or .toml)
# org_file = "~/org/company.json"

[display]
# Render employees as "name (#id)"
# show_ids = true

# Print the move history after `orgchart apply`
# show_history = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_shows_ids_and_history() {
        let settings = Settings::default();
        assert!(settings.org_file.is_none());
        assert!(settings.display.show_ids);
        assert!(settings.display.show_history);
    }

    #[test]
    fn given_tilde_in_org_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            org_file: Some(PathBuf::from("~/org.json")),
            display: DisplayConfig::default(),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let org_file = settings.org_file.unwrap();
        assert!(
            org_file.to_string_lossy().starts_with(&home),
            "org_file should start with home dir: {}",
            org_file.display()
        );
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let base = Settings {
            org_file: Some(PathBuf::from("base.json")),
            display: DisplayConfig::default(),
        };
        let overlay = RawSettings {
            org_file: None,
            display: RawDisplayConfig {
                show_ids: Some(false),
                show_history: None,
            },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.org_file, Some(PathBuf::from("base.json")));
        assert!(!result.display.show_ids);
        assert!(result.display.show_history);
    }

    #[test]
    fn given_template_when_parsing_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.org_file.is_none());
    }
}
