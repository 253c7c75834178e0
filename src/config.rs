//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
//! 3. Local config: `<dir>/.famtree.toml` (usually the working directory)
//! 4. Environment variables: `FAMTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{DEFAULT_GRAPH_NAME, DEFAULT_MAX_CHILDREN};

/// Unified configuration for famtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of children per person
    pub max_children: usize,
    /// Record table read when no file is given on the command line
    pub input_file: PathBuf,
    /// Graphviz file written by `export`
    pub output_file: PathBuf,
    /// Name of the generated digraph
    pub graph_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_children: DEFAULT_MAX_CHILDREN,
            input_file: PathBuf::from("familydb.csv"),
            output_file: PathBuf::from("tree.dot"),
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_children: Option<usize>,
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub graph_name: Option<String>,
}

/// Get the XDG config directory for famtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".famtree.toml")
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
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_children: overlay.max_children.unwrap_or(self.max_children),
            input_file: overlay
                .input_file
                .clone()
                .unwrap_or_else(|| self.input_file.clone()),
            output_file: overlay
                .output_file
                .clone()
                .unwrap_or_else(|| self.output_file.clone()),
            graph_name: overlay
                .graph_name
                .clone()
                .unwrap_or_else(|| self.graph_name.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.famtree.toml`
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
        current.validate()?;
        Ok(current)
    }

    /// Apply FAMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("FAMTREE").try_parsing(true))
            .build()
            .map_err(config_err)?;

        match config.get::<usize>("max_children") {
            Ok(val) => settings.max_children = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_string("input_file") {
            Ok(val) => settings.input_file = PathBuf::from(val),
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_string("output_file") {
            Ok(val) => settings.output_file = PathBuf::from(val),
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_string("graph_name") {
            Ok(val) => settings.graph_name = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Reject settings the forest cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_children == 0 {
            return Err(ApplicationError::Config {
                message: "max_children must be at least 1".to_string(),
            });
        }
        if self.graph_name.trim().is_empty()
            || !self
                .graph_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ApplicationError::Config {
                message: format!("graph_name must be a plain identifier: {:?}", self.graph_name),
            });
        }
        Ok(())
    }

    /// Render as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
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
    fn given_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            max_children: Some(3),
            graph_name: Some("Kin".into()),
            ..Default::default()
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.max_children, 3);
        assert_eq!(merged.graph_name, "Kin");
        assert_eq!(merged.input_file, base.input_file);
        assert_eq!(merged.output_file, base.output_file);
    }

    #[test]
    fn given_zero_max_children_when_validating_then_errors() {
        let settings = Settings {
            max_children: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn given_graph_name_with_spaces_when_validating_then_errors() {
        let settings = Settings {
            graph_name: "Family Tree".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn given_defaults_when_rendering_toml_then_contains_all_keys() {
        let text = Settings::default().to_toml().unwrap();
        assert!(text.contains("max_children = 10"));
        assert!(text.contains("graph_name = \"FamilyTree\""));
    }
}
