//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/cmdeck/cmdeck.toml`
//! 3. Environment variables: `CMDECK_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for cmdeck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Primary command source (required)
    pub commands_file: PathBuf,
    /// Secondary command source with personal additions/overrides (optional)
    pub custom_file: Option<PathBuf>,
    /// Package index consulted by `--check-tools` for missing programs (optional)
    pub packages_file: Option<PathBuf>,
    /// Shell used to execute resolved command lines (`<shell> -c <line>`)
    pub shell: String,
    /// Directory receiving generated artifacts
    pub output_dir: PathBuf,
    /// File name of the generated alias/function file
    pub aliases_file: String,
    /// File name of the generated completion script
    pub completion_file: String,
    /// Return to the menu after each executed command
    pub continuous: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            commands_file: PathBuf::from("commands.yaml"),
            custom_file: Some(PathBuf::from("custom.yaml")),
            packages_file: Some(PathBuf::from("packages.yaml")),
            shell: "sh".into(),
            output_dir: PathBuf::from("."),
            aliases_file: "bash_aliases".into(),
            completion_file: "cmdeck_completion".into(),
            continuous: false,
        }
    }
}

/// Raw settings for intermediate parsing (every field optional).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub commands_file: Option<PathBuf>,
    pub custom_file: Option<PathBuf>,
    pub packages_file: Option<PathBuf>,
    pub shell: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub aliases_file: Option<String>,
    pub completion_file: Option<String>,
    pub continuous: Option<bool>,
}

/// Get the XDG config directory for cmdeck.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cmdeck").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("cmdeck.toml"))
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

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input unchanged.
fn expand(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Path of the generated alias file.
    pub fn aliases_path(&self) -> PathBuf {
        self.output_dir.join(&self.aliases_file)
    }

    /// Path of the generated completion script.
    pub fn completion_path(&self) -> PathBuf {
        self.output_dir.join(&self.completion_file)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.commands_file = PathBuf::from(expand(&self.commands_file.to_string_lossy()));
        self.custom_file = self
            .custom_file
            .take()
            .map(|p| PathBuf::from(expand(&p.to_string_lossy())));
        self.packages_file = self
            .packages_file
            .take()
            .map(|p| PathBuf::from(expand(&p.to_string_lossy())));
        self.output_dir = PathBuf::from(expand(&self.output_dir.to_string_lossy()));
    }

    /// Overlay config onto self: scalar options win if Some.
    fn apply(&self, overlay: &RawSettings) -> Self {
        Self {
            commands_file: overlay
                .commands_file
                .clone()
                .unwrap_or_else(|| self.commands_file.clone()),
            custom_file: overlay
                .custom_file
                .clone()
                .or_else(|| self.custom_file.clone()),
            packages_file: overlay
                .packages_file
                .clone()
                .or_else(|| self.packages_file.clone()),
            shell: overlay.shell.clone().unwrap_or_else(|| self.shell.clone()),
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            aliases_file: overlay
                .aliases_file
                .clone()
                .unwrap_or_else(|| self.aliases_file.clone()),
            completion_file: overlay
                .completion_file
                .clone()
                .unwrap_or_else(|| self.completion_file.clone()),
            continuous: overlay.continuous.unwrap_or(self.continuous),
        }
    }

    /// Load settings with layered precedence from the XDG global config.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `global` as the global config file, if it exists.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config file
    /// 3. Environment variables: `CMDECK_*` prefix
    pub fn load_from(global: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.apply(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply CMDECK_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(Environment::with_prefix("CMDECK").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("commands_file") {
            settings.commands_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("custom_file") {
            settings.custom_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("packages_file") {
            settings.packages_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("shell") {
            settings.shell = val;
        }
        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("aliases_file") {
            settings.aliases_file = val;
        }
        if let Ok(val) = config.get_string("completion_file") {
            settings.completion_file = val;
        }
        if let Ok(val) = config.get_bool("continuous") {
            settings.continuous = val;
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
        r#"# cmdeck configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/cmdeck/cmdeck.toml
#   Env:    CMDECK_* environment variables (e.g. CMDECK_COMMANDS_FILE)
#   Flags:  --commands, --custom, --packages, --continuous

# Primary command definitions (required)
# commands_file = "commands.yaml"

# Personal additions and overrides, merged after the primary file (optional)
# custom_file = "custom.yaml"

# Program to package index used by --check-tools (optional)
# packages_file = "packages.yaml"

# Shell used to run commands
# shell = "sh"

# Where --generate-* writes its files
# output_dir = "."
# aliases_file = "bash_aliases"
# completion_file = "cmdeck_completion"

# Return to the menu after each command
# continuous = false
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
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None).expect("load defaults");
        assert!(!settings.shell.is_empty());
        assert!(!settings.aliases_file.is_empty());
    }

    #[test]
    fn given_default_settings_when_building_paths_then_joins_output_dir() {
        let settings = Settings {
            output_dir: PathBuf::from("/tmp/out"),
            ..Settings::default()
        };
        assert_eq!(settings.aliases_path(), PathBuf::from("/tmp/out/bash_aliases"));
        assert_eq!(
            settings.completion_path(),
            PathBuf::from("/tmp/out/cmdeck_completion")
        );
    }

    #[test]
    fn given_tilde_in_paths_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            commands_file: PathBuf::from("~/cmds/commands.yaml"),
            custom_file: Some(PathBuf::from("$HOME/custom.yaml")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.commands_file.to_string_lossy().starts_with(&home));
        assert!(settings
            .custom_file
            .as_ref()
            .unwrap()
            .to_string_lossy()
            .starts_with(&home));
    }

    #[test]
    fn given_partial_overlay_when_applying_then_keeps_unset_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            shell: Some("bash".into()),
            continuous: Some(true),
            ..RawSettings::default()
        };

        let result = base.apply(&overlay);

        assert_eq!(result.shell, "bash");
        assert!(result.continuous);
        assert_eq!(result.commands_file, base.commands_file);
        assert_eq!(result.custom_file, base.custom_file);
    }

    #[test]
    fn given_settings_when_serializing_then_roundtrips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
