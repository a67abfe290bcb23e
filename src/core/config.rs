//! Configuration for the `coursesat` console driver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, verbose).
    #[serde(default)]
    pub level: String,
    /// Log file path.
    #[serde(default)]
    pub file: String,
    /// Enable verbose output.
    #[serde(default)]
    pub verbose: bool,
}

/// Solve-time defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveConfig {
    /// Default directory to read the five catalog JSON files from.
    #[serde(default)]
    pub catalog_dir: String,
    /// Which `SatBackend` to dispatch to: `"builtin"` selects [`crate::core::solver::VarisatBackend`].
    #[serde(default)]
    pub solver: String,
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Solve settings.
    #[serde(default)]
    pub solve: SolveConfig,
}

/// Optional CLI overrides for configuration values.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level.
    pub level: Option<String>,
    /// Override log file path.
    pub file: Option<String>,
    /// Override verbose flag.
    pub verbose: Option<bool>,
    /// Override the default catalog directory.
    pub catalog_dir: Option<String>,
    /// Override the selected SAT backend.
    pub solver: Option<String>,
}

impl Config {
    /// The `$COURSESAT` directory path.
    ///
    /// - Linux: `~/.config/coursesat`
    /// - macOS: `~/Library/Application Support/coursesat`
    /// - Windows: `%APPDATA%\coursesat`
    #[must_use]
    pub fn get_coursesat_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coursesat")
    }

    /// Merge fields that are empty in `self` from `defaults`.
    ///
    /// # Returns
    /// `true` if any field was added/changed.
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.solve.catalog_dir.is_empty() && !defaults.solve.catalog_dir.is_empty() {
            self.solve
                .catalog_dir
                .clone_from(&defaults.solve.catalog_dir);
            changed = true;
        }
        if self.solve.solver.is_empty() && !defaults.solve.solver.is_empty() {
            self.solve.solver.clone_from(&defaults.solve.solver);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration.
    ///
    /// Only non-`None` fields of `overrides` replace config values, and only
    /// for the current process — the persisted file is untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(catalog_dir) = &overrides.catalog_dir {
            self.solve.catalog_dir.clone_from(catalog_dir);
        }
        if let Some(solver) = &overrides.solver {
            self.solve.solver.clone_from(solver);
        }
    }

    /// The user config file path: `config.toml` in release, `dconfig.toml`
    /// in debug, inside [`get_coursesat_dir`](Self::get_coursesat_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_coursesat_dir().join(CONFIG_FILE_NAME)
    }

    /// Replace occurrences of `$COURSESAT` with the actual config directory.
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$COURSESAT") {
            let dir = Self::get_coursesat_dir();
            value.replace("$COURSESAT", dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Parse a TOML configuration string, expanding `$COURSESAT` in values.
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the
    /// expected schema.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.solve.catalog_dir = Self::expand_variables(&config.solve.catalog_dir);
        Ok(config)
    }

    /// Load the compiled-in default configuration.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML; this
    /// should never happen since the defaults are compiled into the binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found.
    ///
    /// Falls back to defaults if any error occurs during loading.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Serialize to TOML and write to the platform-specific config file.
    ///
    /// # Errors
    /// Returns an error if serialization fails, the config directory cannot
    /// be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key (`level`, `file`, `verbose`,
    /// `catalog_dir`, `solver`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "catalog_dir" | "catalog-dir" => Some(self.solve.catalog_dir.clone()),
            "solver" => Some(self.solve.solver.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key.
    ///
    /// # Errors
    /// Returns an error if the key is unrecognized or the value cannot be
    /// parsed into the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "catalog_dir" | "catalog-dir" => self.solve.catalog_dir = value.to_string(),
            "solver" => self.solve.solver = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single configuration value to its default.
    ///
    /// # Errors
    /// Returns an error if the key is unrecognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "catalog_dir" | "catalog-dir" => self
                .solve
                .catalog_dir
                .clone_from(&defaults.solve.catalog_dir),
            "solver" => self.solve.solver.clone_from(&defaults.solve.solver),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the persisted config file so the next [`load`](Self::load)
    /// recreates it from defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[solve]")?;
        writeln!(f, "  catalog_dir = \"{}\"", self.solve.catalog_dir)?;
        writeln!(f, "  solver = \"{}\"", self.solve.solver)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_toml_parses_minimal_document() {
        let config = Config::from_toml(
            r#"
            [logging]
            level = "info"
            file = "out.log"
            verbose = false

            [solve]
            catalog_dir = "catalog"
            solver = "builtin"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.solve.solver, "builtin");
    }

    #[test]
    fn get_and_set_round_trip() {
        let mut config = Config::default();
        config.set("level", "debug").unwrap();
        assert_eq!(config.get("level"), Some("debug".to_string()));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut config = Config::default();
        assert!(config.set("bogus", "x").is_err());
    }

    #[test]
    fn set_rejects_non_bool_verbose() {
        let mut config = Config::default();
        assert!(config.set("verbose", "maybe").is_err());
    }

    #[test]
    fn unset_restores_default() {
        let defaults = Config::from_defaults();
        let mut config = defaults.clone();
        config.set("level", "trace").unwrap();
        config.unset("level", &defaults).unwrap();
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn merge_defaults_fills_empty_fields_only() {
        let defaults = Config::from_defaults();
        let mut config = Config::default();
        assert!(config.merge_defaults(&defaults));
        assert_eq!(config.solve.solver, defaults.solve.solver);
    }
}
