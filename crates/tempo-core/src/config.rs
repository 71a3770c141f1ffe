//! Configuration management for tempo.
//!
//! Loads configuration from ${TEMPO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City id shown first in the world-clock table.
    pub home_city: u32,

    /// City ids displayed by default.
    pub requested_cities: Vec<u32>,

    /// Minimum width of the city column in the world-clock table.
    pub column_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_city: Self::DEFAULT_HOME_CITY,
            requested_cities: vec![Self::DEFAULT_HOME_CITY, Self::DEFAULT_SECOND_CITY],
            column_width: Self::DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl Config {
    /// Berkeley.
    pub const DEFAULT_HOME_CITY: u32 = 50388;
    /// Copenhagen.
    pub const DEFAULT_SECOND_CITY: u32 = 61901;
    const DEFAULT_COLUMN_WIDTH: u16 = 20;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    /// Saves only the `home_city` field to the config file.
    ///
    /// Creates the file with the default template if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_home_city(id: u32) -> Result<()> {
        Self::save_home_city_to(&paths::config_path(), id)
    }

    /// Saves only the `home_city` field to a specific config file path.
    pub fn save_home_city_to(path: &Path, id: u32) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let mut doc: DocumentMut = Self::editable_contents(path)?
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["home_city"] = value(i64::from(id));

        Self::write_config(path, &doc.to_string())
    }

    /// Saves only the `requested_cities` field to the config file.
    pub fn save_requested_cities(ids: &[u32]) -> Result<()> {
        Self::save_requested_cities_to(&paths::config_path(), ids)
    }

    /// Saves only the `requested_cities` field to a specific config file path.
    pub fn save_requested_cities_to(path: &Path, ids: &[u32]) -> Result<()> {
        use toml_edit::{Array, DocumentMut, value};

        let mut doc: DocumentMut = Self::editable_contents(path)?
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        let mut arr = Array::new();
        for id in ids {
            arr.push(i64::from(*id));
        }
        doc["requested_cities"] = value(arr);

        Self::write_config(path, &doc.to_string())
    }

    /// Deletes the config file if it exists. Returns whether a file was removed.
    pub fn reset() -> Result<bool> {
        Self::reset_at(&paths::config_path())
    }

    /// Deletes a specific config file if it exists.
    pub fn reset_at(path: &Path) -> Result<bool> {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove config at {}", path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Serializes the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Returns editable document contents for a field-targeted save:
    /// the user's file merged into the latest template, or the bare template
    /// when no file exists yet.
    fn editable_contents(path: &Path) -> Result<String> {
        if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)
        } else {
            Ok(default_config_template().to_string())
        }
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for tempo configuration and data directories.
    //!
    //! TEMPO_HOME resolution order:
    //! 1. TEMPO_HOME environment variable (if set)
    //! 2. ~/.config/tempo (default)

    use std::path::PathBuf;

    /// Returns the tempo home directory.
    ///
    /// Checks TEMPO_HOME env var first, falls back to ~/.config/tempo
    pub fn tempo_home() -> PathBuf {
        if let Ok(home) = std::env::var("TEMPO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("tempo"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        tempo_home().join("config.toml")
    }

    /// Returns the directory used for stopwatch log files.
    pub fn logs_dir() -> PathBuf {
        tempo_home().join("logs")
    }
}
