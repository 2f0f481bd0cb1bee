//! Site configuration.
//!
//! Loads an optional `tourgen.toml` from the working directory. Every key has
//! a default matching the conventional file layout, so a site with the
//! standard names needs no config at all:
//!
//! ```toml
//! data = "data.json"                       # Tour dataset
//! index_template = "index.html.template"   # Template for index.html
//! page_template = "XX.html.template"       # Template for every date page
//! output_dir = "docs"                      # Root of the generated site
//! ```
//!
//! Values are layered: stock defaults, then the config file, then command
//! line flags. Each layer only needs the keys it wants to override. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tourgen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(String),
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    /// Collapse a TOML error to one line, locating it in `source` when the
    /// text is at hand.
    fn toml(err: toml::de::Error, source: Option<&str>) -> Self {
        let message = err
            .message()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        match (err.span(), source) {
            (Some(span), Some(text)) => {
                let (line, column) = line_column(text, span.start);
                ConfigError::Toml(format!("{message} at line {line}, column {column}"))
            }
            _ => ConfigError::Toml(message),
        }
    }
}

/// 1-based line and column of byte `offset` in `text`.
fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count())
        + 1;
    (line, column)
}

/// Locations of the generator's inputs and output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// JSON dataset with the `concerts` tree.
    pub data: PathBuf,
    /// Template rendered once into `index.html`.
    pub index_template: PathBuf,
    /// Template rendered once per date.
    pub page_template: PathBuf,
    /// Directory receiving `index.html` and the `YYYY/MM/DD.html` tree.
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from("data.json"),
            index_template: PathBuf::from("index.html.template"),
            page_template: PathBuf::from("XX.html.template"),
            output_dir: PathBuf::from("docs"),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("data", &self.data),
            ("index_template", &self.index_template),
            ("page_template", &self.page_template),
            ("output_dir", &self.output_dir),
        ];
        for (key, value) in fields {
            if value.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Command line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<PathBuf>,
    pub index_template: Option<PathBuf>,
    pub page_template: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Overrides {
    /// The overrides as a sparse TOML table, ready for [`merge_toml`].
    pub fn to_toml(&self) -> toml::Value {
        let mut table = toml::map::Map::new();
        let fields = [
            ("data", &self.data),
            ("index_template", &self.index_template),
            ("page_template", &self.page_template),
            ("output_dir", &self.output_dir),
        ];
        for (key, value) in fields {
            if let Some(path) = value {
                table.insert(
                    key.to_string(),
                    toml::Value::String(path.to_string_lossy().into_owned()),
                );
            }
        }
        toml::Value::Table(table)
    }
}

/// The stock defaults as a TOML table, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value =
        toml::from_str(&content).map_err(|e| ConfigError::toml(e, Some(&content)))?;
    Ok(Some(value))
}

/// Merge the layers in order, then deserialize and validate.
pub fn resolve_config(
    layers: impl IntoIterator<Item = toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = layers
        .into_iter()
        .fold(stock_defaults_value()?, merge_toml);
    let config: SiteConfig = merged.try_into::<SiteConfig>().map_err(|e| ConfigError::toml(e, None))?;
    config.validate()?;
    Ok(config)
}

/// Load `path` (if present) over the defaults, then apply `overrides`.
pub fn load_config(path: &Path, overrides: &Overrides) -> Result<SiteConfig, ConfigError> {
    let file_layer = load_raw_config(path)?;
    resolve_config(file_layer.into_iter().chain([overrides.to_toml()]))
}

/// A fully commented stock `tourgen.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# tourgen configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Relative paths are resolved from the directory tourgen runs in.
# Unknown keys will cause an error.

# Tour dataset: {"concerts": {YEAR: {MONTH: {DAY: {venue, setlist, embed}}}}}
data = "data.json"

# Template rendered into <output_dir>/index.html.
# Macros: !Generator! !Content!
index_template = "index.html.template"

# Template rendered into <output_dir>/YEAR/MONTH/DAY.html for every date.
# Macros: !Generator! !DY! !DM! !DD! !Dp! !Venue! !Embed! !Setlist!
page_template = "XX.html.template"

# Root of the generated site. Created if missing.
output_dir = "docs"
"##
}
