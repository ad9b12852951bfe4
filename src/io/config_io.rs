use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::model::config::{Config, FontSize};
use crate::model::view::SortMode;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sleek.toml";

/// Error type for reading and editing the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not parse {path} for editing: {source}")]
    EditParseError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("unknown config key '{0}' (expected: font-size, compact, sort, log-level)")]
    UnknownKey(String),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Resolve the config path: explicit `--config` or `sleek.toml` in the cwd.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Read the config file. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the raw document for round-trip-safe editing. A missing file yields an
/// empty document.
pub fn read_config_doc(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    text.parse().map_err(|e| ConfigError::EditParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the document back, replacing the file only once the new contents are
/// fully on disk.
pub fn write_config_doc(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(doc.to_string().as_bytes())
        .map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Set one user-facing key in the document, validating the value.
///
/// Keys: `font-size`, `compact`, `sort`, `log-level`.
pub fn set_config_value(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };
    match key {
        "font-size" | "font_size" => {
            let size: FontSize = value.parse().map_err(invalid)?;
            ensure_table(doc, "ui");
            doc["ui"]["font_size"] = toml_edit::value(size.as_str());
        }
        "compact" => {
            let compact = parse_bool(value).ok_or_else(|| {
                invalid(format!("'{}' is not a boolean (true/false)", value))
            })?;
            ensure_table(doc, "ui");
            doc["ui"]["compact"] = toml_edit::value(compact);
        }
        "sort" => {
            let mode: SortMode = value.parse().map_err(invalid)?;
            ensure_table(doc, "view");
            doc["view"]["sort"] = toml_edit::value(mode.as_str());
        }
        "log-level" | "log_level" => {
            tracing_subscriber::EnvFilter::try_new(value)
                .map_err(|e| invalid(e.to_string()))?;
            ensure_table(doc, "log");
            doc["log"]["level"] = toml_edit::value(value);
        }
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
}

fn ensure_table(doc: &mut toml_edit::DocumentMut, name: &str) {
    if !doc.contains_key(name) {
        doc[name] = toml_edit::Item::Table(toml_edit::Table::new());
    }
}

pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
