// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (glob correctness, etc.). Use [`load_and_validate`] for that.
/// Read failures surface as `LivetplError::IoError`, malformed TOML as
/// `LivetplError::TomlError`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: ConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that the files glob compiles and the extensions are consistent.
///
/// A missing config file is not an error: the defaults describe a complete
/// working setup, so we fall back to `ConfigFile::default()`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let config = if path.exists() {
        load_from_path(path)?
    } else {
        tracing::debug!("no config file at {:?}, using defaults", path);
        ConfigFile::default()
    };
    validate_config(&config)?;
    Ok(config)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Livetpl.toml` in the current working
/// directory, but this function exists so you can later:
///
/// - Respect an env var (e.g. `LIVETPL_CONFIG`).
/// - Support project-local config discovery.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Livetpl.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LivetplError;

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("Livetpl.toml");
        fs::write(&path, "[config\noutput_dir = ").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, LivetplError::TomlError(_)));
    }

    #[test]
    fn unreadable_config_is_an_io_error() {
        let dir = tempfile::TempDir::new().unwrap();

        // Reading a directory as a file fails at the IO layer.
        let err = load_from_path(dir.path()).unwrap_err();
        assert!(matches!(err, LivetplError::IoError(_)));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = load_and_validate(dir.path().join("Livetpl.toml")).unwrap();
        assert_eq!(cfg.config.output_dir, "dist");
    }
}
