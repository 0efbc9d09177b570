// src/config/validate.rs

use std::path::Path;

use globset::Glob;
use tracing::warn;

use crate::config::model::ConfigFile;
use crate::errors::{LivetplError, Result};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `output_dir` is non-empty and relative (output is re-rooted under the
///   project root, an absolute dir would escape it)
/// - `template_ext` / `output_ext` are non-empty and carry no leading dot
/// - `files_glob` compiles as a glob
///
/// Failures surface as `LivetplError::ConfigError`.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_output_dir(cfg)?;
    validate_extensions(cfg)?;
    validate_files_glob(cfg)?;
    Ok(())
}

fn config_error(message: String) -> LivetplError {
    LivetplError::ConfigError(message)
}

fn validate_output_dir(cfg: &ConfigFile) -> Result<()> {
    let dir = &cfg.config.output_dir;
    if dir.trim().is_empty() {
        return Err(config_error("[config].output_dir must not be empty".into()));
    }
    if Path::new(dir).is_absolute() {
        return Err(config_error(format!(
            "[config].output_dir must be relative to the project root (got {dir:?})"
        )));
    }
    Ok(())
}

fn validate_extensions(cfg: &ConfigFile) -> Result<()> {
    for (field, ext) in [
        ("template_ext", &cfg.config.template_ext),
        ("output_ext", &cfg.config.output_ext),
    ] {
        if ext.trim().is_empty() {
            return Err(config_error(format!("[config].{field} must not be empty")));
        }
        if ext.starts_with('.') {
            return Err(config_error(format!(
                "[config].{field} must not include the leading dot (got {ext:?})"
            )));
        }
    }
    Ok(())
}

fn validate_files_glob(cfg: &ConfigFile) -> Result<()> {
    let glob = &cfg.config.files_glob;

    let compiled = Glob::new(glob).map_err(|err| {
        config_error(format!("invalid [config].files_glob pattern {glob:?}: {err}"))
    })?;

    // A glob that cannot match any `*.{template_ext}` file would leave
    // nothing to watch, but patterns like `**/*.{njk,html}` or `templates/**`
    // are legitimate, so this is advisory only.
    let sample = format!("sample.{}", cfg.config.template_ext);
    let matcher = compiled.compile_matcher();
    if !matcher.is_match(&sample) && !matcher.is_match(format!("a/{sample}")) {
        warn!(
            "[config].files_glob ({glob:?}) does not obviously match \
             *.{} files; templates may go undiscovered",
            cfg.config.template_ext
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ConfigFile;

    fn cfg_with(f: impl FnOnce(&mut ConfigFile)) -> ConfigFile {
        let mut cfg = ConfigFile::default();
        f(&mut cfg);
        cfg
    }

    #[test]
    fn default_config_is_valid() {
        validate_config(&ConfigFile::default()).unwrap();
    }

    #[test]
    fn rejects_empty_output_dir() {
        let cfg = cfg_with(|c| c.config.output_dir = "".into());
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, LivetplError::ConfigError(_)));
    }

    #[test]
    fn rejects_absolute_output_dir() {
        let cfg = cfg_with(|c| c.config.output_dir = "/tmp/out".into());
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn rejects_extension_with_leading_dot() {
        let cfg = cfg_with(|c| c.config.output_ext = ".html".into());
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn rejects_glob_that_does_not_compile() {
        let cfg = cfg_with(|c| c.config.files_glob = "**/*.{njk".into());
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, LivetplError::ConfigError(_)));
    }

    #[test]
    fn accepts_brace_alternation_globs() {
        let cfg = cfg_with(|c| c.config.files_glob = "**/*.{njk,html}".into());
        validate_config(&cfg).unwrap();
    }

    #[test]
    fn accepts_directory_only_globs() {
        let cfg = cfg_with(|c| c.config.files_glob = "templates/**".into());
        validate_config(&cfg).unwrap();
    }

    #[test]
    fn accepts_custom_consistent_settings() {
        let cfg = cfg_with(|c| {
            c.config.files_glob = "templates/**/*.tpl".into();
            c.config.template_ext = "tpl".into();
        });
        validate_config(&cfg).unwrap();
    }
}
