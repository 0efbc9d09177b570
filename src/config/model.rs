// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// output_dir = "dist"
/// files_glob = "**/*.njk"
/// template_ext = "njk"
/// output_ext = "html"
/// exclude_partials = true
/// auto_start = true
///
/// [context]
/// site_name = "My Site"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Free-form values from `[context]`, passed to every render call.
    #[serde(default)]
    pub context: toml::Table,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Directory (relative to the project root) where rendered output is
    /// written. The output tree mirrors the template tree.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Glob for discovering and watching template files, relative to the
    /// project root.
    #[serde(default = "default_files_glob")]
    pub files_glob: String,

    /// Template file extension (without the leading dot). Appended to bare
    /// include/extends references and used to derive output file names.
    #[serde(default = "default_template_ext")]
    pub template_ext: String,

    /// Extension (without the leading dot) used for rendered output files.
    #[serde(default = "default_output_ext")]
    pub output_ext: String,

    /// Whether `compile-all` skips partials (files whose name starts with `_`).
    #[serde(default = "default_true")]
    pub exclude_partials: bool,

    /// Whether the watcher starts automatically on launch.
    #[serde(default = "default_true")]
    pub auto_start: bool,
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_files_glob() -> String {
    "**/*.njk".to_string()
}

fn default_template_ext() -> String {
    "njk".to_string()
}

fn default_output_ext() -> String {
    "html".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            files_glob: default_files_glob(),
            template_ext: default_template_ext(),
            output_ext: default_output_ext(),
            exclude_partials: true,
            auto_start: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(cfg.config.output_dir, "dist");
        assert_eq!(cfg.config.files_glob, "**/*.njk");
        assert_eq!(cfg.config.template_ext, "njk");
        assert_eq!(cfg.config.output_ext, "html");
        assert!(cfg.config.exclude_partials);
        assert!(cfg.config.auto_start);
        assert!(cfg.context.is_empty());
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let cfg: ConfigFile = toml::from_str(
            r#"
            [config]
            output_dir = "public"
            exclude_partials = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.config.output_dir, "public");
        assert!(!cfg.config.exclude_partials);
        assert_eq!(cfg.config.files_glob, "**/*.njk");
    }

    #[test]
    fn context_table_is_deserialized() {
        let cfg: ConfigFile = toml::from_str(
            r#"
            [context]
            site_name = "My Site"
            year = 2026
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.context.get("site_name").and_then(|v| v.as_str()),
            Some("My Site")
        );
    }
}
