// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::ConfigSection;

/// Compiled glob for discovering and watching template files.
///
/// The pattern is evaluated against paths relative to the project root, with
/// forward slashes (e.g. `"pages/home.njk"`).
#[derive(Clone)]
pub struct TemplatePatterns {
    glob_set: GlobSet,
}

impl fmt::Debug for TemplatePatterns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplatePatterns").finish_non_exhaustive()
    }
}

impl TemplatePatterns {
    /// Compile the `files_glob` from the config.
    pub fn from_config(cfg: &ConfigSection) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let glob = Glob::new(&cfg.files_glob)
            .with_context(|| format!("invalid files_glob pattern: {}", cfg.files_glob))?;
        builder.add(glob);
        let glob_set = builder.build()?;
        Ok(Self { glob_set })
    }

    /// Returns true if the given root-relative path names a template file.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.glob_set.is_match(rel_path)
    }

    pub fn glob_set(&self) -> &GlobSet {
        &self.glob_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_glob_matches_nested_and_top_level_templates() {
        let patterns = TemplatePatterns::from_config(&ConfigSection::default()).unwrap();
        assert!(patterns.matches("index.njk"));
        assert!(patterns.matches("pages/about.njk"));
        assert!(patterns.matches("pages/partials/_nav.njk"));
        assert!(!patterns.matches("styles/site.css"));
        assert!(!patterns.matches("dist/index.html"));
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let cfg = ConfigSection {
            files_glob: "**/*.{njk".into(),
            ..ConfigSection::default()
        };
        assert!(TemplatePatterns::from_config(&cfg).is_err());
    }
}
