// src/compile/output.rs

use std::path::{Path, PathBuf};

use crate::config::model::ConfigSection;

/// Derive the output path for a rendered template.
///
/// The template extension is swapped for the output extension and the path is
/// re-rooted under `<root>/<output_dir>/`, preserving the template's position
/// relative to the project root.
///
/// Returns `None` for templates outside the project root, which have no
/// well-defined place in the output tree.
pub fn output_path(root: &Path, cfg: &ConfigSection, template: &Path) -> Option<PathBuf> {
    let rel = template.strip_prefix(root).ok()?;
    let mut rel = rel.to_path_buf();
    rel.set_extension(&cfg.output_ext);
    Some(root.join(&cfg.output_dir).join(rel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_into_output_dir_with_swapped_extension() {
        let cfg = ConfigSection::default();
        let out = output_path(
            Path::new("/site"),
            &cfg,
            Path::new("/site/pages/about.njk"),
        );
        assert_eq!(out, Some(PathBuf::from("/site/dist/pages/about.html")));
    }

    #[test]
    fn top_level_template_lands_at_output_root() {
        let cfg = ConfigSection::default();
        let out = output_path(Path::new("/site"), &cfg, Path::new("/site/index.njk"));
        assert_eq!(out, Some(PathBuf::from("/site/dist/index.html")));
    }

    #[test]
    fn template_outside_root_has_no_output_path() {
        let cfg = ConfigSection::default();
        let out = output_path(Path::new("/site"), &cfg, Path::new("/elsewhere/x.njk"));
        assert_eq!(out, None);
    }

    #[test]
    fn honours_custom_output_dir_and_extension() {
        let cfg = ConfigSection {
            output_dir: "public".into(),
            output_ext: "htm".into(),
            ..ConfigSection::default()
        };
        let out = output_path(Path::new("/site"), &cfg, Path::new("/site/a.njk"));
        assert_eq!(out, Some(PathBuf::from("/site/public/a.htm")));
    }
}
