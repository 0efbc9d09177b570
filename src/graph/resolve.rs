// src/graph/resolve.rs

use std::path::{Component, Path, PathBuf};

/// Prefix that marks a template file as a partial.
///
/// Partials are never compiled on their own; they only exist to be included
/// or extended by root templates.
pub const PARTIAL_MARKER: char = '_';

/// True if the final path segment begins with the partial marker.
///
/// The template kind is derived from the path, never stored.
pub fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(PARTIAL_MARKER))
}

/// Resolve a raw include/extends reference against the file that contains it.
///
/// Rules, applied in order:
/// 1. If the reference has no file extension, append `template_ext`.
/// 2. If the basename does not already begin with the partial marker, redirect
///    the reference to its partial sibling: same directory, `_`-prefixed
///    basename. The ecosystem convention is that include targets name a
///    "display" name whose actual file on disk is the underscore-prefixed
///    partial.
/// 3. Resolve the (possibly rewritten) relative reference against the
///    directory containing `referencing_file` and normalize lexically.
///
/// This function is pure and has no failure mode; the result may point at a
/// file that does not exist (a dangling edge).
pub fn resolve_reference(raw: &str, referencing_file: &Path, template_ext: &str) -> PathBuf {
    let mut reference = PathBuf::from(raw);

    if reference.extension().is_none() {
        reference.set_extension(template_ext);
    }

    let basename = reference
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    if !basename.starts_with(PARTIAL_MARKER) {
        reference.set_file_name(format!("{PARTIAL_MARKER}{basename}"));
    }

    let base_dir = referencing_file.parent().unwrap_or_else(|| Path::new(""));
    normalize(&base_dir.join(reference))
}

/// Lexically normalize a path: drop `.` components and fold `..` into their
/// parent where possible.
///
/// This deliberately does not touch the filesystem: symlinks are not resolved
/// and case is not folded, so two paths are equal iff their normalized string
/// forms match.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ => out.push(".."),
            },
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}
