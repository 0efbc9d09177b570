// src/graph/extract.rs

use regex::Regex;

/// Scanner for include/extends directives in template text.
///
/// Two directive shapes are recognised, each with a single quoted argument:
///
/// ```text
/// {% include "header" %}
/// {% extends 'layouts/base' %}
/// ```
///
/// Both single and double quotes are accepted, whitespace inside the tag is
/// flexible, and whitespace-control dashes (`{%- ... -%}`) are tolerated.
/// Rendering semantics are none of this module's business; the scanner only
/// pulls out the reference strings so dependency edges can be built.
#[derive(Debug, Clone)]
pub struct ReferenceScanner {
    directive_re: Regex,
}

impl ReferenceScanner {
    pub fn new() -> Self {
        // Group 1: opening token (with or without the whitespace-control
        // dash). Group 2: directive keyword. Groups 3/4: double-/single-quoted
        // argument.
        let directive_re = Regex::new(
            r#"(\{%-?)\s*(include|extends)\s+(?:"([^"]+)"|'([^']+)')"#,
        )
        .expect("hard-coded directive regex is valid");
        Self { directive_re }
    }

    /// Yield the quoted argument of every include/extends directive, in
    /// document order.
    pub fn extract<'a>(&self, content: &'a str) -> Vec<&'a str> {
        self.directive_re
            .captures_iter(content)
            .filter_map(|caps| caps.get(3).or_else(|| caps.get(4)))
            .map(|m| m.as_str())
            .collect()
    }

    /// Rewrite every directive argument through `rename`, leaving the rest of
    /// the content untouched.
    ///
    /// `rename` returning `None` keeps the original directive verbatim. This
    /// is used by the renderer to point directives at its registered template
    /// names, so the renderer and the dependency graph share one resolution
    /// convention.
    pub fn rewrite_references(
        &self,
        content: &str,
        mut rename: impl FnMut(&str) -> Option<String>,
    ) -> String {
        self.directive_re
            .replace_all(content, |caps: &regex::Captures<'_>| {
                let open = &caps[1];
                let keyword = &caps[2];
                let raw = caps
                    .get(3)
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match rename(raw) {
                    Some(new_ref) => format!("{open} {keyword} \"{new_ref}\""),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

impl Default for ReferenceScanner {
    fn default() -> Self {
        Self::new()
    }
}
