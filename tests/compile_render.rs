// tests/compile_render.rs

//! End-to-end compile tests on a real (temporary) directory tree, using the
//! Tera-backed renderer.

mod common;

use crate::common::init_tracing;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use livetpl::compile::{Compiler, TemplateRenderer, TeraRenderer};
use livetpl::config::ConfigFile;
use livetpl::errors::CompileError;
use livetpl::fs::{FileSystem, RealFileSystem};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config_with_site_name() -> ConfigFile {
    let mut context = toml::Table::new();
    context.insert(
        "site_name".to_string(),
        toml::Value::String("Livetpl".to_string()),
    );
    ConfigFile {
        context,
        ..ConfigFile::default()
    }
}

fn compiler_for(root: &Path, cfg: &ConfigFile) -> Compiler {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let renderer: Arc<dyn TemplateRenderer> =
        Arc::new(TeraRenderer::new(root, cfg, Arc::clone(&fs)).unwrap());
    Compiler::new(root, cfg.config.clone(), fs, renderer)
}

#[test]
fn extends_and_include_render_through_partial_redirect() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    // References use bare names; both the extension and the `_` prefix are
    // supplied by resolution.
    write(
        root,
        "layouts/_base.njk",
        "<html>{% include \"nav\" %}{% block content %}{% endblock %}</html>",
    );
    write(root, "layouts/_nav.njk", "<nav>menu</nav>");
    write(
        root,
        "pages/home.njk",
        "{% extends \"../layouts/base\" %}{% block content %}Hello {{ site_name }}{% endblock %}",
    );

    let cfg = config_with_site_name();
    let out = compiler_for(root, &cfg)
        .compile(&root.join("pages/home.njk"))
        .unwrap();

    assert_eq!(out, root.join("dist/pages/home.html"));
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<nav>menu</nav>"));
    assert!(html.contains("Hello Livetpl"));
}

#[test]
fn renders_always_see_current_partial_content() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "index.njk", "{% include 'footer' %}");
    write(root, "_footer.njk", "v1");

    let cfg = ConfigFile::default();
    let compiler = compiler_for(root, &cfg);

    compiler.compile(&root.join("index.njk")).unwrap();
    assert_eq!(
        fs::read_to_string(root.join("dist/index.html")).unwrap(),
        "v1"
    );

    // Nothing is cached between calls, so the rewrite takes effect without
    // any invalidation step.
    write(root, "_footer.njk", "v2");
    compiler.compile(&root.join("index.njk")).unwrap();
    assert_eq!(
        fs::read_to_string(root.join("dist/index.html")).unwrap(),
        "v2"
    );
}

#[test]
fn unresolved_reference_fails_the_render() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "index.njk", "{% include 'missing' %}");

    let cfg = ConfigFile::default();
    let err = compiler_for(root, &cfg)
        .compile(&root.join("index.njk"))
        .unwrap_err();

    assert!(matches!(err, CompileError::Render { .. }));
    assert!(!root.join("dist/index.html").exists());
}

#[test]
fn templates_can_read_their_own_location() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "pages/where.njk", "{{ _self.path }}|{{ _self.directory }}");

    let cfg = ConfigFile::default();
    let out = compiler_for(root, &cfg)
        .compile(&root.join("pages/where.njk"))
        .unwrap();

    let html = fs::read_to_string(out).unwrap();
    let parts: Vec<&str> = html.split('|').collect();
    assert!(parts[0].ends_with("where.njk"));
    assert!(parts[1].ends_with("pages"));
}

#[test]
fn syntax_error_in_template_is_reported_not_written() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "broken.njk", "{% include 'nope' ");

    let cfg = ConfigFile::default();
    let err = compiler_for(root, &cfg)
        .compile(&root.join("broken.njk"))
        .unwrap_err();

    assert!(matches!(err, CompileError::Render { .. }));
    assert!(!root.join("dist/broken.html").exists());
}
