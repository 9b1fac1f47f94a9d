//! # Envelope - Named-Template Shell Rendering
//!
//! A small layer over [minijinja](https://docs.rs/minijinja) for wrapping an
//! already-serialized payload in a hosting document (typically HTML), looked up
//! by template name.
//!
//! ## The Problem
//!
//! A library that produces a document (a JSON schema, a report, ...) often has to
//! hand it over inside some boilerplate: a page that loads a runtime from a CDN,
//! sets a locale, picks a theme. That boilerplate:
//! - lives best in stand-alone template files, not in string literals in code
//! - must be replaceable by callers (their own directory of templates)
//! - must be testable without touching the filesystem
//!
//! ## The Solution
//!
//! Envelope separates *where templates come from* from *how they are rendered*:
//! - A [`TemplateSource`] resolves a template name to its text. Sources are
//!   provided for a directory ([`DirSource`]), compiled-in templates
//!   ([`StaticSource`]) and in-memory maps ([`MemorySource`], handy in tests).
//! - A [`Shell`] owns a minijinja environment whose loader pulls from a source.
//!   Templates are compiled on first use and cached by the environment.
//!
//! ## Quick Example
//!
//! ```rust
//! use envelope::{MemorySource, Shell};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data {
//!     title: String,
//! }
//!
//! let source = MemorySource::new().with("page.html", "<title>{{ title }}</title>");
//! let shell = Shell::new(source);
//!
//! let html = shell.render("page.html", &Data { title: "Hello".into() }).unwrap();
//! assert_eq!(html, "<title>Hello</title>");
//! ```
//!
//! ## Escaping
//!
//! Auto-escaping is disabled for every template, whatever its extension. The
//! values handed to a shell are payloads meant to be embedded verbatim (for
//! example a JSON document inside a `<script>` tag). Callers that need HTML
//! escaping can use the `escape` filter explicitly.

use minijinja::{AutoEscape, Environment, Error, ErrorKind};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors produced while resolving or rendering a template.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// No source could resolve the requested template name.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The template failed to load, compile or render.
    #[error("template error: {0}")]
    Template(#[from] Error),
}

/// Something that can resolve a template name to its source text.
///
/// Implementations return `Ok(None)` when the name is unknown, so the shell can
/// report a [`EnvelopeError::TemplateNotFound`] rather than a generic failure.
pub trait TemplateSource: Send + Sync + 'static {
    /// Loads the template called `name`.
    fn load(&self, name: &str) -> io::Result<Option<String>>;

    /// Short human readable description, used in logs.
    fn describe(&self) -> String;
}

/// Templates read from a directory on disk.
///
/// Names are relative paths under the root directory. Absolute names, names
/// with a `..` segment, and names that resolve to anything but a regular file
/// are never resolved.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirSource {
    fn load(&self, name: &str) -> io::Result<Option<String>> {
        let relative = Path::new(name);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !contained || name.split(|c| c == '/' || c == '\\').any(|segment| segment == "..") {
            return Ok(None);
        }
        let path = self.root.join(relative);
        if !path.is_file() {
            return Ok(None);
        }
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}

/// Templates compiled into the binary, typically with `include_str!`.
#[derive(Debug, Clone, Copy)]
pub struct StaticSource {
    templates: &'static [(&'static str, &'static str)],
}

impl StaticSource {
    pub const fn new(templates: &'static [(&'static str, &'static str)]) -> Self {
        Self { templates }
    }

    /// Names of all bundled templates.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.templates.iter().map(|(name, _)| *name)
    }
}

impl TemplateSource for StaticSource {
    fn load(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self
            .templates
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, text)| text.to_string()))
    }

    fn describe(&self) -> String {
        format!("static:{} templates", self.templates.len())
    }
}

/// In-memory templates. Does NOT touch the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    templates: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named template. Returns self for chaining.
    ///
    /// If a template with the same name exists, it is replaced.
    pub fn with(mut self, name: &str, source: &str) -> Self {
        self.templates.insert(name.to_string(), source.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateSource for MemorySource {
    fn load(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.templates.get(name).cloned())
    }

    fn describe(&self) -> String {
        format!("memory:{} templates", self.templates.len())
    }
}

/// A renderer bound to one template source.
///
/// The underlying environment is read-only once built; a `Shell` can be shared
/// between threads (for instance in a `static`) and rendered from concurrently.
pub struct Shell {
    env: Environment<'static>,
    origin: String,
}

impl Shell {
    /// Creates a shell that resolves template names through `source`.
    pub fn new<S: TemplateSource>(source: S) -> Self {
        let origin = source.describe();
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_loader(move |name: &str| -> Result<Option<String>, Error> {
            tracing::debug!(template = name, source = %source.describe(), "loading template");
            source.load(name).map_err(|err| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read template {name:?}"),
                )
                .with_source(err)
            })
        });
        Self { env, origin }
    }

    /// Description of the source this shell reads from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns true if `name` resolves to a template that compiles.
    pub fn contains(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Renders the template called `name` with `data` as its context.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::TemplateNotFound`] if the source does not know
    /// the name, and [`EnvelopeError::Template`] if loading, compiling or
    /// rendering fails. Nothing is returned on failure.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, EnvelopeError> {
        let template = self.env.get_template(name).map_err(|err| {
            if matches!(err.kind(), ErrorKind::TemplateNotFound) {
                EnvelopeError::TemplateNotFound(name.to_string())
            } else {
                EnvelopeError::Template(err)
            }
        })?;
        Ok(template.render(data)?)
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell").field("origin", &self.origin).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Serialize)]
    struct PageData {
        title: String,
        payload: String,
    }

    fn page_data() -> PageData {
        PageData {
            title: "Report".into(),
            payload: r#"{"type":"page","body":"<b>hi</b>"}"#.into(),
        }
    }

    #[test]
    fn test_memory_source_render() {
        let shell = Shell::new(MemorySource::new().with("t", "<h1>{{ title }}</h1>"));
        let output = shell.render("t", &page_data()).unwrap();
        assert_eq!(output, "<h1>Report</h1>");
    }

    #[test]
    fn test_unknown_template_is_not_found() {
        let shell = Shell::new(MemorySource::new().with("t", "x"));
        let err = shell.render("missing.html", &page_data()).unwrap_err();
        match err {
            EnvelopeError::TemplateNotFound(name) => assert_eq!(name, "missing.html"),
            other => panic!("Expected TemplateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_html_templates_are_not_escaped() {
        let shell = Shell::new(
            MemorySource::new().with("page.html", "<script>const app = {{ payload }};</script>"),
        );
        let output = shell.render("page.html", &page_data()).unwrap();
        assert_eq!(
            output,
            r#"<script>const app = {"type":"page","body":"<b>hi</b>"};</script>"#
        );
    }

    #[test]
    fn test_template_syntax_error() {
        let shell = Shell::new(MemorySource::new().with("broken", "{{ title"));
        let err = shell.render("broken", &page_data()).unwrap_err();
        assert!(matches!(err, EnvelopeError::Template(_)));
    }

    #[test]
    fn test_contains() {
        let shell = Shell::new(MemorySource::new().with("a", "A"));
        assert!(shell.contains("a"));
        assert!(!shell.contains("b"));
    }

    #[test]
    fn test_static_source() {
        static TEMPLATES: &[(&str, &str)] = &[("one", "1:{{ title }}"), ("two", "2")];
        let source = StaticSource::new(TEMPLATES);
        assert_eq!(source.names().collect::<Vec<_>>(), vec!["one", "two"]);

        let shell = Shell::new(source);
        assert_eq!(shell.render("one", &page_data()).unwrap(), "1:Report");
        assert!(shell.origin().starts_with("static:"));
    }

    #[test]
    fn test_dir_source_reads_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("page.html"), "<p>{{ title }}</p>").unwrap();

        let shell = Shell::new(DirSource::new(temp_dir.path()));
        assert_eq!(shell.render("page.html", &page_data()).unwrap(), "<p>Report</p>");
    }

    #[test]
    fn test_dir_source_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(temp_dir.path());
        assert!(source.load("nope.html").unwrap().is_none());
    }

    #[test]
    fn test_dir_source_refuses_parent_segments() {
        let temp_dir = tempfile::tempdir().unwrap();
        let inner = temp_dir.path().join("templates");
        fs::create_dir_all(&inner).unwrap();
        fs::write(temp_dir.path().join("secret.html"), "secret").unwrap();

        let source = DirSource::new(&inner);
        assert!(source.load("../secret.html").unwrap().is_none());
    }

    #[test]
    fn test_dir_source_refuses_absolute_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        let inner = temp_dir.path().join("templates");
        fs::create_dir_all(&inner).unwrap();
        let secret = temp_dir.path().join("secret.html");
        fs::write(&secret, "secret").unwrap();

        let source = DirSource::new(&inner);
        let absolute = secret.to_str().unwrap();
        assert!(source.load(absolute).unwrap().is_none());

        let shell = Shell::new(source);
        let err = shell.render(absolute, &page_data()).unwrap_err();
        assert!(matches!(err, EnvelopeError::TemplateNotFound(_)));
    }

    #[test]
    fn test_dir_source_directories_are_not_templates() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("partials")).unwrap();

        let source = DirSource::new(temp_dir.path());
        assert!(source.load("partials").unwrap().is_none());
        assert!(source.load("").unwrap().is_none());

        let shell = Shell::new(source);
        let err = shell.render("partials", &page_data()).unwrap_err();
        match err {
            EnvelopeError::TemplateNotFound(name) => assert_eq!(name, "partials"),
            other => panic!("Expected TemplateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_dir_source_reads_nested_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("admin")).unwrap();
        fs::write(temp_dir.path().join("admin").join("page.html"), "{{ title }}").unwrap();

        let source = DirSource::new(temp_dir.path());
        assert_eq!(source.load("admin/page.html").unwrap().as_deref(), Some("{{ title }}"));
        assert!(source.load("./admin/page.html").unwrap().is_some());
    }

    #[test]
    fn test_shell_is_shareable_across_threads() {
        let shell = Arc::new(Shell::new(MemorySource::new().with("t", "{{ title }}")));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shell = Arc::clone(&shell);
                std::thread::spawn(move || shell.render("t", &page_data()).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "Report");
        }
    }
}
