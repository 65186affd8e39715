//! Tera rendering engine: template resolution, [`TemplateEngine`], [`Renderer`].
//!
//! # Template lookup
//!
//! | Priority | Directory                      |
//! |----------|--------------------------------|
//! | 1        | the config's own directory     |
//! | 2        | `<working dir>/templates`      |
//!
//! Templates referenced through `include`, `extends` or `import` are loaded
//! from the same directory as the template that was picked.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tera::Tera;

use jenerator_core::types::containing_dir;
use jenerator_core::{ConfigRecord, Settings};

use crate::context::to_tera_context;
use crate::error::RenderError;
use crate::whitespace;

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\{%[-+]?\s*(?:include|extends|import)\s+["'`]([^"'`]+)["'`]"#)
            .expect("static regex")
    })
}

/// Read `name` and every template it references, transitively, from `dir`.
///
/// Missing references are skipped; Tera reports them (or honours
/// `ignore missing`) when the template is added or rendered.
fn load_template_set(dir: &Path, name: &str) -> Result<Vec<(String, String)>, RenderError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut pending = vec![name.to_string()];
    let mut templates = Vec::new();

    while let Some(current) = pending.pop() {
        if !seen.insert(current.clone()) {
            continue;
        }
        let path = dir.join(&current);
        if current != name && !path.is_file() {
            tracing::debug!("referenced template not found: {}", path.display());
            continue;
        }
        let source = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        for cap in reference_pattern().captures_iter(&source) {
            pending.push(cap[1].to_string());
        }
        templates.push((current, whitespace::apply(&source)));
    }
    Ok(templates)
}

// ---------------------------------------------------------------------------
// Template resolution
// ---------------------------------------------------------------------------

/// Where a template was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Directory the template (and anything it references) is loaded from.
    pub dir: PathBuf,
    pub name: String,
    /// `true` when the template sits next to the config.
    pub colocated: bool,
}

impl TemplateSource {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// Pick the directory to load `template_name` from.
///
/// A regular file named `template_name` directly inside `config_dir` wins;
/// otherwise `fallback_dir` is used if it holds one.
pub fn resolve_template(
    config_dir: &Path,
    template_name: &str,
    fallback_dir: &Path,
) -> Result<TemplateSource, RenderError> {
    if config_dir.join(template_name).is_file() {
        tracing::debug!("using co-located template in {}", config_dir.display());
        return Ok(TemplateSource {
            dir: config_dir.to_path_buf(),
            name: template_name.to_string(),
            colocated: true,
        });
    }
    if fallback_dir.join(template_name).is_file() {
        tracing::debug!("using fallback template in {}", fallback_dir.display());
        return Ok(TemplateSource {
            dir: fallback_dir.to_path_buf(),
            name: template_name.to_string(),
            colocated: false,
        });
    }
    Err(RenderError::TemplateNotFound {
        name: template_name.to_string(),
        colocated: config_dir.to_path_buf(),
        fallback: fallback_dir.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// One loaded template (plus its references) ready to render records.
///
/// Autoescaping is off: rendered files are pipeline scripts, not HTML.
pub struct TemplateEngine {
    tera: Tera,
    name: String,
    path: PathBuf,
}

impl TemplateEngine {
    /// Load the template described by `source`.
    pub fn load(source: &TemplateSource) -> Result<Self, RenderError> {
        let path = source.path();
        let templates = load_template_set(&source.dir, &source.name)?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(templates)
            .map_err(|e| RenderError::template(&path, e))?;

        Ok(TemplateEngine {
            tera,
            name: source.name.clone(),
            path,
        })
    }

    /// Render the loaded template against `record`.
    pub fn render(&self, record: &ConfigRecord) -> Result<String, RenderError> {
        let ctx = to_tera_context(record)?;
        self.tera
            .render(&self.name, &ctx)
            .map_err(|e| RenderError::template(&self.path, e))
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders the configured template for any config path.
///
/// Templates are resolved and parsed per call; a co-located template can
/// differ for every config.
pub struct Renderer {
    template_name: String,
    fallback_dir: PathBuf,
}

impl Renderer {
    pub fn new(settings: &Settings) -> Self {
        Renderer {
            template_name: settings.template_name.clone(),
            fallback_dir: settings.fallback_template_dir(),
        }
    }

    /// Resolve the template for `config_path` without rendering.
    pub fn resolve(&self, config_path: &Path) -> Result<TemplateSource, RenderError> {
        resolve_template(
            containing_dir(config_path),
            &self.template_name,
            &self.fallback_dir,
        )
    }

    /// Render the template for `config_path` against its parsed `record`.
    pub fn render(&self, config_path: &Path, record: &ConfigRecord) -> Result<String, RenderError> {
        let source = self.resolve(config_path)?;
        TemplateEngine::load(&source)?.render(record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
