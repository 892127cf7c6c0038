//! Template evaluation.
//!
//! Rendering goes through the narrow [`TemplateEngine`] trait so the tree
//! walk does not depend on a particular template language. [`TeraEngine`] is
//! the default implementation, evaluating templates with [`tera`] against a
//! [`Variables`] context.
use std::error::Error as _;
use std::path::Path;

use crate::config::Variables;
use crate::error::RenderError;

/// Details of a failed evaluation, as reported by a [`TemplateEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// File the failure came from, when it differs from the template name.
    pub origin: Option<String>,
    /// Line of the failure, when known.
    ///
    /// [`TeraEngine`] only knows the line for syntax errors. Failures while
    /// rendering, such as an undefined variable, leave this `None`.
    pub line: Option<usize>,
    /// Human-readable failure detail.
    pub detail: String,
}

impl Evaluation {
    /// A failure with only a detail message.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            origin: None,
            line: None,
            detail: detail.into(),
        }
    }
}

/// Evaluates template text to its rendered form.
pub trait TemplateEngine {
    /// Render `source`, identified by `name` in diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an [`Evaluation`] describing why the template could not be
    /// rendered.
    fn evaluate(&self, name: &str, source: &str) -> Result<String, Evaluation>;
}

/// Read the template at `path` and render it with `engine`.
///
/// # Errors
///
/// Returns [`RenderError::Read`] if the file cannot be read as UTF-8 and
/// [`RenderError::Template`] if evaluation fails.
pub fn render(path: &Path, engine: &dyn TemplateEngine) -> Result<String, RenderError> {
    tracing::debug!("retrieving template {}", path.display());
    let source = std::fs::read_to_string(path).map_err(|source| RenderError::Read {
        file: path.to_path_buf(),
        source,
    })?;

    let name = path.display().to_string();
    engine
        .evaluate(&name, &source)
        .map_err(|failure| RenderError::Template {
            file: path.to_path_buf(),
            origin: failure.origin.unwrap_or(name),
            line: failure.line,
            detail: failure.detail,
        })
}

/// [`TemplateEngine`] backed by `tera`, with autoescaping disabled.
#[derive(Debug, Clone, Default)]
pub struct TeraEngine {
    context: tera::Context,
}

impl TeraEngine {
    /// Build an engine whose templates see every entry of `variables`.
    #[must_use]
    pub fn new(variables: &Variables) -> Self {
        let mut context = tera::Context::new();
        for (name, value) in variables.iter() {
            context.insert(name, value);
        }
        Self { context }
    }
}

impl TemplateEngine for TeraEngine {
    fn evaluate(&self, name: &str, source: &str) -> Result<String, Evaluation> {
        let mut tera = tera::Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_template(name, source)
            .map_err(|e| evaluation_from_tera(&e))?;
        tera.render(name, &self.context)
            .map_err(|e| evaluation_from_tera(&e))
    }
}

/// Flatten a tera error chain into an [`Evaluation`].
fn evaluation_from_tera(error: &tera::Error) -> Evaluation {
    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }
    let line = messages.iter().find_map(|m| parse_line(m));
    Evaluation {
        origin: None,
        line,
        detail: messages.join(": "),
    }
}

/// Extract the line number from a parser location marker like ` --> 3:14`.
fn parse_line(message: &str) -> Option<usize> {
    let (_, rest) = message.split_once("--> ")?;
    let (line, _) = rest.split_once(':')?;
    line.trim().parse().ok()
}
