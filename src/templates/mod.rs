//! Template-based code generation
//!
//! Multi-line Python blocks (factory classes, route test header/footer and
//! the viewset test methods) live in MiniJinja templates. Templates are
//! embedded by default, with optional override via:
//! - `--template-dir` CLI flag
//! - `template_dir` in the config file
//!
//! Rendered templates carry no leading or trailing blank lines; the emitters
//! decide how blocks are framed and indented.

pub mod filters;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Template names, relative to the template directory
pub mod names {
    pub const FACTORY_CLASS: &str = "factory/class.jinja";
    pub const ROUTES_HEADER: &str = "routes/header.jinja";
    pub const ROUTES_FOOTER: &str = "routes/footer.jinja";
    pub const VIEWSET_LIST: &str = "viewset/list.jinja";
    pub const VIEWSET_DETAIL: &str = "viewset/detail.jinja";
    pub const VIEWSET_SPECS: &str = "viewset/specs.jinja";
    pub const VIEWSET_FACETS: &str = "viewset/facets.jinja";
    pub const VIEWSET_FILTER: &str = "viewset/filter.jinja";

    pub const ALL: [&str; 8] = [
        FACTORY_CLASS,
        ROUTES_HEADER,
        ROUTES_FOOTER,
        VIEWSET_LIST,
        VIEWSET_DETAIL,
        VIEWSET_SPECS,
        VIEWSET_FACETS,
        VIEWSET_FILTER,
    ];
}

// Embedded templates (compiled into binary)
mod embedded {
    pub const FACTORY_CLASS: &str = include_str!("../../templates/factory/class.jinja");
    pub const ROUTES_HEADER: &str = include_str!("../../templates/routes/header.jinja");
    pub const ROUTES_FOOTER: &str = include_str!("../../templates/routes/footer.jinja");
    pub const VIEWSET_LIST: &str = include_str!("../../templates/viewset/list.jinja");
    pub const VIEWSET_DETAIL: &str = include_str!("../../templates/viewset/detail.jinja");
    pub const VIEWSET_SPECS: &str = include_str!("../../templates/viewset/specs.jinja");
    pub const VIEWSET_FACETS: &str = include_str!("../../templates/viewset/facets.jinja");
    pub const VIEWSET_FILTER: &str = include_str!("../../templates/viewset/filter.jinja");
}

/// Template engine singleton
static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

/// Initialize the template engine with embedded templates
fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();

    // Generated Python is not markup, and the trailing newline of each
    // template file is framing the emitters add themselves
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(false);
    // A misspelled variable in an override fails the run instead of
    // rendering as empty text
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    filters::register_filters(&mut env);

    for (name, source) in [
        (names::FACTORY_CLASS, embedded::FACTORY_CLASS),
        (names::ROUTES_HEADER, embedded::ROUTES_HEADER),
        (names::ROUTES_FOOTER, embedded::ROUTES_FOOTER),
        (names::VIEWSET_LIST, embedded::VIEWSET_LIST),
        (names::VIEWSET_DETAIL, embedded::VIEWSET_DETAIL),
        (names::VIEWSET_SPECS, embedded::VIEWSET_SPECS),
        (names::VIEWSET_FACETS, embedded::VIEWSET_FACETS),
        (names::VIEWSET_FILTER, embedded::VIEWSET_FILTER),
    ] {
        env.add_template(name, source)
            .expect("embedded templates are valid");
    }

    env
}

/// Get the global template engine
pub fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}

/// Create a new template engine with custom template directory
/// Templates in custom_dir override embedded templates
pub fn engine_with_override(custom_dir: &Path) -> Result<Environment<'static>, TemplateError> {
    if !custom_dir.is_dir() {
        return Err(TemplateError::IoError(format!(
            "Template directory not found: {}",
            custom_dir.display()
        )));
    }

    let mut env = init_engine();
    for name in names::ALL {
        let path = custom_dir.join(name);
        if !path.exists() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|e| {
            TemplateError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        env.add_template_owned(name, content)
            .map_err(|e| TemplateError::ParseError(name.into(), e.to_string()))?;
        debug!(template = name, path = %path.display(), "template overridden");
    }

    Ok(env)
}

/// Render a named template with the given context
pub fn render<S: Serialize>(
    env: &Environment<'_>,
    name: &str,
    ctx: S,
) -> Result<String, TemplateError> {
    let template = env
        .get_template(name)
        .map_err(|e| TemplateError::TemplateNotFound(e.to_string()))?;
    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Template errors
#[derive(Debug, Clone)]
pub enum TemplateError {
    /// Template not found
    TemplateNotFound(String),
    /// Template parse error (template name, message)
    ParseError(String, String),
    /// Template render error
    RenderError(String),
    /// IO error loading custom templates
    IoError(String),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::TemplateNotFound(msg) => write!(f, "Template not found: {}", msg),
            TemplateError::ParseError(name, msg) => {
                write!(f, "Template parse error in {}: {}", name, msg)
            }
            TemplateError::RenderError(msg) => write!(f, "Template render error: {}", msg),
            TemplateError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for TemplateError {}
