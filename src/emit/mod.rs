//! Emitters: turn model names into ordered text fragments
//!
//! Every emitter returns its own [`Fragments`]; nothing reaches into a shared
//! output buffer. The assembler decides where fragments end up.
//!
//! - [`factory`]: `factory_boy` model factories
//! - [`routes`]: route-reversal tests
//! - [`viewset`]: viewset API tests
//! - [`sink`]: in-memory and append-to-file persistence

pub mod factory;
pub mod routes;
pub mod sink;
pub mod viewset;

pub use factory::{emit_factories, FactoryEmitter};
pub use routes::{emit_route_assertions, emit_route_imports, RouteEmitter, RouteSpec};
pub use sink::{target_key, AppendSink, MemorySink, Sink, SinkMode, WrittenFile};
pub use viewset::{emit_viewset_imports, emit_viewset_tests, ViewsetEmitter};

use crate::error::{Error, Result};
use crate::util::factory_name;

/// Width of one indentation level in generated Python
pub const INDENT: &str = "    ";

/// Ordered, append-only sequence of output text
///
/// A fragment may span several lines. Concatenating all fragments gives the
/// final file text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments(Vec<String>);

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: impl Into<String>) {
        self.0.push(fragment.into());
    }

    /// Split `text` on newlines and push every piece at `level`, each
    /// terminated by a newline
    ///
    /// Empty pieces are indented too, so a blank line at level 1 becomes
    /// four spaces. Generated files depend on that exact shape.
    pub fn push_indented(&mut self, text: &str, level: usize) {
        let prefix = INDENT.repeat(level);
        for line in text.split('\n') {
            self.0.push(format!("{}{}\n", prefix, line));
        }
    }

    /// Move all fragments of `other` onto the end of `self`
    pub fn append(&mut self, other: Fragments) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total byte length of the concatenated text
    pub fn byte_len(&self) -> usize {
        self.0.iter().map(String::len).sum()
    }

    /// Concatenate into the final text
    pub fn concat(&self) -> String {
        self.0.concat()
    }
}

impl FromIterator<String> for Fragments {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<String> for Fragments {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Fragments {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Wrap a rendered block in one leading newline and `after` trailing ones
pub(crate) fn framed(body: &str, after: usize) -> String {
    let mut text = String::with_capacity(body.len() + after + 1);
    text.push('\n');
    text.push_str(body);
    text.push_str(&"\n".repeat(after));
    text
}

/// Fail with [`Error::MissingModels`] when `models` is empty
pub(crate) fn require_models(models: &[String], what: &str) -> Result<()> {
    if models.is_empty() {
        return Err(Error::MissingModels(format!("cannot emit {}", what)));
    }
    Ok(())
}

/// Comma-separated factory class names, in model order
pub(crate) fn factory_list(models: &[String]) -> String {
    models
        .iter()
        .map(|model| factory_name(model))
        .collect::<Vec<_>>()
        .join(", ")
}
