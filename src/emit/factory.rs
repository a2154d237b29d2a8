//! Factory emitter (`factory_boy` model factories)
//!
//! One `DjangoModelFactory` subclass per model. Field declarations are not
//! generated; each class keeps an empty line where they belong.

use minijinja::Environment;
use serde::Serialize;
use tracing::debug;

use super::{require_models, Fragments};
use crate::error::Result;
use crate::templates::{self, names};
use crate::util::factory_name;

/// Emit the factories file for `models` with the embedded templates
pub fn emit_factories(models: &[String]) -> Result<Fragments> {
    FactoryEmitter::new().emit(models)
}

/// Factory file emitter
pub struct FactoryEmitter<'e> {
    env: &'e Environment<'static>,
}

#[derive(Serialize)]
struct FactoryContext<'a> {
    model: &'a str,
    factory: String,
}

impl FactoryEmitter<'static> {
    pub fn new() -> Self {
        Self {
            env: templates::engine(),
        }
    }
}

impl Default for FactoryEmitter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'e> FactoryEmitter<'e> {
    pub fn with_engine(env: &'e Environment<'static>) -> Self {
        Self { env }
    }

    /// Imports followed by every factory class
    pub fn emit(&self, models: &[String]) -> Result<Fragments> {
        let mut out = self.imports(models)?;

        for (idx, model) in models.iter().enumerate() {
            if idx > 0 {
                out.push("\n");
            }
            out.push(self.factory(model)?);
        }

        debug!(models = models.len(), fragments = out.len(), "emitted factories");
        Ok(out)
    }

    /// `factory` import plus the model import line
    pub fn imports(&self, models: &[String]) -> Result<Fragments> {
        require_models(models, "factory imports")?;

        let mut out = Fragments::new();
        out.push("import factory.fuzzy\n");
        out.push(format!("from ..models import {}\n\n\n", models.join(", ")));
        Ok(out)
    }

    /// One factory class, newline-terminated
    pub fn factory(&self, model: &str) -> Result<String> {
        let ctx = FactoryContext {
            model,
            factory: factory_name(model),
        };
        let mut block = templates::render(self.env, names::FACTORY_CLASS, &ctx)?;
        block.push('\n');
        Ok(block)
    }
}
