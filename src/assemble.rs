//! File assembler
//!
//! Runs the emitters in a fixed order and hands each section to a sink:
//!
//! ```text
//! models ──► factories ──────────────────────► outputs.factories
//!        ──► route imports ─► route tests ───► outputs.test_routes
//!        ──► viewset imports ─► test classes ► outputs.test_views
//! ```
//!
//! Several sections may target the same path; they are concatenated in
//! emission order. Any error aborts the run.

use minijinja::Environment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::ScaffoldConfig;
use crate::emit::{
    target_key, FactoryEmitter, Fragments, RouteEmitter, Sink, ViewsetEmitter, WrittenFile,
};
use crate::error::Result;
use crate::models::ModelList;
use crate::templates;
use crate::VERSION;

/// Generate all files for `models` as described by `config`
pub fn generate(models: &ModelList, config: &ScaffoldConfig) -> Result<GenerationReport> {
    Assembler::new(config.clone())?.generate(models)
}

/// Outcome of one generator run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerationReport {
    /// Number of models processed
    pub models: usize,
    /// Content hash of the model list
    pub models_hash: String,
    /// Files written, in first-write order
    pub files: Vec<WrittenFile>,
}

impl GenerationReport {
    /// Human-readable summary
    pub fn to_report(&self) -> String {
        let mut out = format!(
            "Generated boilerplate for {} model(s) ({})\n",
            self.models, self.models_hash
        );
        for file in &self.files {
            out.push_str(&format!(
                "  ✓ {} ({} section(s), {} bytes)\n",
                file.path.display(),
                file.sections,
                file.bytes
            ));
        }
        out
    }
}

/// Sequences emitters and persists their output
pub struct Assembler {
    config: ScaffoldConfig,
    env: Environment<'static>,
}

impl Assembler {
    /// Build an assembler, loading template overrides if configured
    pub fn new(config: ScaffoldConfig) -> Result<Self> {
        let env = match &config.template_dir {
            Some(dir) => templates::engine_with_override(dir)?,
            None => templates::engine().clone(),
        };
        Ok(Self { config, env })
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Load the configured model file and generate everything
    pub fn run(&self) -> Result<GenerationReport> {
        let models = ModelList::load(&self.config.models)?;
        self.generate(&models)
    }

    /// Generate into the sink selected by the config
    pub fn generate(&self, models: &ModelList) -> Result<GenerationReport> {
        let mut sink = self.config.sink.into_sink();
        self.generate_into(models, sink.as_mut())?;
        let files = sink.finish()?;

        info!(models = models.len(), files = files.len(), "generation complete");
        Ok(GenerationReport {
            models: models.len(),
            models_hash: models.hash(),
            files,
        })
    }

    /// Emit every section into `sink` without finishing it
    pub fn generate_into(&self, models: &ModelList, sink: &mut dyn Sink) -> Result<()> {
        let names = models.as_slice();
        let outputs = &self.config.outputs;
        let mut writer = SectionWriter {
            sink,
            seen: Vec::new(),
            header: self.config.provenance.then(|| provenance_header(models)),
        };

        let factories = FactoryEmitter::with_engine(&self.env);
        writer.write(&outputs.factories, factories.emit(names)?)?;

        let routes = RouteEmitter::with_engine(&self.env);
        writer.write(&outputs.test_routes, routes.imports(names)?)?;
        for spec in self.config.route_specs(names) {
            writer.write(&outputs.test_routes, routes.assertions(&spec)?)?;
        }

        let viewsets = ViewsetEmitter::with_engine(&self.env, self.config.methods.clone());
        writer.write(&outputs.test_views, viewsets.imports(names)?)?;
        for model in names {
            writer.write(&outputs.test_views, viewsets.test_class(model)?)?;
        }

        Ok(())
    }
}

/// Forwards sections to a sink, prepending the provenance header to the
/// first section of each target
struct SectionWriter<'s> {
    sink: &'s mut dyn Sink,
    seen: Vec<PathBuf>,
    header: Option<String>,
}

impl SectionWriter<'_> {
    fn write(&mut self, target: &Path, section: Fragments) -> Result<()> {
        let key = target_key(target);
        let first = !self.seen.contains(&key);
        let section = match &self.header {
            Some(header) if first => {
                let mut with_header = Fragments::new();
                with_header.push(header.clone());
                with_header.append(section);
                with_header
            }
            _ => section,
        };
        if first {
            self.seen.push(key);
        }

        debug!(target = %target.display(), fragments = section.len(), "section");
        self.sink.write_section(target, section)
    }
}

/// Comment block naming the generator and the model list hash
///
/// No timestamp: identical input must give identical output.
pub fn provenance_header(models: &ModelList) -> String {
    format!(
        "# Generated by drf-scaffold {} from {} model(s)\n# MODELS HASH: {}\n\n",
        VERSION,
        models.len(),
        models.hash()
    )
}
