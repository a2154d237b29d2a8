// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # drf-scaffold
//!
//! Test boilerplate generator for Django REST Framework projects.
//!
//! Given a list of model names, drf-scaffold writes:
//!
//! - **factories**: one `factory_boy` `DjangoModelFactory` per model
//! - **viewset tests**: one pytest class per model with list, detail, specs,
//!   facets and filter tests
//! - **route tests**: assertions that literal API paths match `reverse()`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drf_scaffold::{emit_viewset_tests, MethodSelector, ModelList, ScaffoldConfig, TestMethod};
//!
//! // One class, list test only
//! let methods: MethodSelector = [TestMethod::List].into_iter().collect();
//! let text = emit_viewset_tests("Order", &methods)?.concat();
//! assert!(text.contains("def test_list"));
//!
//! // Whole run with default paths
//! let models = ModelList::from_names(["Order", "UserProfile"]);
//! let report = drf_scaffold::generate(&models, &ScaffoldConfig::default())?;
//! println!("{}", report.to_report());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! models.txt ──► ModelList
//!                   │
//!                   ├──► FactoryEmitter ──► Fragments ─┐
//!                   ├──► RouteEmitter   ──► Fragments ─┼──► Sink ──► .py files
//!                   └──► ViewsetEmitter ──► Fragments ─┘
//!
//! Sink: MemorySink (write once) | AppendSink (per section)
//! ```
//!
//! Emitters never share an output buffer. Each returns its own
//! [`Fragments`]; the [`Assembler`] routes them to their target files.

pub mod assemble;
pub mod config;
pub mod emit;
pub mod error;
pub mod method;
pub mod models;
pub mod templates;
pub mod util;

// Re-exports
pub use assemble::{generate, provenance_header, Assembler, GenerationReport};
pub use config::{OutputsConfig, Overrides, RouteConfig, ScaffoldConfig, CONFIG_FILE_NAME};
pub use emit::{
    emit_factories, emit_route_assertions, emit_route_imports, emit_viewset_imports,
    emit_viewset_tests, target_key, AppendSink, FactoryEmitter, Fragments, MemorySink,
    RouteEmitter, RouteSpec, Sink, SinkMode, ViewsetEmitter, WrittenFile,
};
pub use error::{Error, Result};
pub use method::{MethodSelector, TestMethod, SUPPORTED_TESTS};
pub use models::ModelList;
pub use templates::TemplateError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
