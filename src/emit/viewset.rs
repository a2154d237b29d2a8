//! Viewset test emitter
//!
//! One pytest class per model, holding a test method for each selected
//! [`TestMethod`]. Methods always come out in the order list, detail, specs,
//! facets, filter.
//!
//! The specs, facets and filter tests contain fill-in markers (`<spec>`,
//! `<facet>`, `<filter>`, `<value>`, `<model>`) that are meant to be edited by
//! hand after generation.

use minijinja::Environment;
use serde::Serialize;
use tracing::debug;

use super::{factory_list, framed, require_models, Fragments};
use crate::error::Result;
use crate::method::{MethodSelector, TestMethod};
use crate::templates::{self, names};
use crate::util::{
    factory_name, pluralize, test_class_name, to_snake_case, url_constant_name, viewset_name,
};

/// Emit the viewset test imports with the embedded templates
pub fn emit_viewset_imports(models: &[String]) -> Result<Fragments> {
    ViewsetEmitter::new(MethodSelector::all()).imports(models)
}

/// Emit one viewset test class with the embedded templates
pub fn emit_viewset_tests(model: &str, methods: &MethodSelector) -> Result<Fragments> {
    ViewsetEmitter::new(methods.clone()).test_class(model)
}

/// Names derived from one model, shared by the class header and templates
#[derive(Debug, Serialize)]
struct ViewsetContext<'a> {
    model: &'a str,
    snake: String,
    plural: String,
    factory: String,
    /// Route basename as registered with the router
    route_base: String,
    list_url: String,
    detail_url: String,
    specs_url: String,
    facets_url: String,
}

impl<'a> ViewsetContext<'a> {
    fn new(model: &'a str) -> Self {
        let snake = to_snake_case(model);
        let plural = pluralize(&snake);
        Self {
            model,
            factory: factory_name(model),
            route_base: plural.clone(),
            list_url: url_constant_name(&snake, TestMethod::List.as_str()),
            detail_url: url_constant_name(&snake, TestMethod::Detail.as_str()),
            specs_url: url_constant_name(&snake, TestMethod::Specs.as_str()),
            facets_url: url_constant_name(&snake, TestMethod::Facets.as_str()),
            plural,
            snake,
        }
    }
}

fn method_template(method: TestMethod) -> &'static str {
    match method {
        TestMethod::List => names::VIEWSET_LIST,
        TestMethod::Detail => names::VIEWSET_DETAIL,
        TestMethod::Specs => names::VIEWSET_SPECS,
        TestMethod::Facets => names::VIEWSET_FACETS,
        TestMethod::Filter => names::VIEWSET_FILTER,
    }
}

/// Viewset test file emitter
pub struct ViewsetEmitter<'e> {
    env: &'e Environment<'static>,
    methods: MethodSelector,
}

impl ViewsetEmitter<'static> {
    pub fn new(methods: MethodSelector) -> Self {
        Self {
            env: templates::engine(),
            methods,
        }
    }
}

impl<'e> ViewsetEmitter<'e> {
    pub fn with_engine(env: &'e Environment<'static>, methods: MethodSelector) -> Self {
        Self { env, methods }
    }

    pub fn methods(&self) -> &MethodSelector {
        &self.methods
    }

    /// Imports followed by one test class per model, in input order
    pub fn emit(&self, models: &[String]) -> Result<Fragments> {
        let mut out = self.imports(models)?;
        for model in models {
            out.append(self.test_class(model)?);
        }
        Ok(out)
    }

    pub fn imports(&self, models: &[String]) -> Result<Fragments> {
        require_models(models, "viewset test imports")?;

        let mut out = Fragments::new();
        out.push("import pytest\n\n");
        out.push("from rest_framework.reverse import reverse\n");
        out.push("from rest_framework.status import HTTP_200_OK\n\n");
        out.push(format!("from .factories import {}\n\n\n", factory_list(models)));
        Ok(out)
    }

    /// Class header, selected test methods, then two blank lines
    pub fn test_class(&self, model: &str) -> Result<Fragments> {
        let ctx = ViewsetContext::new(model);
        let mut out = Fragments::new();

        out.push(self.class_header(&ctx));

        for method in self.methods.iter() {
            let body = templates::render(self.env, method_template(method), &ctx)?;
            out.push_indented(&framed(&body, 1), 1);
        }

        out.push("\n\n");

        debug!(model, methods = %self.methods, "emitted viewset tests");
        Ok(out)
    }

    /// `class Test<Model>ViewSet:` with its URL constants
    ///
    /// The list URL is always declared; specs and facets only when selected.
    /// The detail URL depends on an instance and is built inside its test.
    fn class_header(&self, ctx: &ViewsetContext<'_>) -> String {
        let mut header = format!("class {}:\n", test_class_name(&viewset_name(ctx.model)));
        header.push_str(&format!(
            "    {} = reverse(\"{}-list\")\n",
            ctx.list_url, ctx.route_base
        ));
        if self.methods.contains(TestMethod::Specs) {
            header.push_str(&format!(
                "    {} = reverse(\"{}-specs\")\n",
                ctx.specs_url, ctx.route_base
            ));
        }
        if self.methods.contains(TestMethod::Facets) {
            header.push_str(&format!(
                "    {} = reverse(\"{}-facets\")\n",
                ctx.facets_url, ctx.route_base
            ));
        }
        header
    }
}
