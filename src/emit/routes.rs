//! Route emitter
//!
//! Generates a pytest function asserting that every literal API path equals
//! the path DRF's `reverse()` resolves from the route name:
//!
//! ```text
//! routes = {
//!     "/api/orders/": reverse("orders-list"),
//!     ...
//! }
//! for url, reversed_url in routes.items():
//!     assert url == reversed_url
//! ```
//!
//! The header sits at indent level 0, route lines at level 2 and the footer
//! at level 1. Generated files keep exactly that layout.

use minijinja::Environment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{factory_list, framed, require_models, Fragments};
use crate::error::Result;
use crate::method::{MethodSelector, TestMethod};
use crate::templates::{self, names};
use crate::util::detail_name;

/// One router registration: URL prefix, route basename and the routes to check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RouteSpec {
    /// URL segment after `/api/`, e.g. `orders`
    pub prefix: String,
    /// Router basename, e.g. `orders` for `orders-list`
    pub basename: String,
    pub methods: MethodSelector,
    /// Distinguishes the test function when a file holds several route tests
    #[serde(default)]
    pub name: Option<String>,
}

impl RouteSpec {
    pub fn new(
        prefix: impl Into<String>,
        basename: impl Into<String>,
        methods: MethodSelector,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            basename: basename.into(),
            methods,
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The literal-path/reverse pair for one method, or `None` for methods
    /// without a route of their own
    pub fn route_line(&self, method: TestMethod) -> Option<String> {
        let (prefix, basename) = (&self.prefix, &self.basename);
        let line = match method {
            TestMethod::List => format!(r#""/api/{prefix}/": reverse("{basename}-list"),"#),
            TestMethod::Detail => {
                let detail = detail_name(basename);
                format!(
                    r#"f"/api/{prefix}/{{{detail}.id}}/": reverse("{basename}-detail", args=[{detail}.id]),"#
                )
            }
            TestMethod::Specs => {
                format!(r#""/api/{prefix}/specs/": reverse("{basename}-specs"),"#)
            }
            TestMethod::Facets => {
                format!(r#""/api/{prefix}/facets/": reverse("{basename}-facets"),"#)
            }
            TestMethod::Filter => return None,
        };
        Some(line)
    }
}

/// Emit the route test imports with the embedded templates
pub fn emit_route_imports(models: &[String]) -> Result<Fragments> {
    RouteEmitter::new().imports(models)
}

/// Emit one route test function with the embedded templates
pub fn emit_route_assertions(spec: &RouteSpec) -> Result<Fragments> {
    RouteEmitter::new().assertions(spec)
}

#[derive(Serialize)]
struct HeaderContext<'a> {
    name: Option<&'a str>,
}

/// Route test file emitter
pub struct RouteEmitter<'e> {
    env: &'e Environment<'static>,
}

impl RouteEmitter<'static> {
    pub fn new() -> Self {
        Self {
            env: templates::engine(),
        }
    }
}

impl Default for RouteEmitter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'e> RouteEmitter<'e> {
    pub fn with_engine(env: &'e Environment<'static>) -> Self {
        Self { env }
    }

    /// Imports followed by one test function per route spec
    pub fn emit(&self, models: &[String], specs: &[RouteSpec]) -> Result<Fragments> {
        let mut out = self.imports(models)?;
        for spec in specs {
            out.append(self.assertions(spec)?);
        }
        Ok(out)
    }

    pub fn imports(&self, models: &[String]) -> Result<Fragments> {
        require_models(models, "route test imports")?;

        let mut out = Fragments::new();
        out.push("import pytest\n\n");
        out.push("from rest_framework.reverse import reverse\n\n");
        out.push(format!("from .factories import {}\n\n\n", factory_list(models)));
        Ok(out)
    }

    pub fn assertions(&self, spec: &RouteSpec) -> Result<Fragments> {
        let mut out = Fragments::new();

        let header = templates::render(
            self.env,
            names::ROUTES_HEADER,
            HeaderContext {
                name: spec.name.as_deref(),
            },
        )?;
        out.push_indented(&framed(&header, 1), 0);

        let mut routes = 0;
        for line in spec.methods.iter().filter_map(|m| spec.route_line(m)) {
            out.push_indented(&line, 2);
            routes += 1;
        }

        let footer = templates::render(self.env, names::ROUTES_FOOTER, ())?;
        out.push_indented(&framed(&footer, 3), 1);

        debug!(prefix = %spec.prefix, basename = %spec.basename, routes, "emitted route test");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn list_detail() -> MethodSelector {
        [TestMethod::List, TestMethod::Detail].into_iter().collect()
    }

    #[test]
    fn test_imports_require_models() {
        let err = emit_route_imports(&[]).unwrap_err();
        assert!(matches!(err, Error::MissingModels(_)));
    }

    #[test]
    fn test_imports() {
        let out = emit_route_imports(&["Action".into(), "Order".into()]).unwrap();
        assert_eq!(
            out.concat(),
            "import pytest\n\nfrom rest_framework.reverse import reverse\n\n\
             from .factories import ActionFactory, OrderFactory\n\n\n"
        );
    }

    #[test]
    fn test_route_lines() {
        let spec = RouteSpec::new("orders", "orders", MethodSelector::all());
        assert_eq!(
            spec.route_line(TestMethod::List).unwrap(),
            r#""/api/orders/": reverse("orders-list"),"#
        );
        assert_eq!(
            spec.route_line(TestMethod::Detail).unwrap(),
            r#"f"/api/orders/{order.id}/": reverse("orders-detail", args=[order.id]),"#
        );
        assert_eq!(
            spec.route_line(TestMethod::Facets).unwrap(),
            r#""/api/orders/facets/": reverse("orders-facets"),"#
        );
        assert!(spec.route_line(TestMethod::Filter).is_none());
    }

    #[test]
    fn test_assertions_exact_layout() {
        let spec = RouteSpec::new("orders", "orders", list_detail());
        let out = emit_route_assertions(&spec).unwrap().concat();

        let expected = "\n\
@pytest.mark.django_db\n\
def test_routes():\n\
\x20   \"\"\"\n\
\x20   The URL reversed from the route name\n\
\x20   matches the expected literal URL.\n\
\x20   \"\"\"\n\
\n\
\x20   routes = {\n\
\n\
\x20       \"/api/orders/\": reverse(\"orders-list\"),\n\
\x20       f\"/api/orders/{order.id}/\": reverse(\"orders-detail\", args=[order.id]),\n\
\x20   \n\
\x20   }\n\
\x20   for url, reversed_url in routes.items():\n\
\x20       assert url == reversed_url\n\
\x20   \n\
\x20   \n\
\x20   \n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_assertions_body_order_ignores_filter() {
        let methods: MethodSelector = [TestMethod::Filter, TestMethod::Specs, TestMethod::List]
            .into_iter()
            .collect();
        let spec = RouteSpec::new("actions", "actions", methods).named("action");
        let out = emit_route_assertions(&spec).unwrap().concat();

        assert!(out.contains("def test_action_routes():"));
        let list = out.find("reverse(\"actions-list\")").unwrap();
        let specs = out.find("reverse(\"actions-specs\")").unwrap();
        assert!(list < specs);
        assert_eq!(out.matches("reverse(").count(), 2);
    }

    #[test]
    fn test_emit_file() {
        let models = vec!["Order".to_string()];
        let specs = vec![
            RouteSpec::new("orders", "orders", list_detail()).named("order"),
            RouteSpec::new("items", "items", list_detail()).named("item"),
        ];
        let out = RouteEmitter::new().emit(&models, &specs).unwrap().concat();
        assert!(out.starts_with("import pytest\n"));
        assert_eq!(out.matches("@pytest.mark.django_db").count(), 2);
        assert!(out.find("test_order_routes").unwrap() < out.find("test_item_routes").unwrap());
    }
}
