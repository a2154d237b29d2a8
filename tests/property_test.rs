//! Property-based tests for the emitters and name transforms
//!
//! Uses proptest to generate model name lists and method selections

use drf_scaffold::util::to_snake_case;
use drf_scaffold::{
    emit_route_assertions, emit_viewset_imports, emit_viewset_tests, MethodSelector, RouteSpec,
    TestMethod, SUPPORTED_TESTS,
};
use proptest::prelude::*;

fn model_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,8}([A-Z][a-z]{1,8}){0,2}"
}

fn model_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(model_name(), 1..8)
}

fn selector() -> impl Strategy<Value = MethodSelector> {
    prop::sample::subsequence(SUPPORTED_TESTS.to_vec(), 0..=SUPPORTED_TESTS.len())
        .prop_shuffle()
        .prop_map(|methods| methods.into_iter().collect())
}

proptest! {
    #[test]
    fn test_imports_list_factories_in_order(models in model_names()) {
        let text = emit_viewset_imports(&models).unwrap().concat();
        let import_lines: Vec<_> = text
            .lines()
            .filter(|line| line.starts_with("from .factories import "))
            .collect();
        prop_assert_eq!(import_lines.len(), 1);

        let expected: Vec<_> = models.iter().map(|m| format!("{}Factory", m)).collect();
        let listed: Vec<_> = import_lines[0]
            .trim_start_matches("from .factories import ")
            .split(", ")
            .map(str::to_string)
            .collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn test_snake_case_shape(name in model_name()) {
        let snake = to_snake_case(&name);
        prop_assert!(!snake.chars().any(char::is_uppercase));
        prop_assert!(!snake.starts_with('_'));
        prop_assert_eq!(snake.replace('_', ""), name.to_lowercase());
    }

    #[test]
    fn test_viewset_methods_emitted_in_fixed_order(
        model in model_name(),
        methods in selector(),
    ) {
        let text = emit_viewset_tests(&model, &methods).unwrap().concat();

        let mut last = 0;
        for method in methods.iter() {
            let name = match method {
                TestMethod::List => "def test_list(",
                TestMethod::Detail => "def test_retrieve(",
                TestMethod::Specs => "def test_specs(",
                TestMethod::Facets => "def test_facets(",
                TestMethod::Filter => "def test_filter(",
            };
            let pos = text.find(name);
            prop_assert!(pos.is_some(), "missing {}", name);
            let pos = pos.unwrap_or_default();
            prop_assert!(pos >= last);
            last = pos;
        }
        prop_assert_eq!(text.matches("    def test_").count(), methods.len());
        prop_assert!(text.ends_with("\n\n\n"));
    }

    #[test]
    fn test_route_body_line_count(methods in selector()) {
        let spec = RouteSpec::new("orders", "orders", methods.clone());
        let fragments = emit_route_assertions(&spec).unwrap();

        let body = fragments
            .iter()
            .filter(|f| f.starts_with("        \"") || f.starts_with("        f\""))
            .count();
        let routed = methods.iter().filter(|m| m.has_route()).count();
        prop_assert_eq!(body, routed);
    }

    #[test]
    fn test_emission_is_deterministic(models in model_names(), methods in selector()) {
        for model in &models {
            let a = emit_viewset_tests(model, &methods).unwrap();
            let b = emit_viewset_tests(model, &methods).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
