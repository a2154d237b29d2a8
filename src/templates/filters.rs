//! Custom MiniJinja filters for Python boilerplate
//!
//! Available to embedded and user-supplied templates alike:
//! - `snake_case`, `pascal_case`, `upper_snake_case`
//! - `pluralize`

use crate::util;
use minijinja::Environment;

/// Register all custom filters with the environment
pub fn register_filters(env: &mut Environment<'_>) {
    env.add_filter("pascal_case", filter_pascal_case);
    env.add_filter("snake_case", filter_snake_case);
    env.add_filter("upper_snake_case", filter_upper_snake_case);
    env.add_filter("pluralize", filter_pluralize);
}

// Filter wrappers that delegate to shared util functions
fn filter_pascal_case(value: &str) -> String {
    util::to_pascal_case(value)
}

fn filter_snake_case(value: &str) -> String {
    util::to_snake_case(value)
}

fn filter_upper_snake_case(value: &str) -> String {
    util::to_upper_snake_case(value)
}

fn filter_pluralize(value: &str) -> String {
    util::pluralize(value)
}
