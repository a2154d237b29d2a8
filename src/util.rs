//! Name transforms
//!
//! Casing conversion plus the derived names used throughout the generated
//! Python: factory classes, viewsets, URL constants and route names.

/// Convert snake_case to PascalCase
///
/// # Examples
/// ```
/// use drf_scaffold::util::to_pascal_case;
/// assert_eq!(to_pascal_case("user_profile"), "UserProfile");
/// assert_eq!(to_pascal_case("order"), "Order");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert PascalCase or camelCase to snake_case
///
/// An underscore goes before every uppercase letter except a leading one.
///
/// # Examples
/// ```
/// use drf_scaffold::util::to_snake_case;
/// assert_eq!(to_snake_case("UserProfile"), "user_profile");
/// assert_eq!(to_snake_case("X"), "x");
/// assert_eq!(to_snake_case(""), "");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert to UPPER_SNAKE_CASE
///
/// # Examples
/// ```
/// use drf_scaffold::util::to_upper_snake_case;
/// assert_eq!(to_upper_snake_case("UserProfile"), "USER_PROFILE");
/// ```
pub fn to_upper_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Naive English plural: append `s`
pub fn pluralize(name: &str) -> String {
    format!("{}s", name)
}

/// Name of a class-level URL constant, e.g. `ORDER_LIST_URL`
///
/// # Examples
/// ```
/// use drf_scaffold::util::url_constant_name;
/// assert_eq!(url_constant_name("user_profile", "facets"), "USER_PROFILE_FACETS_URL");
/// ```
pub fn url_constant_name(name: &str, kind: &str) -> String {
    format!("{}_{}_URL", name.to_uppercase(), kind.to_uppercase())
}

pub fn viewset_name(model: &str) -> String {
    format!("{}ViewSet", model)
}

pub fn test_class_name(viewset: &str) -> String {
    format!("Test{}", viewset)
}

pub fn factory_name(model: &str) -> String {
    format!("{}Factory", model)
}

/// Instance name used by detail routes: the basename minus its last character
///
/// `"orders"` becomes `"order"`. An empty basename stays empty.
pub fn detail_name(basename: &str) -> &str {
    match basename.char_indices().next_back() {
        Some((idx, _)) => &basename[..idx],
        None => basename,
    }
}
