//! Test method vocabulary
//!
//! The generator knows five kinds of viewset test. A [`MethodSelector`] picks
//! a subset of them; emission order is fixed by the enum declaration order,
//! never by the order the tags were given in.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One generated test kind
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TestMethod {
    List,
    Detail,
    Specs,
    Facets,
    Filter,
}

/// Every supported test method, in emission order
pub const SUPPORTED_TESTS: [TestMethod; 5] = [
    TestMethod::List,
    TestMethod::Detail,
    TestMethod::Specs,
    TestMethod::Facets,
    TestMethod::Filter,
];

impl TestMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            TestMethod::List => "list",
            TestMethod::Detail => "detail",
            TestMethod::Specs => "specs",
            TestMethod::Facets => "facets",
            TestMethod::Filter => "filter",
        }
    }

    /// Whether a DRF router exposes a named route for this method.
    /// Filtering reuses the list route.
    pub fn has_route(self) -> bool {
        !matches!(self, TestMethod::Filter)
    }
}

impl fmt::Display for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(TestMethod::List),
            "detail" => Ok(TestMethod::Detail),
            "specs" => Ok(TestMethod::Specs),
            "facets" => Ok(TestMethod::Facets),
            "filter" => Ok(TestMethod::Filter),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// Ordered set of test methods to emit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct MethodSelector(BTreeSet<TestMethod>);

impl MethodSelector {
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Every method in [`SUPPORTED_TESTS`]
    pub fn all() -> Self {
        SUPPORTED_TESTS.into_iter().collect()
    }

    pub fn contains(&self, method: TestMethod) -> bool {
        self.0.contains(&method)
    }

    pub fn insert(&mut self, method: TestMethod) -> bool {
        self.0.insert(method)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Selected methods in emission order
    pub fn iter(&self) -> impl Iterator<Item = TestMethod> + '_ {
        self.0.iter().copied()
    }

    /// Parse a comma-separated tag list such as `"list,detail"`
    pub fn parse_list(s: &str) -> Result<Self, Error> {
        s.split(',')
            .filter(|tag| !tag.trim().is_empty())
            .map(TestMethod::from_str)
            .collect()
    }
}

impl Default for MethodSelector {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<TestMethod> for MethodSelector {
    fn from_iter<I: IntoIterator<Item = TestMethod>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for MethodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<_> = self.iter().map(TestMethod::as_str).collect();
        f.write_str(&tags.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_order_is_fixed() {
        let selector: MethodSelector = [TestMethod::Filter, TestMethod::List, TestMethod::Specs]
            .into_iter()
            .collect();
        let order: Vec<_> = selector.iter().collect();
        assert_eq!(
            order,
            vec![TestMethod::List, TestMethod::Specs, TestMethod::Filter]
        );
    }

    #[test]
    fn test_parse_list() {
        let selector = MethodSelector::parse_list("facets, detail,").unwrap();
        assert!(selector.contains(TestMethod::Detail));
        assert!(selector.contains(TestMethod::Facets));
        assert_eq!(selector.len(), 2);
        assert_eq!(selector.to_string(), "detail,facets");
    }

    #[test]
    fn test_unknown_method() {
        let err = MethodSelector::parse_list("list,update").unwrap_err();
        assert!(matches!(err, Error::UnknownMethod(tag) if tag == "update"));
    }

    #[test]
    fn test_default_is_all() {
        let selector = MethodSelector::default();
        assert_eq!(selector.len(), SUPPORTED_TESTS.len());
        assert_eq!(selector.to_string(), "list,detail,specs,facets,filter");
    }

    #[test]
    fn test_yaml_roundtrip_keeps_order() {
        let selector: MethodSelector = serde_norway::from_str("[filter, list]").unwrap();
        assert_eq!(selector.to_string(), "list,filter");
        assert!(!TestMethod::Filter.has_route());
        assert!(TestMethod::Facets.has_route());
    }
}
