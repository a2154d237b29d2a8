//! Generator configuration
//!
//! Settings come from three layers, highest precedence first:
//! 1. command-line flags ([`Overrides`])
//! 2. a YAML config file (`drf-scaffold.yaml` by default)
//! 3. built-in defaults
//!
//! ```yaml
//! models: models.txt
//! outputs:
//!   factories: out/factories.py
//!   test_views: out/test_viewsets.py
//!   test_routes: out/test_routes_TEMP.py
//! methods: [list, detail, specs, facets, filter]
//! sink: memory
//! routes:
//!   - prefix: actions
//!     basename: actions
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::emit::{RouteSpec, SinkMode};
use crate::error::{Error, Result};
use crate::method::MethodSelector;
use crate::util::{pluralize, to_snake_case};

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE_NAME: &str = "drf-scaffold.yaml";

/// Generator configuration (`drf-scaffold.yaml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Newline-separated model names
    #[serde(default = "default_models")]
    pub models: PathBuf,

    /// Output file paths
    #[serde(default)]
    pub outputs: OutputsConfig,

    /// Test methods to generate
    #[serde(default)]
    pub methods: MethodSelector,

    /// How output files are written
    #[serde(default)]
    pub sink: SinkMode,

    /// Prepend a tool-version and model-hash comment to every file
    #[serde(default)]
    pub provenance: bool,

    /// Directory with template overrides
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Explicit route specs; one per model is derived when empty
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

fn default_models() -> PathBuf {
    PathBuf::from("models.txt")
}

/// Output file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OutputsConfig {
    #[serde(default = "default_factories")]
    pub factories: PathBuf,

    #[serde(default = "default_test_views")]
    pub test_views: PathBuf,

    #[serde(default = "default_test_routes")]
    pub test_routes: PathBuf,
}

fn default_factories() -> PathBuf {
    PathBuf::from("out/factories.py")
}

fn default_test_views() -> PathBuf {
    PathBuf::from("out/test_viewsets.py")
}

fn default_test_routes() -> PathBuf {
    PathBuf::from("out/test_routes_TEMP.py")
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            factories: default_factories(),
            test_views: default_test_views(),
            test_routes: default_test_routes(),
        }
    }
}

/// One router registration to test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub prefix: String,
    pub basename: String,

    /// Falls back to the top-level `methods`
    #[serde(default)]
    pub methods: Option<MethodSelector>,

    /// Test function becomes `test_<name>_routes`
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            outputs: OutputsConfig::default(),
            methods: MethodSelector::all(),
            sink: SinkMode::default(),
            provenance: false,
            template_dir: None,
            routes: Vec::new(),
        }
    }
}

/// Values given on the command line; `None` leaves the config untouched
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub models: Option<PathBuf>,
    pub factories: Option<PathBuf>,
    pub test_views: Option<PathBuf>,
    pub test_routes: Option<PathBuf>,
    pub methods: Option<MethodSelector>,
    pub sink: Option<SinkMode>,
    pub template_dir: Option<PathBuf>,
    pub provenance: bool,
}

impl ScaffoldConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_norway::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `drf-scaffold.yaml` from `dir` if present, otherwise defaults
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        for (idx, route) in self.routes.iter().enumerate() {
            if route.prefix.trim().is_empty() || route.basename.trim().is_empty() {
                return Err(Error::Config(format!(
                    "routes[{}]: prefix and basename must not be empty",
                    idx
                )));
            }
        }
        Ok(())
    }

    /// Apply command-line overrides on top of this config
    pub fn merge(mut self, overrides: Overrides) -> Self {
        if let Some(models) = overrides.models {
            self.models = models;
        }
        if let Some(path) = overrides.factories {
            self.outputs.factories = path;
        }
        if let Some(path) = overrides.test_views {
            self.outputs.test_views = path;
        }
        if let Some(path) = overrides.test_routes {
            self.outputs.test_routes = path;
        }
        if let Some(methods) = overrides.methods {
            self.methods = methods;
        }
        if let Some(sink) = overrides.sink {
            self.sink = sink;
        }
        if overrides.template_dir.is_some() {
            self.template_dir = overrides.template_dir;
        }
        self.provenance |= overrides.provenance;
        self
    }

    /// Route specs to generate tests for
    ///
    /// Configured routes win. Without any, each model gets one spec with
    /// prefix and basename `<snake_model>s`, named after the model so the
    /// generated test functions stay distinct.
    pub fn route_specs(&self, models: &[String]) -> Vec<RouteSpec> {
        if !self.routes.is_empty() {
            return self
                .routes
                .iter()
                .map(|route| RouteSpec {
                    prefix: route.prefix.clone(),
                    basename: route.basename.clone(),
                    methods: route.methods.clone().unwrap_or_else(|| self.methods.clone()),
                    name: route.name.clone(),
                })
                .collect();
        }

        models
            .iter()
            .map(|model| {
                let snake = to_snake_case(model);
                let plural = pluralize(&snake);
                RouteSpec::new(plural.clone(), plural, self.methods.clone()).named(snake)
            })
            .collect()
    }
}
