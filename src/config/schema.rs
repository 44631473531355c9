//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::path::{DEFAULT_NAMEPATH, HTTP_METHODS};
use crate::security::environment::Environment;
use crate::templates::FileLoader;

/// Root configuration for the bridge router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// First path segment of every bridge request.
    pub prefix: String,

    /// Template directory and autoload settings.
    pub templates: TemplatesConfig,

    /// Explicit routes bound to templates.
    pub routes: Vec<RouteConfig>,

    /// Static request environment (headers, request data).
    pub environment: EnvironmentConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_NAMEPATH.to_string(),
            templates: TemplatesConfig::default(),
            routes: Vec::new(),
            environment: EnvironmentConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Template directory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Template directory; relative paths resolve against `base_dir`.
    pub location: String,

    /// Optional suffix inserted before the `.html` extension.
    pub suffix: String,

    /// Register every discovered template as a route.
    pub autoload: bool,

    /// Gate identifier of the autoload handler; empty disables the gate.
    pub identifier: String,

    /// Directory relative locations resolve against (the config file's).
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_NAMEPATH.to_string(),
            suffix: String::new(),
            autoload: true,
            identifier: String::new(),
            base_dir: None,
        }
    }
}

impl TemplatesConfig {
    /// Build the loader described by this section.
    pub fn loader(&self) -> FileLoader {
        match &self.base_dir {
            Some(base) => FileLoader::within(base, &self.location, &self.suffix),
            None => FileLoader::new(&self.location, &self.suffix),
        }
    }
}

/// Route configuration binding a pattern to a template.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route pattern, e.g. `user/[name]`.
    pub pattern: String,

    /// Template to serve; defaults to the pattern itself.
    #[serde(default)]
    pub template: Option<String>,

    /// Methods to bind; empty binds the standard HTTP methods.
    #[serde(default)]
    pub methods: Vec<String>,
}

impl RouteConfig {
    pub fn template_name(&self) -> &str {
        self.template.as_deref().unwrap_or(&self.pattern)
    }

    /// Methods this route binds, upper-cased.
    pub fn effective_methods(&self) -> Vec<String> {
        if self.methods.is_empty() {
            return HTTP_METHODS.iter().map(|m| m.to_string()).collect();
        }

        self.methods
            .iter()
            .map(|m| m.trim().to_uppercase())
            .collect()
    }
}

/// Static request environment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Request headers by name (`Bridge = "1"`).
    pub headers: BTreeMap<String, String>,

    /// Request data merged into every dispatch.
    pub request: BTreeMap<String, String>,
}

impl EnvironmentConfig {
    pub fn to_environment(&self) -> Environment {
        let env = self
            .headers
            .iter()
            .fold(Environment::new(), |env, (name, value)| env.with_header(name, value.clone()));

        self.request
            .iter()
            .fold(env, |env, (key, value)| env.with_request_value(key.clone(), value.clone()))
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
