//! Directory-backed template loader.
//!
//! # Responsibilities
//! - Resolve template names to files under one location
//! - Refuse names that escape the location
//! - Hand resolved files to a `Render` implementation
//! - Produce route callbacks bound to a discovered template name

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::handler::Callback;
use crate::routing::matcher::RoutePattern;
use crate::routing::params::Params;
use crate::routing::path::{prepare_extension, prepare_pathname, DEFAULT_NAMEPATH};
use crate::templates::discovery;
use crate::templates::render::{Render, StdoutRender};

/// Loads templates named `<location>/<name><extension>`.
#[derive(Clone)]
pub struct FileLoader {
    location: PathBuf,
    extension: String,
    render: Arc<dyn Render>,
}

impl FileLoader {
    /// Create a loader; relative locations resolve against the current directory.
    pub fn new(location: &str, suffix: &str) -> Self {
        let base = std::env::current_dir().unwrap_or_default();
        Self::within(&base, location, suffix)
    }

    /// Create a loader; relative locations resolve against `base`.
    ///
    /// An empty relative location falls back to [`DEFAULT_NAMEPATH`].
    pub fn within(base: &Path, location: &str, suffix: &str) -> Self {
        let location = if Path::new(location).is_absolute() {
            PathBuf::from(location)
        } else {
            let relative = match prepare_pathname(location) {
                clean if clean.is_empty() => DEFAULT_NAMEPATH.to_string(),
                clean => clean,
            };
            base.join(relative)
        };

        Self {
            location,
            extension: prepare_extension(suffix),
            render: Arc::new(StdoutRender),
        }
    }

    /// Replace the renderer.
    pub fn with_render(mut self, render: impl Render + 'static) -> Self {
        self.render = Arc::new(render);
        self
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Canonical file path for a template name, if the file exists inside
    /// the location.
    pub fn file_path(&self, name: &str) -> Option<PathBuf> {
        let candidate = self.location.join(format!("{name}{}", self.extension));
        let path = fs::canonicalize(candidate).ok()?;
        let root = fs::canonicalize(&self.location).ok()?;

        (path.starts_with(&root) && path.is_file()).then_some(path)
    }

    /// Whether `template` names an existing template file.
    pub fn is_valid(&self, template: &str) -> bool {
        let template = prepare_pathname(template);
        !template.is_empty() && self.file_path(&template).is_some()
    }

    /// Load the template named by the dispatched route.
    pub fn load(&self, params: &Params) -> bool {
        self.load_template(params.route(), params)
    }

    /// Load the template `name` and render it with `params`.
    pub fn load_template(&self, name: &str, params: &Params) -> bool {
        let name = prepare_pathname(name);

        if name.is_empty() {
            return false;
        }

        let Some(path) = self.file_path(&name) else {
            tracing::debug!(
                template = %name,
                location = %self.location.display(),
                "Template not found"
            );
            metrics::record_template_load("missing");
            return false;
        };

        let rendered = self.render.render(&path, params);
        metrics::record_template_load(if rendered { "rendered" } else { "failed" });
        rendered
    }

    /// Template names below the location, in registration order.
    pub fn discover(&self) -> impl Iterator<Item = String> + '_ {
        discovery::discover(&self.location, &self.extension)
    }

    /// Wildcard callback serving the template `name`.
    ///
    /// When the dispatch carries placeholder captures, they must rebuild the
    /// dispatched route from `name`; otherwise the call is declined without
    /// touching the filesystem.
    pub fn callback(self: &Arc<Self>, name: &str) -> Callback {
        let loader = Arc::clone(self);
        let pattern = RoutePattern::parse(&prepare_pathname(name));

        Arc::new(move |params: &Params| {
            if !params.captures().is_empty() {
                let rebuilt = pattern.reconstruct(params.captures());

                if rebuilt.as_deref() != Some(params.route()) {
                    tracing::debug!(
                        template = %pattern.as_str(),
                        route = %params.route(),
                        "Captures do not rebuild the dispatched route"
                    );
                    return false;
                }
            }

            loader.load_template(pattern.as_str(), params)
        })
    }
}

impl fmt::Debug for FileLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLoader")
            .field("location", &self.location)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}
