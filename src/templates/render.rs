//! Content production for resolved template files.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::routing::params::Params;

/// Produces output for a template file; the result becomes the dispatch result.
pub trait Render: Send + Sync {
    fn render(&self, template: &Path, params: &Params) -> bool;
}

impl<F> Render for F
where
    F: Fn(&Path, &Params) -> bool + Send + Sync,
{
    fn render(&self, template: &Path, params: &Params) -> bool {
        self(template, params)
    }
}

/// Streams the template file to stdout unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutRender;

impl Render for StdoutRender {
    fn render(&self, template: &Path, _params: &Params) -> bool {
        let result = File::open(template)
            .and_then(|mut file| io::copy(&mut file, &mut io::stdout().lock()));

        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    template = %template.display(),
                    error = %e,
                    "Failed to render template"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_render() {
        let render = |path: &Path, params: &Params| {
            path.ends_with("hello.html") && params.method() == "GET"
        };

        assert!(render.render(Path::new("/tmp/hello.html"), &Params::new("GET", "hello")));
        assert!(!render.render(Path::new("/tmp/hello.html"), &Params::new("POST", "hello")));
    }

    #[test]
    fn test_stdout_render_missing_file() {
        let missing = Path::new("/nonexistent/route-bridge/template.html");
        assert!(!StdoutRender.render(missing, &Params::default()));
    }
}
