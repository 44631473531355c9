//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use route_bridge::{FileLoader, Params};
use tempfile::TempDir;

/// Renders seen by a recording loader: resolved file and the call's params.
pub type Renders = Arc<Mutex<Vec<(PathBuf, Params)>>>;

/// Create a temporary template directory holding `files` (relative paths).
pub fn template_dir(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        let path = dir.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, format!("<p>{file}</p>")).unwrap();
    }
    dir
}

/// Loader over `location` that records every render instead of printing.
pub fn recording_loader(location: &Path, suffix: &str) -> (Arc<FileLoader>, Renders) {
    let renders: Renders = Arc::new(Mutex::new(Vec::new()));
    let sink = renders.clone();

    let loader = FileLoader::within(location, location.to_str().unwrap(), suffix).with_render(
        move |path: &Path, params: &Params| {
            sink.lock().unwrap().push((path.to_path_buf(), params.clone()));
            true
        },
    );

    (Arc::new(loader), renders)
}

/// Path of the most recent render.
pub fn last_render(renders: &Renders) -> Option<PathBuf> {
    renders.lock().unwrap().last().map(|(path, _)| path.clone())
}
