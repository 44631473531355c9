//! Template name discovery under a directory.

use std::path::Path;

use walkdir::WalkDir;

use crate::routing::path::prepare_pathname;

/// Lazily enumerate template names below `location`.
///
/// A name is the file path relative to `location` with `extension` removed,
/// in `/`-separated form. Entries are visited in file-name order so the
/// resulting registration order is stable. Unreadable entries are skipped.
pub fn discover<'a>(location: &'a Path, extension: &'a str) -> impl Iterator<Item = String> + 'a {
    WalkDir::new(location)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| template_name(location, entry.path(), extension))
}

fn template_name(location: &Path, path: &Path, extension: &str) -> Option<String> {
    let relative = path.strip_prefix(location).ok()?.to_str()?;
    let name = prepare_pathname(relative.strip_suffix(extension)?);

    (!name.is_empty()).then_some(name)
}
