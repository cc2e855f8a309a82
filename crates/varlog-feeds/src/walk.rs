//! Deterministic directory walk.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One walk result: a regular file, or an entry the walk could not enter.
#[derive(Debug)]
pub enum WalkEntry {
    File(PathBuf),
    Failed { path: PathBuf, error: walkdir::Error },
}

/// Every regular file under `root`, depth first, sorted by file name within
/// each directory. Symlinks are not followed. A `root` that is itself a
/// file yields just that file.
pub fn walk(root: &Path) -> impl Iterator<Item = WalkEntry> {
    let root = root.to_path_buf();
    WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(WalkEntry::File(entry.into_path())),
            Ok(_) => None,
            Err(error) => {
                let path = error.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                Some(WalkEntry::Failed { path, error })
            }
        })
}
