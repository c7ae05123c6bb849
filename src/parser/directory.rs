use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A regular file whose name ends in `.json`; a file named exactly `.json` counts
pub fn is_json_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(".json"))
}

/// Find JSON files in a directory. If recursive is true, use walkdir; otherwise list files.
///
/// Filesystem listing order is platform dependent, so callers that need
/// reproducible reports should ask for `sorted` output.
pub fn find_json_files(
    dir: &Path,
    recursive: bool,
    sorted: bool,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut json_files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            let path = entry.path();
            if is_json_file(path) {
                json_files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if is_json_file(&path) {
                json_files.push(path);
            }
        }
    }

    if sorted {
        json_files.sort();
    }

    Ok(json_files)
}
