// discovery.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn find_png_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    files_with_extension(dir, "png")
}

/// Sorted for the final listing; all entries share one parent directory, so
/// path order equals base-name order.
pub fn find_webp_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = files_with_extension(dir, "webp")?;
    files.sort();
    Ok(files)
}

// Non-recursive, extension match is exact like a `*.png` glob.
fn files_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == extension) {
            files.push(path);
        }
    }
    Ok(files)
}
