// main.rs
mod converter;
mod utils;

use std::path::{Path, PathBuf};

fn main() {
    let dir = executable_dir();
    // Individual conversion failures are handled per file; only a failure to
    // read the directory itself lands here. The exit code stays 0 either way.
    if let Err(e) = converter::run(&dir) {
        eprintln!("Failed to read {}: {}", dir.display(), e);
    }
}

fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
