use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// A downloaded media file that is deleted when the handle goes out of scope.
#[derive(Debug)]
pub struct LocalMedia {
    path: PathBuf,
}

impl LocalMedia {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LocalMedia {
    fn drop(&mut self) {
        // A single unlink; runs inline on whichever thread drops the handle.
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed local file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove local file"
            ),
        }
    }
}
