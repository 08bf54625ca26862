//! Managed storage for recipe photos.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::trace_span;

use crate::database::models::photo::Photo;
use crate::error::{Error, Result};

/// Copies photo files into a managed directory under collision-avoiding
/// names. A failed import is a non-fatal error: the caller reports it
/// and keeps the recipe's existing photo reference.
pub struct PhotoStore {
    directory: PathBuf,
}

impl PhotoStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Copies `source` into the managed directory and returns the new
    /// photo reference.
    pub fn import(&self, source: &Path) -> Result<Photo> {
        let span = trace_span!("import photo");
        let _guard = span.enter();

        let file_name = source
            .file_name()
            .ok_or_else(|| Error::Validation(format!("not a file: {}", source.display())))?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let target = self
            .directory
            .join(format!("{}_{}", millis, file_name.to_string_lossy()));

        fs::create_dir_all(&self.directory)?;
        fs::copy(source, &target)?;

        Ok(Photo::new(target.to_string_lossy().into_owned()))
    }
}
