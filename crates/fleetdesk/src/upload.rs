//! File upload capability.
//!
//! Forms never talk to an upload provider directly; they are handed a
//! [`FileUploader`] and store whatever [`FileRef`] it returns.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::form::FileRef;

/// Something that can store file bytes and hand back a URL.
pub trait FileUploader: fmt::Debug + Send + Sync {
    /// Store `bytes` and return a reference to the stored file.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is rejected or cannot be stored.
    fn upload_file(&self, file_name: &str, bytes: &[u8]) -> Result<FileRef>;
}

/// Content-addressed uploader writing into a local directory.
///
/// Files are named by the BLAKE3 hash of their contents, so uploading the
/// same bytes twice yields the same reference and a single file.
#[derive(Debug, Clone)]
pub struct LocalUploader {
    directory: PathBuf,
    max_file_bytes: usize,
}

impl LocalUploader {
    /// Create an uploader writing into `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, max_file_bytes: usize) -> Self {
        Self {
            directory: directory.into(),
            max_file_bytes,
        }
    }

    /// Directory files are written to.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Compute the stored file name for `bytes` uploaded as `file_name`.
    #[must_use]
    pub fn stored_name(file_name: &str, bytes: &[u8]) -> String {
        let hash = blake3::hash(bytes).to_hex();
        match Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
        {
            Some(ext) => format!("{hash}.{}", ext.to_ascii_lowercase()),
            None => hash.to_string(),
        }
    }

    fn ensure_directory(&self) -> Result<()> {
        if !self.directory.exists() {
            std::fs::create_dir_all(&self.directory).map_err(|source| Error::DirectoryCreate {
                path: self.directory.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl FileUploader for LocalUploader {
    fn upload_file(&self, file_name: &str, bytes: &[u8]) -> Result<FileRef> {
        if bytes.is_empty() {
            return Err(Error::UploadEmpty {
                name: file_name.to_string(),
            });
        }
        if bytes.len() > self.max_file_bytes {
            return Err(Error::UploadTooLarge {
                name: file_name.to_string(),
                size: bytes.len(),
                limit: self.max_file_bytes,
            });
        }

        self.ensure_directory()?;
        let path = self.directory.join(Self::stored_name(file_name, bytes));
        if path.exists() {
            debug!("Skipping duplicate upload of {}", file_name);
        } else {
            std::fs::write(&path, bytes)?;
            info!("Stored upload {} as {}", file_name, path.display());
        }

        let absolute = std::fs::canonicalize(&path).unwrap_or(path);
        Ok(FileRef::new(format!("file://{}", absolute.display())))
    }
}
