// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload store: A flat directory of uploaded originals and their artifacts.
//
// Layout:
//   <upload_dir>/
//     <id>.<ext>                 original upload
//     processed_<id>.<ext>       derived image (prefix form)
//     <id>_<suffix>              charts, reports (suffix form)
//
// `<id>` is a v4 UUID in simple (32 hex digit) form.

use std::path::{Path, PathBuf};

use chromaswap_core::config::AppConfig;
use chromaswap_core::error::{ChromaError, Result};
use chromaswap_core::types::ImageKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::filename::{extension, is_plain_component, sanitize_filename};

/// A validated upload that has been written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUpload {
    /// Sanitised name the client sent.
    pub original_name: String,
    /// Name on disk, `<id>.<ext>`.
    pub stored_name: String,
    pub kind: ImageKind,
    pub size: u64,
}

impl StoredUpload {
    /// Name without the extension; shared by every artifact of this upload.
    pub fn stem(&self) -> &str {
        self.stored_name
            .rsplit_once('.')
            .map_or(self.stored_name.as_str(), |(stem, _)| stem)
    }
}

/// Directory-backed store for uploads and derived files.
pub struct UploadStore {
    config: AppConfig,
}

impl UploadStore {
    /// Open the store described by `config`, creating the directory if needed.
    #[instrument(skip_all, fields(path = %config.upload_dir.display()))]
    pub fn open(config: &AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.upload_dir)?;
        info!(
            max_bytes = config.max_upload_bytes,
            allowed = ?config.allowed_extensions,
            "Upload store ready"
        );
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.config.upload_dir
    }

    /// Largest accepted upload, in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.config.max_upload_bytes
    }

    /// Check an upload's name and size without writing anything.
    ///
    /// Only the extension of `filename` matters here; the rest of the name
    /// may be in any script.
    pub fn validate(&self, filename: &str, len: u64) -> Result<ImageKind> {
        let ext = extension(filename).ok_or_else(|| {
            ChromaError::UnsupportedUpload(format!("{filename} has no extension"))
        })?;

        if !self.config.allows_extension(&ext) {
            return Err(ChromaError::UnsupportedUpload(format!(
                ".{ext} is not one of {}",
                self.config.allowed_extensions.join(", ")
            )));
        }
        let kind = ImageKind::from_extension(&ext).ok_or_else(|| {
            ChromaError::UnsupportedUpload(format!(".{ext} is not an image format"))
        })?;

        if len > self.max_bytes() {
            return Err(ChromaError::UploadTooLarge {
                size: len,
                limit: self.max_bytes(),
            });
        }
        Ok(kind)
    }

    /// Validate and write an upload under a fresh unique name.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn store_original(&self, filename: &str, bytes: &[u8]) -> Result<StoredUpload> {
        let len = bytes.len() as u64;
        let kind = self.validate(filename, len).inspect_err(|err| {
            warn!(error = %err, "Upload rejected");
        })?;

        let ext = extension(filename).unwrap_or_else(|| kind.extension().to_owned());
        let original_name =
            sanitize_filename(filename).unwrap_or_else(|_| format!("upload.{ext}"));
        let stored_name = format!("{}.{}", Uuid::new_v4().simple(), ext);

        std::fs::write(self.root().join(&stored_name), bytes)?;
        info!(stored_name = %stored_name, kind = kind.mime_type(), "Upload stored");

        Ok(StoredUpload {
            original_name,
            stored_name,
            kind,
            size: len,
        })
    }

    /// Write a derived image as `<prefix>_<stored_name>`.
    pub fn store_derived(
        &self,
        upload: &StoredUpload,
        prefix: &str,
        bytes: &[u8],
    ) -> Result<PathBuf> {
        self.write_named(format!("{prefix}_{}", upload.stored_name), bytes)
    }

    /// Write an artifact as `<stem>_<suffix>`, e.g. `<id>_histogram.png`.
    pub fn store_artifact(
        &self,
        upload: &StoredUpload,
        suffix: &str,
        bytes: &[u8],
    ) -> Result<PathBuf> {
        self.write_named(format!("{}_{suffix}", upload.stem()), bytes)
    }

    /// Resolve a stored name to its path. Names that are not a single plain
    /// path component are rejected.
    pub fn path_of(&self, name: &str) -> Result<PathBuf> {
        if !is_plain_component(name) {
            return Err(ChromaError::InvalidFilename(name.to_owned()));
        }
        Ok(self.root().join(name))
    }

    /// Read a stored file back.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        Ok(std::fs::read(self.path_of(name)?)?)
    }

    /// Delete the original and every file derived from it.
    #[instrument(skip_all, fields(stored_name = %upload.stored_name))]
    pub fn remove(&self, upload: &StoredUpload) -> Result<usize> {
        let stem = upload.stem();
        let mut removed = 0;
        for entry in std::fs::read_dir(self.root())? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if belongs_to(name, stem) {
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        debug!(removed, "Upload removed");
        Ok(removed)
    }

    fn write_named(&self, name: String, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_of(&name)?;
        std::fs::write(&path, bytes)?;
        debug!(name = %name, len = bytes.len(), "Artifact stored");
        Ok(path)
    }
}

/// `<stem>.<ext>`, `<stem>_<suffix>` or `<prefix>_<stem>.<ext>`.
fn belongs_to(name: &str, stem: &str) -> bool {
    name.strip_prefix(stem)
        .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('_'))
        || name
            .split_once('_')
            .is_some_and(|(_, rest)| rest.strip_prefix(stem).is_some_and(|r| r.starts_with('.')))
}
