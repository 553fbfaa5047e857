// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// chromaswap-storage: Transient storage for uploaded images and everything
// derived from them (processed image, charts, reports).
//
// Uploads are validated against the configured allow-list and size limit,
// then written under a fresh random name so concurrent uploads of files with
// the same name never collide.

pub mod filename;
pub mod upload;

pub use filename::sanitize_filename;
pub use upload::{StoredUpload, UploadStore};
