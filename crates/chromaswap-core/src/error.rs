// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Chromaswap.

use thiserror::Error;

/// Top-level error type for all Chromaswap operations.
#[derive(Debug, Error)]
pub enum ChromaError {
    // -- Input validation --
    #[error("invalid channel order {0:?}: expected a permutation of R, G and B")]
    InvalidOrderSpec(String),

    #[error("image has zero width or height")]
    EmptyImage,

    #[error("unsupported channel count: {0} (expected 1, 3 or 4)")]
    UnsupportedChannelCount(u8),

    // -- Codec --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    // -- Uploads --
    #[error("unsupported upload: {0}")]
    UnsupportedUpload(String),

    #[error("upload too large: {size} bytes exceeds the {limit} byte limit")]
    UploadTooLarge { size: u64, limit: u64 },

    #[error("invalid file name: {0:?}")]
    InvalidFilename(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ChromaError>;
