// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to a short plain-language message with a
// concrete suggestion. The severity drives how the front end presents it.

use crate::error::ChromaError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk hiccup or similar; trying again may work.
    Transient,
    /// The user must change their input (pick another file, fix the order).
    ActionRequired,
    /// The input can never be processed as-is.
    Permanent,
}

/// A human-readable error with a message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether repeating the same request could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.message, self.suggestion)
    }
}

/// Convert a `ChromaError` into a `HumanError`.
pub fn humanize_error(err: &ChromaError) -> HumanError {
    match err {
        ChromaError::InvalidOrderSpec(spec) => HumanError {
            message: "That channel order isn't valid.".into(),
            suggestion: format!(
                "Use each of the letters R, G and B exactly once, for example BGR. (Got: {spec})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ChromaError::EmptyImage => HumanError {
            message: "The image is empty.".into(),
            suggestion: "Choose an image that is at least one pixel wide and tall.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        ChromaError::UnsupportedChannelCount(count) => HumanError {
            message: "This image's colour layout isn't supported.".into(),
            suggestion: format!(
                "Save the image as an ordinary RGB or grayscale file and try again. ({count} channels)"
            ),
            retriable: false,
            severity: Severity::Permanent,
        },

        ChromaError::ImageError(detail) => HumanError {
            message: "We couldn't read or write the image.".into(),
            suggestion: format!("Check that the file is a valid JPG or PNG image. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        ChromaError::Chart(detail) => HumanError {
            message: "We couldn't draw the charts.".into(),
            suggestion: format!("Check the chart size in your settings. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ChromaError::UnsupportedUpload(detail) => HumanError {
            message: "Only images can be uploaded.".into(),
            suggestion: format!("Choose a JPG or PNG file. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ChromaError::UploadTooLarge { size, limit } => HumanError {
            message: "The image is too large.".into(),
            suggestion: format!(
                "Choose a file smaller than {:.1} MB. (This one is {:.1} MB.)",
                megabytes(*limit),
                megabytes(*size)
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ChromaError::InvalidFilename(name) => HumanError {
            message: "The file name can't be used.".into(),
            suggestion: format!("Rename the file using letters and numbers, then try again. ({name})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ChromaError::Config(detail) => HumanError {
            message: "The settings file has a problem.".into(),
            suggestion: format!("Fix or delete the settings file to use the defaults. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ChromaError::Io(io) => HumanError {
            message: "A file couldn't be read or saved.".into(),
            suggestion: format!("Check there is free disk space and the folder is writable, then try again. ({io})"),
            retriable: true,
            severity: Severity::Transient,
        },

        ChromaError::Serialization(detail) => HumanError {
            message: "The results couldn't be saved.".into(),
            suggestion: format!("Try again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
