// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Client-supplied file names are never trusted. They are reduced to letters,
// digits and `._-` before being recorded, and only their extension decides
// where and how an upload is stored.

use chromaswap_core::error::{ChromaError, Result};

/// Reduce a client-supplied file name to letters, digits and `._-`.
///
/// Directory components are discarded, whitespace becomes `_`, other
/// characters are dropped, and leading dots are stripped so the result can
/// never be hidden or climb out of the upload directory. Non-ASCII letters
/// are kept; the name is only recorded, never used as a path.
pub fn sanitize_filename(name: &str) -> Result<String> {
    let cleaned: String = base_name(name)
        .chars()
        .filter_map(|c| match c {
            c if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches(['.', '_']);

    if cleaned.is_empty() {
        return Err(ChromaError::InvalidFilename(name.to_owned()));
    }
    Ok(cleaned.to_owned())
}

/// Lowercase extension of a client-supplied name, if it has a plain ASCII one.
///
/// Works on the raw name so that a stem in any script still yields its
/// extension (`фото.JPG` -> `jpg`).
pub fn extension(name: &str) -> Option<String> {
    let (stem, ext) = base_name(name).rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Last path component, splitting on both separator styles.
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Whether `name` is a single plain path component.
pub(crate) fn is_plain_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_ordinary_names() {
        assert_eq!(sanitize_filename("holiday-01.JPG").unwrap(), "holiday-01.JPG");
    }

    #[test]
    fn strips_directories_and_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\cat.png").unwrap(), "cat.png");
    }

    #[test]
    fn replaces_whitespace_and_drops_the_rest() {
        assert_eq!(sanitize_filename("my cat (1).png").unwrap(), "my_cat_1.png");
        assert_eq!(sanitize_filename("фото 2.jpg").unwrap(), "фото_2.jpg");
        assert_eq!(sanitize_filename("a<b>|c?.png").unwrap(), "abc.png");
    }

    #[test]
    fn hidden_names_lose_their_dots() {
        assert_eq!(sanitize_filename(".bashrc").unwrap(), "bashrc");
    }

    #[test]
    fn nothing_left_is_an_error() {
        for name in ["", "...", "///", "★☆"] {
            match sanitize_filename(name) {
                Err(ChromaError::InvalidFilename(n)) => assert_eq!(n, name),
                other => panic!("expected InvalidFilename for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension("a.PNG").as_deref(), Some("png"));
        assert_eq!(extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension("trailing."), None);
        assert_eq!(extension(".hidden"), None);
    }

    #[test]
    fn extension_survives_non_ascii_stems() {
        assert_eq!(extension("фото.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension("uploads/снимок.png").as_deref(), Some("png"));
        assert_eq!(extension("kitten.пнг"), None);
        assert_eq!(extension("dir.d/noext"), None);
    }

    #[test]
    fn plain_components() {
        assert!(is_plain_component("abc.png"));
        assert!(!is_plain_component("../abc.png"));
        assert!(!is_plain_component("a/b"));
        assert!(!is_plain_component(".."));
    }
}
