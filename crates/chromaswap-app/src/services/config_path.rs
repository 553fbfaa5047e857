// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware configuration file resolution.

use std::path::PathBuf;

const CONFIG_FILE: &str = "config.json";

/// Default location of the settings file.
///
/// `$XDG_CONFIG_HOME/chromaswap/config.json`, falling back to
/// `$HOME/.config/chromaswap/config.json`, then the working directory.
pub fn default_config_path() -> PathBuf {
    config_base().join("chromaswap").join(CONFIG_FILE)
}

fn config_base() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config");
    }
    // Last resort
    PathBuf::from(".")
}
