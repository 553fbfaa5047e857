// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use chromaswap_core::config::AppConfig;
use chromaswap_core::types::{ChannelOrder, ProfileMode};

#[derive(Debug, Parser)]
#[command(name = "chromaswap", version, about = "Reorder RGB channels and chart image statistics")]
pub struct Cli {
    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the upload directory from the settings file.
    #[arg(long, global = true)]
    pub upload_dir: Option<PathBuf>,

    /// Which row/column profile contract to compute and plot.
    #[arg(long, global = true, value_enum)]
    pub profile_mode: Option<ProfileArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an image, reorder its channels, and write charts and a report.
    Process {
        /// Image to process (jpg, jpeg or png by default).
        input: PathBuf,
        /// Target channel order, e.g. BGR.
        #[arg(short, long, default_value = "RGB")]
        order: ChannelOrder,
    },
    /// Print histogram and profile statistics as JSON.
    Stats {
        input: PathBuf,
    },
    /// List the available channel orders.
    Orders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Collapsed,
    PerChannel,
}

impl From<ProfileArg> for ProfileMode {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Collapsed => ProfileMode::Collapsed,
            ProfileArg::PerChannel => ProfileMode::PerChannel,
        }
    }
}

impl Cli {
    /// Apply command-line overrides on top of the loaded settings.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.upload_dir {
            config.upload_dir = dir.clone();
        }
        if let Some(mode) = self.profile_mode {
            config.profile_mode = mode.into();
        }
    }
}
