// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload-to-report pipeline.
//
//   validate + store upload -> decode + normalise -> reorder -> store processed
//   -> histograms (original, processed) + profiles (original) -> charts -> report
//
// Either every artifact is written or the upload and anything already derived
// from it is removed again.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, instrument, warn};

use chromaswap_core::config::AppConfig;
use chromaswap_core::error::{ChromaError, Result};
use chromaswap_core::types::{ChannelOrder, ProfileMode};
use chromaswap_image::{
    ChartLabels, ImageProcessor, channel_profile_chart, histogram_chart, profile_chart,
};
use chromaswap_storage::{StoredUpload, UploadStore};

use super::report::{ChartFiles, Profile, Profiles, ProcessReport, StatsReport};

/// Prefix of the reordered image's file name.
pub const PROCESSED_PREFIX: &str = "processed";

/// Result of a successful run.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub report: ProcessReport,
    pub report_path: PathBuf,
}

/// Process an image file from disk.
///
/// Files over the upload limit are rejected before they are read.
pub fn process_file(
    config: &AppConfig,
    input: &Path,
    order: ChannelOrder,
) -> Result<ProcessOutcome> {
    let filename = input
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ChromaError::InvalidFilename(input.display().to_string()))?;

    let len = std::fs::metadata(input)?.len();
    if len > config.max_upload_bytes {
        warn!(len, limit = config.max_upload_bytes, "Input exceeds upload limit");
        return Err(ChromaError::UploadTooLarge {
            size: len,
            limit: config.max_upload_bytes,
        });
    }
    let bytes = std::fs::read(input)?;
    process_upload(config, filename, &bytes, order)
}

/// Store an upload, reorder it, and write charts and a JSON report.
#[instrument(skip(config, bytes, order), fields(len = bytes.len(), order = %order))]
pub fn process_upload(
    config: &AppConfig,
    filename: &str,
    bytes: &[u8],
    order: ChannelOrder,
) -> Result<ProcessOutcome> {
    let store = UploadStore::open(config)?;
    let upload = store.store_original(filename, bytes)?;

    match derive_artifacts(config, &store, &upload, bytes, order) {
        Ok(outcome) => {
            info!(report = %outcome.report_path.display(), "Upload processed");
            Ok(outcome)
        }
        Err(err) => {
            warn!(
                error = %err,
                stored_name = %upload.stored_name,
                "Processing failed, discarding upload"
            );
            if let Err(cleanup) = store.remove(&upload) {
                warn!(error = %cleanup, "Could not discard upload");
            }
            Err(err)
        }
    }
}

/// Decode an image file and compute its statistics without storing anything.
pub fn image_stats(input: &Path, mode: ProfileMode) -> Result<StatsReport> {
    let image = ImageProcessor::open(input)?;
    StatsReport::compute(&image, mode)
}

fn derive_artifacts(
    config: &AppConfig,
    store: &UploadStore,
    upload: &StoredUpload,
    bytes: &[u8],
    order: ChannelOrder,
) -> Result<ProcessOutcome> {
    let original = ImageProcessor::from_bytes(bytes)?;
    let processed = ImageProcessor::from_rgb(original.as_rgb().clone()).reorder(order);

    let encoded = processed.encode(upload.kind, config.jpeg_quality)?;
    let processed_path = store.store_derived(upload, PROCESSED_PREFIX, &encoded)?;

    let histogram_original = original.histogram()?;
    let histogram_processed = processed.histogram()?;
    let profiles = Profiles::compute(&original, config.profile_mode)?;

    let charts = ChartFiles {
        histogram_original: write_chart(
            store,
            upload,
            "histogram_original.png",
            histogram_chart(
                &histogram_original,
                &ChartLabels::histogram("RGB histogram, original image"),
                &config.chart,
            )?,
        )?,
        histogram_processed: write_chart(
            store,
            upload,
            "histogram_processed.png",
            histogram_chart(
                &histogram_processed,
                &ChartLabels::histogram(format!("RGB histogram, channel order {order}")),
                &config.chart,
            )?,
        )?,
        row_profile: write_chart(
            store,
            upload,
            "row_profile.png",
            render_profile(&profiles.rows, &ChartLabels::row_profile(), config)?,
        )?,
        column_profile: write_chart(
            store,
            upload,
            "column_profile.png",
            render_profile(&profiles.columns, &ChartLabels::column_profile(), config)?,
        )?,
    };

    let report = ProcessReport {
        generated_at: Utc::now(),
        order,
        upload: upload.clone(),
        processed_image: file_name_of(&processed_path),
        width: original.width(),
        height: original.height(),
        charts,
        histogram_original,
        histogram_processed,
        profiles,
    };
    let json = serde_json::to_vec_pretty(&report)?;
    let report_path = store.store_artifact(upload, "report.json", &json)?;

    Ok(ProcessOutcome {
        report,
        report_path,
    })
}

fn render_profile(
    profile: &Profile,
    labels: &ChartLabels,
    config: &AppConfig,
) -> Result<Vec<u8>> {
    match profile {
        Profile::Collapsed(values) => profile_chart(values, labels, &config.chart),
        Profile::PerChannel(profiles) => channel_profile_chart(profiles, labels, &config.chart),
    }
}

fn write_chart(
    store: &UploadStore,
    upload: &StoredUpload,
    suffix: &str,
    png: Vec<u8>,
) -> Result<String> {
    let path = store.store_artifact(upload, suffix, &png)?;
    Ok(file_name_of(&path))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
