// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page capture pipeline — acquire one page from the scanner, normalize it to
// a fixed pixel width, and persist it as a JPEG temp file.

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use platen_core::error::{PlatenError, Result};
use platen_core::types::{CapturedPage, PageSide};
use platen_scanner::traits::SourceManager;
use tracing::{debug, info, instrument, warn};

/// Every captured page is normalized to exactly this pixel width, so pages
/// scanned at different device resolutions render at the same size.
pub const TARGET_WIDTH_PX: u32 = 600;

/// Drives one scanner source and turns raw transfers into normalized JPEGs.
///
/// The source is opened per capture and closed before control returns, even
/// when the transfer fails. The device is never held across an operator
/// decision.
pub struct PageCapturer<'a> {
    manager: &'a dyn SourceManager,
    source_name: String,
}

impl<'a> PageCapturer<'a> {
    /// Capture through `manager`, opening the source named `source_name`
    /// for each page.
    pub fn new(manager: &'a dyn SourceManager, source_name: impl Into<String>) -> Self {
        Self {
            manager,
            source_name: source_name.into(),
        }
    }

    /// Acquire one page and write it to `destination`, overwriting any
    /// previous attempt at that path.
    ///
    /// The raw transfer arrives as uncompressed BMP bytes; the pipeline
    /// decodes it, scales by `600.0 / width` with Lanczos3 (preserving
    /// aspect ratio), converts to RGB, and encodes as JPEG.
    #[instrument(skip(self), fields(source = %self.source_name, side = %side, dest = %destination.display()))]
    pub fn capture(&self, side: PageSide, destination: &Path) -> Result<CapturedPage> {
        let mut source = self.manager.open_source(&self.source_name)?;

        // Close the handle before looking at the transfer result, so the
        // device is released on the failure path too.
        let acquired = source.acquire_page();
        if let Err(err) = source.close() {
            warn!(%err, "scanner source did not close cleanly");
        }
        let bmp_bytes = acquired?;

        debug!(bytes = bmp_bytes.len(), "raw page transferred");
        let raw = image::load_from_memory_with_format(&bmp_bytes, ImageFormat::Bmp)
            .map_err(|err| PlatenError::Capture(format!("cannot decode transfer: {err}")))?;

        let normalized = normalize_width(&raw);
        let (width_px, height_px) = (normalized.width(), normalized.height());

        normalized
            .save_with_format(destination, ImageFormat::Jpeg)
            .map_err(|err| {
                PlatenError::Capture(format!(
                    "cannot write {}: {err}",
                    destination.display()
                ))
            })?;

        info!(width_px, height_px, "page captured");
        Ok(CapturedPage {
            side,
            width_px,
            height_px,
            path: destination.to_path_buf(),
        })
    }
}

/// Scale to exactly [`TARGET_WIDTH_PX`] wide, preserving aspect ratio, and
/// flatten to 3-channel RGB for JPEG encoding.
fn normalize_width(raw: &DynamicImage) -> DynamicImage {
    let factor = f64::from(TARGET_WIDTH_PX) / f64::from(raw.width());
    let height = ((f64::from(raw.height()) * factor) as u32).max(1);
    debug!(
        from_w = raw.width(),
        from_h = raw.height(),
        factor,
        to_h = height,
        "normalizing page width"
    );

    let resized = raw.resize_exact(
        TARGET_WIDTH_PX,
        height,
        image::imageops::FilterType::Lanczos3,
    );
    DynamicImage::ImageRgb8(resized.to_rgb8())
}
