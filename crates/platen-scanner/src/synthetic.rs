// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic scanner backend — renders BMP pages in memory.
//
// Used by the test suite and as the app's built-in backend, so the whole
// workflow can run without hardware. Real backends live behind the same
// traits.

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use image::{ImageFormat, Rgb, RgbImage};
use platen_core::error::{PlatenError, Result};
use tracing::{debug, warn};

use crate::traits::{ScanSource, SourceInfo, SourceManager};

/// Name under which the synthetic source registers itself.
pub const SOURCE_NAME: &str = "platen-synthetic";

/// A hardware-free `SourceManager` that serves pre-configured page sizes.
///
/// Each `acquire_page` call consumes the next size from the list; once the
/// list is exhausted the last size repeats, so retry loops keep working.
pub struct SyntheticScanner {
    pages: Arc<Mutex<PageFeed>>,
}

struct PageFeed {
    sizes: Vec<(u32, u32)>,
    next: usize,
    fail_acquire: bool,
}

impl SyntheticScanner {
    /// Serve pages of the given pixel sizes, in order.
    pub fn new(sizes: Vec<(u32, u32)>) -> Self {
        assert!(!sizes.is_empty(), "synthetic scanner needs at least one page size");
        Self {
            pages: Arc::new(Mutex::new(PageFeed {
                sizes,
                next: 0,
                fail_acquire: false,
            })),
        }
    }

    /// Serve letter-ish pages simulating a 300 DPI scan (2550x3300 px).
    pub fn letter() -> Self {
        Self::new(vec![(2550, 3300)])
    }

    /// A scanner whose every acquisition fails with a transfer error.
    pub fn failing() -> Self {
        let scanner = Self::new(vec![(600, 800)]);
        if let Ok(mut feed) = scanner.pages.lock() {
            feed.fail_acquire = true;
        }
        scanner
    }
}

impl SourceManager for SyntheticScanner {
    fn sources(&self) -> Result<Vec<SourceInfo>> {
        Ok(vec![SourceInfo {
            name: SOURCE_NAME.to_string(),
            description: Some("Synthetic test scanner (no hardware)".to_string()),
        }])
    }

    fn open_source(&self, name: &str) -> Result<Box<dyn ScanSource>> {
        if name != SOURCE_NAME {
            return Err(PlatenError::DeviceUnavailable(format!(
                "unknown source '{name}'"
            )));
        }
        debug!(name, "synthetic source opened");
        Ok(Box::new(SyntheticSource {
            name: name.to_string(),
            pages: Arc::clone(&self.pages),
            open: true,
        }))
    }
}

struct SyntheticSource {
    name: String,
    pages: Arc<Mutex<PageFeed>>,
    open: bool,
}

impl ScanSource for SyntheticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn acquire_page(&mut self) -> Result<Vec<u8>> {
        if !self.open {
            return Err(PlatenError::DeviceUnavailable("source is closed".into()));
        }

        let (width, height) = {
            let mut feed = self
                .pages
                .lock()
                .map_err(|_| PlatenError::DeviceUnavailable("page feed poisoned".into()))?;
            if feed.fail_acquire {
                return Err(PlatenError::Capture("simulated transfer failure".into()));
            }
            let idx = feed.next.min(feed.sizes.len() - 1);
            feed.next += 1;
            feed.sizes[idx]
        };

        debug!(width, height, "rendering synthetic page");
        render_page_bmp(width, height)
    }

    fn close(&mut self) -> Result<()> {
        if self.open {
            self.open = false;
            debug!(name = %self.name, "synthetic source closed");
        }
        Ok(())
    }
}

impl Drop for SyntheticSource {
    fn drop(&mut self) {
        if self.open {
            warn!(name = %self.name, "synthetic source dropped without close");
            self.open = false;
        }
    }
}

/// Render a light page with a darker ruled pattern, encoded as BMP, the
/// same uncompressed format a native transfer hands over.
fn render_page_bmp(width: u32, height: u32) -> Result<Vec<u8>> {
    let img = RgbImage::from_fn(width, height, |_, y| {
        if y % 64 < 2 {
            Rgb([120u8, 120, 160])
        } else {
            Rgb([245u8, 245, 240])
        }
    });

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Bmp)
        .map_err(|err| PlatenError::Capture(format!("BMP encode: {err}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_one_source() {
        let scanner = SyntheticScanner::letter();
        let sources = scanner.sources().expect("sources");
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, SOURCE_NAME);
    }

    #[test]
    fn unknown_source_name_is_rejected() {
        let scanner = SyntheticScanner::letter();
        assert!(matches!(
            scanner.open_source("flatbed-9000"),
            Err(PlatenError::DeviceUnavailable(_))
        ));
    }

    #[test]
    fn acquired_page_is_decodable_bmp_with_requested_size() {
        let scanner = SyntheticScanner::new(vec![(1200, 900)]);
        let mut source = scanner.open_source(SOURCE_NAME).expect("open");
        let bytes = source.acquire_page().expect("acquire");
        source.close().expect("close");

        let img = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp)
            .expect("decode BMP");
        assert_eq!((img.width(), img.height()), (1200, 900));
    }

    #[test]
    fn page_sizes_are_served_in_order_then_repeat() {
        let scanner = SyntheticScanner::new(vec![(600, 800), (600, 900)]);
        let mut source = scanner.open_source(SOURCE_NAME).expect("open");

        for expected in [(600, 800), (600, 900), (600, 900)] {
            let bytes = source.acquire_page().expect("acquire");
            let img = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp)
                .expect("decode");
            assert_eq!((img.width(), img.height()), expected);
        }
        source.close().expect("close");
    }

    #[test]
    fn closed_source_refuses_to_acquire() {
        let scanner = SyntheticScanner::letter();
        let mut source = scanner.open_source(SOURCE_NAME).expect("open");
        source.close().expect("close");
        source.close().expect("close is idempotent");
        assert!(source.acquire_page().is_err());
    }

    #[test]
    fn failing_scanner_reports_capture_error() {
        let scanner = SyntheticScanner::failing();
        let mut source = scanner.open_source(SOURCE_NAME).expect("open");
        assert!(matches!(
            source.acquire_page(),
            Err(PlatenError::Capture(_))
        ));
        source.close().expect("close");
    }
}
