// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF assembly — place captured page images on uniform, max-geometry pages
// using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use platen_core::error::{PlatenError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Physical sizing assumes every page image was scanned at this resolution.
/// If capture resolution ever becomes configurable this is the one constant
/// to revisit.
pub const ASSUMED_DPI: f64 = 300.0;

const MM_PER_INCH: f64 = 25.4;

/// Pixel count to millimetres at [`ASSUMED_DPI`].
pub fn px_to_mm(px: u32) -> f64 {
    f64::from(px) * MM_PER_INCH / ASSUMED_DPI
}

/// The uniform page size for one assembled document: the maximum pixel
/// width and height across all input images, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageGeometry {
    /// Compute the common geometry from the pixel sizes of all pages.
    /// Returns `None` for an empty input.
    pub fn from_pixel_sizes(sizes: &[(u32, u32)]) -> Option<Self> {
        let max_w = sizes.iter().map(|(w, _)| *w).max()?;
        let max_h = sizes.iter().map(|(_, h)| *h).max()?;
        Some(Self {
            width_mm: px_to_mm(max_w),
            height_mm: px_to_mm(max_h),
        })
    }

    /// Offsets in millimetres that centre an image of the given pixel size
    /// on a page of this geometry.
    pub fn placement(&self, width_px: u32, height_px: u32) -> (f64, f64) {
        let x = (self.width_mm - px_to_mm(width_px)) / 2.0;
        let y = (self.height_mm - px_to_mm(height_px)) / 2.0;
        (x, y)
    }
}

/// Assembles an ordered list of page images into one multi-page PDF.
///
/// Every page of the output shares the max geometry of the inputs, and each
/// image is centred at its own unscaled 300 DPI size. The capture pipeline
/// already fixed the rendered width; assembly only positions.
pub struct PdfAssembler {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfAssembler {
    pub fn new() -> Self {
        Self { title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the PDF from `images` (front first, back second if present)
    /// and write it to `output_path`.
    ///
    /// Fails with `ImageRead` if any input cannot be opened and `PdfWrite`
    /// if the output cannot be written. The output page count always equals
    /// the input image count, in input order.
    #[instrument(skip(self, images), fields(pages = images.len(), out = %output_path.display()))]
    pub fn assemble<P: AsRef<Path>>(&self, images: &[P], output_path: &Path) -> Result<()> {
        let bytes = self.assemble_to_bytes(images)?;
        std::fs::write(output_path, &bytes).map_err(|err| {
            PlatenError::PdfWrite(format!("cannot write {}: {err}", output_path.display()))
        })?;
        info!(bytes = bytes.len(), "PDF written");
        Ok(())
    }

    /// Build the PDF in memory.
    pub fn assemble_to_bytes<P: AsRef<Path>>(&self, images: &[P]) -> Result<Vec<u8>> {
        let mut loaded = Vec::with_capacity(images.len());
        for path in images {
            let path = path.as_ref();
            let img = image::open(path).map_err(|err| {
                PlatenError::ImageRead(format!("cannot open {}: {err}", path.display()))
            })?;
            loaded.push(img);
        }

        let sizes: Vec<(u32, u32)> = loaded.iter().map(|i| (i.width(), i.height())).collect();
        let geometry = PageGeometry::from_pixel_sizes(&sizes)
            .ok_or_else(|| PlatenError::PdfWrite("no page images to assemble".into()))?;

        debug!(
            width_mm = geometry.width_mm,
            height_mm = geometry.height_mm,
            "uniform page geometry computed"
        );

        let title = self.title.as_deref().unwrap_or("Scanned Recipe");
        let mut doc = PdfDocument::new(title);

        let page_w = Mm(geometry.width_mm as f32);
        let page_h = Mm(geometry.height_mm as f32);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(loaded.len());

        for (img, (width_px, height_px)) in loaded.into_iter().zip(sizes) {
            let rgb = img.to_rgb8();
            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: width_px as usize,
                height: height_px as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let (x_mm, y_mm) = geometry.placement(width_px, height_px);
            debug!(width_px, height_px, x_mm, y_mm, "placing page image");

            // At dpi = ASSUMED_DPI and no scale factors, the XObject renders
            // at exactly px * 25.4 / 300 mm: positioned, never resized.
            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(mm_to_pt(x_mm)),
                    translate_y: Some(mm_to_pt(y_mm)),
                    scale_x: None,
                    scale_y: None,
                    dpi: Some(ASSUMED_DPI as f32),
                    rotate: None,
                },
            }];

            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn mm_to_pt(mm: f64) -> Pt {
    Mm(mm as f32).into_pt()
}
