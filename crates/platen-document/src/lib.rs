// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// platen-document — Document processing for the Platen recipe scanner.
//
// Provides the page capture pipeline (acquire, normalize to a fixed pixel
// width, persist as JPEG), multi-page PDF assembly with uniform max-geometry
// pages, collision-free output naming, and temp-file cleanup.

pub mod assemble;
pub mod capture;
pub mod cleanup;
pub mod naming;

pub use assemble::{PageGeometry, PdfAssembler};
pub use capture::PageCapturer;
pub use cleanup::cleanup;
pub use naming::resolve_output_path;
