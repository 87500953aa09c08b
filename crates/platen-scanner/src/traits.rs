// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Backend-agnostic trait definitions for scanner access.
//
// The capability set is deliberately small: enumerate sources, open one by
// name, acquire a single page without the device's native UI, close. There
// is no paper handling, resolution negotiation, or colour configuration at
// this seam; the capture pipeline normalizes whatever the device delivers.

use platen_core::error::Result;

/// A scanner source as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Backend-unique name, used to open the source.
    pub name: String,
    /// Human-readable description, if the backend provides one.
    pub description: Option<String>,
}

/// Enumerates and opens scanner sources.
pub trait SourceManager {
    /// List the sources this backend can open.
    fn sources(&self) -> Result<Vec<SourceInfo>>;

    /// Open a source by name. The handle owns the device connection until
    /// [`ScanSource::close`] is called (or the handle is dropped).
    fn open_source(&self, name: &str) -> Result<Box<dyn ScanSource>>;
}

/// An open connection to one scanner source.
///
/// Callers acquire exactly one page per open handle and must close the
/// handle afterwards, even when the transfer failed. Implementations should
/// also release the device on drop as a safety net.
pub trait ScanSource {
    /// The name this source was opened under.
    fn name(&self) -> &str;

    /// Acquire one page without showing the device's native UI and transfer
    /// it as uncompressed BMP bytes.
    fn acquire_page(&mut self) -> Result<Vec<u8>>;

    /// Release the device connection. Idempotent.
    fn close(&mut self) -> Result<()>;
}
