// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Platen.

use thiserror::Error;

/// Top-level error type for all Platen operations.
#[derive(Debug, Error)]
pub enum PlatenError {
    // -- Device errors --
    #[error("no scanner available: {0}")]
    DeviceUnavailable(String),

    #[error("page capture failed: {0}")]
    Capture(String),

    // -- Document errors --
    #[error("cannot read page image: {0}")]
    ImageRead(String),

    #[error("cannot write PDF: {0}")]
    PdfWrite(String),

    // -- Session errors --
    #[error("invalid recipe form: {0}")]
    Validation(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PlatenError>;
