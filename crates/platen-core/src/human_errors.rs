// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the scan workflow.
//
// Every technical error is mapped to plain English with a clear suggestion,
// since the person at the scanner is rarely the person reading logs.

use crate::error::PlatenError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth trying again: glass smudge, paper shifted, device hiccup.
    Transient,
    /// The operator must do something (fix the form, free the scanner).
    ActionRequired,
    /// Cannot be fixed by retrying: disk full, folder unwritable.
    Permanent,
}

/// A plain-English message plus an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Summary shown as a heading.
    pub message: String,
    /// What the operator should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `PlatenError` into something a cook can act on.
pub fn humanize_error(err: &PlatenError) -> HumanError {
    match err {
        PlatenError::DeviceUnavailable(detail) => HumanError {
            message: "We couldn't reach the scanner.".into(),
            suggestion: format!(
                "Check that the scanner is plugged in and switched on, then try again. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        PlatenError::Capture(detail) => HumanError {
            message: "Scanning this page didn't work.".into(),
            suggestion: format!(
                "Make sure the sheet lies flat on the glass and scan it again. ({detail})"
            ),
            severity: Severity::Transient,
        },

        PlatenError::ImageRead(detail) => HumanError {
            message: "A scanned page could not be read back.".into(),
            suggestion: format!("Scan the recipe again from the start. ({detail})"),
            severity: Severity::Transient,
        },

        PlatenError::PdfWrite(detail) => HumanError {
            message: "The recipe PDF could not be saved.".into(),
            suggestion: format!(
                "Check that the recipe folder is writable and has free space. ({detail})"
            ),
            severity: Severity::Permanent,
        },

        PlatenError::Validation(detail) => HumanError {
            message: "The recipe form is incomplete.".into(),
            suggestion: format!("Please enter both a recipe name and a type. ({detail})"),
            severity: Severity::ActionRequired,
        },

        PlatenError::Io(detail) => HumanError {
            message: "A file operation failed.".into(),
            suggestion: format!("Check the recipe folder and try again. ({detail})"),
            severity: Severity::Permanent,
        },

        PlatenError::Serialization(detail) => HumanError {
            message: "Saved settings could not be read or written.".into(),
            suggestion: format!(
                "Your recipes are safe; the remembered folder may be forgotten. ({detail})"
            ),
            severity: Severity::Transient,
        },
    }
}
