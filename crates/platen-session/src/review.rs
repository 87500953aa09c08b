// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page review loop — the per-side capture/preview/retry state machine.

use std::path::Path;

use platen_core::error::Result;
use platen_core::types::{CapturedPage, PageSide, ReviewDecision};
use platen_document::PageCapturer;
use tracing::{debug, info, instrument};

/// Operator decision points of a scan session.
///
/// The session suspends only at these boundaries; everything between them
/// runs without interaction.
pub trait SessionPrompter {
    /// Ask whether the operator is ready to scan the given side.
    /// Declining aborts the session.
    fn confirm_scan(&mut self, side: PageSide) -> bool;

    /// Present a captured page for inspection and return the verdict.
    fn review_page(&mut self, page: &CapturedPage) -> ReviewDecision;

    /// Ask the operator to flip the sheet before the back-side scan.
    /// Declining aborts the session before any back capture.
    fn confirm_flip(&mut self) -> bool;
}

/// States of the per-side review machine. A side always captures before any
/// accept/retry decision is offered, and a retry reuses the same temp path,
/// so abandoned attempts never accumulate.
#[derive(Debug)]
pub enum SideState {
    Idle,
    Capturing,
    PreviewShown(CapturedPage),
    Accepted(CapturedPage),
    Retrying,
    Aborted,
}

/// How one side's review loop ended.
#[derive(Debug)]
pub enum SideOutcome {
    /// The operator accepted this capture.
    Accepted(CapturedPage),
    /// The operator declined a prompt; the whole session must end.
    Aborted,
}

/// Run the review loop for one side, writing every attempt to `temp_path`.
///
/// Capture errors propagate to the caller; prompt declines and preview
/// aborts end the loop with [`SideOutcome::Aborted`].
#[instrument(skip(capturer, prompter), fields(side = %side, temp = %temp_path.display()))]
pub fn review_side(
    capturer: &PageCapturer<'_>,
    prompter: &mut dyn SessionPrompter,
    side: PageSide,
    temp_path: &Path,
) -> Result<SideOutcome> {
    let mut state = SideState::Idle;

    loop {
        state = match state {
            SideState::Idle | SideState::Retrying => {
                if prompter.confirm_scan(side) {
                    SideState::Capturing
                } else {
                    debug!("scan confirmation declined");
                    SideState::Aborted
                }
            }

            SideState::Capturing => {
                let page = capturer.capture(side, temp_path)?;
                SideState::PreviewShown(page)
            }

            SideState::PreviewShown(page) => match prompter.review_page(&page) {
                ReviewDecision::Accept => SideState::Accepted(page),
                ReviewDecision::Retry => {
                    debug!("operator requested rescan");
                    SideState::Retrying
                }
                ReviewDecision::Abort => SideState::Aborted,
            },

            SideState::Accepted(page) => {
                info!(width_px = page.width_px, height_px = page.height_px, "side accepted");
                return Ok(SideOutcome::Accepted(page));
            }

            SideState::Aborted => {
                info!("side review aborted");
                return Ok(SideOutcome::Aborted);
            }
        };
    }
}
