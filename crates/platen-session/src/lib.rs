// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// platen-session — Drives one recipe scan session from form submission to
// a finished PDF.
//
// Operator interaction goes through the `SessionPrompter` trait, so the
// accept/retry/abort contract is testable without a UI; hardware goes
// through the `platen-scanner` traits, so it is testable without a device.

pub mod review;
pub mod session;

pub use review::{SessionPrompter, SideOutcome, SideState, review_side};
pub use session::{ScanSession, SessionOutcome};
