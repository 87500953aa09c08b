// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session cleanup — best-effort removal of per-page temp images.

use std::path::Path;

use tracing::{debug, warn};

/// Delete every path in `paths`.
///
/// Runs on every session exit (success, operator abort, or error). Missing
/// files and deletion failures are ignored; calling this twice on the same
/// list is harmless.
pub fn cleanup<P: AsRef<Path>>(paths: &[P]) {
    for path in paths {
        let path = path.as_ref();
        match std::fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "temp image removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(path = %path.display(), %err, "could not remove temp image"),
        }
    }
}
