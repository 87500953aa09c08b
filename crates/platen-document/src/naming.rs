// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output naming — derive a destination PDF path that never overwrites an
// existing file.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Resolve the output path for `title` inside `folder`.
///
/// The canonical name is `<title with spaces replaced by underscores>.pdf`.
/// If it is taken, ` (1)`, ` (2)`, … are appended before the extension until
/// a free name is found.
///
/// The probe reflects filesystem state at call time only; it is not atomic
/// against concurrent writers. A single session owns its destination folder,
/// so this is a documented limitation rather than a defect.
pub fn resolve_output_path(folder: &Path, title: &str) -> PathBuf {
    let stem = title.trim().replace(' ', "_");
    let canonical = folder.join(format!("{stem}.pdf"));
    if !canonical.exists() {
        return canonical;
    }

    let mut counter = 1u32;
    loop {
        let candidate = folder.join(format!("{stem} ({counter}).pdf"));
        if !candidate.exists() {
            debug!(path = %candidate.display(), counter, "canonical name taken");
            return candidate;
        }
        counter += 1;
    }
}
