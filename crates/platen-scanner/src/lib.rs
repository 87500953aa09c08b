// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// platen-scanner — Device capability contract for the Platen recipe scanner.
//
// The core never talks to a concrete scanner API. It depends on the narrow
// trait pair defined here: a `SourceManager` to enumerate and open sources,
// and a `ScanSource` to acquire single pages as raw bitmap bytes. Any
// backend (TWAIN, SANE, WIA) can sit behind these traits; the bundled
// `SyntheticScanner` renders pages in memory for tests and demos.

pub mod synthetic;
pub mod traits;

pub use synthetic::SyntheticScanner;
pub use traits::{ScanSource, SourceInfo, SourceManager};
