// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan session — orchestrates capture, review, naming, assembly, and
// cleanup for one recipe.

use std::path::{Path, PathBuf};

use platen_core::error::Result;
use platen_core::types::{CapturedPage, PageSide, RecipeForm, SessionId};
use platen_document::{PageCapturer, PdfAssembler, cleanup, resolve_output_path};
use platen_scanner::traits::SourceManager;
use tracing::{info, instrument};

use crate::review::{SessionPrompter, SideOutcome, review_side};

/// How a session ended. Errors are reported separately through `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The PDF was written; `pages` is 1 or 2 in front-then-back order.
    Completed { pdf_path: PathBuf, pages: usize },
    /// The operator declined a prompt; nothing was written.
    Aborted,
}

/// One recipe scan session.
///
/// A session exclusively owns its temp files and destination folder;
/// everything runs on the calling thread, suspending only at the prompter's
/// decision points. Temp images are removed on every exit path, including
/// early returns through `?`.
pub struct ScanSession<'a> {
    id: SessionId,
    form: RecipeForm,
    capturer: PageCapturer<'a>,
    base_dir: PathBuf,
}

impl<'a> ScanSession<'a> {
    /// Validate the form and set up a session scanning through `manager`.
    pub fn new(
        form: RecipeForm,
        manager: &'a dyn SourceManager,
        source_name: impl Into<String>,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        form.validate()?;
        Ok(Self {
            id: SessionId::new(),
            form,
            capturer: PageCapturer::new(manager, source_name),
            base_dir: base_dir.into(),
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Run the session to completion, abort, or error.
    #[instrument(skip(self, prompter), fields(session = %self.id, title = %self.form.title))]
    pub fn run(&self, prompter: &mut dyn SessionPrompter) -> Result<SessionOutcome> {
        let folder = self.base_dir.join(self.form.category.folder_name());
        std::fs::create_dir_all(&folder)?;

        let front_path = folder.join(PageSide::Front.temp_file_name());
        let back_path = folder.join(PageSide::Back.temp_file_name());

        // Removes both temp files when the session leaves this scope, no
        // matter how it leaves.
        let _guard = TempPages::new(vec![front_path.clone(), back_path.clone()]);

        let mut pages: Vec<CapturedPage> = Vec::with_capacity(2);

        match review_side(&self.capturer, prompter, PageSide::Front, &front_path)? {
            SideOutcome::Accepted(page) => pages.push(page),
            SideOutcome::Aborted => {
                info!("session aborted on front side");
                return Ok(SessionOutcome::Aborted);
            }
        }

        if self.form.double_sided {
            if !prompter.confirm_flip() {
                info!("flip prompt declined, session aborted");
                return Ok(SessionOutcome::Aborted);
            }
            match review_side(&self.capturer, prompter, PageSide::Back, &back_path)? {
                SideOutcome::Accepted(page) => pages.push(page),
                SideOutcome::Aborted => {
                    info!("session aborted on back side");
                    return Ok(SessionOutcome::Aborted);
                }
            }
        }

        let output_path = resolve_output_path(&folder, &self.form.title);
        let image_paths: Vec<&Path> = pages.iter().map(|p| p.path.as_path()).collect();

        PdfAssembler::new()
            .with_title(self.form.title.trim())
            .assemble(&image_paths, &output_path)?;

        info!(
            pdf = %output_path.display(),
            pages = pages.len(),
            started_at = %self.form.created_at,
            "recipe saved"
        );
        Ok(SessionOutcome::Completed {
            pdf_path: output_path,
            pages: pages.len(),
        })
    }
}

/// Drop guard over the session's temp image paths.
struct TempPages {
    paths: Vec<PathBuf>,
}

impl TempPages {
    fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl Drop for TempPages {
    fn drop(&mut self) {
        cleanup(&self.paths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platen_core::error::PlatenError;
    use platen_core::types::{Category, ReviewDecision};
    use platen_scanner::synthetic::{SOURCE_NAME, SyntheticScanner};
    use std::collections::VecDeque;

    /// Prompter driven by a pre-recorded script. Records how many temp
    /// files exist in the side's folder at every preview, so mid-session
    /// invariants can be asserted after the run.
    struct ScriptedPrompter {
        confirm_scan: VecDeque<bool>,
        decisions: VecDeque<ReviewDecision>,
        confirm_flip: bool,
        temp_counts_at_preview: Vec<usize>,
    }

    impl ScriptedPrompter {
        fn new(
            confirm_scan: &[bool],
            decisions: &[ReviewDecision],
            confirm_flip: bool,
        ) -> Self {
            Self {
                confirm_scan: confirm_scan.iter().copied().collect(),
                decisions: decisions.iter().copied().collect(),
                confirm_flip,
                temp_counts_at_preview: Vec::new(),
            }
        }

        /// Always-confirming prompter with the given preview decisions.
        fn accepting(decisions: &[ReviewDecision]) -> Self {
            Self::new(&[true; 16], decisions, true)
        }
    }

    impl SessionPrompter for ScriptedPrompter {
        fn confirm_scan(&mut self, _side: PageSide) -> bool {
            self.confirm_scan.pop_front().unwrap_or(false)
        }

        fn review_page(&mut self, page: &CapturedPage) -> ReviewDecision {
            let folder = page.path.parent().expect("temp file has a folder");
            let temps = std::fs::read_dir(folder)
                .expect("read folder")
                .filter_map(|e| e.ok())
                .filter(|e| {
                    e.file_name()
                        .to_string_lossy()
                        .ends_with(page.side.temp_file_name())
                })
                .count();
            self.temp_counts_at_preview.push(temps);
            self.decisions.pop_front().unwrap_or(ReviewDecision::Abort)
        }

        fn confirm_flip(&mut self) -> bool {
            self.confirm_flip
        }
    }

    fn pdf_count(folder: &Path) -> usize {
        std::fs::read_dir(folder)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "pdf"))
                    .count()
            })
            .unwrap_or(0)
    }

    fn leftover_temps(folder: &Path) -> usize {
        std::fs::read_dir(folder)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_name().to_string_lossy().contains("_temp"))
                    .count()
            })
            .unwrap_or(0)
    }

    #[test]
    fn single_sided_session_produces_one_page_pdf() {
        let scanner = SyntheticScanner::new(vec![(1200, 1600)]);
        let base = tempfile::tempdir().expect("tempdir");
        let form = RecipeForm::new("Carrot Cake", Category::Cake, false);
        let session = ScanSession::new(form, &scanner, SOURCE_NAME, base.path()).expect("session");

        let mut prompter = ScriptedPrompter::accepting(&[ReviewDecision::Accept]);
        let outcome = session.run(&mut prompter).expect("run");

        let folder = base.path().join("Cake");
        let SessionOutcome::Completed { pdf_path, pages } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(pages, 1);
        assert_eq!(pdf_path, folder.join("Carrot_Cake.pdf"));

        let doc = lopdf::Document::load(&pdf_path).expect("parse PDF");
        assert_eq!(doc.get_pages().len(), 1);
        assert_eq!(leftover_temps(&folder), 0);
    }

    #[test]
    fn double_sided_session_produces_two_pages_front_first() {
        // Front 1200x1600 -> 600x800; back 1200x1800 -> 600x900.
        let scanner = SyntheticScanner::new(vec![(1200, 1600), (1200, 1800)]);
        let base = tempfile::tempdir().expect("tempdir");
        let form = RecipeForm::new("Rye Bread", Category::Bread, true);
        let session = ScanSession::new(form, &scanner, SOURCE_NAME, base.path()).expect("session");

        let mut prompter =
            ScriptedPrompter::accepting(&[ReviewDecision::Accept, ReviewDecision::Accept]);
        let outcome = session.run(&mut prompter).expect("run");

        let SessionOutcome::Completed { pdf_path, pages } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(pages, 2);

        let doc = lopdf::Document::load(&pdf_path).expect("parse PDF");
        assert_eq!(doc.get_pages().len(), 2);
        assert_eq!(leftover_temps(&base.path().join("Bread")), 0);
    }

    #[test]
    fn retries_never_accumulate_temp_files() {
        let scanner = SyntheticScanner::new(vec![(1200, 1600)]);
        let base = tempfile::tempdir().expect("tempdir");
        let form = RecipeForm::new("Mushroom Soup", Category::Soup, false);
        let session = ScanSession::new(form, &scanner, SOURCE_NAME, base.path()).expect("session");

        let mut prompter = ScriptedPrompter::accepting(&[
            ReviewDecision::Retry,
            ReviewDecision::Retry,
            ReviewDecision::Retry,
            ReviewDecision::Accept,
        ]);
        let outcome = session.run(&mut prompter).expect("run");

        assert!(matches!(outcome, SessionOutcome::Completed { pages: 1, .. }));
        // Exactly one temp file for the side existed at every preview.
        assert_eq!(prompter.temp_counts_at_preview, vec![1, 1, 1, 1]);
        assert_eq!(leftover_temps(&base.path().join("Soup")), 0);
    }

    #[test]
    fn declining_initial_scan_confirmation_aborts_cleanly() {
        let scanner = SyntheticScanner::letter();
        let base = tempfile::tempdir().expect("tempdir");
        let form = RecipeForm::new("Apple Pie", Category::Pie, false);
        let session = ScanSession::new(form, &scanner, SOURCE_NAME, base.path()).expect("session");

        let mut prompter = ScriptedPrompter::new(&[false], &[], true);
        let outcome = session.run(&mut prompter).expect("run");

        assert_eq!(outcome, SessionOutcome::Aborted);
        let folder = base.path().join("Pie");
        assert_eq!(pdf_count(&folder), 0);
        assert_eq!(leftover_temps(&folder), 0);
    }

    #[test]
    fn aborting_at_preview_leaves_nothing_behind() {
        let scanner = SyntheticScanner::letter();
        let base = tempfile::tempdir().expect("tempdir");
        let form = RecipeForm::new("Apple Pie", Category::Pie, false);
        let session = ScanSession::new(form, &scanner, SOURCE_NAME, base.path()).expect("session");

        let mut prompter = ScriptedPrompter::accepting(&[ReviewDecision::Abort]);
        let outcome = session.run(&mut prompter).expect("run");

        assert_eq!(outcome, SessionOutcome::Aborted);
        let folder = base.path().join("Pie");
        assert_eq!(pdf_count(&folder), 0);
        assert_eq!(leftover_temps(&folder), 0);
    }

    #[test]
    fn declining_flip_prompt_aborts_before_back_capture() {
        let scanner = SyntheticScanner::letter();
        let base = tempfile::tempdir().expect("tempdir");
        let form = RecipeForm::new("Blueberry Muffins", Category::Muffin, true);
        let session = ScanSession::new(form, &scanner, SOURCE_NAME, base.path()).expect("session");

        let mut prompter = ScriptedPrompter::new(&[true], &[ReviewDecision::Accept], false);
        let outcome = session.run(&mut prompter).expect("run");

        assert_eq!(outcome, SessionOutcome::Aborted);
        // Only the front was ever previewed.
        assert_eq!(prompter.temp_counts_at_preview.len(), 1);
        let folder = base.path().join("Muffin");
        assert_eq!(pdf_count(&folder), 0);
        assert_eq!(leftover_temps(&folder), 0);
    }

    #[test]
    fn capture_failure_ends_session_and_cleans_temps() {
        let scanner = SyntheticScanner::failing();
        let base = tempfile::tempdir().expect("tempdir");
        let form = RecipeForm::new("Caesar Salad", Category::Salad, false);
        let session = ScanSession::new(form, &scanner, SOURCE_NAME, base.path()).expect("session");

        let mut prompter = ScriptedPrompter::accepting(&[]);
        let result = session.run(&mut prompter);

        assert!(matches!(result, Err(PlatenError::Capture(_))));
        let folder = base.path().join("Salad");
        assert_eq!(pdf_count(&folder), 0);
        assert_eq!(leftover_temps(&folder), 0);
    }

    #[test]
    fn blank_title_blocks_session_start() {
        let scanner = SyntheticScanner::letter();
        let base = tempfile::tempdir().expect("tempdir");
        let form = RecipeForm::new("   ", Category::Cake, false);

        let result = ScanSession::new(form, &scanner, SOURCE_NAME, base.path());
        assert!(matches!(result, Err(PlatenError::Validation(_))));
    }

    #[test]
    fn second_session_with_same_title_gets_numeric_suffix() {
        let scanner = SyntheticScanner::new(vec![(1200, 1600)]);
        let base = tempfile::tempdir().expect("tempdir");

        for expected in ["Carrot_Cake.pdf", "Carrot_Cake (1).pdf"] {
            let form = RecipeForm::new("Carrot Cake", Category::Cake, false);
            let session =
                ScanSession::new(form, &scanner, SOURCE_NAME, base.path()).expect("session");
            let mut prompter = ScriptedPrompter::accepting(&[ReviewDecision::Accept]);
            let outcome = session.run(&mut prompter).expect("run");

            let SessionOutcome::Completed { pdf_path, .. } = outcome else {
                panic!("expected completion");
            };
            assert_eq!(pdf_path, base.path().join("Cake").join(expected));
        }
    }
}
