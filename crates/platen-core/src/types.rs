// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Platen recipe scanner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{PlatenError, Result};

/// Unique identifier for a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recipe category. The fixed list mirrors the new-recipe form; anything
/// else is entered as free text under `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Cake,
    Cookie,
    Bread,
    Soup,
    Pie,
    Muffin,
    Salad,
    Other(String),
}

impl Category {
    /// Names offered by the new-recipe form, in menu order.
    /// "Other" expands to a free-text entry.
    pub const MENU: [&'static str; 8] = [
        "Cake", "Cookie", "Bread", "Soup", "Pie", "Muffin", "Salad", "Other",
    ];

    /// Build a category from a fixed menu name. Returns `None` for "Other"
    /// and unknown names; those need free text via `Category::other`.
    pub fn from_menu_name(name: &str) -> Option<Self> {
        match name {
            "Cake" => Some(Self::Cake),
            "Cookie" => Some(Self::Cookie),
            "Bread" => Some(Self::Bread),
            "Soup" => Some(Self::Soup),
            "Pie" => Some(Self::Pie),
            "Muffin" => Some(Self::Muffin),
            "Salad" => Some(Self::Salad),
            _ => None,
        }
    }

    /// Free-text category. The text is trimmed; emptiness is caught by
    /// [`RecipeForm::validate`].
    pub fn other(text: &str) -> Self {
        Self::Other(text.trim().to_string())
    }

    /// Folder name used under the base recipe directory.
    pub fn folder_name(&self) -> &str {
        match self {
            Self::Cake => "Cake",
            Self::Cookie => "Cookie",
            Self::Bread => "Bread",
            Self::Soup => "Soup",
            Self::Pie => "Pie",
            Self::Muffin => "Muffin",
            Self::Salad => "Salad",
            Self::Other(text) => text,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// Which physical side of the sheet a capture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSide {
    Front,
    Back,
}

impl PageSide {
    /// Temp file name for this side inside the category folder. The same
    /// name is reused across retries so attempts never accumulate on disk.
    pub fn temp_file_name(&self) -> &'static str {
        match self {
            Self::Front => "front_temp.jpg",
            Self::Back => "back_temp.jpg",
        }
    }
}

impl std::fmt::Display for PageSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => f.write_str("front"),
            Self::Back => f.write_str("back"),
        }
    }
}

/// Operator verdict on a previewed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Keep this page and move on.
    Accept,
    /// Discard and scan the same side again.
    Retry,
    /// Abandon the whole session.
    Abort,
}

/// One captured and normalized page, backed by a temp JPEG on disk.
///
/// Width and height are the pixel dimensions after normalization; physical
/// sizing downstream assumes 300 DPI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPage {
    pub side: PageSide,
    pub width_px: u32,
    pub height_px: u32,
    pub path: PathBuf,
}

/// What the operator filled into the new-recipe form.
///
/// Validated with [`RecipeForm::validate`] before a session may start.
#[derive(Debug, Clone)]
pub struct RecipeForm {
    pub title: String,
    pub category: Category,
    pub double_sided: bool,
    pub created_at: DateTime<Utc>,
}

impl RecipeForm {
    pub fn new(title: impl Into<String>, category: Category, double_sided: bool) -> Self {
        Self {
            title: title.into(),
            category,
            double_sided,
            created_at: Utc::now(),
        }
    }

    /// Reject forms whose title or category is empty after trimming.
    /// A failed validation keeps the form open for correction; it never
    /// starts a session.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PlatenError::Validation("recipe name is empty".into()));
        }
        if self.category.folder_name().trim().is_empty() {
            return Err(PlatenError::Validation("recipe type is empty".into()));
        }
        Ok(())
    }
}
