use std::time::SystemTime;

use serde::Serialize;

/// One listing row: a markdown file found under `<family>/<category>/`.
#[derive(Serialize, Debug, Clone)]
pub struct ItemSummary {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub keywords: Vec<String>,
    /// `modified` formatted for display.
    pub date: String,

    #[serde(skip_serializing)]
    pub modified: SystemTime,
}

/// A single rendered item picked out of a listing.
#[derive(Serialize, Debug, Clone)]
pub struct FeaturedItem {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub date: String,
    pub html: String,
}

/// Full view of one item, addressed by category and slug.
#[derive(Serialize, Debug, Clone)]
pub struct ItemPage {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub created: String,
    pub html: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    pub category: String,
    pub slug: String,
}

/// An uploaded file as received from a form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Only `.md` files are accepted, compared case-insensitively.
    pub fn is_markdown(&self) -> bool {
        match self.filename.rsplit_once('.') {
            Some((stem, ext)) => !stem.is_empty() && ext.eq_ignore_ascii_case("md"),
            None => false,
        }
    }
}

/// Input of a create request. Fields mirror the add form and stay optional
/// so validation can report which one is missing.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub title: Option<String>,
    pub file: Option<Upload>,
    pub category_select: Option<String>,
    pub new_category: Option<String>,
    pub new_keywords: Option<String>,
}

#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Overwrite the item with the given text; may be empty.
    Save { content: String },
    /// Replace the item's bytes with an uploaded file.
    Upload(Upload),
    /// Remove the item once `confirm_slug` repeats its slug.
    Delete { confirm_slug: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Saved,
    Replaced,
    Deleted,
}
