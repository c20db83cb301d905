//! Book catalog rules that need no database access.
//!
//! Two title comparisons exist on purpose and must stay separate:
//!
//! - Inside a bulk-create request, titles are compared **exactly**
//!   ([`batch_duplicate_titles`]).
//! - Against stored books, titles are compared **case-insensitively**. That
//!   comparison runs in SQL (`LOWER(title)`) so it agrees with the
//!   `uq_books_live_title` index; see `bookshelf_db::tx`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Popularity
// ---------------------------------------------------------------------------

/// Weight applied to each recorded view.
pub const POPULARITY_VIEW_WEIGHT: f64 = 0.5;

/// Weight applied to each year since publication.
pub const POPULARITY_AGE_WEIGHT: f64 = 2.0;

/// Read-time popularity metric: `0.5 * views + 2 * (current_year - publication_year)`.
///
/// Never persisted. Books published in the future yield a negative age term.
pub fn popularity_score(views_count: i64, publication_year: i32, current_year: i32) -> f64 {
    let age = f64::from(current_year) - f64::from(publication_year);
    POPULARITY_VIEW_WEIGHT * views_count as f64 + POPULARITY_AGE_WEIGHT * age
}

/// The current calendar year in UTC.
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

// ---------------------------------------------------------------------------
// Batch duplicate detection
// ---------------------------------------------------------------------------

/// Return the titles that appear more than once in `titles`, compared by
/// exact string equality, each reported once in order of first repetition.
///
/// `"Dune"` and `"dune"` are *not* duplicates here.
pub fn batch_duplicate_titles<'a, I>(titles: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for title in titles {
        if !seen.insert(title) && reported.insert(title) {
            duplicates.push(title.to_string());
        }
    }
    duplicates
}

// ---------------------------------------------------------------------------
// Update collision policy
// ---------------------------------------------------------------------------

/// Whether a book being updated counts as a collision with its own title.
///
/// [`TitleCollisionPolicy::IncludeSelf`] is the established behaviour:
/// renaming a book to its current title is rejected as a duplicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleCollisionPolicy {
    #[default]
    IncludeSelf,
    ExcludeSelf,
}

impl TitleCollisionPolicy {
    /// The id to leave out of the live-title collision set when updating
    /// book `id`, if any.
    pub fn excluded_id(self, id: DbId) -> Option<DbId> {
        match self {
            TitleCollisionPolicy::IncludeSelf => None,
            TitleCollisionPolicy::ExcludeSelf => Some(id),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TitleCollisionPolicy::IncludeSelf => "include_self",
            TitleCollisionPolicy::ExcludeSelf => "exclude_self",
        }
    }
}

impl fmt::Display for TitleCollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TitleCollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include_self" => Ok(TitleCollisionPolicy::IncludeSelf),
            "exclude_self" => Ok(TitleCollisionPolicy::ExcludeSelf),
            other => Err(format!(
                "unknown title collision policy '{other}' (expected include_self or exclude_self)"
            )),
        }
    }
}
