//! Note list view derivation.

use crate::model::note::Note;
use crate::query::matching::SearchNeedle;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Note list filter. `Default` applies no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Matched against title, content and tags, case-insensitive.
    pub search_text: Option<String>,
    /// Exact tag membership.
    pub tag: Option<String>,
}

impl NoteFilter {
    /// Returns whether any constraint is set.
    pub fn is_active(&self) -> bool {
        self.search_text.as_deref().is_some_and(|text| !text.is_empty())
            || self.tag.as_deref().is_some_and(|tag| !tag.is_empty())
    }
}

/// Filters notes and orders them most recently touched first.
pub fn filter_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    let needle = SearchNeedle::parse(filter.search_text.as_deref());
    let tag = filter.tag.as_deref().filter(|tag| !tag.is_empty());
    let mut view: Vec<&Note> = notes
        .iter()
        .filter(|note| {
            needle.as_ref().map_or(true, |needle| {
                needle.matches(&note.title)
                    || needle.matches(&note.content)
                    || needle.matches_any(&note.tags)
            })
        })
        .filter(|note| tag.map_or(true, |tag| note.has_tag(tag)))
        .collect();
    view.sort_by(|a, b| compare_notes(a, b));
    view
}

/// Note list ordering: `updated_at` (or `created_at`) descending.
pub fn compare_notes(a: &Note, b: &Note) -> Ordering {
    b.last_touched().cmp(&a.last_touched())
}

/// Sorted, deduplicated tag index across all notes.
pub fn all_tags(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .flat_map(|note| note.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
