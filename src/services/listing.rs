//! Listing filter/sort engine.
//!
//! Pure transform over a listing snapshot: keeps entries whose name contains
//! the query (case-insensitively) and whose kind passes the type filter, then
//! orders folders before files and applies the sort key within each group.
//! Names compare under the Unicode root collation, case and accents folded
//! at the primary level.
//! The sort is stable, so equal keys keep their snapshot order and re-running
//! with the same query never reorders the output.

use std::cmp::Ordering;

use feruca::{Collator, Tailoring};

use crate::models::file::FileEntry;
use crate::models::listing::{ListingQuery, SortKey};

pub fn filter_and_sort(entries: &[FileEntry], query: &ListingQuery) -> Vec<FileEntry> {
    let needle = query.query.to_lowercase();

    let mut visible: Vec<&FileEntry> = entries
        .iter()
        .filter(|e| query.type_filter.matches(e.kind))
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect();

    // Root collation with punctuation kept significant and no byte tiebreak,
    // so names that collate equal keep their snapshot order.
    let mut collator = Collator::new(Tailoring::default(), false, false);
    let sort_key = query.sort_key;
    visible.sort_by(|a, b| {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| compare_by_key(&mut collator, sort_key, a, b))
    });

    visible.into_iter().cloned().collect()
}

fn compare_by_key(collator: &mut Collator, key: SortKey, a: &FileEntry, b: &FileEntry) -> Ordering {
    match key {
        SortKey::NameAsc => collator.collate(&a.name, &b.name),
        SortKey::NameDesc => collator.collate(&b.name, &a.name),
        SortKey::ModifiedNewest => modified(b).total_cmp(&modified(a)),
        SortKey::ModifiedOldest => modified(a).total_cmp(&modified(b)),
        SortKey::SizeLargest => size(b).cmp(&size(a)),
        SortKey::SizeSmallest => size(a).cmp(&size(b)),
    }
}

fn modified(entry: &FileEntry) -> f64 {
    entry.modified_at.unwrap_or(0.0)
}

fn size(entry: &FileEntry) -> u64 {
    entry.size.unwrap_or(0)
}
