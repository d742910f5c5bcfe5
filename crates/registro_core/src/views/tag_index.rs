//! Tag frequency index and alphabetic grouping.
//!
//! # Responsibility
//! - Count tag usage across an entry snapshot.
//! - Group counted tags into a book-style A-Z index.
//!
//! # Invariants
//! - A tag counts at most once per entry, even against malformed input.
//! - Frequency order: count descending, ties by name ascending.
//! - Index buckets: A-Z by folded first letter, catch-all `#` last.

use crate::model::entry::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

/// One row of the tag frequency index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    /// Normalized tag name.
    pub name: String,
    /// Number of distinct entries carrying this tag.
    pub count: usize,
}

/// One letter section of the alphabetic index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBucket {
    /// Uppercased folded first letter, or `#` for non-letter names.
    pub letter: char,
    /// Bucket rows sorted by name ascending.
    pub items: Vec<TagCount>,
}

/// Catch-all bucket letter for names that do not start with a letter.
pub const CATCH_ALL_BUCKET: char = '#';

/// Counts tag usage over the given entries.
///
/// Defensive against duplicate references within one entry: each tag is
/// counted once per entry regardless of how often it appears there.
pub fn tag_frequency(entries: &[Entry]) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        let distinct: HashSet<&str> = entry
            .tags
            .iter()
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
            .collect();
        for name in distinct {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    let mut frequency: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.to_string(),
            count,
        })
        .collect();
    frequency.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    frequency
}

/// Returns the `limit` most used tags from an already-sorted frequency list.
pub fn top_tags(frequency: &[TagCount], limit: usize) -> &[TagCount] {
    &frequency[..frequency.len().min(limit)]
}

/// Filters a frequency list by case-insensitive substring match.
///
/// An empty or whitespace-only query returns the list unchanged.
pub fn filter_by_query(frequency: &[TagCount], query: &str) -> Vec<TagCount> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return frequency.to_vec();
    }
    frequency
        .iter()
        .filter(|item| item.name.contains(&needle))
        .cloned()
        .collect()
}

/// Groups a frequency list into letter buckets for index display.
///
/// Buckets are ordered by letter with `#` forced last; `Ñ` keeps its own
/// bucket and sorts after `Z` by code point. Items within a bucket are
/// ordered by name ascending regardless of count.
pub fn alphabetic_index(frequency: &[TagCount]) -> Vec<IndexBucket> {
    let mut buckets: BTreeMap<char, Vec<TagCount>> = BTreeMap::new();
    for item in frequency {
        buckets
            .entry(index_letter(&item.name))
            .or_default()
            .push(item.clone());
    }

    let mut result: Vec<IndexBucket> = buckets
        .into_iter()
        .map(|(letter, mut items)| {
            items.sort_by(|a, b| a.name.cmp(&b.name));
            IndexBucket { letter, items }
        })
        .collect();
    // BTreeMap already yields letters ascending; only the catch-all moves.
    result.sort_by_key(|bucket| bucket.letter == CATCH_ALL_BUCKET);
    result
}

/// Returns the index letter for a tag name.
///
/// Folds Spanish vowel diacritics to their base letter (`á`->`A`, `ü`->`U`);
/// `ñ` stays a distinct letter. Names not starting with a letter fall into
/// the catch-all bucket.
fn index_letter(name: &str) -> char {
    let first = match name.trim().chars().next() {
        Some(c) => c,
        None => return CATCH_ALL_BUCKET,
    };

    let folded = match first {
        'á' | 'Á' => 'A',
        'é' | 'É' => 'E',
        'í' | 'Í' => 'I',
        'ó' | 'Ó' => 'O',
        'ú' | 'Ú' | 'ü' | 'Ü' => 'U',
        'ñ' | 'Ñ' => 'Ñ',
        other => other.to_uppercase().next().unwrap_or(CATCH_ALL_BUCKET),
    };

    if folded.is_alphabetic() && (folded.is_ascii_uppercase() || folded == 'Ñ') {
        folded
    } else {
        CATCH_ALL_BUCKET
    }
}
