//! Markdown document composer.
//!
//! # Responsibility
//! - Serialize a selected, day-ascending entry slice into one Markdown
//!   document.
//!
//! # Invariants
//! - Output is a pure function of the inputs.
//! - Entries with no content still produce a heading-only block; row
//!   suppression is the selection filter's job, not this layer's.

use crate::locale::LocaleConfig;
use crate::model::entry::Entry;

/// Composes the full Markdown export document.
///
/// Per entry: a long-form localized date heading, an optional tags line
/// (alphabetical, `#name`, space-joined), one `**Label:** value` line per
/// non-empty field in canonical order, then a horizontal rule.
pub fn compose(
    title: &str,
    subtitle: &str,
    entries: &[Entry],
    include_tags: bool,
    locale: &LocaleConfig,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {title}\n\n"));
    if !subtitle.trim().is_empty() {
        out.push_str(&format!("{subtitle}\n\n"));
    }
    out.push_str("---\n");

    for entry in entries {
        out.push('\n');
        out.push_str(&format!("## {}\n", locale.long_date(entry.day)));

        if include_tags && !entry.tags.is_empty() {
            out.push('\n');
            out.push_str(&tags_line(&entry.tags));
            out.push('\n');
        }

        let fields = non_empty_fields(entry, locale);
        if !fields.is_empty() {
            out.push('\n');
            for (label, value) in fields {
                out.push_str(&format!("**{label}:** {value}\n"));
            }
        }

        out.push_str("\n---\n");
    }

    out
}

/// Renders the alphabetically sorted `#name` tags line.
fn tags_line(tags: &[String]) -> String {
    let mut sorted: Vec<&str> = tags.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(|name| format!("#{name}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pairs each non-empty field with its localized label, canonical order.
fn non_empty_fields<'a>(entry: &'a Entry, locale: &LocaleConfig) -> Vec<(&'static str, &'a str)> {
    locale
        .field_labels
        .iter()
        .zip(entry.text_fields())
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| (*label, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::compose;
    use crate::locale::LocaleConfig;
    use crate::model::entry::Entry;
    use chrono::NaiveDate;

    fn entry(d: u32) -> Entry {
        Entry::new(NaiveDate::from_ymd_opt(2026, 1, d).unwrap())
    }

    #[test]
    fn zero_entries_produce_only_title_subtitle_separator() {
        let out = compose("REGISTRO 2026", "Un año en días", &[], true, &LocaleConfig::spanish());
        assert_eq!(out, "# REGISTRO 2026\n\nUn año en días\n\n---\n");
        assert!(!out.contains("##"));
    }

    #[test]
    fn blank_subtitle_is_omitted() {
        let out = compose("REGISTRO 2026", "   ", &[], true, &LocaleConfig::spanish());
        assert_eq!(out, "# REGISTRO 2026\n\n---\n");
    }

    #[test]
    fn entry_block_renders_heading_tags_and_non_empty_fields() {
        let mut first = entry(5);
        first.done = "pasear".to_string();
        first.note = "ligera".to_string();
        first.tags = vec!["poesía".to_string(), "docencia".to_string()];

        let out = compose("R", "", &[first], true, &LocaleConfig::spanish());
        assert!(out.contains("## 5 de enero de 2026\n"));
        // Tags render alphabetically, not in attachment order.
        assert!(out.contains("#docencia #poesía\n"));
        assert!(out.contains("**Hecho:** pasear\n"));
        assert!(out.contains("**Nota suelta:** ligera\n"));
        assert!(!out.contains("**Pensado:**"));
    }

    #[test]
    fn include_tags_false_suppresses_the_tags_line() {
        let mut first = entry(5);
        first.tags = vec!["poesía".to_string()];
        let out = compose("R", "", &[first], false, &LocaleConfig::spanish());
        assert!(!out.contains("#poesía"));
    }

    #[test]
    fn empty_entry_still_produces_heading_only_block() {
        let out = compose("R", "", &[entry(7)], true, &LocaleConfig::spanish());
        assert!(out.contains("## 7 de enero de 2026\n\n---\n"));
    }

    #[test]
    fn whitespace_only_fields_are_suppressed() {
        let mut first = entry(5);
        first.mood = "  \n".to_string();
        let out = compose("R", "", &[first], true, &LocaleConfig::spanish());
        assert!(!out.contains("Estado de ánimo"));
    }
}
