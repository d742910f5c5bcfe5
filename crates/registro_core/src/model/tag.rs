//! Tag name normalization.
//!
//! # Responsibility
//! - Turn raw user text into a canonical tag name.
//!
//! # Invariants
//! - Normalization is pure, total and idempotent.
//! - Two raw inputs that normalize equal must resolve to the same tag.

/// Normalizes a raw tag input to its canonical name.
///
/// Trims surrounding whitespace and newlines, removes every `#` character,
/// and lowercases with Unicode-aware casing (covers Spanish input such as
/// `Poesía` -> `poesía`). The result may be empty; callers must discard
/// empty names before creating a tag.
pub fn normalize(raw: &str) -> String {
    raw.trim().replace('#', "").to_lowercase()
}

/// Splits comma-separated tag input into normalized, de-duplicated names.
///
/// Empty pieces are dropped. First occurrence wins, so the returned order
/// follows the order tags appear in the input.
pub fn split_tag_input(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for piece in input.split(',') {
        let name = normalize(piece);
        if name.is_empty() || names.iter().any(|seen| seen == &name) {
            continue;
        }
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::{normalize, split_tag_input};

    #[test]
    fn normalize_is_case_space_and_hash_insensitive() {
        assert_eq!(normalize("  #Foo "), "foo");
        assert_eq!(normalize("foo"), "foo");
        assert_eq!(normalize("FOO"), "foo");
    }

    #[test]
    fn normalize_handles_spanish_casing() {
        assert_eq!(normalize("Poesía"), "poesía");
        assert_eq!(normalize("#AÑO"), "año");
    }

    #[test]
    fn normalize_removes_inner_hashes_and_is_idempotent() {
        let once = normalize(" #a#b# ");
        assert_eq!(once, "ab");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn split_tag_input_drops_empties_and_duplicates() {
        let names = split_tag_input("Poesía, #docencia, poesía, , ##");
        assert_eq!(names, vec!["poesía".to_string(), "docencia".to_string()]);
    }

    #[test]
    fn split_tag_input_preserves_input_order() {
        let names = split_tag_input("b, a, c");
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
