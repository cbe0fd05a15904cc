//! URL slug allocation.
//!
//! A slug is derived from the article header in two stages:
//!
//! 1. [`slugify`] normalizes the free-text header into a URL-safe,
//!    filesystem-safe base: punctuation stripped, whitespace collapsed
//!    to hyphens, Cyrillic transliterated, lowercased, truncated.
//! 2. [`allocate`] appends a numeric suffix (`_1`, `_2`, …) and probes
//!    an existence predicate until it finds a free candidate.
//!
//! The numeric suffix is tracked as a counter rather than parsed back
//! out of the candidate string, so bases that themselves contain
//! underscores cannot confuse the collision loop.

mod translit;

pub use translit::{map_char, transliterate};

use thiserror::Error;

/// Maximum length of a slug base, in characters.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Default bound on collision-resolution attempts.
pub const MAX_SLUG_ATTEMPTS: u32 = 1000;

/// Slug allocation failure.
#[derive(Debug, Error)]
pub enum SlugError {
    #[error("no free slug for base `{base}` within {attempts} attempts")]
    Exhausted { base: String, attempts: u32 },
}

/// Normalize a header into a slug base.
///
/// Steps, in order:
/// 1. strip characters that are neither alphanumeric, underscore, nor
///    whitespace;
/// 2. trim and collapse whitespace runs to a single hyphen;
/// 3. transliterate through the Cyrillic table, lowercasing as it goes;
/// 4. truncate to `max_len` characters.
///
/// Truncation applies to the base, before any numeric suffix. A header
/// made entirely of punctuation yields an empty base; the allocator
/// still produces `_1`-style slugs for it.
pub fn slugify(header: &str, max_len: usize) -> String {
    let stripped: String = header
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_' || ch.is_whitespace())
        .collect();
    let hyphenated = stripped.split_whitespace().collect::<Vec<_>>().join("-");
    transliterate(&hyphenated).chars().take(max_len).collect()
}

/// Find the first free slug for `base` by numeric suffixing.
///
/// Candidates are `{base}_1`, `{base}_2`, … in order; the first for
/// which `exists` returns false wins. Fails with
/// [`SlugError::Exhausted`] once `max_attempts` candidates are all
/// taken, so a pathological predicate cannot loop forever.
pub fn allocate(
    base: &str,
    mut exists: impl FnMut(&str) -> bool,
    max_attempts: u32,
) -> Result<String, SlugError> {
    for n in 1..=max_attempts {
        let candidate = format!("{base}_{n}");
        if !exists(&candidate) {
            return Ok(candidate);
        }
    }
    Err(SlugError::Exhausted {
        base: base.to_string(),
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World", MAX_SLUG_LENGTH), "hello-world");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Hello, World!", MAX_SLUG_LENGTH), "hello-world");
        assert_eq!(slugify("  lots   of\tspace ", MAX_SLUG_LENGTH), "lots-of-space");
    }

    #[test]
    fn test_slugify_keeps_underscores() {
        assert_eq!(slugify("snake_case title", MAX_SLUG_LENGTH), "snake_case-title");
    }

    #[test]
    fn test_slugify_cyrillic() {
        assert_eq!(slugify("Привет мир", MAX_SLUG_LENGTH), "privet-mir");
    }

    #[test]
    fn test_slugify_truncates_base() {
        let long = "a".repeat(300);
        assert_eq!(slugify(&long, MAX_SLUG_LENGTH).len(), MAX_SLUG_LENGTH);
    }

    #[test]
    fn test_slugify_degenerate() {
        assert_eq!(slugify("!!!", MAX_SLUG_LENGTH), "");
        assert_eq!(slugify("", MAX_SLUG_LENGTH), "");
    }

    #[test]
    fn test_allocate_first_free() {
        let slug = allocate("hello-world", |_| false, MAX_SLUG_ATTEMPTS).unwrap();
        assert_eq!(slug, "hello-world_1");
    }

    #[test]
    fn test_allocate_skips_taken() {
        let taken: FxHashSet<&str> = ["hello-world_1"].into_iter().collect();
        let slug = allocate("hello-world", |c| taken.contains(c), MAX_SLUG_ATTEMPTS).unwrap();
        assert_eq!(slug, "hello-world_2");
    }

    #[test]
    fn test_allocate_underscore_base() {
        let taken: FxHashSet<&str> = ["snake_case_1", "snake_case_2"].into_iter().collect();
        let slug = allocate("snake_case", |c| taken.contains(c), MAX_SLUG_ATTEMPTS).unwrap();
        assert_eq!(slug, "snake_case_3");
    }

    #[test]
    fn test_allocate_empty_base() {
        let slug = allocate("", |_| false, MAX_SLUG_ATTEMPTS).unwrap();
        assert_eq!(slug, "_1");
    }

    #[test]
    fn test_allocate_deterministic() {
        let exists = |c: &str| c.ends_with("_1");
        let a = allocate("post", exists, MAX_SLUG_ATTEMPTS).unwrap();
        let b = allocate("post", exists, MAX_SLUG_ATTEMPTS).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "post_2");
    }

    #[test]
    fn test_allocate_unique_sequence() {
        let mut taken = FxHashSet::default();
        for _ in 0..20 {
            let slug = allocate("post", |c| taken.contains(c), MAX_SLUG_ATTEMPTS).unwrap();
            assert!(taken.insert(slug));
        }
    }

    #[test]
    fn test_allocate_bounded() {
        let err = allocate("post", |_| true, 50).unwrap_err();
        match err {
            SlugError::Exhausted { base, attempts } => {
                assert_eq!(base, "post");
                assert_eq!(attempts, 50);
            }
        }
    }
}
