//! Participant slug derivation.
//!
//! # Responsibility
//! - Turn display names into URL-safe lookup identifiers.
//! - Disambiguate slug collisions inside one roster.
//!
//! # Invariants
//! - `slugify` is pure, total and idempotent on its own output.
//! - Output alphabet is `[a-z0-9-]` with no leading/trailing hyphen.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Derives a URL-safe slug from a display name.
///
/// Lower-cases the input, strips diacritical marks via NFD decomposition,
/// then collapses every run of characters outside `[a-z0-9]` into a single
/// hyphen and trims edge hyphens. "José Azevedo" becomes "jose-azevedo".
///
/// May return an empty string when the input has no Latin alphanumerics
/// left after normalization (an all-emoji name, whitespace only). Callers
/// that key storage by slug must reject or disambiguate that case.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    let decomposed = name
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>();

    for ch in decomposed.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Returns `base` or the first counter-suffixed variant (`base-2`,
/// `base-3`, ...) not yet claimed by `taken`.
///
/// Used while building a roster so two participants with colliding names
/// ("Ana Silva" / "Ana, Silva!") still get distinct lookup keys.
pub fn unique_slug<'a, I>(base: &str, taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let claimed: Vec<&str> = taken.into_iter().collect();
    if !claimed.iter().any(|slug| *slug == base) {
        return base.to_string();
    }

    let mut counter: u32 = 2;
    loop {
        let candidate = format!("{base}-{counter}");
        if !claimed.iter().any(|slug| *slug == candidate) {
            return candidate;
        }
        counter += 1;
    }
}
