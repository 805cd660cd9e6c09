//! Canonical forms for names typed by users.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Canonical form of an ingredient name, tag or title.
///
/// Lowercases, strips accents via NFD decomposition, drops anything that is not `[a-z0-9-]`
/// or whitespace, then collapses whitespace runs to a single space and trims.
/// `"  Crème  Fraîche "` becomes `"creme fraiche"`.
pub fn normalize_name(input: &str) -> String {
    let lowered = input.to_lowercase();
    let kept: String = lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// URL slug for a recipe title: the normalized title with spaces replaced by `-`.
pub fn slugify(title: &str) -> String {
    normalize_name(title).replace(' ', "-")
}

/// Normalize tags, dropping the ones that end up empty and duplicates.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = normalize_name(tag.as_ref());
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}
