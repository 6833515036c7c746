//! Identifier-safe slugs.

/// Turns free text into a lowercase ASCII slug.
///
/// Runs of anything that is not an ASCII letter or digit collapse into a
/// single `-`, and leading/trailing separators are dropped, so the result is
/// safe inside ICS UIDs and file names. Accented letters are transliterated.
pub fn make_slug(text: &str) -> String {
    slug::slugify(text)
}
