//! Initials extraction from personal or company names.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Runs of Latin letters, accented Latin-1 letters included.
/// `×` (U+00D7) and `÷` (U+00F7) are excluded.
static LETTER_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-zÀ-ÖØ-öø-ÿ]+").expect("Invalid letter run regex")
});

/// First letter of every run of Latin letters, uppercased.
///
/// `"Jean-Luc Picard"` gives `"JLP"`. With `ascii_only`, accents are removed
/// by canonical decomposition (`"Élodie"` gives `"E"`). Returns an empty
/// string when `name` has no letters.
pub fn get_initials(name: &str, ascii_only: bool) -> String {
    let initials: String = LETTER_RUN_REGEX
        .find_iter(name)
        .filter_map(|run| run.as_str().chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if ascii_only {
        initials.nfd().filter(|c| !is_combining_mark(*c)).collect()
    } else {
        initials
    }
}
