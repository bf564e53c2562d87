//! Accent- and case-insensitive text folding for Vietnamese labels.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lower-case, strip diacritics, trim.
///
/// `đ` has no canonical decomposition, so it is mapped to `d` explicitly;
/// otherwise "Đặc biệt" would never meet "dac biet".
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// `normalize`, then keep ASCII letters and digits only.
///
/// Used to compare station names whose punctuation and spacing drift between
/// sites ("TP. HCM" / "Tp.HCM" / "tphcm").
pub fn compact(text: &str) -> String {
    normalize(text)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// `normalize`, split into alphanumeric words.
pub fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
