//! Turning a results page into `PrizeRecord`s.
//!
//! Each source site gets its own `Extractor`, which only decides *which* table
//! belongs to the requested station. Reading prize rows out of that table is
//! shared: both sites lay rows out as `label | value cells...`.

pub mod minhngoc;
pub mod xosome;

use chrono::NaiveDate;
use scraper::{ElementRef, Selector};

use crate::domain::{PrizeCategory, PrizeRecord};
use crate::domain::normalize::{compact, tokens};

pub use minhngoc::MinhNgoc;
pub use xosome::XosoMe;

/// Shortest digit run accepted as a prize value; shorter runs are page noise.
pub const MIN_VALUE_DIGITS: usize = 2;
/// Longest drawn value (the special prize). Longer runs are dates or ids.
pub const MAX_VALUE_DIGITS: usize = 6;

/// Row-label keywords per category, in priority order.
///
/// A label matching several classes takes the first one listed, so the higher
/// prize wins ties.
pub const CATEGORY_KEYWORDS: [(PrizeCategory, &[&str]); 9] = [
    (PrizeCategory::Special, &["đặc biệt", "đb"]),
    (PrizeCategory::First, &["nhất", "g1"]),
    (PrizeCategory::Second, &["nhì", "g2"]),
    (PrizeCategory::Third, &["ba", "g3"]),
    (PrizeCategory::Fourth, &["tư", "g4"]),
    (PrizeCategory::Fifth, &["năm", "g5"]),
    (PrizeCategory::Sixth, &["sáu", "g6"]),
    (PrizeCategory::Seventh, &["bảy", "g7"]),
    (PrizeCategory::Eighth, &["tám", "g8"]),
];

/// One site's way of finding a station's table in its markup.
pub trait Extractor: Send + Sync {
    /// Records for `station` on `draw_date`; empty when the page has no table
    /// for that station.
    fn extract(&self, markup: &str, station: &str, draw_date: NaiveDate) -> Vec<PrizeRecord>;
}

/// Classify a row label ("Giải Nhất", "G.1", "ĐB", ...).
///
/// Keywords are compared as whole words so "bảy" is not read as "ba"; a label
/// whose letters squash to exactly a keyword ("G.1" -> "g1") also counts.
pub fn classify_label(label: &str) -> Option<PrizeCategory> {
    let words = tokens(label);
    if words.is_empty() {
        return None;
    }
    let squashed = words.concat();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|kw| label_has_keyword(&words, &squashed, kw))
        })
        .map(|(category, _)| *category)
}

fn label_has_keyword(words: &[String], squashed: &str, keyword: &str) -> bool {
    let kw = tokens(keyword);
    if kw.is_empty() {
        return false;
    }
    squashed == kw.concat() || words.windows(kw.len()).any(|w| w == kw.as_slice())
}

/// Digit runs in a value cell, left to right.
///
/// Cells are split on whitespace, `-` and `.`; non-digits are then dropped from
/// each piece and pieces outside 2..=6 digits are discarded.
pub fn cell_values(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == '.')
        .map(|piece| piece.chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|digits| (MIN_VALUE_DIGITS..=MAX_VALUE_DIGITS).contains(&digits.len()))
        .collect()
}

/// Does a candidate's label text mention one of the station keywords?
///
/// `keywords` must already be compacted (see `domain::station::keywords`).
pub fn label_matches_station(label: &str, keywords: &[String]) -> bool {
    let haystack = compact(label);
    !haystack.is_empty() && keywords.iter().any(|kw| haystack.contains(kw.as_str()))
}

/// All text under an element, text nodes separated by a space.
///
/// Sites often put each number of a cell in its own `<div>`/`<span>` with no
/// whitespace in between; plain concatenation would glue them together.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}

/// Parse every prize row of a station table.
///
/// Ranks count per category across rows, in document order.
pub fn parse_prize_table(table: ElementRef<'_>, station: &str, draw_date: NaiveDate) -> Vec<PrizeRecord> {
    let Some(row_selector) = selector("tr") else {
        return Vec::new();
    };

    let mut next_rank = [0usize; PrizeCategory::ALL.len()];
    let mut out = Vec::new();

    for row in table.select(&row_selector) {
        let mut cells = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|c| matches!(c.value().name(), "td" | "th"));

        let Some(label_cell) = cells.next() else {
            continue;
        };
        let Some(category) = classify_label(&element_text(label_cell)) else {
            continue;
        };

        for cell in cells {
            for value in cell_values(&element_text(cell)) {
                let rank = &mut next_rank[category as usize];
                out.push(PrizeRecord {
                    station_code: station.to_string(),
                    draw_date,
                    category,
                    rank: *rank,
                    value,
                });
                *rank += 1;
            }
        }
    }

    out
}

/// Parse a constant CSS selector, logging instead of panicking on a typo.
pub(crate) fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::warn!(css, error = %e, "invalid selector");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 9).unwrap()
    }

    #[test]
    fn classify_label_covers_names_and_abbreviations() {
        assert_eq!(classify_label("Giải Đặc Biệt"), Some(PrizeCategory::Special));
        assert_eq!(classify_label("ĐB"), Some(PrizeCategory::Special));
        assert_eq!(classify_label("G.ĐB"), Some(PrizeCategory::Special));
        assert_eq!(classify_label("Giải nhất"), Some(PrizeCategory::First));
        assert_eq!(classify_label("G.1"), Some(PrizeCategory::First));
        assert_eq!(classify_label("G3"), Some(PrizeCategory::Third));
        assert_eq!(classify_label("Giải tư"), Some(PrizeCategory::Fourth));
        assert_eq!(classify_label("Giải Bảy"), Some(PrizeCategory::Seventh));
        assert_eq!(classify_label("Giải Tám"), Some(PrizeCategory::Eighth));
        assert_eq!(classify_label("Giải"), None);
        assert_eq!(classify_label(""), None);
    }

    #[test]
    fn classify_label_prefers_higher_prize_on_ties() {
        // Mentions both the special and the eighth prize.
        assert_eq!(classify_label("ĐB / G8"), Some(PrizeCategory::Special));
        assert_eq!(classify_label("Giải ba g7"), Some(PrizeCategory::Third));
    }

    #[test]
    fn cell_values_split_and_filter() {
        assert_eq!(cell_values("12345 - 67890"), vec!["12345", "67890"]);
        assert_eq!(cell_values("1.234.56"), vec!["234", "56"]);
        assert_eq!(cell_values("7 x 08"), vec!["08"]);
        assert_eq!(cell_values("(123)"), vec!["123"]);
        // A glued date is a digit run longer than any prize.
        assert!(cell_values("09/02/2026").is_empty());
    }

    #[test]
    fn station_label_matching_is_accent_and_space_insensitive() {
        let kws = crate::domain::station::keywords("TP");
        assert!(label_matches_station("Kết quả TP. Hồ Chí Minh", &kws));
        assert!(label_matches_station("XS Tp.HCM", &kws));
        assert!(!label_matches_station("Đồng Tháp", &kws));
        assert!(!label_matches_station("", &kws));
    }

    #[test]
    fn parse_prize_table_ranks_across_rows() {
        let html = Html::parse_fragment(
            r#"<table>
                <tr><th>Giải</th><th>TP. HCM</th></tr>
                <tr><td>G8</td><td>56</td></tr>
                <tr><td>G4</td><td><div>11111</div><div>22222</div></td></tr>
                <tr><td>G4</td><td>33333 - 44444</td></tr>
                <tr><td>Quảng cáo</td><td>99999</td></tr>
                <tr><td>ĐB</td><td>123456</td></tr>
            </table>"#,
        );
        let table_sel = Selector::parse("table").unwrap();
        let table = html.select(&table_sel).next().unwrap();

        let records = parse_prize_table(table, "TP", date());
        let summary: Vec<(PrizeCategory, usize, &str)> = records
            .iter()
            .map(|r| (r.category, r.rank, r.value.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (PrizeCategory::Eighth, 0, "56"),
                (PrizeCategory::Fourth, 0, "11111"),
                (PrizeCategory::Fourth, 1, "22222"),
                (PrizeCategory::Fourth, 2, "33333"),
                (PrizeCategory::Fourth, 3, "44444"),
                (PrizeCategory::Special, 0, "123456"),
            ]
        );
        assert!(records.iter().all(|r| r.station_code == "TP" && r.draw_date == date()));
    }
}
