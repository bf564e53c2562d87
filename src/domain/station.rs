//! Southern-region (Miền Nam) station catalog.
//!
//! Stations are addressed by short codes (`TP`, `DT`, ...). Some sites and older
//! data use long slugs (`tphcm`, `dongthap`, ...) instead, and a code may carry a
//! trailing digit when one station draws on several weekdays (`TP2`). All of those
//! resolve to the same entry.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::normalize::compact;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub code: &'static str,
    /// Long slug used by some sources and older stored rows.
    pub slug: &'static str,
    pub name: &'static str,
    /// Draw weekday, 0 = Sunday .. 6 = Saturday.
    pub draw_day: u8,
    pub region: &'static str,
    /// Spellings a results page may use for this station's table.
    #[serde(skip)]
    pub aliases: &'static [&'static str],
}

macro_rules! station {
    ($code:expr, $slug:expr, $name:expr, $day:expr, [$($alias:expr),+ $(,)?]) => {
        Station {
            code: $code,
            slug: $slug,
            name: $name,
            draw_day: $day,
            region: "MN",
            aliases: &[$($alias),+],
        }
    };
}

pub const STATIONS: &[Station] = &[
    station!("TG", "tiengiang", "Tiền Giang", 0, ["tiền giang"]),
    station!("KG", "kiengiang", "Kiên Giang", 0, ["kiên giang"]),
    station!("DL", "dalat", "Đà Lạt", 0, ["đà lạt", "lâm đồng"]),
    station!("TP", "tphcm", "TP. HCM", 1, ["tp.hcm", "hồ chí minh", "tphcm"]),
    station!("DT", "dongthap", "Đồng Tháp", 1, ["đồng tháp"]),
    station!("CM", "camau", "Cà Mau", 1, ["cà mau"]),
    station!("BT", "bentre", "Bến Tre", 2, ["bến tre"]),
    station!("VT", "vungtau", "Vũng Tàu", 2, ["vũng tàu"]),
    station!("BL", "baclieu", "Bạc Liêu", 2, ["bạc liêu"]),
    station!("DN", "dongnai", "Đồng Nai", 3, ["đồng nai"]),
    station!("CT", "cantho", "Cần Thơ", 3, ["cần thơ"]),
    station!("ST", "soctrang", "Sóc Trăng", 3, ["sóc trăng"]),
    station!("TN", "tayninh", "Tây Ninh", 4, ["tây ninh"]),
    station!("AG", "angiang", "An Giang", 4, ["an giang"]),
    station!("BTH", "binhthuan", "Bình Thuận", 4, ["bình thuận"]),
    station!("VL", "vinhlong", "Vĩnh Long", 5, ["vĩnh long"]),
    station!("BD", "binhduong", "Bình Dương", 5, ["bình dương"]),
    station!("TV", "travinh", "Trà Vinh", 5, ["trà vinh"]),
    station!("TP", "tphcm", "TP. HCM", 6, ["tp.hcm", "hồ chí minh", "tphcm"]),
    station!("LA", "longan", "Long An", 6, ["long an"]),
    station!("BP", "binhphuoc", "Bình Phước", 6, ["bình phước"]),
    station!("HG", "haugiang", "Hậu Giang", 6, ["hậu giang"]),
];

/// Strip the weekday disambiguation digit(s) and lower-case: `"TP2"` -> `"tp"`.
pub fn base_code(identifier: &str) -> String {
    identifier
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .to_lowercase()
}

/// Look up a station by code or slug, ignoring case and trailing digits.
///
/// Codes drawn on two weekdays (TP. HCM) return the first entry; the aliases
/// are identical so it does not matter for table matching.
pub fn find(identifier: &str) -> Option<&'static Station> {
    let key = base_code(identifier);
    if key.is_empty() {
        return None;
    }
    STATIONS
        .iter()
        .find(|s| s.code.eq_ignore_ascii_case(&key) || s.slug == key)
}

/// Store and display key for an identifier: the catalog code plus any
/// weekday digit (`"tphcm"` -> `"TP"`, `"tp2"` -> `"TP2"`).
///
/// Identifiers missing from the catalog are only trimmed.
pub fn canonical_code(identifier: &str) -> String {
    let trimmed = identifier.trim();
    match find(trimmed) {
        Some(station) => {
            let stem = trimmed.trim_end_matches(|c: char| c.is_ascii_digit());
            format!("{}{}", station.code, &trimmed[stem.len()..])
        }
        None => trimmed.to_string(),
    }
}

/// Compacted keywords to look for in a results page for this identifier.
///
/// Unknown identifiers fall back to the stripped identifier itself, so a caller
/// passing a slug we don't list (`"haugiang"`) still has a chance to match.
pub fn keywords(identifier: &str) -> Vec<String> {
    let mut out: Vec<String> = match find(identifier) {
        Some(station) => station
            .aliases
            .iter()
            .chain(std::iter::once(&station.name))
            .chain(std::iter::once(&station.slug))
            .map(|alias| compact(alias))
            .collect(),
        None => vec![compact(&base_code(identifier))],
    };
    out.retain(|k| !k.is_empty());
    out.sort();
    out.dedup();
    out
}

/// Stations drawing on a weekday (0 = Sunday).
pub fn by_draw_day(day: u8) -> Vec<&'static Station> {
    STATIONS.iter().filter(|s| s.draw_day == day).collect()
}

/// Weekday index of a date, 0 = Sunday.
pub fn draw_day_of(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
