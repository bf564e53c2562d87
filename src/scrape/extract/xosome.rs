//! xoso.me: one `table.kqxs` (or `.box_kqxs` block) per station.
//!
//! The station name sits in the table's `th` cells, in the heading element just
//! before the table, or in a `data-station` attribute, depending on the page
//! template in use.

use chrono::NaiveDate;
use scraper::{ElementRef, Html};

use super::{Extractor, element_text, label_matches_station, parse_prize_table, selector};
use crate::domain::{PrizeRecord, station};

pub struct XosoMe;

impl XosoMe {
    const CANDIDATES: &'static str = "table.kqxs, .box_kqxs";

    fn label_text(candidate: ElementRef<'_>) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(th) = selector("th") {
            parts.extend(candidate.select(&th).map(element_text));
        }
        if let Some(prev) = candidate.prev_siblings().find_map(ElementRef::wrap) {
            parts.push(element_text(prev));
        }
        if let Some(attr) = candidate.value().attr("data-station") {
            parts.push(attr.to_string());
        }

        parts.join(" ")
    }
}

impl Extractor for XosoMe {
    fn extract(&self, markup: &str, station_code: &str, draw_date: NaiveDate) -> Vec<PrizeRecord> {
        let Some(candidates) = selector(Self::CANDIDATES) else {
            return Vec::new();
        };
        let keywords = station::keywords(station_code);
        let document = Html::parse_document(markup);

        let target = document
            .select(&candidates)
            .find(|c| label_matches_station(&Self::label_text(*c), &keywords));

        match target {
            Some(table) => parse_prize_table(table, station_code, draw_date),
            None => {
                tracing::debug!(station = station_code, "xoso.me: no table for station");
                Vec::new()
            }
        }
    }
}
