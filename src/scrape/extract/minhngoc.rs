//! minhngoc.net.vn: one `table.rightcl` per station, with the province name in
//! a dedicated `.tinh` cell (older templates use `.title` or a `th`).

use chrono::NaiveDate;
use scraper::{ElementRef, Html};

use super::{Extractor, element_text, label_matches_station, parse_prize_table, selector};
use crate::domain::{PrizeRecord, station};

pub struct MinhNgoc;

impl MinhNgoc {
    const CANDIDATES: &'static str = "table.rightcl, table.box_kqxs";
    const STATION_CELLS: &'static str = ".tinh, .title, th";

    fn label_text(candidate: ElementRef<'_>) -> String {
        let Some(cells) = selector(Self::STATION_CELLS) else {
            return String::new();
        };
        candidate
            .select(&cells)
            .map(element_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Extractor for MinhNgoc {
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
                tracing::debug!(station = station_code, "minhngoc: no table for station");
                Vec::new()
            }
        }
    }
}
