//! Draw date helpers.
//!
//! Draws are published in Vietnam time (UTC+7). A server running in UTC would
//! otherwise consider today's evening draw to be "in the future" until 07:00.

use chrono::{Duration, NaiveDate, Utc};

/// Offset of Vietnam local time from UTC.
const VIETNAM_UTC_OFFSET_HOURS: i64 = 7;

/// Parse a strict `YYYY-MM-DD` draw date.
pub fn parse_draw_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // chrono accepts unpadded fields; results pages and the store never do.
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Today's calendar date in Vietnam.
pub fn vietnam_today() -> NaiveDate {
    (Utc::now() + Duration::hours(VIETNAM_UTC_OFFSET_HOURS)).date_naive()
}

/// Expand `{dd}`, `{mm}`, `{yyyy}` in a source URL template.
pub fn format_source_url(template: &str, date: NaiveDate) -> String {
    template
        .replace("{dd}", &date.format("%d").to_string())
        .replace("{mm}", &date.format("%m").to_string())
        .replace("{yyyy}", &date.format("%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_draw_date_is_strict() {
        assert_eq!(
            parse_draw_date("2026-02-09"),
            NaiveDate::from_ymd_opt(2026, 2, 9)
        );
        assert!(parse_draw_date("2026-2-9").is_none());
        assert!(parse_draw_date("09-02-2026").is_none());
        assert!(parse_draw_date("2026-02-30").is_none());
    }

    #[test]
    fn source_url_uses_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
        assert_eq!(
            format_source_url("https://xoso.me/xsmn-{dd}-{mm}-{yyyy}.html", date),
            "https://xoso.me/xsmn-09-02-2026.html"
        );
    }
}
