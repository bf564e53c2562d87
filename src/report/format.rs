//! Formatted terminal output.
//!
//! Formatting lives here so the pipeline and the matcher only deal in values,
//! and output changes stay in one file.

use chrono::NaiveDate;

use crate::app::pipeline::{CheckOutput, CleanupReport, RecordOrigin};
use crate::domain::{PrizeCategory, PrizeRecord, Station, station};

const BILLION: u64 = 1_000_000_000;
const MILLION: u64 = 1_000_000;

/// Human-readable VND amount: `2 tỷ`, `6,8 triệu`, `400.000đ`.
///
/// Amounts of a million or more are shown in the large unit with at most one
/// decimal (Vietnamese decimal comma).
pub fn format_prize_amount(amount: u64) -> String {
    if amount >= BILLION {
        return format!("{} tỷ", scaled(amount, BILLION));
    }
    if amount >= MILLION {
        return format!("{} triệu", scaled(amount, MILLION));
    }
    format!("{}đ", group_thousands(amount))
}

/// `amount / unit` rounded to one decimal, trailing `,0` dropped.
fn scaled(amount: u64, unit: u64) -> String {
    let tenths = (amount * 10 + unit / 2) / unit;
    let (whole, frac) = (tenths / 10, tenths % 10);
    if frac == 0 {
        whole.to_string()
    } else {
        format!("{whole},{frac}")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn station_label(code: &str) -> String {
    match station::find(code) {
        Some(s) => format!("{} ({})", s.name, s.code),
        None => code.to_string(),
    }
}

/// Ticket verdict with each winning prize and the total.
pub fn format_check_summary(output: &CheckOutput) -> String {
    let mut out = String::new();

    out.push_str(&format!("Ticket:  {}\n", output.ticket.as_str()));
    out.push_str(&format!("Station: {}\n", station_label(&output.station)));
    out.push_str(&format!("Date:    {}\n", output.draw_date.format("%d/%m/%Y")));
    let origin = match output.origin {
        RecordOrigin::Cached => "store",
        RecordOrigin::Scraped => "scraped",
    };
    out.push_str(&format!("Results: {} values ({origin})\n\n", output.records.len()));

    if !output.outcome.is_win() {
        out.push_str("No prize. Better luck next time.\n");
        return out;
    }

    out.push_str("Winning prizes:\n");
    for m in &output.outcome.matches {
        out.push_str(&format!(
            "  {:<20} {:>8}  {:>12}\n",
            m.name,
            m.value,
            format_prize_amount(m.prize_amount)
        ));
    }
    out.push_str(&format!("\nTotal: {}\n", format_prize_amount(output.outcome.total)));
    out
}

/// Results grouped by tier, special prize first, one line per tier.
pub fn format_results_table(station: &str, draw_date: NaiveDate, records: &[PrizeRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} - {}\n",
        station_label(station),
        draw_date.format("%d/%m/%Y")
    ));

    for category in PrizeCategory::ALL {
        let mut row: Vec<&PrizeRecord> = records.iter().filter(|r| r.category == category).collect();
        if row.is_empty() {
            continue;
        }
        row.sort_by_key(|r| r.rank);
        let values: Vec<&str> = row.iter().map(|r| r.value.as_str()).collect();
        out.push_str(&format!("{:<4} {}\n", category.short_name(), values.join("  ")));
    }
    out
}

/// Station catalog as an aligned table.
pub fn format_stations(stations: &[&Station]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<5} {:<12} {:<14} {}\n", "code", "slug", "name", "day"));
    out.push_str(&format!("{:-<5} {:-<12} {:-<14} {:-<3}\n", "", "", "", ""));
    for s in stations {
        out.push_str(&format!(
            "{:<5} {:<12} {:<14} {}\n",
            s.code,
            s.slug,
            s.name,
            weekday_name(s.draw_day)
        ));
    }
    out
}

pub fn format_cleanup(report: &CleanupReport) -> String {
    format!(
        "Removed {} record(s) drawn before {}.\n",
        report.removed,
        report.cutoff.format("%Y-%m-%d")
    )
}

fn weekday_name(day: u8) -> &'static str {
    match day {
        0 => "Chủ Nhật",
        1 => "Thứ Hai",
        2 => "Thứ Ba",
        3 => "Thứ Tư",
        4 => "Thứ Năm",
        5 => "Thứ Sáu",
        6 => "Thứ Bảy",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DerivedPrize, MatchOutcome, MatchResult, PrizeKind, Ticket};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 9).unwrap()
    }

    fn record(category: PrizeCategory, rank: usize, value: &str) -> PrizeRecord {
        PrizeRecord {
            station_code: "TP".to_string(),
            draw_date: date(),
            category,
            rank,
            value: value.to_string(),
        }
    }

    #[test]
    fn prize_amount_units() {
        assert_eq!(format_prize_amount(2_000_000_000), "2 tỷ");
        assert_eq!(format_prize_amount(30_000_000), "30 triệu");
        assert_eq!(format_prize_amount(6_800_000), "6,8 triệu");
        assert_eq!(format_prize_amount(400_000), "400.000đ");
        assert_eq!(format_prize_amount(100_000), "100.000đ");
        assert_eq!(format_prize_amount(0), "0đ");
        assert_eq!(format_prize_amount(1_234_567), "1,2 triệu");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1.000");
        assert_eq!(group_thousands(999_999), "999.999");
    }

    #[test]
    fn results_table_groups_by_tier() {
        let records = vec![
            record(PrizeCategory::Sixth, 1, "0000"),
            record(PrizeCategory::Eighth, 0, "56"),
            record(PrizeCategory::Sixth, 0, "3456"),
            record(PrizeCategory::Special, 0, "123456"),
        ];
        let table = format_results_table("TP", date(), &records);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "TP. HCM (TP) - 09/02/2026");
        assert!(lines[1].starts_with("ĐB") && lines[1].ends_with("123456"));
        assert!(lines[2].ends_with("3456  0000"));
        assert!(lines[3].ends_with("56"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn check_summary_lists_wins_and_total() {
        let output = CheckOutput {
            ticket: Ticket::new("923456").unwrap(),
            station: "TP".to_string(),
            draw_date: date(),
            records: vec![record(PrizeCategory::Special, 0, "123456")],
            outcome: MatchOutcome {
                matches: vec![MatchResult::new(PrizeKind::Derived(DerivedPrize::SubSpecial), "123456")],
                total: 50_000_000,
            },
            origin: RecordOrigin::Cached,
        };
        let text = format_check_summary(&output);
        assert!(text.contains("Giải Phụ Đặc Biệt"));
        assert!(text.contains("Total: 50 triệu"));
        assert!(text.contains("(store)"));
    }

    #[test]
    fn check_summary_without_win() {
        let output = CheckOutput {
            ticket: Ticket::new("000000").unwrap(),
            station: "XX".to_string(),
            draw_date: date(),
            records: vec![record(PrizeCategory::Eighth, 0, "56")],
            outcome: MatchOutcome::default(),
            origin: RecordOrigin::Scraped,
        };
        let text = format_check_summary(&output);
        assert!(text.contains("Station: XX"));
        assert!(text.contains("No prize"));
    }

    #[test]
    fn stations_table_has_one_row_each() {
        let list = station::by_draw_day(1);
        let text = format_stations(&list);
        assert_eq!(text.lines().count(), 2 + list.len());
        assert!(text.contains("Thứ Hai"));
    }
}
