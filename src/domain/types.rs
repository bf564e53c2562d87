//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the extractors and handed to the matcher
//! - persisted by the record store
//! - printed as JSON by the CLI

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The nine drawn prize tiers, highest payout first.
///
/// The declaration order is load-bearing: it is the priority order used when a
/// row label matches more than one category, and the sort order of stored rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeCategory {
    Special,
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl PrizeCategory {
    pub const ALL: [PrizeCategory; 9] = [
        PrizeCategory::Special,
        PrizeCategory::First,
        PrizeCategory::Second,
        PrizeCategory::Third,
        PrizeCategory::Fourth,
        PrizeCategory::Fifth,
        PrizeCategory::Sixth,
        PrizeCategory::Seventh,
        PrizeCategory::Eighth,
    ];

    /// Static configuration for this tier.
    pub fn config(self) -> &'static PrizeCategoryConfig {
        // PRIZE_CONFIGS is declared in `ALL` order.
        &PRIZE_CONFIGS[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.config().name
    }

    pub fn short_name(self) -> &'static str {
        self.config().short_name
    }

    /// Payout in VND.
    pub fn prize_amount(self) -> u64 {
        self.config().prize_amount
    }

    /// Stable identifier used in JSON and by the store.
    pub fn as_str(self) -> &'static str {
        match self {
            PrizeCategory::Special => "special",
            PrizeCategory::First => "first",
            PrizeCategory::Second => "second",
            PrizeCategory::Third => "third",
            PrizeCategory::Fourth => "fourth",
            PrizeCategory::Fifth => "fifth",
            PrizeCategory::Sixth => "sixth",
            PrizeCategory::Seventh => "seventh",
            PrizeCategory::Eighth => "eighth",
        }
    }
}

/// Per-tier configuration: naming, shape of the drawn value, payout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeCategoryConfig {
    pub category: PrizeCategory,
    pub name: &'static str,
    pub short_name: &'static str,
    /// Number of digits in a drawn value for this tier.
    pub digits: usize,
    /// Number of values drawn for this tier.
    pub count: usize,
    pub prize_amount: u64,
}

pub const PRIZE_CONFIGS: [PrizeCategoryConfig; 9] = [
    PrizeCategoryConfig { category: PrizeCategory::Special, name: "Giải Đặc Biệt", short_name: "ĐB", digits: 6, count: 1, prize_amount: 2_000_000_000 },
    PrizeCategoryConfig { category: PrizeCategory::First, name: "Giải Nhất", short_name: "G1", digits: 5, count: 1, prize_amount: 30_000_000 },
    PrizeCategoryConfig { category: PrizeCategory::Second, name: "Giải Nhì", short_name: "G2", digits: 5, count: 1, prize_amount: 15_000_000 },
    PrizeCategoryConfig { category: PrizeCategory::Third, name: "Giải Ba", short_name: "G3", digits: 5, count: 2, prize_amount: 10_000_000 },
    PrizeCategoryConfig { category: PrizeCategory::Fourth, name: "Giải Tư", short_name: "G4", digits: 5, count: 7, prize_amount: 3_000_000 },
    PrizeCategoryConfig { category: PrizeCategory::Fifth, name: "Giải Năm", short_name: "G5", digits: 4, count: 1, prize_amount: 1_000_000 },
    PrizeCategoryConfig { category: PrizeCategory::Sixth, name: "Giải Sáu", short_name: "G6", digits: 4, count: 3, prize_amount: 400_000 },
    PrizeCategoryConfig { category: PrizeCategory::Seventh, name: "Giải Bảy", short_name: "G7", digits: 3, count: 1, prize_amount: 200_000 },
    PrizeCategoryConfig { category: PrizeCategory::Eighth, name: "Giải Tám", short_name: "G8", digits: 2, count: 1, prize_amount: 100_000 },
];

/// Prizes computed from the special value rather than drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedPrize {
    /// Giải Phụ Đặc Biệt: last five digits equal the special value's.
    #[serde(rename = "giai_phu_db")]
    SubSpecial,
    /// Giải Khuyến Khích: one digit off the special value, not the first one.
    #[serde(rename = "giai_khuyen_khich")]
    Consolation,
}

impl DerivedPrize {
    pub fn display_name(self) -> &'static str {
        match self {
            DerivedPrize::SubSpecial => "Giải Phụ Đặc Biệt",
            DerivedPrize::Consolation => "Giải Khuyến Khích",
        }
    }

    pub fn prize_amount(self) -> u64 {
        match self {
            DerivedPrize::SubSpecial => 50_000_000,
            DerivedPrize::Consolation => 6_800_000,
        }
    }
}

/// One drawn value for one station and date.
///
/// The key `(station_code, draw_date, category, rank)` is unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeRecord {
    pub station_code: String,
    pub draw_date: NaiveDate,
    pub category: PrizeCategory,
    /// Zero-based position within the category, in page order.
    pub rank: usize,
    pub value: String,
}

impl PrizeRecord {
    /// The value is 2 to 6 ASCII digits.
    pub fn has_valid_value(&self) -> bool {
        (2..=Ticket::LEN).contains(&self.value.len()) && self.value.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            station_code: self.station_code.clone(),
            draw_date: self.draw_date,
            category: self.category,
            rank: self.rank,
        }
    }
}

/// Uniqueness key for stored records. Orders by station, date, category, rank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub station_code: String,
    pub draw_date: NaiveDate,
    pub category: PrizeCategory,
    pub rank: usize,
}

/// What a match was awarded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrizeKind {
    Drawn(PrizeCategory),
    Derived(DerivedPrize),
}

impl PrizeKind {
    pub fn display_name(self) -> &'static str {
        match self {
            PrizeKind::Drawn(c) => c.display_name(),
            PrizeKind::Derived(d) => d.display_name(),
        }
    }

    pub fn prize_amount(self) -> u64 {
        match self {
            PrizeKind::Drawn(c) => c.prize_amount(),
            PrizeKind::Derived(d) => d.prize_amount(),
        }
    }
}

/// One winning prize for a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub kind: PrizeKind,
    pub name: String,
    /// The drawn value that matched, or the special value for derived prizes.
    pub value: String,
    pub prize_amount: u64,
}

impl MatchResult {
    pub fn new(kind: PrizeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            value: value.into(),
            prize_amount: kind.prize_amount(),
        }
    }
}

/// Ranked matches plus their summed payout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total: u64,
}

impl MatchOutcome {
    pub fn is_win(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// A ticket number: exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticket(String);

impl Ticket {
    pub const LEN: usize = 6;

    /// Accept a string that already is six digits.
    pub fn new(raw: &str) -> Option<Self> {
        if raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    /// Drop every non-digit (spaces, dashes, dots typed by users) then validate.
    pub fn clean(raw: &str) -> Option<Self> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        Self::new(&digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticket {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ticket::new(&value).ok_or_else(|| format!("'{value}' is not a 6-digit ticket"))
    }
}

impl From<Ticket> for String {
    fn from(value: Ticket) -> Self {
        value.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
