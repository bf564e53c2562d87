//! Ticket matching.
//!
//! A ticket wins a drawn prize when its trailing digits equal the drawn value
//! (two digits for the eighth prize, up to all six for the special prize). Two
//! further prizes are derived from the special value alone:
//!
//! - Giải Phụ Đặc Biệt: every digit but the first equals the special value.
//! - Giải Khuyến Khích: exactly one digit differs, and it is not the first one.
//!
//! At most one of {special, sub-special, consolation} can be awarded.

use crate::domain::{DerivedPrize, MatchOutcome, MatchResult, PrizeCategory, PrizeKind, PrizeRecord, Ticket};

/// Every prize `ticket` wins against `records`, highest payout first.
///
/// A ticket that is not six ASCII digits simply wins nothing; validating user
/// input is the caller's job.
pub fn find_matches(ticket: &str, records: &[PrizeRecord]) -> MatchOutcome {
    let Some(ticket) = Ticket::new(ticket) else {
        return MatchOutcome::default();
    };
    if records.is_empty() {
        return MatchOutcome::default();
    }
    let ticket = ticket.as_str();

    let mut matches: Vec<MatchResult> = records
        .iter()
        .filter(|r| suffix_matches(ticket, &r.value))
        .map(|r| MatchResult::new(PrizeKind::Drawn(r.category), r.value.clone()))
        .collect();

    let special = records
        .iter()
        .find(|r| r.category == PrizeCategory::Special)
        .map(|r| r.value.as_str())
        .filter(|v| Ticket::new(v).is_some());

    if let Some(special) = special {
        let won_special = matches
            .iter()
            .any(|m| m.kind == PrizeKind::Drawn(PrizeCategory::Special));

        if let Some(derived) = derived_prize(ticket, special, won_special) {
            matches.push(MatchResult::new(PrizeKind::Derived(derived), special));
        }
    }

    // Stable: equal payouts keep discovery order.
    matches.sort_by(|a, b| b.prize_amount.cmp(&a.prize_amount));
    let total = matches.iter().map(|m| m.prize_amount).sum();

    MatchOutcome { matches, total }
}

/// Last `value.len()` digits of the ticket equal `value`.
pub fn suffix_matches(ticket: &str, value: &str) -> bool {
    !value.is_empty() && value.len() <= ticket.len() && ticket.ends_with(value)
}

fn derived_prize(ticket: &str, special: &str, won_special: bool) -> Option<DerivedPrize> {
    if won_special {
        return None;
    }
    if is_sub_special(ticket, special) {
        return Some(DerivedPrize::SubSpecial);
    }
    if is_consolation(ticket, special) {
        return Some(DerivedPrize::Consolation);
    }
    None
}

/// Positions 1..6 equal, tickets not identical.
pub fn is_sub_special(ticket: &str, special: &str) -> bool {
    ticket.len() == Ticket::LEN
        && special.len() == Ticket::LEN
        && ticket != special
        && ticket.as_bytes()[1..] == special.as_bytes()[1..]
}

/// Exactly one differing position, and it is not position 0.
///
/// A lone mismatch at position 0 is the sub-special case and is excluded.
pub fn is_consolation(ticket: &str, special: &str) -> bool {
    if ticket.len() != Ticket::LEN || special.len() != Ticket::LEN {
        return false;
    }
    let mut mismatches = ticket
        .bytes()
        .zip(special.bytes())
        .enumerate()
        .filter(|(_, (t, s))| t != s)
        .map(|(idx, _)| idx);

    match (mismatches.next(), mismatches.next()) {
        (Some(idx), None) => idx != 0,
        _ => false,
    }
}
