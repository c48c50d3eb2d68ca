//! Raw record normalization
//!
//! Turns the data service's loosely-typed records into canonical
//! [`Transaction`]s. The parser fails closed: absent optional metadata gets
//! documented defaults, out-of-range scores are clamped to the nearest valid
//! boundary, and only records missing the identity/timing essentials are
//! dropped. Clamps and drops are logged for upstream diagnosis.

use chrono::{DateTime, NaiveDateTime, Utc};
use ledgerlens_types::transaction::{RawTransaction, Transaction};
use ledgerlens_types::{AccountId, TransactionId};
use tracing::warn;

/// Default payment rail when the service reports none
const UNKNOWN_METHOD: &str = "Unknown";

/// Normalize a batch of raw records.
///
/// Records without an id, a parseable timestamp, or both account ids are
/// dropped with a warning; everything else is defaulted or clamped.
pub fn parse_records(raw: Vec<RawTransaction>) -> Vec<Transaction> {
    let received = raw.len();
    let parsed: Vec<Transaction> = raw.into_iter().filter_map(parse_record).collect();
    if parsed.len() < received {
        warn!(
            received,
            parsed = parsed.len(),
            "dropped records missing id, timestamp, or accounts"
        );
    }
    parsed
}

fn parse_record(raw: RawTransaction) -> Option<Transaction> {
    let id = match raw.id {
        Some(id) if !id.is_empty() => TransactionId::new(id),
        _ => {
            warn!("record without transaction id dropped");
            return None;
        }
    };
    let timestamp = match raw.timestamp.as_deref().and_then(parse_timestamp) {
        Some(ts) => ts,
        None => {
            warn!(tx = %id, raw = ?raw.timestamp, "record with unparseable timestamp dropped");
            return None;
        }
    };
    let (from_account, to_account) = match (raw.from_account, raw.to_account) {
        (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => {
            (AccountId::new(from), AccountId::new(to))
        }
        _ => {
            warn!(tx = %id, "record without both account ids dropped");
            return None;
        }
    };

    let amount = raw.amount.unwrap_or(0.0);
    let amount = if amount.is_finite() && amount >= 0.0 {
        amount
    } else {
        warn!(tx = %id, amount, "negative or non-finite amount clamped to 0");
        0.0
    };

    Some(Transaction {
        id,
        timestamp,
        amount,
        from_account,
        to_account,
        suspicious_score: clamp_score(raw.suspicious_score, &raw.pattern_type),
        pattern_type: raw.pattern_type,
        scenario: raw.scenario,
        location: raw.location,
        transaction_method: raw
            .transaction_method
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_METHOD.to_string()),
        bank_details: raw.bank_details,
        layering_analysis: raw.layering_analysis,
    })
}

/// Clamp a wire score into `[0, 1]`.
///
/// Out-of-range scores are an external-service contract violation; the
/// engine takes the nearest valid boundary instead of crashing, and logs
/// the violation so the upstream bug stays visible.
fn clamp_score(score: Option<f64>, pattern: &Option<String>) -> f64 {
    let score = score.unwrap_or(0.0);
    if score.is_nan() {
        warn!(?pattern, "NaN suspicion score clamped to 0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&score) {
        let clamped = score.clamp(0.0, 1.0);
        warn!(score, clamped, "out-of-range suspicion score clamped");
        return clamped;
    }
    score
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // Legacy endpoints emit naive "YYYY-MM-DD HH:MM:SS", treated as UTC.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
