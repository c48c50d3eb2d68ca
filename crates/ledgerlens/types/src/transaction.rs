//! Transaction types for LedgerLens
//!
//! The canonical [`Transaction`] entity, the [`RawTransaction`] wire shape
//! received from the data service, and the [`RiskTier`] derivation.
//! **ONE RISK RULE** - tier derivation lives here and nowhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a transaction
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a new transaction ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for an account
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display-truncated form: at most 8 characters followed by an ellipsis
    pub fn display_label(&self) -> String {
        if self.0.chars().count() > 8 {
            let head: String = self.0.chars().take(8).collect();
            format!("{head}\u{2026}")
        } else {
            self.0.clone()
        }
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Three-level risk classification derived solely from `suspicious_score`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Score in `[0, 0.5]`
    Normal,
    /// Score in `(0.5, 0.8]`
    Suspicious,
    /// Score in `(0.8, 1.0]`
    Critical,
}

impl RiskTier {
    /// Derive the tier from a suspicion score.
    ///
    /// This is the single authoritative rule; every renderer, filter, and
    /// statistic goes through it.
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            RiskTier::Critical
        } else if score > 0.5 {
            RiskTier::Suspicious
        } else {
            RiskTier::Normal
        }
    }

    /// Whether this tier warrants investigation (suspicious or critical)
    pub fn is_flagged(&self) -> bool {
        !matches!(self, RiskTier::Normal)
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Normal => write!(f, "normal"),
            RiskTier::Suspicious => write!(f, "suspicious"),
            RiskTier::Critical => write!(f, "critical"),
        }
    }
}

/// Geographic origin of a transaction, as reported by the data service
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// City name, empty when unreported
    #[serde(default)]
    pub city: String,
    /// State or province, empty when unreported
    #[serde(default)]
    pub state: String,
    /// Country name, empty when unreported
    #[serde(default)]
    pub country: String,
    /// Broader region tag, empty when unreported
    #[serde(default)]
    pub region: String,
}

/// Banking metadata attached to a transaction
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BankDetails {
    /// Name of the originating bank
    #[serde(default)]
    pub bank_name: String,
    /// Branch routing code
    #[serde(default)]
    pub ifsc_code: String,
}

/// One layer of the service's layering analysis
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerReport {
    /// Human-readable layer description
    #[serde(default)]
    pub description: String,
    /// Patterns the service detected at this layer
    #[serde(default)]
    pub patterns_detected: Vec<String>,
    /// Risk indicators raised at this layer
    #[serde(default)]
    pub risk_indicators: Vec<String>,
    /// Accounts connected through this layer
    #[serde(default)]
    pub connected_accounts: u32,
    /// Threat level label assigned by the service
    #[serde(default)]
    pub threat_level: String,
    /// Service confidence in the pattern match, `[0, 1]`
    #[serde(default)]
    pub pattern_match_confidence: f64,
}

/// Multi-layer laundering analysis supplied by the data service.
///
/// Opaque to the engine except for display; never feeds tier derivation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayeringAnalysis {
    /// Layer 1: extraction-stage findings
    #[serde(default, rename = "layer_1_extraction")]
    pub extraction: Option<LayerReport>,
    /// Layer 2: processing-stage findings
    #[serde(default, rename = "layer_2_processing")]
    pub processing: Option<LayerReport>,
    /// Layer 3: integration-stage findings
    #[serde(default, rename = "layer_3_integration")]
    pub integration: Option<LayerReport>,
}

/// A normalized transaction record, immutable once loaded
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: TransactionId,
    /// When the transaction occurred
    pub timestamp: DateTime<Utc>,
    /// Monetary value, non-negative
    pub amount: f64,
    /// Sending account
    pub from_account: AccountId,
    /// Receiving account
    pub to_account: AccountId,
    /// Suspicion score, always within `[0, 1]` after parsing
    pub suspicious_score: f64,
    /// Optional classification tag (e.g. structuring, layering)
    pub pattern_type: Option<String>,
    /// Scenario the record was generated under, if reported
    pub scenario: Option<String>,
    /// Geographic origin, when reported
    pub location: Option<Location>,
    /// Payment rail, `"Unknown"` when unreported
    pub transaction_method: String,
    /// Banking metadata, when reported
    pub bank_details: Option<BankDetails>,
    /// Service-side layering analysis, when reported
    pub layering_analysis: Option<LayeringAnalysis>,
}

impl Transaction {
    /// Derived risk tier (see [`RiskTier::from_score`])
    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_score(self.suspicious_score)
    }

    /// Whether the given account participates in this transaction
    pub fn touches(&self, account: &AccountId) -> bool {
        &self.from_account == account || &self.to_account == account
    }

    /// Whether this transaction shares an account with another
    pub fn shares_account_with(&self, other: &Transaction) -> bool {
        self.touches(&other.from_account) || self.touches(&other.to_account)
    }
}

/// A raw transaction record as received from the data service.
///
/// Everything beyond the timestamp is optional on the wire; the parser fails
/// closed with documented defaults rather than rejecting the record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawTransaction {
    /// Transaction identifier; some service endpoints emit `transaction_id`
    #[serde(default, alias = "transaction_id")]
    pub id: Option<String>,
    /// Timestamp string, RFC 3339 or `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Monetary value
    #[serde(default)]
    pub amount: Option<f64>,
    /// Sending account identifier
    #[serde(default)]
    pub from_account: Option<String>,
    /// Receiving account identifier
    #[serde(default)]
    pub to_account: Option<String>,
    /// Suspicion score; may violate `[0, 1]` on the wire
    #[serde(default)]
    pub suspicious_score: Option<f64>,
    /// Classification tag
    #[serde(default)]
    pub pattern_type: Option<String>,
    /// Scenario tag
    #[serde(default)]
    pub scenario: Option<String>,
    /// Geographic origin; legacy endpoints call this `aadhar_location`
    #[serde(default, alias = "aadhar_location")]
    pub location: Option<Location>,
    /// Payment rail
    #[serde(default)]
    pub transaction_method: Option<String>,
    /// Banking metadata
    #[serde(default)]
    pub bank_details: Option<BankDetails>,
    /// Layering analysis payload
    #[serde(default)]
    pub layering_analysis: Option<LayeringAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_risk_tier_boundaries() {
        assert_eq!(RiskTier::from_score(0.0), RiskTier::Normal);
        assert_eq!(RiskTier::from_score(0.5), RiskTier::Normal);
        assert_eq!(RiskTier::from_score(0.6), RiskTier::Suspicious);
        assert_eq!(RiskTier::from_score(0.8), RiskTier::Suspicious);
        assert_eq!(RiskTier::from_score(0.85), RiskTier::Critical);
        assert_eq!(RiskTier::from_score(1.0), RiskTier::Critical);
    }

    #[test]
    fn test_display_label_truncates_long_ids() {
        let account = AccountId::new("ACC_001_primary");
        assert_eq!(account.display_label(), "ACC_001_\u{2026}");

        let short = AccountId::new("ACC_01");
        assert_eq!(short.display_label(), "ACC_01");
    }

    #[test]
    fn test_raw_transaction_accepts_legacy_field_names() {
        let raw: RawTransaction = serde_json::from_str(
            r#"{
                "transaction_id": "TX001",
                "timestamp": "2024-03-01T10:00:00Z",
                "amount": 9850.0,
                "from_account": "ACC_A",
                "to_account": "ACC_B",
                "suspicious_score": 0.92,
                "aadhar_location": {"city": "Mumbai", "country": "India"}
            }"#,
        )
        .expect("raw record should deserialize");

        assert_eq!(raw.id.as_deref(), Some("TX001"));
        let location = raw.location.expect("aliased location field");
        assert_eq!(location.city, "Mumbai");
        assert_eq!(location.state, "");
    }

    proptest! {
        #[test]
        fn property_tier_is_pure_function_of_score(score in 0.0f64..=1.0) {
            // Same score, same tier, however many times it is derived.
            let first = RiskTier::from_score(score);
            let second = RiskTier::from_score(score);
            prop_assert_eq!(first, second);

            let expected = if score > 0.8 {
                RiskTier::Critical
            } else if score > 0.5 {
                RiskTier::Suspicious
            } else {
                RiskTier::Normal
            };
            prop_assert_eq!(first, expected);
        }
    }
}
