//! Engine vocabulary for LedgerLens
//!
//! View modes, playback states, search scopes, load parameters, and the
//! summary statistics the hosting UI displays.

use crate::transaction::{AccountId, RiskTier, Transaction, TransactionId};
use serde::{Deserialize, Serialize};

/// One of the two mutually exclusive visual layouts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Temporal scatter: time on x, amount on y
    Timeline,
    /// Force-directed account network
    Network,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Timeline => write!(f, "timeline"),
            ViewMode::Network => write!(f, "network"),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timeline" => Ok(ViewMode::Timeline),
            "network" => Ok(ViewMode::Network),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

/// Playback state of the timeline animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Not running; `current_frame` is 0
    Idle,
    /// Frame loop scheduled and advancing
    Playing,
    /// Frame loop suspended at the current frame
    Paused,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
        }
    }
}

/// Field group a search term is matched against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Transaction id, both accounts, location fields, pattern type, amount
    All,
    /// Sending and receiving account ids
    Account,
    /// Transaction id only
    Id,
    /// Amount, matched as text
    Amount,
}

impl std::str::FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SearchScope::All),
            "account" => Ok(SearchScope::Account),
            "id" => Ok(SearchScope::Id),
            "amount" => Ok(SearchScope::Amount),
            other => Err(format!("unknown search scope: {other}")),
        }
    }
}

/// Time-window granularity applied to a load
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeQuantum {
    /// One week of history
    OneWeek,
    /// One month of history
    OneMonth,
    /// Six months of history
    SixMonths,
    /// One year of history
    OneYear,
}

impl TimeQuantum {
    /// Wire code understood by the data service
    pub fn as_code(&self) -> &'static str {
        match self {
            TimeQuantum::OneWeek => "1w",
            TimeQuantum::OneMonth => "1m",
            TimeQuantum::SixMonths => "6m",
            TimeQuantum::OneYear => "1y",
        }
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        TimeQuantum::OneMonth
    }
}

impl std::str::FromStr for TimeQuantum {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1w" => Ok(TimeQuantum::OneWeek),
            "1m" => Ok(TimeQuantum::OneMonth),
            "6m" => Ok(TimeQuantum::SixMonths),
            "1y" => Ok(TimeQuantum::OneYear),
            other => Err(format!("unknown time quantum: {other}")),
        }
    }
}

/// Named filter selecting which subset of transactions a load fetches
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario(String);

impl Scenario {
    /// Create a scenario filter
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The unfiltered scenario
    pub fn all() -> Self {
        Self("all".to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::all()
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The entity currently selected for highlighting, if any
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    /// A transaction in the temporal scatter
    Transaction(TransactionId),
    /// An account node in the network view
    Node(AccountId),
}

/// Aggregate statistics over a loaded transaction set
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineStats {
    /// Number of loaded transactions
    pub total: usize,
    /// Transactions with a flagged tier (suspicious or critical)
    pub suspicious: usize,
    /// Transactions with the critical tier
    pub critical: usize,
    /// Sum of all amounts
    pub total_amount: f64,
    /// Mean amount, 0 when empty
    pub average_amount: f64,
    /// Mean suspicion score, 0 when empty
    pub average_suspicion: f64,
}

impl TimelineStats {
    /// Compute statistics for a transaction set
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total = transactions.len();
        if total == 0 {
            return Self::default();
        }
        let suspicious = transactions
            .iter()
            .filter(|tx| tx.risk_tier().is_flagged())
            .count();
        let critical = transactions
            .iter()
            .filter(|tx| tx.risk_tier() == RiskTier::Critical)
            .count();
        let total_amount: f64 = transactions.iter().map(|tx| tx.amount).sum();
        let score_sum: f64 = transactions.iter().map(|tx| tx.suspicious_score).sum();
        Self {
            total,
            suspicious,
            critical,
            total_amount,
            average_amount: total_amount / total as f64,
            average_suspicion: score_sum / total as f64,
        }
    }

    /// Overall threat assessment for these statistics
    pub fn threat_level(&self) -> ThreatLevel {
        if self.total == 0 {
            return ThreatLevel::Minimal;
        }
        let flagged_share = self.suspicious as f64 / self.total as f64 * 100.0;
        if self.critical > 0 {
            ThreatLevel::High
        } else if flagged_share > 25.0 {
            ThreatLevel::Medium
        } else if flagged_share > 10.0 {
            ThreatLevel::Low
        } else {
            ThreatLevel::Minimal
        }
    }
}

/// Overall threat assessment shown in the status bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    /// Under 10% of transactions flagged
    Minimal,
    /// Over 10% of transactions flagged
    Low,
    /// Over 25% of transactions flagged
    Medium,
    /// At least one critical transaction
    High,
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreatLevel::Minimal => write!(f, "minimal"),
            ThreatLevel::Low => write!(f, "low"),
            ThreatLevel::Medium => write!(f, "medium"),
            ThreatLevel::High => write!(f, "high"),
        }
    }
}
