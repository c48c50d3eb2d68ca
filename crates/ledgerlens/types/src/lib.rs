//! # LedgerLens Types
//!
//! Core types for LedgerLens - a timeline/network visualization engine for
//! financial-crime analysis.
//!
//! ## CRITICAL INVARIANT: ONE RISK RULE
//!
//! The risk tier of a transaction is derived **only** through
//! [`RiskTier::from_score`]. Renderers, statistics, and filters consume the
//! derived tier; none of them re-implement the thresholds.
//!
//! ## Core Principles
//!
//! 1. **Transactions are Immutable**: once parsed, a loaded batch is replaced
//!    wholesale, never mutated in place
//! 2. **Scores are Bounded**: `suspicious_score` is always within `[0, 1]`
//!    after parsing; out-of-range values are clamped at the ingest boundary
//! 3. **Nodes Borrow, Never Own**: network nodes reference transactions by id
//!    and carry no lifetime of their own
//! 4. **Metadata is Explicit**: optional service metadata is modeled as typed
//!    records with documented defaults, not ad hoc presence checks
//!
//! ## Module Organization
//!
//! - [`config`]: engine configuration with validation
//! - [`transaction`]: the canonical transaction entity and raw wire shape
//! - [`network`]: derived account-graph nodes and links
//! - [`engine_state`]: view modes, playback states, search scopes, statistics
//! - [`notification`]: user-visible notification payloads
//! - [`errors`]: error types for the types layer

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine_state;
pub mod errors;
pub mod network;
pub mod notification;
pub mod transaction;

// Re-export commonly used types
pub use config::{EngineConfig, ForceConfig, PlaybackConfig, RiskThresholds, Viewport};
pub use engine_state::{
    PlaybackState, Scenario, SearchScope, Selection, ThreatLevel, TimeQuantum, TimelineStats,
    ViewMode,
};
pub use errors::ConfigError;
pub use network::{NetworkGraph, NetworkLink, NetworkNode, NodeKind};
pub use notification::{Notification, NotificationLevel};
pub use transaction::{AccountId, RawTransaction, RiskTier, Transaction, TransactionId};
