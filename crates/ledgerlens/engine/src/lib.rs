//! # LedgerLens Engine
//!
//! The stateful timeline/network visualization engine behind the
//! financial-crime analysis dashboard. It owns the loaded transaction set,
//! drives the frame-based playback animation, computes the force-directed
//! account layout, answers search queries, and guarantees clean teardown
//! when switching between its two view modes.
//!
//! ## CRITICAL INVARIANT: ONE LIVE RENDERER
//!
//! Exactly one of the temporal scatter and the force-directed graph owns
//! render resources at any time. [`TimelineEngine::switch_view`] pauses
//! playback, destroys the active renderer (stopping any physics
//! simulation), and only then constructs the other.
//!
//! ## Components
//!
//! - [`TimelineEngine`]: the coordinator; sole owner of engine state
//! - [`parser`]: raw service records to canonical transactions
//! - [`search`]: scoped, case-insensitive substring search
//! - [`graph`]: account-network derivation
//! - [`render`]: host-agnostic render targets and the two renderers
//! - [`playback`]: the frame-scheduling state machine
//! - [`scheduler`]: the virtual clock that drives both cooperative loops
//! - [`service`]: the async data-service collaborator boundary
//! - [`export`]: the report-export collaborator boundary
//! - [`notify`]: user-visible notification fan-out
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       TimelineEngine                          │
//! │  ┌────────────┐  ┌──────────────┐  ┌───────────────────┐    │
//! │  │  parser    │  │   search     │  │   graph builder   │    │
//! │  └────────────┘  └──────────────┘  └───────────────────┘    │
//! │  ┌────────────┐  ┌──────────────┐  ┌───────────────────┐    │
//! │  │ playback   │  │ scatter      │  │ force simulation  │    │
//! │  │ controller │  │ renderer     │  │ + graph renderer  │    │
//! │  └────────────┘  └──────────────┘  └───────────────────┘    │
//! │        │                 └───── RenderTarget ─────┘          │
//! │  DataService (async)      ReportExporter      NotificationHub│
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod engine;
pub mod errors;
pub mod export;
pub mod graph;
pub mod notify;
pub mod parser;
pub mod playback;
pub mod render;
pub mod scheduler;
pub mod search;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{LoadOutcome, LoadRequest, TimelineEngine};
pub use errors::{EngineError, EngineResult, ExportError, LoadError, SearchError, ServiceError};
pub use export::{JsonReportExporter, ReportExporter};
pub use notify::NotificationHub;
pub use playback::{PlaybackController, PlaybackFrame};
pub use render::{Emphasis, LabelSpec, LinkSpec, PointSpec, RenderTarget};
pub use scheduler::{Clock, MonotonicClock, VirtualClock};
pub use service::{DataService, DateRange, LayeringSummary, RiskDistribution, TimelineBatch};
