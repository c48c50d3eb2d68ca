//! Shared fixtures and doubles for the engine's test modules.

use crate::errors::{ExportError, ServiceError};
use crate::render::{LabelSpec, LinkSpec, PointSpec, RenderTarget};
use crate::service::{DataService, TimelineBatch};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use ledgerlens_types::engine_state::{Scenario, SearchScope, TimeQuantum};
use ledgerlens_types::network::NetworkGraph;
use ledgerlens_types::{AccountId, RawTransaction, Transaction, TransactionId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Install a test-writer subscriber so failing tests show engine logs.
/// Safe to call from every test; only the first call wins.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ledgerlens_engine=debug")
        .with_test_writer()
        .try_init();
}

/// A transaction between two accounts with the given suspicion score.
pub(crate) fn tx_between(id: &str, from: &str, to: &str, score: f64) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
        amount: 1000.0,
        from_account: AccountId::new(from),
        to_account: AccountId::new(to),
        suspicious_score: score,
        pattern_type: None,
        scenario: None,
        location: None,
        transaction_method: "Unknown".to_string(),
        bank_details: None,
        layering_analysis: None,
    }
}

/// A transaction placed on the time and amount axes.
pub(crate) fn tx_at(id: &str, minutes: i64, amount: f64, score: f64) -> Transaction {
    let mut tx = tx_between(id, "ACC_A", "ACC_B", score);
    tx.timestamp += Duration::minutes(minutes);
    tx.amount = amount;
    tx
}

pub(crate) fn raw_tx(id: &str, from: &str, to: &str, score: f64) -> RawTransaction {
    RawTransaction {
        id: Some(id.to_string()),
        timestamp: Some("2026-03-01T10:00:00Z".to_string()),
        amount: Some(1000.0),
        from_account: Some(from.to_string()),
        to_account: Some(to.to_string()),
        suspicious_score: Some(score),
        pattern_type: None,
        scenario: None,
        location: None,
        transaction_method: None,
        bank_details: None,
        layering_analysis: None,
    }
}

/// Render target that keeps the last frame it was handed.
#[derive(Debug, Default)]
pub(crate) struct RecordingTarget {
    pub points: Vec<PointSpec>,
    pub links: Vec<LinkSpec>,
    pub labels: Vec<LabelSpec>,
    pub clears: usize,
}

impl RenderTarget for RecordingTarget {
    fn draw_points(&mut self, points: &[PointSpec]) {
        self.points = points.to_vec();
    }

    fn draw_links(&mut self, links: &[LinkSpec]) {
        self.links = links.to_vec();
    }

    fn draw_labels(&mut self, labels: &[LabelSpec]) {
        self.labels = labels.to_vec();
    }

    fn clear(&mut self) {
        self.points.clear();
        self.links.clear();
        self.labels.clear();
        self.clears += 1;
    }
}

/// Handle pair around a [`RecordingTarget`] for tests that hand the target
/// to the engine but still want to inspect it.
#[derive(Debug, Default, Clone)]
pub(crate) struct SharedTarget {
    pub inner: Arc<Mutex<RecordingTarget>>,
}

impl SharedTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RecordingTarget {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        RecordingTarget {
            points: guard.points.clone(),
            links: guard.links.clone(),
            labels: guard.labels.clone(),
            clears: guard.clears,
        }
    }
}

impl RenderTarget for SharedTarget {
    fn draw_points(&mut self, points: &[PointSpec]) {
        if let Ok(mut t) = self.inner.lock() {
            t.draw_points(points);
        }
    }

    fn draw_links(&mut self, links: &[LinkSpec]) {
        if let Ok(mut t) = self.inner.lock() {
            t.draw_links(links);
        }
    }

    fn draw_labels(&mut self, labels: &[LabelSpec]) {
        if let Ok(mut t) = self.inner.lock() {
            t.draw_labels(labels);
        }
    }

    fn clear(&mut self) {
        if let Ok(mut t) = self.inner.lock() {
            t.clear();
        }
    }
}

/// Data service that answers every request with the same canned result
/// and counts how often it was asked.
pub(crate) struct StaticDataService {
    result: Result<TimelineBatch, ServiceError>,
    pub calls: AtomicUsize,
}

impl StaticDataService {
    pub fn with_batch(batch: TimelineBatch) -> Self {
        Self {
            result: Ok(batch),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_records(records: Vec<RawTransaction>) -> Self {
        Self::with_batch(TimelineBatch {
            data: records,
            date_range: None,
            layering_summary: None,
        })
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(ServiceError::Transport(message.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataService for StaticDataService {
    async fn get_timeline_data(
        &self,
        _scenario: &Scenario,
        _quantum: TimeQuantum,
    ) -> Result<TimelineBatch, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    async fn search_transactions(
        &self,
        _term: &str,
        _scope: SearchScope,
    ) -> Result<Vec<RawTransaction>, ServiceError> {
        Ok(Vec::new())
    }
}

/// Exporter that records every delegation instead of writing anywhere.
#[derive(Debug, Default)]
pub(crate) struct RecordingExporter {
    pub exports: Arc<Mutex<Vec<(usize, usize, Scenario)>>>,
    pub fail_with: Option<String>,
}

impl crate::export::ReportExporter for RecordingExporter {
    fn export(
        &mut self,
        transactions: &[Transaction],
        graph: &NetworkGraph,
        scenario: &Scenario,
    ) -> Result<(), ExportError> {
        if let Some(message) = &self.fail_with {
            return Err(ExportError::Delegate(message.clone()));
        }
        if let Ok(mut exports) = self.exports.lock() {
            exports.push((transactions.len(), graph.node_count(), scenario.clone()));
        }
        Ok(())
    }
}
