//! Report export
//!
//! The engine hands its loaded data to a [`ReportExporter`] and stays out of
//! the serialization business. [`JsonReportExporter`] covers the common case,
//! writing the same shape the dashboard's download produced.

use crate::errors::ExportError;
use chrono::{DateTime, Utc};
use ledgerlens_types::engine_state::{Scenario, TimelineStats};
use ledgerlens_types::network::NetworkGraph;
use ledgerlens_types::Transaction;
use serde::Serialize;
use std::io::Write;

/// Sink for an analysis report.
pub trait ReportExporter: Send {
    fn export(
        &mut self,
        transactions: &[Transaction],
        graph: &NetworkGraph,
        scenario: &Scenario,
    ) -> Result<(), ExportError>;
}

/// The exported document.
#[derive(Debug, Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    scenario: &'a Scenario,
    stats: TimelineStats,
    transactions: &'a [Transaction],
    network: &'a NetworkGraph,
}

/// Writes the report as pretty-printed JSON.
#[derive(Debug)]
pub struct JsonReportExporter<W: Write + Send> {
    sink: W,
}

impl<W: Write + Send> JsonReportExporter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Hand back the sink, e.g. to read an in-memory buffer in tests.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write + Send> ReportExporter for JsonReportExporter<W> {
    fn export(
        &mut self,
        transactions: &[Transaction],
        graph: &NetworkGraph,
        scenario: &Scenario,
    ) -> Result<(), ExportError> {
        let report = Report {
            generated_at: Utc::now(),
            scenario,
            stats: TimelineStats::from_transactions(transactions),
            transactions,
            network: graph,
        };
        serde_json::to_writer_pretty(&mut self.sink, &report)
            .map_err(|e| ExportError::Delegate(e.to_string()))?;
        self.sink
            .write_all(b"\n")
            .map_err(|e| ExportError::Delegate(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::test_support::tx_between;

    #[test]
    fn test_json_export_carries_data_stats_and_network() {
        let txs = vec![
            tx_between("TX1", "A", "B", 0.9),
            tx_between("TX2", "B", "C", 0.2),
        ];
        let graph = build_graph(&txs, 0.7);
        let mut exporter = JsonReportExporter::new(Vec::new());
        exporter
            .export(&txs, &graph, &Scenario::default())
            .unwrap();

        let out = exporter.into_inner();
        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(doc["network"]["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(doc["stats"]["total"], 2);
        assert_eq!(doc["scenario"], "all");
    }
}
