//! Upstream data boundary
//!
//! The engine pulls raw records through the [`DataService`] trait and never
//! talks to a transport itself. Hosts implement it over whatever carries the
//! timeline API; tests implement it with canned batches.

use crate::errors::ServiceError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ledgerlens_types::engine_state::{Scenario, SearchScope, TimeQuantum};
use ledgerlens_types::RawTransaction;
use serde::{Deserialize, Serialize};

/// Closed interval of the timestamps a batch covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Batch-level risk tally reported by the upstream layering analysis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub critical: usize,
    pub medium: usize,
    pub low: usize,
}

/// Upstream summary of the layering analysis across a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayeringSummary {
    pub total_transactions: usize,
    #[serde(default)]
    pub risk_distribution: RiskDistribution,
}

/// One timeline response from the service.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TimelineBatch {
    /// Raw records, parsed and cleaned by the engine.
    pub data: Vec<RawTransaction>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub layering_summary: Option<LayeringSummary>,
}

/// Source of timeline data.
///
/// The engine searches locally over what it has loaded; the search hook is
/// here for hosts that want server-side matching over the full history.
#[async_trait]
pub trait DataService: Send + Sync {
    async fn get_timeline_data(
        &self,
        scenario: &Scenario,
        quantum: TimeQuantum,
    ) -> Result<TimelineBatch, ServiceError>;

    async fn search_transactions(
        &self,
        term: &str,
        scope: SearchScope,
    ) -> Result<Vec<RawTransaction>, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_batch_deserializes_the_wire_shape() {
        let payload = serde_json::json!({
            "data": [{
                "transaction_id": "TX_001",
                "timestamp": "2026-03-01T10:00:00Z",
                "amount": 1500.0,
                "from_account": "ACC_001",
                "to_account": "ACC_002",
                "suspicious_score": 0.85
            }],
            "date_range": {
                "start": "2026-02-01T00:00:00Z",
                "end": "2026-03-01T00:00:00Z"
            },
            "layering_summary": {
                "total_transactions": 1,
                "risk_distribution": {"critical": 1, "medium": 0, "low": 0}
            }
        });
        let batch: TimelineBatch = serde_json::from_value(payload).unwrap();
        assert_eq!(batch.data.len(), 1);
        assert_eq!(batch.data[0].id.as_deref(), Some("TX_001"));
        assert_eq!(
            batch.layering_summary.unwrap().risk_distribution.critical,
            1
        );
    }

    #[test]
    fn test_timeline_batch_tolerates_missing_summaries() {
        let batch: TimelineBatch = serde_json::from_value(serde_json::json!({
            "data": []
        }))
        .unwrap();
        assert!(batch.date_range.is_none());
        assert!(batch.layering_summary.is_none());
    }
}
