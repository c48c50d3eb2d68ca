//! Account-network types for LedgerLens
//!
//! Nodes and links derived from a loaded transaction set. The graph is a
//! pure function of the data: rebuilt whenever the network view is entered
//! or data reloads, never mutated outside a rebuild.

use crate::transaction::{AccountId, TransactionId};
use serde::{Deserialize, Serialize};

/// The kind of node in the account network
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// An account appearing as sender or receiver
    Account,
}

/// A node in the derived account network.
///
/// Nodes reference transactions by id only - the loaded transaction set owns
/// the records, the node carries no lifetime of its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Account identifier
    pub id: AccountId,
    /// Display-truncated identifier
    pub label: String,
    /// Node kind
    pub kind: NodeKind,
    /// True if any owned transaction cleared the network flag threshold
    pub suspicious: bool,
    /// Ids of every transaction this account participates in
    pub tx_ids: Vec<TransactionId>,
}

/// A directed link in the account network, one per transaction.
///
/// Parallel links between the same accounts are preserved, never merged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkLink {
    /// Sending account
    pub source: AccountId,
    /// Receiving account
    pub target: AccountId,
    /// True if the originating transaction cleared the flag threshold
    pub suspicious: bool,
    /// Transaction amount
    pub amount: f64,
    /// Originating transaction
    pub tx_id: TransactionId,
}

impl NetworkLink {
    /// Whether this link connects the two given accounts, in either direction
    pub fn connects(&self, a: &AccountId, b: &AccountId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }

    /// Whether the given account is one of this link's endpoints
    pub fn touches(&self, account: &AccountId) -> bool {
        &self.source == account || &self.target == account
    }
}

/// The derived account network: nodes plus parallel-preserving links
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkGraph {
    /// One node per distinct account, in first-appearance order
    pub nodes: Vec<NetworkNode>,
    /// One link per transaction, in input order
    pub links: Vec<NetworkLink>,
}

impl NetworkGraph {
    /// Number of distinct accounts
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links (equals the transaction count)
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of nodes carrying the suspicious flag
    pub fn suspicious_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.suspicious).count()
    }

    /// Look up a node by account id
    pub fn node(&self, id: &AccountId) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Whether two accounts are directly linked, in either direction
    pub fn is_connected(&self, a: &AccountId, b: &AccountId) -> bool {
        self.links.iter().any(|l| l.connects(a, b))
    }

    /// Distinct accounts directly linked to the given one
    pub fn neighbors(&self, id: &AccountId) -> Vec<AccountId> {
        let mut out: Vec<AccountId> = Vec::new();
        for link in &self.links {
            let other = if &link.source == id {
                &link.target
            } else if &link.target == id {
                &link.source
            } else {
                continue;
            };
            if !out.contains(other) {
                out.push(other.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(source: &str, target: &str, tx: &str) -> NetworkLink {
        NetworkLink {
            source: AccountId::new(source),
            target: AccountId::new(target),
            suspicious: false,
            amount: 100.0,
            tx_id: TransactionId::new(tx),
        }
    }

    #[test]
    fn test_connects_is_direction_agnostic() {
        let l = link("A", "B", "TX1");
        assert!(l.connects(&AccountId::new("A"), &AccountId::new("B")));
        assert!(l.connects(&AccountId::new("B"), &AccountId::new("A")));
        assert!(!l.connects(&AccountId::new("A"), &AccountId::new("C")));
    }

    #[test]
    fn test_neighbors_deduplicates_parallel_links() {
        let graph = NetworkGraph {
            nodes: vec![],
            links: vec![link("A", "B", "TX1"), link("A", "B", "TX2"), link("C", "A", "TX3")],
        };
        let neighbors = graph.neighbors(&AccountId::new("A"));
        assert_eq!(
            neighbors,
            vec![AccountId::new("B"), AccountId::new("C")]
        );
    }
}
