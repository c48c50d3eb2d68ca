//! Account-network derivation
//!
//! Builds the [`NetworkGraph`] from a loaded transaction set: one node per
//! distinct account, one link per transaction with parallel links preserved.
//! Pure function of its input; the coordinator rebuilds it on every network
//! view entry and on data reload.

use ledgerlens_types::network::{NetworkGraph, NetworkLink, NetworkNode, NodeKind};
use ledgerlens_types::{AccountId, Transaction};
use std::collections::HashMap;
use tracing::debug;

/// Derive the account network for a transaction set.
///
/// Node order is first-appearance order over the input, which makes the
/// result deterministic for a given load.
pub fn build_graph(transactions: &[Transaction], flag_threshold: f64) -> NetworkGraph {
    let mut index: HashMap<AccountId, usize> = HashMap::new();
    let mut nodes: Vec<NetworkNode> = Vec::new();
    let mut links: Vec<NetworkLink> = Vec::with_capacity(transactions.len());

    for tx in transactions {
        let flagged = tx.suspicious_score > flag_threshold;
        let endpoints = if tx.from_account == tx.to_account {
            // self-transfer: one endpoint, one back-reference
            &[&tx.from_account][..]
        } else {
            &[&tx.from_account, &tx.to_account][..]
        };
        for account in endpoints.iter().copied() {
            let slot = *index.entry(account.clone()).or_insert_with(|| {
                nodes.push(NetworkNode {
                    id: account.clone(),
                    label: account.display_label(),
                    kind: NodeKind::Account,
                    suspicious: false,
                    tx_ids: Vec::new(),
                });
                nodes.len() - 1
            });
            nodes[slot].suspicious |= flagged;
            nodes[slot].tx_ids.push(tx.id.clone());
        }

        links.push(NetworkLink {
            source: tx.from_account.clone(),
            target: tx.to_account.clone(),
            suspicious: flagged,
            amount: tx.amount,
            tx_id: tx.id.clone(),
        });
    }

    debug!(
        nodes = nodes.len(),
        links = links.len(),
        "account network derived"
    );
    NetworkGraph { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tx_between;

    const FLAG: f64 = 0.7;

    #[test]
    fn test_node_per_account_link_per_transaction() {
        // 4 transactions over 3 distinct accounts, with a parallel pair.
        let txs = vec![
            tx_between("TX1", "A", "B", 0.2),
            tx_between("TX2", "A", "B", 0.3),
            tx_between("TX3", "B", "C", 0.4),
            tx_between("TX4", "C", "A", 0.5),
        ];
        let graph = build_graph(&txs, FLAG);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.link_count(), 4);
    }

    #[test]
    fn test_node_suspicion_is_or_reduced() {
        let txs = vec![
            tx_between("TX1", "A", "B", 0.2),
            tx_between("TX2", "B", "C", 0.9),
        ];
        let graph = build_graph(&txs, FLAG);
        assert!(!graph.node(&AccountId::new("A")).unwrap().suspicious);
        assert!(graph.node(&AccountId::new("B")).unwrap().suspicious);
        assert!(graph.node(&AccountId::new("C")).unwrap().suspicious);
        assert_eq!(graph.suspicious_node_count(), 2);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let txs = vec![tx_between("TX1", "A", "B", 0.7)];
        let graph = build_graph(&txs, FLAG);
        assert!(!graph.links[0].suspicious);
        assert_eq!(graph.suspicious_node_count(), 0);
    }

    #[test]
    fn test_deterministic_for_same_input_order() {
        let txs = vec![
            tx_between("TX1", "C", "A", 0.9),
            tx_between("TX2", "B", "C", 0.1),
        ];
        let first = build_graph(&txs, FLAG);
        let second = build_graph(&txs, FLAG);
        assert_eq!(first, second);

        let ids: Vec<&str> = first.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_self_transfer_backreferences_once() {
        let txs = vec![
            tx_between("TX1", "A", "A", 0.9),
            tx_between("TX2", "A", "B", 0.2),
        ];
        let graph = build_graph(&txs, FLAG);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 2);
        let a = graph.node(&AccountId::new("A")).unwrap();
        assert_eq!(a.tx_ids, vec!["TX1".into(), "TX2".into()]);
        assert!(a.suspicious);
    }

    #[test]
    fn test_nodes_backreference_their_transactions() {
        let txs = vec![
            tx_between("TX1", "A", "B", 0.2),
            tx_between("TX2", "A", "C", 0.2),
        ];
        let graph = build_graph(&txs, FLAG);
        let a = graph.node(&AccountId::new("A")).unwrap();
        assert_eq!(a.tx_ids.len(), 2);
        let b = graph.node(&AccountId::new("B")).unwrap();
        assert_eq!(b.tx_ids.len(), 1);
    }
}
