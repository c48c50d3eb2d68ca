//! Scoped transaction search
//!
//! Case-insensitive substring matching over the loaded set, one linear scan
//! per call. Results keep the original load order; there is no relevance
//! ranking and no persistent index.

use crate::errors::SearchError;
use ledgerlens_types::{SearchScope, Transaction};

/// Search the loaded set for transactions matching `term` within `scope`.
///
/// Empty or whitespace-only terms are a user error and are reported as
/// [`SearchError::EmptyTerm`]; the public engine boundary converts that to
/// a warning notification and an empty result.
pub fn search(
    transactions: &[Transaction],
    term: &str,
    scope: SearchScope,
) -> Result<Vec<Transaction>, SearchError> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Err(SearchError::EmptyTerm);
    }
    Ok(transactions
        .iter()
        .filter(|tx| matches_scope(tx, &needle, scope))
        .cloned()
        .collect())
}

fn matches_scope(tx: &Transaction, needle: &str, scope: SearchScope) -> bool {
    match scope {
        SearchScope::Id => contains(tx.id.as_str(), needle),
        SearchScope::Account => {
            contains(tx.from_account.as_str(), needle) || contains(tx.to_account.as_str(), needle)
        }
        SearchScope::Amount => contains(&amount_text(tx.amount), needle),
        SearchScope::All => {
            contains(tx.id.as_str(), needle)
                || contains(tx.from_account.as_str(), needle)
                || contains(tx.to_account.as_str(), needle)
                || contains(&amount_text(tx.amount), needle)
                || tx
                    .pattern_type
                    .as_deref()
                    .is_some_and(|p| contains(p, needle))
                || tx.location.as_ref().is_some_and(|loc| {
                    contains(&loc.city, needle)
                        || contains(&loc.state, needle)
                        || contains(&loc.country, needle)
                        || contains(&loc.region, needle)
                })
        }
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn amount_text(amount: f64) -> String {
    // Whole amounts render without a decimal part so "9850" matches 9850.0.
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{amount}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tx_between;

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let txs = vec![
            tx_between("TX1", "ACC_001_primary", "ACC_002", 0.2),
            tx_between("TX2", "ACC_003", "ACC_004", 0.2),
        ];
        let hits = search(&txs, "acc_001", SearchScope::All).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "TX1");
    }

    #[test]
    fn test_results_keep_load_order() {
        let txs = vec![
            tx_between("TX3", "ACC_X", "ACC_Y", 0.2),
            tx_between("TX1", "ACC_X", "ACC_Z", 0.2),
            tx_between("TX2", "ACC_W", "ACC_X", 0.2),
        ];
        let hits = search(&txs, "acc_x", SearchScope::Account).unwrap();
        let ids: Vec<&str> = hits.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["TX3", "TX1", "TX2"]);
    }

    #[test]
    fn test_id_scope_ignores_accounts() {
        let txs = vec![tx_between("TX_ALPHA", "ACC_TX_ALPHA", "ACC_B", 0.2)];
        assert_eq!(search(&txs, "alpha", SearchScope::Id).unwrap().len(), 1);
        assert!(search(&txs, "acc_b", SearchScope::Id).unwrap().is_empty());
    }

    #[test]
    fn test_amount_scope_matches_rendered_value() {
        let mut tx = tx_between("TX1", "ACC_A", "ACC_B", 0.2);
        tx.amount = 9850.0;
        assert_eq!(search(&[tx], "9850", SearchScope::Amount).unwrap().len(), 1);
    }

    #[test]
    fn test_blank_term_is_a_user_error() {
        let txs = vec![tx_between("TX1", "ACC_A", "ACC_B", 0.2)];
        assert_eq!(search(&txs, "", SearchScope::All), Err(SearchError::EmptyTerm));
        assert_eq!(
            search(&txs, "   ", SearchScope::All),
            Err(SearchError::EmptyTerm)
        );
    }
}
