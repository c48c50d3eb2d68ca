//! Temporal scatter renderer
//!
//! Plots the loaded transactions as time-vs-amount points. Playback reveals
//! points up to the current frontier; everything past it is pushed back with
//! [`Emphasis::Dimmed`] rather than removed, so scales stay stable for the
//! whole run.

use crate::render::{Emphasis, LinkSpec, PointSpec, RenderTarget};
use ledgerlens_types::config::{RiskThresholds, Viewport};
use ledgerlens_types::engine_state::Selection;
use ledgerlens_types::{RiskTier, Transaction, TransactionId};
use tracing::trace;

const COLOR_CRITICAL: &str = "#ff1744";
const COLOR_SUSPICIOUS: &str = "#ff9800";
const COLOR_NORMAL: &str = "#00e5ff";

/// Added to a point's radius while it is hovered or selected.
const HOVER_RADIUS_BOOST: f64 = 2.0;

fn tier_radius(tier: RiskTier) -> f64 {
    match tier {
        RiskTier::Critical => 6.0,
        RiskTier::Suspicious => 5.0,
        RiskTier::Normal => 4.0,
    }
}

fn tier_color(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => COLOR_CRITICAL,
        RiskTier::Suspicious => COLOR_SUSPICIOUS,
        RiskTier::Normal => COLOR_NORMAL,
    }
}

/// Renders the timeline view onto a [`RenderTarget`].
///
/// Stateless between calls apart from configuration; every [`render`]
/// replaces the previous frame wholesale.
///
/// [`render`]: ScatterRenderer::render
#[derive(Debug, Clone)]
pub struct ScatterRenderer {
    viewport: Viewport,
    thresholds: RiskThresholds,
}

impl ScatterRenderer {
    pub fn new(viewport: Viewport, thresholds: RiskThresholds) -> Self {
        Self {
            viewport,
            thresholds,
        }
    }

    /// Draw one frame.
    ///
    /// `visible` is the playback frontier: points at indices below it are
    /// shown at full weight, the rest dimmed. Scales span the whole data
    /// set regardless of the frontier.
    pub fn render(
        &self,
        transactions: &[Transaction],
        visible: usize,
        selection: Option<&Selection>,
        hovered: Option<&TransactionId>,
        target: &mut dyn RenderTarget,
    ) {
        let positions = self.positions(transactions);

        let selected_tx = match selection {
            Some(Selection::Transaction(id)) => transactions.iter().find(|tx| &tx.id == id),
            _ => None,
        };

        let points: Vec<PointSpec> = transactions
            .iter()
            .zip(&positions)
            .enumerate()
            .map(|(i, (tx, &(x, y)))| {
                let tier = tx.risk_tier();
                let emphasis = self.point_emphasis(i, visible, tx, selection, selected_tx);
                let boosted = hovered == Some(&tx.id) || emphasis == Emphasis::Focus;
                PointSpec {
                    id: tx.id.as_str().to_owned(),
                    x,
                    y,
                    radius: tier_radius(tier) + if boosted { HOVER_RADIUS_BOOST } else { 0.0 },
                    color: tier_color(tier).to_owned(),
                    emphasis,
                }
            })
            .collect();

        let links = self.adjacency_chain_links(transactions, &positions, visible, selected_tx);

        trace!(
            points = points.len(),
            chain_links = links.len(),
            visible,
            "timeline frame"
        );
        target.draw_links(&links);
        target.draw_points(&points);
    }

    /// Tear down this renderer's output.
    pub fn destroy(&mut self, target: &mut dyn RenderTarget) {
        target.clear();
    }

    /// Surface positions for every transaction, in input order.
    ///
    /// Time maps onto the inner width, amount onto the inner height with
    /// larger amounts higher up. Degenerate spans collapse to the center of
    /// the axis instead of dividing by zero.
    fn positions(&self, transactions: &[Transaction]) -> Vec<(f64, f64)> {
        let vp = &self.viewport;
        let (t_min, t_max) = match (
            transactions.iter().map(|tx| tx.timestamp).min(),
            transactions.iter().map(|tx| tx.timestamp).max(),
        ) {
            (Some(min), Some(max)) => (min, max),
            _ => return Vec::new(),
        };
        let t_span = (t_max - t_min).num_milliseconds() as f64;
        let a_max = transactions.iter().fold(0.0_f64, |m, tx| m.max(tx.amount));

        transactions
            .iter()
            .map(|tx| {
                let x_frac = if t_span > 0.0 {
                    (tx.timestamp - t_min).num_milliseconds() as f64 / t_span
                } else {
                    0.5
                };
                let y_frac = if a_max > 0.0 { tx.amount / a_max } else { 0.5 };
                (
                    vp.margin_left + x_frac * vp.inner_width(),
                    vp.margin_top + (1.0 - y_frac) * vp.inner_height(),
                )
            })
            .collect()
    }

    fn point_emphasis(
        &self,
        index: usize,
        visible: usize,
        tx: &Transaction,
        selection: Option<&Selection>,
        selected_tx: Option<&Transaction>,
    ) -> Emphasis {
        if index >= visible {
            return Emphasis::Dimmed;
        }
        match selection {
            None => Emphasis::Normal,
            Some(Selection::Transaction(id)) if &tx.id == id => Emphasis::Focus,
            Some(Selection::Node(account)) if tx.touches(account) => Emphasis::Related,
            Some(Selection::Transaction(_)) => match selected_tx {
                Some(sel) if tx.shares_account_with(sel) => Emphasis::Related,
                _ => Emphasis::Dimmed,
            },
            Some(Selection::Node(_)) => Emphasis::Dimmed,
        }
    }

    /// Chain lines between transactions that sit next to each other in the
    /// load order, drawn when either endpoint's score exceeds the network
    /// flag threshold. Adjacency is positional, not by shared account.
    fn adjacency_chain_links(
        &self,
        transactions: &[Transaction],
        positions: &[(f64, f64)],
        visible: usize,
        selected_tx: Option<&Transaction>,
    ) -> Vec<LinkSpec> {
        let flag = self.thresholds.network_flag;
        transactions
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| {
                pair[0].suspicious_score > flag || pair[1].suspicious_score > flag
            })
            .map(|(i, pair)| {
                let (x1, y1) = positions[i];
                let (x2, y2) = positions[i + 1];
                let emphasis = if i + 1 >= visible {
                    Emphasis::Dimmed
                } else {
                    match selected_tx {
                        None => Emphasis::Normal,
                        Some(sel) if sel.id == pair[0].id || sel.id == pair[1].id => {
                            Emphasis::Focus
                        }
                        Some(_) => Emphasis::Dimmed,
                    }
                };
                LinkSpec {
                    source: pair[0].id.as_str().to_owned(),
                    target: pair[1].id.as_str().to_owned(),
                    x1,
                    y1,
                    x2,
                    y2,
                    suspicious: true,
                    emphasis,
                }
            })
            .collect()
    }
}
