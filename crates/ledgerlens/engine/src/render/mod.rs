//! Render abstraction shared by the two views
//!
//! Renderers never touch a drawing surface directly. They compute positions
//! and emphasis and hand [`PointSpec`]s, [`LinkSpec`]s and [`LabelSpec`]s to a
//! [`RenderTarget`]. The engine owns at most one live renderer at a time; the
//! target is cleared before a new renderer takes over.

pub mod force;
pub mod scatter;

/// Visual weight of an element relative to the current selection and
/// playback frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// The selected element itself.
    Focus,
    /// Directly related to the selection (shares an account, or is an
    /// endpoint of the selected element).
    Related,
    /// Visible, no selection active.
    Normal,
    /// Pushed back: a selection is active elsewhere, or the element lies
    /// beyond the playback frontier.
    Dimmed,
}

impl Emphasis {
    /// Opacity class applied by drawing surfaces.
    pub fn opacity(self) -> f64 {
        match self {
            Emphasis::Focus => 1.0,
            Emphasis::Related => 0.85,
            Emphasis::Normal => 0.8,
            Emphasis::Dimmed => 0.15,
        }
    }
}

/// A positioned, styled marker for one transaction or account node.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSpec {
    /// Transaction behind a scatter point, account behind a network node.
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// CSS-style color name or hex string.
    pub color: String,
    pub emphasis: Emphasis,
}

/// A styled edge between two positioned endpoints.
///
/// Endpoints are element ids: account ids in the network view, transaction
/// ids for the temporal chain lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSpec {
    pub source: String,
    pub target: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub suspicious: bool,
    pub emphasis: Emphasis,
}

/// A positioned text label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub emphasis: Emphasis,
}

/// Drawing surface written to by the renderers.
///
/// Implementations are expected to replace, not accumulate: each `draw_*`
/// call carries the complete set for its element class.
pub trait RenderTarget: Send {
    fn draw_points(&mut self, points: &[PointSpec]);
    fn draw_links(&mut self, links: &[LinkSpec]);
    fn draw_labels(&mut self, labels: &[LabelSpec]);
    /// Remove everything previously drawn.
    fn clear(&mut self);
}
