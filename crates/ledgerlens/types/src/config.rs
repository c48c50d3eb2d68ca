//! Engine configuration for LedgerLens
//!
//! One validated configuration struct injected into every subsystem.
//! Defaults reproduce the production dashboard's tuning.

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Risk classification thresholds.
///
/// `suspicious` and `critical` feed [`crate::RiskTier::from_score`]'s fixed
/// rule and exist here for display filtering; `network_flag` is the separate,
/// stricter threshold that marks graph nodes and links.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Score above which a transaction is suspicious
    pub suspicious: f64,
    /// Score above which a transaction is critical
    pub critical: f64,
    /// Score above which accounts and links are flagged in the network view
    pub network_flag: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            suspicious: 0.5,
            critical: 0.8,
            network_flag: 0.7,
        }
    }
}

/// Playback timing and speed mapping
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Delay subtracted from by the internal speed, in milliseconds
    pub base_delay_ms: u64,
    /// Floor on the inter-frame delay, in milliseconds
    pub min_delay_ms: u64,
    /// Floor on the internal speed after external mapping
    pub min_internal_speed: u32,
    /// Internal speed units per revealed transaction each frame
    pub step_divisor: u32,
    /// Internal speed before the host sets one (1.0x external)
    pub default_speed: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 150,
            min_delay_ms: 50,
            min_internal_speed: 2,
            step_divisor: 5,
            default_speed: 10,
        }
    }
}

/// Force-directed layout tuning
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceConfig {
    /// Pairwise repulsion strength (negative repels)
    pub charge_strength: f64,
    /// Rest length of the spring force along links
    pub link_distance: f64,
    /// Collision constraint radius around each node
    pub collision_radius: f64,
    /// Pull toward the viewport center, `[0, 1]`
    pub center_strength: f64,
    /// Initial simulation energy
    pub alpha: f64,
    /// Energy below which the simulation is settled
    pub alpha_min: f64,
    /// Per-tick energy decay rate, `(0, 1)`
    pub alpha_decay: f64,
    /// Per-tick velocity damping, `(0, 1)`
    pub velocity_decay: f64,
    /// Hard cap on ticks, guards against non-converging parameters
    pub max_ticks: u32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            charge_strength: -300.0,
            link_distance: 100.0,
            collision_radius: 30.0,
            center_strength: 0.1,
            alpha: 1.0,
            alpha_min: 0.001,
            alpha_decay: 0.0228,
            velocity_decay: 0.4,
            max_ticks: 1000,
        }
    }
}

/// Logical drawing surface shared by both renderers
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Surface width in logical units
    pub width: f64,
    /// Surface height in logical units
    pub height: f64,
    /// Top margin
    pub margin_top: f64,
    /// Right margin
    pub margin_right: f64,
    /// Bottom margin
    pub margin_bottom: f64,
    /// Left margin
    pub margin_left: f64,
}

impl Viewport {
    /// Drawable width inside the margins
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Drawable height inside the margins
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Center of the full surface
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margin_top: 20.0,
            margin_right: 30.0,
            margin_bottom: 40.0,
            margin_left: 50.0,
        }
    }
}

/// Complete engine configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Risk classification thresholds
    pub thresholds: RiskThresholds,
    /// Playback timing
    pub playback: PlaybackConfig,
    /// Force layout tuning
    pub force: ForceConfig,
    /// Drawing surface geometry
    pub viewport: Viewport,
}

impl EngineConfig {
    /// Validate the configuration, rejecting inconsistent tunings
    pub fn validate(&self) -> ConfigResult<()> {
        let t = &self.thresholds;
        if !(t.suspicious > 0.0 && t.suspicious < t.critical && t.critical <= 1.0) {
            return Err(ConfigError::ThresholdOrder {
                suspicious: t.suspicious,
                critical: t.critical,
            });
        }
        if !(t.network_flag > 0.0 && t.network_flag <= 1.0) {
            return Err(ConfigError::NetworkFlagRange(t.network_flag));
        }
        if self.playback.min_delay_ms > self.playback.base_delay_ms {
            return Err(ConfigError::DelayOrder {
                min_delay_ms: self.playback.min_delay_ms,
                base_delay_ms: self.playback.base_delay_ms,
            });
        }
        if self.playback.step_divisor == 0 {
            return Err(ConfigError::ZeroStepDivisor);
        }
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ConfigError::EmptyViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (name, value) in [
            ("alpha_decay", self.force.alpha_decay),
            ("velocity_decay", self.force.velocity_decay),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::DecayRange { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        EngineConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = EngineConfig::default();
        config.thresholds.suspicious = 0.9;
        config.thresholds.critical = 0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn test_delay_order_rejected() {
        let mut config = EngineConfig::default();
        config.playback.min_delay_ms = 500;
        assert!(matches!(config.validate(), Err(ConfigError::DelayOrder { .. })));
    }

    #[test]
    fn test_decay_range_rejected() {
        let mut config = EngineConfig::default();
        config.force.velocity_decay = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::DecayRange { .. })));
    }
}
