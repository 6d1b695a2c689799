//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Gesture detector sensitivity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum fist speed to register a gesture (view units per second)
    pub min_speed: f64,
}

impl DetectorConfig {
    /// Coarse preset tuned for full punches
    pub fn punch() -> Self {
        Self { min_speed: 450.0 }
    }

    /// Fine preset tuned for light touches
    pub fn touch() -> Self {
        Self { min_speed: 240.0 }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::punch()
    }
}

/// Punch classifier thresholds.
///
/// The extension threshold is in view-space units and was tuned for a
/// phone-sized viewport; re-derive it when the viewport changes scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// A punch within this angle of the shoulder line (or its opposite
    /// direction) counts as thrown forward (radians)
    pub forward_angle_rad: f64,

    /// Shoulder-to-fist distance separating a jab from a full extension
    pub extension_threshold: f64,

    /// Horizontal-over-vertical dominance required for a jab
    pub jab_axis_ratio: f64,

    /// Horizontal-over-vertical dominance for the rear-hand fallback
    pub rear_axis_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            forward_angle_rad: FRAC_PI_4,
            extension_threshold: 150.0,
            jab_axis_ratio: 1.5,
            rear_axis_ratio: 1.2,
        }
    }
}

/// Target geometry and hit timing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Visible target diameter (view units)
    pub diameter: f64,

    /// Extra hit radius beyond the visible target, for forgiving gameplay
    pub hit_margin: f64,

    /// Inset keeping the target fully inside the playable area
    pub safe_margin: f64,

    /// Window after a hit during which further hits are ignored (seconds)
    pub cooldown_secs: f64,
}

impl TargetConfig {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            diameter: 80.0,
            hit_margin: 30.0,
            safe_margin: 50.0,
            cooldown_secs: 0.5,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub detector: DetectorConfig,
    pub classifier: ClassifierConfig,
    pub target: TargetConfig,

    /// Forward body joints to the rendering collaborator
    pub show_skeleton: bool,

    /// Bound on the outgoing event queue
    pub event_queue_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            classifier: ClassifierConfig::default(),
            target: TargetConfig::default(),
            show_skeleton: true,
            event_queue_size: 256,
        }
    }
}

impl EngineConfig {
    /// Load configuration from file, with `PUNCHBOX_`-prefixed environment
    /// variables taking precedence
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("PUNCHBOX"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("PUNCHBOX"))
            .build()?;

        settings.try_deserialize()
    }
}
