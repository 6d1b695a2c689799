//! Velocity-based gesture detection.

use punchbox_core::{ObservedPoint, Point2D, Timestamp};

use crate::config::DetectorConfig;

/// Decides whether a fist movement counts as a punch.
///
/// Pure velocity gate: displacement between consecutive observations
/// divided by elapsed time, compared against the configured minimum
/// speed. The caller owns the previous-point bookkeeping, per hand.
#[derive(Debug, Clone, Copy)]
pub struct GestureDetector {
    config: DetectorConfig,
}

impl GestureDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// True iff the fist moved faster than the configured minimum speed.
    ///
    /// Returns false on the first observation of a hand (no previous
    /// point) and on non-increasing timestamps.
    pub fn is_punch(
        &self,
        current: &Point2D,
        previous: Option<&ObservedPoint>,
        at: Timestamp,
    ) -> bool {
        let Some(previous) = previous else {
            return false;
        };

        let dt = at.seconds_since(previous.at);
        if dt <= 0.0 {
            return false;
        }

        let speed = current.distance_to(&previous.point) / dt;
        speed > self.config.min_speed
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
