//! Geometric punch classification.
//!
//! Distinguishes a jab from a straight using wrist/shoulder geometry:
//!
//! - **Jab**: short, forward, lead-hand punch with limited extension
//! - **Straight/cross**: full-extension punch with more forward travel,
//!   biased toward the rear hand
//!
//! The shoulder line provides the reference frame for "forward"; the
//! shoulder-to-fist distance measures arm extension.

use punchbox_core::{relative_angle, BodyPose, Hand, Point2D, PunchType};

use crate::config::ClassifierConfig;

/// Assigns a [`PunchType`] to a detected punch event.
#[derive(Debug, Clone, Copy)]
pub struct PunchClassifier {
    config: ClassifierConfig,
}

impl PunchClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a punch from its most recent motion and the body pose.
    ///
    /// Returns [`PunchType::Unknown`] when there is no previous fist point
    /// or either shoulder is absent: classification needs a stable
    /// reference frame.
    pub fn classify(
        &self,
        fist: Point2D,
        hand: Hand,
        body: &BodyPose,
        previous: Option<Point2D>,
    ) -> PunchType {
        let Some(previous) = previous else {
            return PunchType::Unknown;
        };

        let (Some(shoulder), Some(opposite_shoulder)) =
            (body.get(hand.shoulder()), body.get(hand.opposite_shoulder()))
        else {
            return PunchType::Unknown;
        };

        let punch = previous.vector_to(&fist);
        let shoulder_line = shoulder.vector_to(&opposite_shoulder);

        let relative = relative_angle(&punch, &shoulder_line);

        let horizontal = punch.x.abs();
        let vertical = punch.y.abs();
        let extension = shoulder.distance_to(&fist);

        // Parallel or antiparallel to the shoulder line means the punch
        // was thrown forward rather than vertically
        let is_forward = relative.abs() < self.config.forward_angle_rad
            || (relative - std::f64::consts::PI).abs() < self.config.forward_angle_rad;

        if is_forward
            && horizontal > vertical * self.config.jab_axis_ratio
            && extension < self.config.extension_threshold
        {
            return PunchType::Jab;
        }

        if is_forward && horizontal > vertical && extension >= self.config.extension_threshold {
            return PunchType::Straight;
        }

        // Orthodox-stance fallbacks: rear hand favors the straight,
        // lead hand favors the jab
        if !hand.is_left() && horizontal > vertical * self.config.rear_axis_ratio {
            return PunchType::Straight;
        }

        if hand.is_left() && horizontal > vertical {
            return PunchType::Jab;
        }

        PunchType::Unknown
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

impl Default for PunchClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
