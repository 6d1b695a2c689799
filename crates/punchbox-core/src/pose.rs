//! Body and hand pose model.
//!
//! The pose-estimation collaborator reports landmarks in normalized sensor
//! space (origin bottom-left, coordinates in [0, 1]) with a per-landmark
//! confidence. This module converts them into view-space [`Point2D`]s,
//! gating out low-confidence landmarks, and defines the per-frame input
//! record consumed by the game engine.

use serde::{Deserialize, Serialize};

use crate::types::{Hand, Point2D, Timestamp, Viewport};

/// Landmarks below this confidence are treated as absent
pub const MIN_LANDMARK_CONFIDENCE: f32 = 0.3;

/// Tracked body landmarks (19 joints)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum JointName {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
    Neck = 17,
    Root = 18,
}

impl JointName {
    pub const COUNT: usize = 19;

    pub fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftEye),
            2 => Some(Self::RightEye),
            3 => Some(Self::LeftEar),
            4 => Some(Self::RightEar),
            5 => Some(Self::LeftShoulder),
            6 => Some(Self::RightShoulder),
            7 => Some(Self::LeftElbow),
            8 => Some(Self::RightElbow),
            9 => Some(Self::LeftWrist),
            10 => Some(Self::RightWrist),
            11 => Some(Self::LeftHip),
            12 => Some(Self::RightHip),
            13 => Some(Self::LeftKnee),
            14 => Some(Self::RightKnee),
            15 => Some(Self::LeftAnkle),
            16 => Some(Self::RightAnkle),
            17 => Some(Self::Neck),
            18 => Some(Self::Root),
            _ => None,
        }
    }

    /// Bone connectivity pairs for skeleton rendering
    pub fn skeleton_pairs() -> &'static [(JointName, JointName)] {
        &[
            // Head
            (JointName::Nose, JointName::Neck),
            (JointName::LeftEye, JointName::Nose),
            (JointName::RightEye, JointName::Nose),
            (JointName::LeftEar, JointName::LeftEye),
            (JointName::RightEar, JointName::RightEye),
            // Torso
            (JointName::Neck, JointName::LeftShoulder),
            (JointName::Neck, JointName::RightShoulder),
            (JointName::LeftShoulder, JointName::LeftHip),
            (JointName::RightShoulder, JointName::RightHip),
            (JointName::LeftHip, JointName::RightHip),
            (JointName::LeftHip, JointName::Root),
            (JointName::RightHip, JointName::Root),
            // Arms
            (JointName::LeftShoulder, JointName::LeftElbow),
            (JointName::LeftElbow, JointName::LeftWrist),
            (JointName::RightShoulder, JointName::RightElbow),
            (JointName::RightElbow, JointName::RightWrist),
            // Legs
            (JointName::LeftHip, JointName::LeftKnee),
            (JointName::LeftKnee, JointName::LeftAnkle),
            (JointName::RightHip, JointName::RightKnee),
            (JointName::RightKnee, JointName::RightAnkle),
        ]
    }
}

impl Hand {
    /// Shoulder on the same side as this hand
    pub fn shoulder(&self) -> JointName {
        match self {
            Hand::Left => JointName::LeftShoulder,
            Hand::Right => JointName::RightShoulder,
        }
    }

    /// Shoulder on the opposite side
    pub fn opposite_shoulder(&self) -> JointName {
        match self {
            Hand::Left => JointName::RightShoulder,
            Hand::Right => JointName::LeftShoulder,
        }
    }
}

/// A landmark in normalized sensor space with detection confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
    pub confidence: f32,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    /// Convert to view space, flipping y so the origin is top-left
    pub fn to_view(&self, viewport: Viewport) -> Point2D {
        Point2D::new(self.x * viewport.width, (1.0 - self.y) * viewport.height)
    }
}

/// Body joints in view space with an aggregate confidence score.
///
/// Absent entries mean the landmark was missing or below
/// [`MIN_LANDMARK_CONFIDENCE`] this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPose {
    joints: [Option<Point2D>; JointName::COUNT],
    pub confidence: f32,
}

impl BodyPose {
    pub fn get(&self, joint: JointName) -> Option<Point2D> {
        self.joints[joint as usize]
    }

    pub fn set(&mut self, joint: JointName, point: Point2D) {
        self.joints[joint as usize] = Some(point);
    }

    /// Joints present this frame, in index order
    pub fn present(&self) -> impl Iterator<Item = (JointName, Point2D)> + '_ {
        self.joints.iter().enumerate().filter_map(|(i, p)| {
            p.map(|point| (JointName::from_index(i as u8).unwrap(), point))
        })
    }

    pub fn joint_count(&self) -> usize {
        self.joints.iter().filter(|p| p.is_some()).count()
    }

    /// Build a pose from normalized landmarks.
    ///
    /// Landmarks at or below the confidence gate are dropped; the aggregate
    /// confidence is the mean over the kept landmarks. Returns `None` when
    /// nothing survives the gate.
    pub fn from_normalized(
        landmarks: &[(JointName, NormalizedPoint)],
        viewport: Viewport,
    ) -> Option<Self> {
        let mut joints = [None; JointName::COUNT];
        let mut total_confidence = 0.0f32;
        let mut kept = 0u32;

        for (joint, landmark) in landmarks {
            if landmark.confidence > MIN_LANDMARK_CONFIDENCE {
                joints[*joint as usize] = Some(landmark.to_view(viewport));
                total_confidence += landmark.confidence;
                kept += 1;
            }
        }

        if kept == 0 {
            return None;
        }

        Some(Self {
            joints,
            confidence: total_confidence / kept as f32,
        })
    }
}

impl Default for BodyPose {
    fn default() -> Self {
        Self {
            joints: [None; JointName::COUNT],
            confidence: 0.0,
        }
    }
}

/// Hand landmarks used to derive the fist center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub wrist: NormalizedPoint,
    pub index_knuckle: NormalizedPoint,
    pub middle_knuckle: NormalizedPoint,
}

impl HandLandmarks {
    /// Estimated center of the closed fist in view space.
    ///
    /// All three landmarks must pass the confidence gate; the fist center
    /// is their average, converted to view space.
    pub fn fist_center(&self, viewport: Viewport) -> Option<Point2D> {
        let landmarks = [self.wrist, self.index_knuckle, self.middle_knuckle];
        if landmarks
            .iter()
            .any(|l| l.confidence <= MIN_LANDMARK_CONFIDENCE)
        {
            return None;
        }

        let x = landmarks.iter().map(|l| l.x).sum::<f64>() / 3.0;
        let y = landmarks.iter().map(|l| l.y).sum::<f64>() / 3.0;

        Some(NormalizedPoint::new(x, y, 1.0).to_view(viewport))
    }
}

/// Per-frame input record delivered by the pose-estimation collaborator.
///
/// Fist points are already in view space; absent fields mean the hand or
/// body was not detected this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointFrame {
    pub timestamp: Timestamp,
    pub left_fist: Option<Point2D>,
    pub right_fist: Option<Point2D>,
    pub body: Option<BodyPose>,
}

impl KeypointFrame {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            left_fist: None,
            right_fist: None,
            body: None,
        }
    }

    pub fn fist(&self, hand: Hand) -> Option<Point2D> {
        match hand {
            Hand::Left => self.left_fist,
            Hand::Right => self.right_fist,
        }
    }
}
