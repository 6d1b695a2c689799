//! Fundamental types for the punchbox game engine.

use chrono::Utc;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Seconds elapsed since `earlier` (negative if `earlier` is later)
    pub fn seconds_since(&self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0) as f64 / 1_000_000_000.0
    }

    pub fn after_secs(&self, secs: f64) -> Timestamp {
        Self(self.0 + (secs * 1e9) as i64)
    }
}

/// 2D position in view-space coordinates (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Displacement vector from this point to `other`
    pub fn vector_to(&self, other: &Self) -> Vector2<f64> {
        Vector2::new(other.x - self.x, other.y - self.y)
    }
}

/// A point together with the time it was observed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedPoint {
    pub point: Point2D,
    pub at: Timestamp,
}

impl ObservedPoint {
    pub fn new(point: Point2D, at: Timestamp) -> Self {
        Self { point, at }
    }
}

/// Dimensions of the playable view surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which hand a fist observation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn is_left(&self) -> bool {
        matches!(self, Hand::Left)
    }
}

/// Classification of a single punch event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PunchType {
    Jab,
    Straight,
    Unknown,
}

impl PunchType {
    /// Display label matching the on-screen terminology
    pub fn label(&self) -> &'static str {
        match self {
            PunchType::Jab => "Jab",
            PunchType::Straight => "Straight",
            PunchType::Unknown => "Punch",
        }
    }
}

/// Aggregate punch counters for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchStats {
    pub total_punches: u32,
    pub jabs: u32,
    pub straights: u32,
    pub last_punch_type: PunchType,
}

impl PunchStats {
    /// Fold one classified punch into the counters
    pub fn record(&mut self, punch: PunchType) {
        self.total_punches += 1;
        self.last_punch_type = punch;

        match punch {
            PunchType::Jab => self.jabs += 1,
            PunchType::Straight => self.straights += 1,
            PunchType::Unknown => {}
        }
    }
}

impl Default for PunchStats {
    fn default() -> Self {
        Self {
            total_punches: 0,
            jabs: 0,
            straights: 0,
            last_punch_type: PunchType::Unknown,
        }
    }
}
