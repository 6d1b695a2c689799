//! # Punchbox-Core
//!
//! Core types and utilities for the punchbox camera-based punch game:
//! view-space points, body pose keypoints, punch classification tags,
//! and session-level statistics.

pub mod error;
pub mod geometry;
pub mod pose;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use pose::*;
pub use types::*;
