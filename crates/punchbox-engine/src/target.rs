//! Target placement and hit geometry.

use punchbox_core::{Point2D, Viewport};
use rand::Rng;

use crate::config::TargetConfig;

/// Places the target inside the playable safe area and tests hits
/// against it. Stateless; the session owns the current target center.
#[derive(Debug, Clone, Copy)]
pub struct TargetField {
    viewport: Viewport,
    config: TargetConfig,
}

impl TargetField {
    pub fn new(viewport: Viewport, config: TargetConfig) -> Self {
        Self { viewport, config }
    }

    /// Draw a new target center uniformly within the safe area.
    ///
    /// The top-left corner lands in `[margin, dim - size - margin]` per
    /// axis; when the margin exceeds the available space the range
    /// collapses to the margin itself.
    pub fn relocate<R: Rng>(&self, rng: &mut R) -> Point2D {
        let size = self.config.diameter;
        let margin = self.config.safe_margin;

        let max_x = self.viewport.width - size - margin;
        let max_y = self.viewport.height - size - margin;

        let x = rng.random_range(margin..=if max_x > margin { max_x } else { margin });
        let y = rng.random_range(margin..=if max_y > margin { max_y } else { margin });

        Point2D::new(x + size / 2.0, y + size / 2.0)
    }

    /// Hit iff the fist lands within the target radius plus the hit margin
    pub fn contains(&self, center: Point2D, fist: Point2D) -> bool {
        fist.distance_to(&center) < self.config.radius() + self.config.hit_margin
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }
}
