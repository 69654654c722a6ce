use crate::math::Point3;

use super::{GroundHit, GroundQuery, LayerMask};

/// An infinite horizontal plane at a fixed height.
///
/// The reference [`GroundQuery`] implementation for tools and tests; real
/// deployments query engine collision geometry instead.
#[derive(Debug, Clone, Copy)]
pub struct FlatGround {
    /// World-space Y of the ground plane.
    pub height: f64,
    /// Layer the plane lives on.
    pub layers: LayerMask,
}

impl FlatGround {
    /// A plane at the given height matching every layer filter.
    #[must_use]
    pub fn at_height(height: f64) -> Self {
        Self {
            height,
            layers: LayerMask::ALL,
        }
    }
}

impl GroundQuery for FlatGround {
    fn cast_down(&self, origin: Point3, max_distance: f64, filter: LayerMask) -> Option<GroundHit> {
        if !filter.intersects(self.layers) {
            return None;
        }
        let drop = origin.y - self.height;
        // The ray points down; a plane above the origin is behind the ray.
        if drop < 0.0 || drop > max_distance {
            return None;
        }
        Some(GroundHit {
            point: Point3::new(origin.x, self.height, origin.z),
        })
    }
}

/// A ground query that never hits, for exercising miss handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGround;

impl GroundQuery for NoGround {
    fn cast_down(
        &self,
        _origin: Point3,
        _max_distance: f64,
        _filter: LayerMask,
    ) -> Option<GroundHit> {
        None
    }
}
