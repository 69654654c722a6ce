pub mod placer;
pub mod preview;

pub use placer::{BarrierPlacer, PlacementReport};
pub use preview::{preview, PreviewPoint};

use crate::error::{PlacementError, Result};
use crate::math::{Vector3, TOLERANCE};
use crate::scene::LayerMask;

/// Which side of the curve a placement sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Lowercase tag used in generated entity names.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// How placed barriers orient themselves relative to the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Face along the curve tangent.
    #[default]
    Parallel,
    /// Face the right-lateral direction.
    Perpendicular,
    /// Identity orientation; only the fixed Euler offset applies.
    Custom,
}

/// Configuration for barrier placement along a curve.
#[derive(Debug, Clone, Copy)]
pub struct PlacementConfig {
    /// Lateral distance from the curve center to each side.
    pub offset_distance: f64,
    /// Arc-length spacing between consecutive samples (must be positive).
    pub spacing: f64,
    /// Place barriers on the left side.
    pub place_left: bool,
    /// Place barriers on the right side.
    pub place_right: bool,
    /// Rotate barriers at all; when false every barrier keeps identity.
    pub auto_rotate: bool,
    /// Orientation policy relative to the curve.
    pub rotation_mode: RotationMode,
    /// Fixed Euler offset (roll, pitch, yaw in radians) composed onto
    /// every orientation.
    pub rotation_offset: Vector3,
    /// Snap placements to ground geometry via a downward ray.
    pub snap_to_ground: bool,
    /// Height above the candidate position to start the ray from.
    pub raycast_height: f64,
    /// Maximum downward ray distance.
    pub raycast_distance: f64,
    /// Layers considered ground. Explicit; no ambient default.
    pub ground_layers: LayerMask,
    /// Vertical offset applied above the ground hit point.
    pub ground_offset: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            offset_distance: 5.0,
            spacing: 1.0,
            place_left: true,
            place_right: true,
            auto_rotate: true,
            rotation_mode: RotationMode::Parallel,
            rotation_offset: Vector3::zeros(),
            snap_to_ground: true,
            raycast_height: 100.0,
            raycast_distance: 200.0,
            ground_layers: LayerMask::ALL,
            ground_offset: 0.0,
        }
    }
}

impl PlacementConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the spacing is not positive, or ground snapping
    /// is enabled with a non-positive raycast distance.
    pub fn validate(&self) -> Result<()> {
        if self.spacing < TOLERANCE {
            return Err(PlacementError::InvalidSpacing(self.spacing).into());
        }
        if self.snap_to_ground && self.raycast_distance < TOLERANCE {
            return Err(PlacementError::InvalidRaycastDistance(self.raycast_distance).into());
        }
        Ok(())
    }
}
