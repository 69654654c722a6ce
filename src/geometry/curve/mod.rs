mod arc;
mod polyline;

pub use arc::Arc;
pub use polyline::Polyline;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// Trait for parametric curves in 3D space.
///
/// Curves are parameterized over normalized `t ∈ [0, 1]`, inclusive at both
/// ends. There is no guarantee that the parameterization is uniform in arc
/// length.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside `[0, 1]`.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the unit tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside `[0, 1]` or the tangent is
    /// degenerate.
    fn tangent(&self, t: f64) -> Result<Vector3>;

    /// Returns the total arc length of the curve.
    ///
    /// May be approximate (piecewise-linear integration); computed once per
    /// curve, not per call.
    fn length(&self) -> f64;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}

/// Validates that a normalized curve parameter lies in `[0, 1]`.
pub(crate) fn check_parameter(t: f64) -> Result<()> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: t,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}
