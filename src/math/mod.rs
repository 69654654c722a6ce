use crate::error::{GeometryError, Result};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit quaternion orientation type.
pub type UnitQuat = nalgebra::UnitQuaternion<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns the world up axis (+Y).
#[must_use]
pub fn up_axis() -> Vector3 {
    Vector3::y()
}

/// Computes the unit right-lateral direction for a curve tangent.
///
/// Right is `normalize(cross(tangent, up))`; the left direction is its
/// negation. The tangent varies along a curve, so this must be recomputed
/// per sample.
///
/// # Errors
///
/// Returns an error if the tangent is parallel to `up` (degenerate cross
/// product).
pub fn lateral_right(tangent: &Vector3, up: &Vector3) -> Result<Vector3> {
    let right = tangent.cross(up);
    let len = right.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(right / len)
}

/// Linear interpolation between `a` and `b`.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamps a value to `[0, 1]`.
#[must_use]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lateral_right_of_forward_is_negative_x() {
        // Tangent +Z with up +Y: cross(z, y) = -x.
        let right = lateral_right(&Vector3::z(), &Vector3::y()).unwrap();
        assert_relative_eq!(right, -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn lateral_right_is_unit_length_for_non_unit_tangent() {
        let tangent = Vector3::new(3.0, 0.0, 4.0);
        let right = lateral_right(&tangent, &Vector3::y()).unwrap();
        assert_relative_eq!(right.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn lateral_right_degenerate_when_tangent_parallel_to_up() {
        assert!(lateral_right(&Vector3::y(), &Vector3::y()).is_err());
    }

    #[test]
    fn lerp_and_clamp() {
        assert_relative_eq!(lerp(30.0, 80.0, 0.5), 55.0);
        assert_relative_eq!(clamp01(1.7), 1.0);
        assert_relative_eq!(clamp01(-0.2), 0.0);
    }
}
