use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{check_parameter, Curve};

/// A circular arc in 3D space.
///
/// Defined by a center, radius, normal axis, and a reference direction for
/// the zero-angle. The normalized parameter `t ∈ [0, 1]` sweeps from
/// `start_angle` to `end_angle` (in radians) around the normal axis, so a
/// full circle is obtained with a sweep of `TAU`. Useful for curved test
/// tracks and ring circuits.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the arc circle
    /// * `radius` - Radius (must be positive)
    /// * `normal` - Normal vector defining the arc plane
    /// * `ref_dir` - Reference direction for angle = 0 (must be perpendicular to normal)
    /// * `start_angle` - Start angle in radians
    /// * `end_angle` - End angle in radians
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the sweep is zero,
    /// the normal is zero-length, or the reference direction is not
    /// perpendicular to the normal.
    pub fn new(
        center: Point3,
        radius: f64,
        normal: Vector3,
        ref_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if (end_angle - start_angle).abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be non-zero".into()).into());
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let ref_len = ref_dir.norm();
        if ref_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let ref_dir = ref_dir / ref_len;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
            start_angle,
            end_angle,
        })
    }

    /// A full circle of the given radius in the XZ plane, swept around +Y.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn circle_xz(center: Point3, radius: f64) -> Result<Self> {
        Self::new(
            center,
            radius,
            Vector3::y(),
            Vector3::x(),
            0.0,
            std::f64::consts::TAU,
        )
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed sweep angle in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Maps the normalized parameter to an angle on the circle.
    fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + t * self.sweep()
    }

    /// Computes the second axis direction (perpendicular to both normal and `ref_dir`).
    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        check_parameter(t)?;
        let angle = self.angle_at(t);
        let binormal = self.binormal();
        let x = self.radius * angle.cos();
        let y = self.radius * angle.sin();
        Ok(self.center + self.ref_dir * x + binormal * y)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        check_parameter(t)?;
        let angle = self.angle_at(t);
        let binormal = self.binormal();
        let dx = -angle.sin();
        let dy = angle.cos();
        let tangent = (self.ref_dir * dx + binormal * dy) * self.sweep().signum();
        Ok(tangent)
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep().abs()
    }

    fn is_closed(&self) -> bool {
        (self.sweep().abs() - std::f64::consts::TAU).abs() < TOLERANCE
    }
}
