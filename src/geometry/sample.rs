use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

use super::curve::Curve;

/// A single evaluated point on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// World-space position on the curve.
    pub position: Point3,
    /// Unit tangent direction at the sample.
    pub tangent: Vector3,
}

/// Evaluates position and tangent at a single parameter.
///
/// # Errors
///
/// Returns an error if `t` is outside `[0, 1]` or the tangent is degenerate.
pub fn sample_at(curve: &dyn Curve, t: f64) -> Result<CurveSample> {
    Ok(CurveSample {
        position: curve.evaluate(t)?,
        tangent: curve.tangent(t)?,
    })
}

/// Samples a curve uniformly in parameter at `t = i / (count - 1)`.
///
/// Sampling is uniform in curve parameter, not arc length: on curves whose
/// parameterization is non-uniform the resulting world-space spacing is
/// uneven. This matches the behavior both consumers (waypoint generation
/// and barrier placement) are specified against.
///
/// # Errors
///
/// Returns an error if `count < 2` or any sample fails to evaluate.
pub fn sample_uniform(curve: &dyn Curve, count: usize) -> Result<Vec<CurveSample>> {
    if count < 2 {
        return Err(GeometryError::InvalidSampleCount(count).into());
    }
    let mut samples = Vec::with_capacity(count);
    #[allow(clippy::cast_precision_loss)]
    let denominator = (count - 1) as f64;
    for i in 0..count {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / denominator;
        samples.push(sample_at(curve, t)?);
    }
    Ok(samples)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::Polyline;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn uniform_samples_cover_both_endpoints() {
        let line = Polyline::new(vec![p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)], false).unwrap();
        let samples = sample_uniform(&line, 5).unwrap();
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples[0].position, p(0.0, 0.0, 0.0));
        assert_relative_eq!(samples[4].position, p(10.0, 0.0, 0.0));
        assert_relative_eq!(samples[2].position, p(5.0, 0.0, 0.0));
        for s in &samples {
            assert_relative_eq!(s.tangent, Vector3::x(), epsilon = 1e-9);
        }
    }

    #[test]
    fn sample_count_below_two_is_rejected() {
        let line = Polyline::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)], false).unwrap();
        assert!(sample_uniform(&line, 0).is_err());
        assert!(sample_uniform(&line, 1).is_err());
    }
}
