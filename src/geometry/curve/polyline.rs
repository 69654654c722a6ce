use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{check_parameter, Curve};

/// A piecewise-linear curve through an ordered list of points.
///
/// Arc length is exact and computed once at construction. The normalized
/// parameter is uniform in arc length across the whole polyline, but the
/// curve is only C0 at interior vertices: the tangent jumps between
/// segments.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Point3>,
    /// `cumulative[i]` is the arc length at the start of segment `i`;
    /// the last entry equals the total length.
    cumulative: Vec<f64>,
    length: f64,
    closed: bool,
}

impl Polyline {
    /// Creates a polyline from an ordered list of points.
    ///
    /// Consecutive points closer than the global tolerance are merged.
    /// For a closed polyline an implicit segment connects the last point
    /// back to the first.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two distinct points remain or the
    /// total length is zero.
    pub fn new(points: Vec<Point3>, closed: bool) -> Result<Self> {
        let mut distinct: Vec<Point3> = Vec::with_capacity(points.len());
        for p in points {
            if distinct
                .last()
                .is_none_or(|prev: &Point3| (p - prev).norm() >= TOLERANCE)
            {
                distinct.push(p);
            }
        }
        if closed {
            if let (Some(first), Some(last)) = (distinct.first().copied(), distinct.last()) {
                if (first - last).norm() < TOLERANCE && distinct.len() > 1 {
                    distinct.pop();
                }
            }
        }

        if distinct.len() < 2 {
            return Err(GeometryError::Degenerate(
                "polyline requires at least two distinct points".into(),
            )
            .into());
        }

        let segment_count = distinct.len() - 1 + usize::from(closed);
        let mut cumulative = Vec::with_capacity(segment_count + 1);
        cumulative.push(0.0);
        let mut total = 0.0;
        for i in 0..segment_count {
            let a = distinct[i];
            let b = distinct[(i + 1) % distinct.len()];
            total += (b - a).norm();
            cumulative.push(total);
        }

        if total < TOLERANCE {
            return Err(GeometryError::Degenerate("polyline has zero length".into()).into());
        }

        Ok(Self {
            points: distinct,
            cumulative,
            length: total,
            closed,
        })
    }

    /// Returns the polyline's vertices.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Index of the segment containing arc length `s`.
    fn segment_at(&self, s: f64) -> usize {
        let segment_count = self.cumulative.len() - 1;
        let i = self.cumulative.partition_point(|&c| c <= s);
        i.saturating_sub(1).min(segment_count - 1)
    }

    fn segment_endpoints(&self, index: usize) -> (Point3, Point3) {
        let a = self.points[index];
        let b = self.points[(index + 1) % self.points.len()];
        (a, b)
    }
}

impl Curve for Polyline {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        check_parameter(t)?;
        let s = t * self.length;
        let index = self.segment_at(s);
        let (a, b) = self.segment_endpoints(index);
        let seg_len = self.cumulative[index + 1] - self.cumulative[index];
        let local = (s - self.cumulative[index]) / seg_len;
        Ok(a + (b - a) * local)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        check_parameter(t)?;
        let s = t * self.length;
        let index = self.segment_at(s);
        let (a, b) = self.segment_endpoints(index);
        let seg_len = self.cumulative[index + 1] - self.cumulative[index];
        Ok((b - a) / seg_len)
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
