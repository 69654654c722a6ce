use tracing::debug;

use crate::error::Result;
use crate::geometry::curve::Curve;
use crate::geometry::sample::sample_at;
use crate::math::{lateral_right, up_axis, Point3, TOLERANCE};
use crate::scene::GroundQuery;

use super::{PlacementConfig, Side};

/// A single preview marker for debug visualization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewPoint {
    /// Where the barrier would be placed (snapped when a hit was found).
    pub position: Point3,
    /// Which side of the curve the marker belongs to.
    pub side: Side,
}

/// Recomputes a subsampled set of candidate placements for visualization.
///
/// Non-authoritative and read-only: it performs the same lateral-offset and
/// ground-snap math as generation on every `stride`-th sample, but mutates
/// nothing and tracks nothing. Unlike generation, a ground miss keeps the
/// unsnapped candidate so the marker remains visible.
///
/// # Errors
///
/// Returns an error if a curve sample fails to evaluate.
pub fn preview(
    config: &PlacementConfig,
    curve: &dyn Curve,
    ground: &dyn GroundQuery,
    stride: usize,
) -> Result<Vec<PreviewPoint>> {
    let length = curve.length();
    if length < TOLERANCE || config.spacing < TOLERANCE {
        debug!("nothing to preview");
        return Ok(Vec::new());
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (length / config.spacing).ceil() as usize;
    let stride = stride.max(1);
    let up = up_axis();
    let mut points = Vec::new();

    for i in (0..=count).step_by(stride) {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / count as f64;
        let sample = sample_at(curve, t)?;
        let Ok(right) = lateral_right(&sample.tangent, &up) else {
            continue;
        };

        for (enabled, lateral, side) in [
            (config.place_left, -right, Side::Left),
            (config.place_right, right, Side::Right),
        ] {
            if !enabled {
                continue;
            }
            let mut position = sample.position + lateral * config.offset_distance;
            if config.snap_to_ground {
                let origin = position + up * config.raycast_height;
                if let Some(hit) =
                    ground.cast_down(origin, config.raycast_distance, config.ground_layers)
                {
                    position = hit.point + up * config.ground_offset;
                }
            }
            points.push(PreviewPoint { position, side });
        }
    }

    Ok(points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::Polyline;
    use crate::scene::{FlatGround, MemoryScene, NoGround};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn track() -> Polyline {
        Polyline::new(vec![p(0.0, 2.0, 0.0), p(0.0, 2.0, 100.0)], false).unwrap()
    }

    #[test]
    fn preview_subsamples_with_stride() {
        let config = PlacementConfig {
            spacing: 10.0,
            ..PlacementConfig::default()
        };
        // Samples at i = 0, 5, 10 of 0..=10: 3 per side.
        let points = preview(&config, &track(), &FlatGround::at_height(0.0), 5).unwrap();
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|pt| (pt.position.y - 0.0).abs() < 1e-9));
    }

    #[test]
    fn preview_keeps_unsnapped_candidate_on_miss() {
        let config = PlacementConfig {
            spacing: 10.0,
            ..PlacementConfig::default()
        };
        let points = preview(&config, &track(), &NoGround, 5).unwrap();
        assert!(!points.is_empty());
        for pt in &points {
            assert_relative_eq!(pt.position.y, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn preview_mutates_nothing() {
        let mut scene = MemoryScene::new();
        let template = scene.add_template("barrier");
        let mut placer =
            super::super::BarrierPlacer::new(PlacementConfig::default(), Some(template)).unwrap();
        placer
            .generate(&track(), &FlatGround::at_height(0.0), &mut scene)
            .unwrap();
        let before = scene.entity_count();

        let config = PlacementConfig::default();
        preview(&config, &track(), &FlatGround::at_height(0.0), 5).unwrap();
        assert_eq!(scene.entity_count(), before);
        assert_eq!(placer.spawned().len(), before - 1);
    }
}
