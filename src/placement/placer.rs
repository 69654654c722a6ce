use tracing::{debug, info, warn};

use crate::error::{PlacementError, Result};
use crate::geometry::curve::Curve;
use crate::geometry::sample::{sample_at, CurveSample};
use crate::math::{lateral_right, up_axis, Point3, UnitQuat, Vector3, TOLERANCE};
use crate::scene::{EntityId, GroundQuery, Pose, SceneGraph, TemplateId};

use super::{PlacementConfig, RotationMode, Side};

/// Aggregate result of a generation batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementReport {
    /// Barriers successfully instantiated.
    pub placed: usize,
    /// Samples skipped (ground miss or degenerate lateral direction).
    pub failed: usize,
}

/// Batch-places barrier entities along a parametric curve.
///
/// `generate` samples the curve at `ceil(length / spacing) + 1` points
/// uniformly in parameter, offsets each sample laterally to the enabled
/// sides, snaps candidates to ground geometry, and instantiates the barrier
/// template under a dedicated parent container. The spawned list exactly
/// mirrors live placed entities: `generate` always clears first, and
/// `clear` also scavenges stray children of the container.
///
/// Batch operations run synchronously to completion and must not be invoked
/// concurrently with themselves; callers serialize regenerate requests.
#[derive(Debug)]
pub struct BarrierPlacer {
    config: PlacementConfig,
    template: Option<TemplateId>,
    parent: Option<EntityId>,
    spawned: Vec<(EntityId, Side)>,
}

impl BarrierPlacer {
    /// Creates a placer with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: PlacementConfig, template: Option<TemplateId>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            template,
            parent: None,
            spawned: Vec::new(),
        })
    }

    /// Assigns the barrier template to instantiate.
    pub fn set_template(&mut self, template: TemplateId) {
        self.template = Some(template);
    }

    /// The placements created by the last `generate` call.
    #[must_use]
    pub fn spawned(&self) -> &[(EntityId, Side)] {
        &self.spawned
    }

    /// The parent container entity, if one has been created.
    #[must_use]
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Regenerates barriers along `curve`.
    ///
    /// Idempotent: existing barriers are cleared first, and repeated calls
    /// on an unchanged curve produce an identical placement set. A ground
    /// miss skips that sample/side and continues; the batch never aborts
    /// mid-way. A partially failed batch keeps its successful placements —
    /// callers wanting atomicity call [`Self::clear`] on failure.
    ///
    /// # Errors
    ///
    /// Returns an error before any mutation if no template is assigned or
    /// the curve has zero length.
    pub fn generate(
        &mut self,
        curve: &dyn Curve,
        ground: &dyn GroundQuery,
        scene: &mut dyn SceneGraph,
    ) -> Result<PlacementReport> {
        let template = self.template.ok_or(PlacementError::MissingTemplate)?;
        let length = curve.length();
        if length < TOLERANCE {
            return Err(PlacementError::DegenerateCurve.into());
        }

        self.clear(scene);

        let parent = match self.parent {
            Some(parent) => parent,
            None => {
                let parent = scene.create_empty("barriers", None);
                self.parent = Some(parent);
                parent
            }
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (length / self.config.spacing).ceil() as usize;
        debug!(count, length, "generating barriers along curve");

        let sides_enabled =
            usize::from(self.config.place_left) + usize::from(self.config.place_right);
        let up = up_axis();
        let mut report = PlacementReport::default();

        for i in 0..=count {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / count as f64;

            let sample = match sample_at(curve, t) {
                Ok(sample) => sample,
                Err(err) => {
                    warn!(%err, t, "curve sample failed, skipping");
                    report.failed += sides_enabled;
                    continue;
                }
            };
            let right = match lateral_right(&sample.tangent, &up) {
                Ok(right) => right,
                Err(err) => {
                    warn!(%err, t, "no lateral direction at sample, skipping");
                    report.failed += sides_enabled;
                    continue;
                }
            };

            if self.config.place_left {
                self.place_one(
                    scene, ground, template, &sample, -right, right, Side::Left, parent,
                    &mut report,
                );
            }
            if self.config.place_right {
                self.place_one(
                    scene, ground, template, &sample, right, right, Side::Right, parent,
                    &mut report,
                );
            }
        }

        info!(
            placed = report.placed,
            failed = report.failed,
            "barrier generation complete"
        );
        Ok(report)
    }

    /// Destroys every tracked barrier, then scavenges any stray children of
    /// the parent container left behind by external mutation. Safe to call
    /// on an empty list.
    pub fn clear(&mut self, scene: &mut dyn SceneGraph) {
        for (entity, _) in self.spawned.drain(..) {
            scene.destroy(entity);
        }
        if let Some(parent) = self.parent {
            for child in scene.children_of(parent) {
                scene.destroy(child);
            }
        }
        debug!("all barriers cleared");
    }

    #[allow(clippy::too_many_arguments)]
    fn place_one(
        &mut self,
        scene: &mut dyn SceneGraph,
        ground: &dyn GroundQuery,
        template: TemplateId,
        sample: &CurveSample,
        lateral: Vector3,
        right: Vector3,
        side: Side,
        parent: EntityId,
        report: &mut PlacementReport,
    ) {
        let candidate = sample.position + lateral * self.config.offset_distance;

        let position = if self.config.snap_to_ground {
            match self.snap(ground, candidate) {
                Some(position) => position,
                None => {
                    warn!(
                        side = side.label(),
                        x = candidate.x,
                        z = candidate.z,
                        "no ground under barrier, not placed"
                    );
                    report.failed += 1;
                    return;
                }
            }
        } else {
            candidate
        };

        let orientation = self.orientation(&sample.tangent, &right);
        match scene.instantiate(template, Pose::new(position, orientation), Some(parent)) {
            Ok(entity) => {
                let name = format!("barrier_{}_{}", side.label(), self.spawned.len());
                if let Err(err) = scene.set_name(entity, name) {
                    warn!(%err, "could not name barrier");
                }
                self.spawned.push((entity, side));
                report.placed += 1;
            }
            Err(err) => {
                warn!(%err, side = side.label(), "failed to instantiate barrier");
                report.failed += 1;
            }
        }
    }

    fn snap(&self, ground: &dyn GroundQuery, candidate: Point3) -> Option<Point3> {
        let origin = candidate + up_axis() * self.config.raycast_height;
        let hit = ground.cast_down(origin, self.config.raycast_distance, self.config.ground_layers)?;
        Some(hit.point + up_axis() * self.config.ground_offset)
    }

    fn orientation(&self, tangent: &Vector3, right: &Vector3) -> UnitQuat {
        if !self.config.auto_rotate {
            return UnitQuat::identity();
        }
        let base = match self.config.rotation_mode {
            RotationMode::Parallel => UnitQuat::face_towards(tangent, &up_axis()),
            RotationMode::Perpendicular => UnitQuat::face_towards(right, &up_axis()),
            RotationMode::Custom => UnitQuat::identity(),
        };
        let offset = self.config.rotation_offset;
        base * UnitQuat::from_euler_angles(offset.x, offset.y, offset.z)
    }
}
