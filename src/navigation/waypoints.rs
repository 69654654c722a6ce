use tracing::debug;

use crate::error::Result;
use crate::geometry::curve::Curve;
use crate::geometry::sample::sample_uniform;
use crate::math::{lateral_right, up_axis, UnitQuat};
use crate::scene::{EntityId, Pose, SceneGraph, TemplateId};

/// Visual state of a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointState {
    /// Not the current target.
    Normal,
    /// The current target of the navigating agent.
    Active,
}

/// An ordered target pose the navigating agent must approach and pass.
#[derive(Debug, Clone)]
pub struct Waypoint {
    /// Target pose; the orientation faces along the path where generated.
    pub pose: Pose,
    /// Optional marker entity used for visual highlighting.
    pub entity: Option<EntityId>,
    /// Current visual state.
    pub state: WaypointState,
}

impl Waypoint {
    /// Creates a waypoint at a pose with no marker entity.
    #[must_use]
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            entity: None,
            state: WaypointState::Normal,
        }
    }

    /// Attaches a marker entity for highlighting.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }
}

/// Generates waypoints by sampling a curve uniformly in parameter.
///
/// Produces `count` waypoints at `t = i / (count - 1)`, each oriented to
/// face the curve tangent where one is defined. Spacing follows the curve
/// parameterization, not arc length.
///
/// # Errors
///
/// Returns an error if `count < 2` or sampling fails.
pub fn waypoints_from_curve(curve: &dyn Curve, count: usize) -> Result<Vec<Waypoint>> {
    let samples = sample_uniform(curve, count)?;
    let up = up_axis();
    let waypoints = samples
        .into_iter()
        .map(|s| {
            // A vertical tangent has no meaningful heading; fall back to identity.
            let orientation = if lateral_right(&s.tangent, &up).is_ok() {
                UnitQuat::face_towards(&s.tangent, &up)
            } else {
                UnitQuat::identity()
            };
            Waypoint::new(Pose::new(s.position, orientation))
        })
        .collect::<Vec<_>>();
    debug!(count = waypoints.len(), "generated waypoints from curve");
    Ok(waypoints)
}

/// Instantiates a marker entity per waypoint under a shared container.
///
/// Markers are named `wp_<index>` and their handles are written back into
/// the waypoints so the highlight driver can recolor them.
///
/// # Errors
///
/// Returns an error if the marker template does not exist.
pub fn instantiate_markers(
    waypoints: &mut [Waypoint],
    scene: &mut dyn SceneGraph,
    template: TemplateId,
    container: EntityId,
) -> Result<()> {
    for (index, waypoint) in waypoints.iter_mut().enumerate() {
        let entity = scene
            .instantiate(template, waypoint.pose, Some(container))
            .map_err(crate::error::RacelineError::Scene)?;
        if let Err(err) = scene.set_name(entity, format!("wp_{index}")) {
            debug!(%err, index, "could not name waypoint marker");
        }
        waypoint.entity = Some(entity);
    }
    Ok(())
}
