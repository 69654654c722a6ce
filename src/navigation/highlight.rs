use tracing::warn;

use crate::scene::{MaterialId, SceneGraph};

use super::waypoints::{Waypoint, WaypointState};

/// Material pair used to recolor waypoint markers.
#[derive(Debug, Clone, Copy)]
pub struct HighlightMaterials {
    /// Material for waypoints that are not the current target.
    pub normal: MaterialId,
    /// Material for the current target waypoint.
    pub active: MaterialId,
}

/// Applies visual highlight state to waypoint marker entities.
///
/// Purely cosmetic: every failure here is per-item recoverable. A waypoint
/// without a marker entity is skipped silently; a stale entity or material
/// handle is logged and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightDriver {
    materials: Option<HighlightMaterials>,
}

impl HighlightDriver {
    /// Creates a driver; `None` disables highlighting entirely.
    #[must_use]
    pub fn new(materials: Option<HighlightMaterials>) -> Self {
        Self { materials }
    }

    /// Whether highlighting is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.materials.is_some()
    }

    /// Pushes a waypoint's current state to its marker entity.
    pub fn apply(&self, scene: &mut dyn SceneGraph, index: usize, waypoint: &Waypoint) {
        let Some(materials) = self.materials else {
            return;
        };
        let Some(entity) = waypoint.entity else {
            return;
        };
        let material = match waypoint.state {
            WaypointState::Normal => materials.normal,
            WaypointState::Active => materials.active,
        };
        if let Err(err) = scene.set_material(entity, material) {
            warn!(%err, index, "could not highlight waypoint");
        }
    }

    /// Resets every waypoint marker to the normal material.
    pub fn reset_all(&self, scene: &mut dyn SceneGraph, waypoints: &[Waypoint]) {
        if self.materials.is_none() {
            return;
        }
        for (index, waypoint) in waypoints.iter().enumerate() {
            self.apply(scene, index, waypoint);
        }
    }
}
