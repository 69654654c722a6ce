pub mod ground;
pub mod memory;

pub use ground::{FlatGround, NoGround};
pub use memory::{EntityData, MemoryScene};

use crate::math::{Point3, UnitQuat};

slotmap::new_key_type! {
    /// Unique identifier for a scene entity.
    pub struct EntityId;

    /// Unique identifier for a render material.
    pub struct MaterialId;

    /// Unique identifier for an instantiable entity template (prefab).
    pub struct TemplateId;
}

/// A world-space position plus orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Point3,
    pub orientation: UnitQuat,
}

impl Pose {
    /// Creates a pose from a position and orientation.
    #[must_use]
    pub fn new(position: Point3, orientation: UnitQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Creates a pose at a position with identity orientation.
    #[must_use]
    pub fn from_position(position: Point3) -> Self {
        Self::new(position, UnitQuat::identity())
    }
}

/// Bitmask selecting which scene layers a query may hit.
///
/// Always passed explicitly; there is no ambient default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Mask matching every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Mask matching no layer.
    pub const NONE: Self = Self(0);

    /// Mask matching a single layer index (0-31).
    #[must_use]
    pub fn layer(index: u32) -> Self {
        Self(1 << index)
    }

    /// Whether this mask shares any layer with `other`.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// Result of a successful downward ground query.
///
/// Absence of a hit is a first-class outcome reported as `None`, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// World-space point where the ray met the surface.
    pub point: Point3,
}

/// Synchronous collision query against resident world geometry.
pub trait GroundQuery {
    /// Casts a ray straight down from `origin`, returning the nearest
    /// surface point within `max_distance` on a layer matching `filter`.
    fn cast_down(&self, origin: Point3, max_distance: f64, filter: LayerMask) -> Option<GroundHit>;
}

/// Cosmetic steering flags, read by consumers such as a chase camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteeringInput {
    pub left: bool,
    pub right: bool,
}

/// The vehicle's opaque drive simulation.
///
/// The navigator writes a target pose and a speed cap; the controller turns
/// those into motion and reports its position back each tick.
pub trait DriveController {
    /// Publishes the pose the vehicle should steer toward.
    fn set_target(&mut self, pose: Pose);

    /// Publishes the maximum speed the vehicle may reach.
    fn set_speed_cap(&mut self, cap: f64);

    /// Current world-space position of the vehicle.
    fn current_position(&self) -> Point3;

    /// Current steering flags, for cosmetic consumers.
    fn steering_input(&self) -> SteeringInput;
}

/// The render/scene-graph collaborator: instancing, hierarchy, materials.
pub trait SceneGraph {
    /// Instantiates a template at a pose, optionally under a parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or parent does not exist.
    fn instantiate(
        &mut self,
        template: TemplateId,
        pose: Pose,
        parent: Option<EntityId>,
    ) -> Result<EntityId, crate::error::SceneError>;

    /// Creates an empty (non-rendered) entity, used for grouping containers.
    fn create_empty(&mut self, name: &str, parent: Option<EntityId>) -> EntityId;

    /// Destroys an entity. Destroying an already-dead entity is a no-op.
    fn destroy(&mut self, entity: EntityId);

    /// Assigns a render material to an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity or material does not exist.
    fn set_material(
        &mut self,
        entity: EntityId,
        material: MaterialId,
    ) -> Result<(), crate::error::SceneError>;

    /// Renames an entity for traceability.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    fn set_name(&mut self, entity: EntityId, name: String) -> Result<(), crate::error::SceneError>;

    /// Returns the live children of a parent entity.
    fn children_of(&self, parent: EntityId) -> Vec<EntityId>;
}
