use slotmap::SlotMap;

use crate::error::SceneError;

use super::{EntityId, LayerMask, MaterialId, Pose, SceneGraph, TemplateId};

/// Data associated with a live scene entity.
#[derive(Debug, Clone)]
pub struct EntityData {
    /// Display name, used for traceability of generated entities.
    pub name: String,
    /// World-space pose.
    pub pose: Pose,
    /// Parent entity, if any.
    pub parent: Option<EntityId>,
    /// Template this entity was instantiated from; `None` for empties.
    pub template: Option<TemplateId>,
    /// Currently assigned render material, if any.
    pub material: Option<MaterialId>,
    /// Layer the entity lives on.
    pub layer: LayerMask,
}

/// In-memory scene arena backing the tooling and the test suite.
///
/// Entities reference each other via typed IDs (generational indices), so a
/// destroyed entity's handle goes stale instead of dangling. Real engines
/// supply their own [`SceneGraph`] implementation; this one keeps the whole
/// scene resident in slot maps.
#[derive(Debug, Default)]
pub struct MemoryScene {
    entities: SlotMap<EntityId, EntityData>,
    materials: SlotMap<MaterialId, String>,
    templates: SlotMap<TemplateId, String>,
}

impl MemoryScene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named render material and returns its ID.
    pub fn add_material(&mut self, name: &str) -> MaterialId {
        self.materials.insert(name.to_owned())
    }

    /// Registers a named entity template and returns its ID.
    pub fn add_template(&mut self, name: &str) -> TemplateId {
        self.templates.insert(name.to_owned())
    }

    /// Returns a reference to the entity data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn entity(&self, id: EntityId) -> Result<&EntityData, SceneError> {
        self.entities
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("entity".into()))
    }

    /// Whether the entity handle still refers to a live entity.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates over all live entities.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &EntityData)> {
        self.entities.iter()
    }
}

impl SceneGraph for MemoryScene {
    fn instantiate(
        &mut self,
        template: TemplateId,
        pose: Pose,
        parent: Option<EntityId>,
    ) -> Result<EntityId, SceneError> {
        let name = self
            .templates
            .get(template)
            .ok_or(SceneError::TemplateNotFound)?
            .clone();
        if let Some(parent) = parent {
            if !self.entities.contains_key(parent) {
                return Err(SceneError::EntityNotFound("parent".into()));
            }
        }
        Ok(self.entities.insert(EntityData {
            name,
            pose,
            parent,
            template: Some(template),
            material: None,
            layer: LayerMask::ALL,
        }))
    }

    fn create_empty(&mut self, name: &str, parent: Option<EntityId>) -> EntityId {
        self.entities.insert(EntityData {
            name: name.to_owned(),
            pose: Pose::from_position(crate::math::Point3::origin()),
            parent,
            template: None,
            material: None,
            layer: LayerMask::ALL,
        })
    }

    fn destroy(&mut self, entity: EntityId) {
        if self.entities.remove(entity).is_some() {
            // Orphaned children are destroyed with their parent.
            let children: Vec<EntityId> = self
                .entities
                .iter()
                .filter(|(_, data)| data.parent == Some(entity))
                .map(|(id, _)| id)
                .collect();
            for child in children {
                self.destroy(child);
            }
        }
    }

    fn set_material(&mut self, entity: EntityId, material: MaterialId) -> Result<(), SceneError> {
        if !self.materials.contains_key(material) {
            return Err(SceneError::MaterialNotFound);
        }
        let data = self
            .entities
            .get_mut(entity)
            .ok_or_else(|| SceneError::EntityNotFound("entity".into()))?;
        data.material = Some(material);
        Ok(())
    }

    fn set_name(&mut self, entity: EntityId, name: String) -> Result<(), SceneError> {
        let data = self
            .entities
            .get_mut(entity)
            .ok_or_else(|| SceneError::EntityNotFound("entity".into()))?;
        data.name = name;
        Ok(())
    }

    fn children_of(&self, parent: EntityId) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, data)| data.parent == Some(parent))
            .map(|(id, _)| id)
            .collect()
    }
}
