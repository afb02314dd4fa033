//! Validated level content and its JSON ingestion.
//!
//! [`LevelData`] bundles a tile map, the entities placed on it and the
//! tileset the map refers to. Every structural check runs at construction:
//! a `LevelData` that exists is consistent with its tileset and its stage.
//!
//! Levels can also be loaded from JSON ([`LevelSource`]). Entity records name
//! a type; an [`EntityRegistry`] turns each type into a behavior.

#[cfg(test)]
#[path = "level_data_test.rs"]
mod level_data_test;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::actor::Actor;
use crate::consts::TILE_SIZE;
use crate::entity::{Entity, EntityBehavior, EntityError, EntityIdGenerator, EntityProperties, EntityRef, PlainEntity};
use crate::stage::{Stage, StageRef};
use crate::tile::Tileset;

/// Error returned when a level cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// `map_data` does not hold `width * height` cells.
    #[error("level '{level}': map has {actual} cells, expected {width}x{height} = {expected}")]
    MapSizeMismatch { level: String, width: usize, height: usize, expected: usize, actual: usize },
    /// The level is not exactly stage-sized.
    #[error("level '{level}': size {width}x{height} does not match the stage ({stage_width}x{stage_height})")]
    DimensionMismatch { level: String, width: usize, height: usize, stage_width: usize, stage_height: usize },
    /// A map cell names a tile value the tileset does not define.
    #[error("level '{level}': tile value {value} at ({x}, {y}) is not in tileset '{tileset}'")]
    InvalidTile { level: String, tileset: String, value: u32, x: usize, y: usize },
    /// An entity has no id.
    #[error("level '{level}': entity '{entity}' has no id")]
    EntityMissingId { level: String, entity: String },
    /// An entity was built without a stage reference.
    #[error("level '{level}': entity '{entity}' has no stage")]
    EntityMissingStage { level: String, entity: String },
    /// An entity record names a type the registry cannot build.
    #[error("level '{level}': unknown entity type '{type_name}'")]
    UnknownEntityType { level: String, type_name: String },
    /// An entity record failed property validation.
    #[error("level '{level}': {source}")]
    Entity {
        level: String,
        #[source]
        source: EntityError,
    },
    /// The JSON description could not be parsed.
    #[error("invalid level description: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A validated, stage-sized tile map with its entities.
#[derive(Debug)]
pub struct LevelData {
    name: String,
    width: usize,
    height: usize,
    map_data: Vec<u32>,
    entities: Vec<EntityRef>,
    entities_by_id: HashMap<String, EntityRef>,
    tileset: Rc<Tileset>,
}

impl LevelData {
    /// Build and validate a level.
    ///
    /// Duplicate entity ids are logged; the later entity wins the id index.
    ///
    /// # Errors
    ///
    /// - [`LevelError::EntityMissingStage`] / [`LevelError::EntityMissingId`]
    ///   for an entity without a stage or id.
    /// - [`LevelError::MapSizeMismatch`] when `map_data.len() != width * height`.
    /// - [`LevelError::DimensionMismatch`] when the size differs from the stage.
    /// - [`LevelError::InvalidTile`] for a cell value missing from `tileset`.
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        map_data: Vec<u32>,
        entities: Vec<EntityRef>,
        tileset: Rc<Tileset>,
        stage: &Stage,
    ) -> Result<Self, LevelError> {
        let name = name.into();
        let entities_by_id = index_entities(&name, &entities)?;
        let data = Self { name, width, height, map_data, entities, entities_by_id, tileset };
        data.validate_data(stage)?;
        debug!(level = %data.name, width, height, entities = data.entities.len(), "level loaded");
        Ok(data)
    }

    /// Build a level from its parsed description, creating entities through `registry`.
    ///
    /// # Errors
    ///
    /// [`LevelError::UnknownEntityType`] and [`LevelError::Entity`] for entity
    /// records that cannot be built, then everything [`LevelData::new`] checks.
    pub fn from_source(
        source: LevelSource,
        tileset: Rc<Tileset>,
        stage: &StageRef,
        registry: &EntityRegistry,
        ids: &mut EntityIdGenerator,
    ) -> Result<Self, LevelError> {
        let mut entities = Vec::with_capacity(source.entities.len());
        for record in &source.entities {
            let Some(behavior) = registry.create(record) else {
                return Err(LevelError::UnknownEntityType {
                    level: source.name.clone(),
                    type_name: record.type_name.clone(),
                });
            };
            let entity = Entity::new(record.actor(), record.properties.clone(), Some(Rc::clone(stage)), behavior, ids)
                .map_err(|source_err| LevelError::Entity { level: source.name.clone(), source: source_err })?;
            entities.push(entity.into_ref());
        }
        Self::new(source.name, source.width, source.height, source.map_data, entities, tileset, stage)
    }

    /// Parse and build a level from JSON.
    ///
    /// # Errors
    ///
    /// [`LevelError::Parse`] for malformed JSON, then everything
    /// [`LevelData::from_source`] checks.
    pub fn from_json(
        raw: &str,
        tileset: Rc<Tileset>,
        stage: &StageRef,
        registry: &EntityRegistry,
        ids: &mut EntityIdGenerator,
    ) -> Result<Self, LevelError> {
        let source: LevelSource = serde_json::from_str(raw)?;
        Self::from_source(source, tileset, stage, registry, ids)
    }

    fn validate_data(&self, stage: &Stage) -> Result<(), LevelError> {
        let expected = self.width.saturating_mul(self.height);
        if self.map_data.len() != expected {
            return Err(LevelError::MapSizeMismatch {
                level: self.name.clone(),
                width: self.width,
                height: self.height,
                expected,
                actual: self.map_data.len(),
            });
        }
        if self.width != stage.width_tiles() || self.height != stage.height_tiles() {
            return Err(LevelError::DimensionMismatch {
                level: self.name.clone(),
                width: self.width,
                height: self.height,
                stage_width: stage.width_tiles(),
                stage_height: stage.height_tiles(),
            });
        }
        let bad = self.map_data.iter().enumerate().find(|(_, value)| !self.tileset.is_valid_tile_id(**value));
        if let Some((i, value)) = bad {
            return Err(LevelError::InvalidTile {
                level: self.name.clone(),
                tileset: self.tileset.name().to_string(),
                value: *value,
                x: i % self.width,
                y: i / self.width,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in tiles.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major tile values.
    #[must_use]
    pub fn map_data(&self) -> &[u32] {
        &self.map_data
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityRef] {
        &self.entities
    }

    #[must_use]
    pub fn entities_by_id(&self) -> &HashMap<String, EntityRef> {
        &self.entities_by_id
    }

    #[must_use]
    pub fn tileset(&self) -> &Rc<Tileset> {
        &self.tileset
    }
}

fn index_entities(level: &str, entities: &[EntityRef]) -> Result<HashMap<String, EntityRef>, LevelError> {
    let mut by_id = HashMap::with_capacity(entities.len());
    for entity_ref in entities {
        let entity = entity_ref.borrow();
        let label = entity.actor().name().to_string();
        if entity.stage().is_none() {
            return Err(LevelError::EntityMissingStage { level: level.to_string(), entity: label });
        }
        let Some(id) = entity.properties().id().filter(|id| !id.is_empty()) else {
            return Err(LevelError::EntityMissingId { level: level.to_string(), entity: label });
        };
        if by_id.insert(id.to_string(), Rc::clone(entity_ref)).is_some() {
            warn!(%level, %id, "duplicate entity id; later entity wins");
        }
    }
    Ok(by_id)
}

// =============================================================
// Ingestion
// =============================================================

/// JSON description of a level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSource {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub map_data: Vec<u32>,
    #[serde(default)]
    pub entities: Vec<EntitySource>,
}

/// JSON description of one placed entity. `x`/`y` are map coordinates;
/// `width`/`height` are pixels and default to one tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySource {
    #[serde(rename = "type")]
    pub type_name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub properties: EntityProperties,
}

impl EntitySource {
    /// The actor this record places, named after its id or type.
    #[must_use]
    pub fn actor(&self) -> Actor {
        let name = self.properties.id().unwrap_or(&self.type_name);
        let mut actor = Actor::at_map_xy(name, self.x, self.y);
        actor.make_rectangle(self.width.unwrap_or(TILE_SIZE), self.height.unwrap_or(TILE_SIZE), true);
        actor
    }
}

/// Builds a behavior for one entity record.
pub type BehaviorFactory = Box<dyn Fn(&EntitySource) -> Box<dyn EntityBehavior>>;

/// Maps entity type names to behavior factories.
#[derive(Default)]
pub struct EntityRegistry {
    factories: HashMap<String, BehaviorFactory>,
    fallback: Option<BehaviorFactory>,
}

impl EntityRegistry {
    /// A registry that knows no types and rejects everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that builds a [`PlainEntity`] for any type it does not know.
    #[must_use]
    pub fn permissive() -> Self {
        let mut registry = Self::new();
        registry.set_fallback(Box::new(|record: &EntitySource| {
            Box::new(PlainEntity::new(record.type_name.clone())) as Box<dyn EntityBehavior>
        }));
        registry
    }

    /// Register (or replace) the factory for `type_name`.
    pub fn register(&mut self, type_name: impl Into<String>, factory: BehaviorFactory) {
        let type_name = type_name.into();
        if self.factories.insert(type_name.clone(), factory).is_some() {
            warn!(%type_name, "entity type registered twice; later factory wins");
        }
    }

    /// Factory used for types with no registration.
    pub fn set_fallback(&mut self, factory: BehaviorFactory) {
        self.fallback = Some(factory);
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Build the behavior for `record`, or `None` if its type is unknown and
    /// there is no fallback.
    #[must_use]
    pub fn create(&self, record: &EntitySource) -> Option<Box<dyn EntityBehavior>> {
        let factory = self.factories.get(&record.type_name).or(self.fallback.as_ref())?;
        Some(factory(record))
    }
}

impl fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        types.sort_unstable();
        f.debug_struct("EntityRegistry").field("types", &types).field("fallback", &self.fallback.is_some()).finish()
    }
}
