//! Entities: actors with a property bag and pluggable behavior.
//!
//! An [`Entity`] is an [`Actor`] plus [`EntityProperties`], an optional
//! stage reference, and a boxed [`EntityBehavior`] that supplies the type
//! tag, default properties, validation and the interaction hooks.
//!
//! Construction runs the property pipeline once:
//!
//! 1. caller-supplied properties are taken as-is,
//! 2. the behavior's defaults fill in every key that is absent,
//! 3. `id` is generated from the injected [`EntityIdGenerator`] when absent
//!    and `debug` defaults to `false`,
//! 4. the behavior validates the result.
//!
//! After a successful [`Entity::new`], `id` and `debug` are always present.

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::actor::{Actor, SceneObject};
use crate::consts::{DEBUG_LABEL_OFFSET, DEBUG_TEXT_COLOR};
use crate::geom::Point;
use crate::render::Renderer;
use crate::stage::{Stage, StageRef};

/// Shared handle to an entity; levels and scenes hold these.
pub type EntityRef = Rc<RefCell<Entity>>;

/// Reserved property: unique id within a level.
pub const PROP_ID: &str = "id";
/// Reserved property: draw debug annotations.
pub const PROP_DEBUG: &str = "debug";

const ID_PREFIX: &str = "_entity";

/// Error returned when an entity's properties fail validation.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// A required property is absent.
    #[error("entity '{entity}': missing required property '{property}'")]
    MissingProperty { entity: String, property: String },
    /// A property holds a value outside what the entity accepts.
    #[error("entity '{entity}': property '{property}' has invalid value {value} (expected {expected})")]
    InvalidPropertyValue { entity: String, property: String, value: String, expected: String },
}

// =============================================================
// EntityProperties
// =============================================================

/// Open property bag keyed by name. JSON `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityProperties {
    values: Map<String, Value>,
}

impl EntityProperties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Value of `name`, or `None` when absent or `null`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// The `id` property.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_str(PROP_ID)
    }

    /// The `debug` property; absent means `false`.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.get_bool(PROP_DEBUG).unwrap_or(false)
    }

    /// Resolve a property naming other entities into a list of ids.
    ///
    /// Accepts either a comma-separated string (`"door1, door2"`) or an array
    /// of strings. Blank entries are dropped; absent properties yield an
    /// empty list.
    #[must_use]
    pub fn id_list(&self, name: &str) -> Vec<String> {
        match self.get(name) {
            Some(Value::String(raw)) => {
                raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
            }
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Copy every key of `defaults` that is absent here. Present keys are kept.
    pub fn apply_defaults(&mut self, defaults: &EntityProperties) {
        for (name, value) in &defaults.values {
            if !self.contains(name) {
                self.values.insert(name.clone(), value.clone());
            }
        }
    }

    /// Check one property.
    ///
    /// A required property must be present. When `allowed` is given, a present
    /// value must equal one of its entries. An optional, absent property
    /// passes.
    ///
    /// # Errors
    ///
    /// [`EntityError::MissingProperty`] or [`EntityError::InvalidPropertyValue`],
    /// naming `entity`.
    pub fn is_property_valid(
        &self,
        entity: &str,
        name: &str,
        required: bool,
        allowed: Option<&[Value]>,
    ) -> Result<(), EntityError> {
        let Some(value) = self.get(name) else {
            if required {
                return Err(EntityError::MissingProperty { entity: entity.to_string(), property: name.to_string() });
            }
            return Ok(());
        };
        let Some(allowed) = allowed else {
            return Ok(());
        };
        if !allowed.contains(value) {
            return Err(EntityError::InvalidPropertyValue {
                entity: entity.to_string(),
                property: name.to_string(),
                value: value.to_string(),
                expected: format!("one of {}", Value::Array(allowed.to_vec())),
            });
        }
        Ok(())
    }
}

// =============================================================
// Id generation
// =============================================================

/// Source of ids for entities constructed without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityIdGenerator {
    /// `"_entity0"`, `"_entity1"`, ... continuing from `next`.
    Sequential { next: u64 },
    /// `"_entity"` followed by a random UUID.
    Random,
}

impl Default for EntityIdGenerator {
    fn default() -> Self {
        Self::Sequential { next: 0 }
    }
}

impl EntityIdGenerator {
    #[must_use]
    pub fn sequential() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn random() -> Self {
        Self::Random
    }

    /// Produce the next id.
    pub fn next_id(&mut self) -> String {
        match self {
            Self::Sequential { next } => {
                let id = format!("{ID_PREFIX}{next}");
                *next += 1;
                id
            }
            Self::Random => format!("{ID_PREFIX}{}", uuid::Uuid::new_v4().simple()),
        }
    }
}

// =============================================================
// Behavior
// =============================================================

/// Type-specific behavior attached to an entity.
///
/// Hooks receive the entity's actor and properties as separate borrows so a
/// behavior can move the actor while reading its own configuration.
pub trait EntityBehavior: fmt::Debug {
    /// Runtime type tag, matched by `Level::entities_with_type`.
    fn type_name(&self) -> &str;

    /// Properties copied in for every key the caller left absent.
    fn default_properties(&self) -> EntityProperties {
        EntityProperties::new()
    }

    /// Type-specific validation, run after defaults, `id` and `debug` are in place.
    ///
    /// # Errors
    ///
    /// An [`EntityError`] naming the offending property.
    fn validate_properties(&self, _entity: &str, _properties: &EntityProperties) -> Result<(), EntityError> {
        Ok(())
    }

    /// Whether this entity keeps `actor` from entering its cell.
    fn blocks_actor_movement(&self, _entity: &Actor, _properties: &EntityProperties, _actor: &Actor) -> bool {
        true
    }

    /// Programmatic activation (a switch, a script, another entity).
    fn trigger(&mut self, _entity: &mut Actor, _properties: &mut EntityProperties, _activator: Option<&Actor>) {}

    /// Activation by `activator` touching this entity.
    fn trigger_touch(&mut self, _entity: &mut Actor, _properties: &mut EntityProperties, _activator: &Actor) {}

    fn update(&mut self, entity: &mut Actor, _properties: &mut EntityProperties, stage: &Stage, tick: u64) {
        entity.update(stage, tick);
    }

    fn render(&self, entity: &Actor, _properties: &EntityProperties, x: f64, y: f64, renderer: &mut dyn Renderer) {
        entity.render(x, y, renderer);
    }
}

/// Behavior with every hook at its default; only the type tag differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainEntity {
    type_name: String,
}

impl PlainEntity {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self { type_name: type_name.into() }
    }
}

impl EntityBehavior for PlainEntity {
    fn type_name(&self) -> &str {
        &self.type_name
    }
}

// =============================================================
// Entity
// =============================================================

/// An actor with properties, a stage reference and behavior.
#[derive(Debug)]
pub struct Entity {
    actor: Actor,
    properties: EntityProperties,
    stage: Option<StageRef>,
    behavior: Box<dyn EntityBehavior>,
}

impl Entity {
    /// Build an entity and run the property pipeline.
    ///
    /// # Errors
    ///
    /// Returns an [`EntityError`] when `id` or `debug` has the wrong type or
    /// the behavior rejects the properties.
    pub fn new(
        actor: Actor,
        mut properties: EntityProperties,
        stage: Option<StageRef>,
        behavior: Box<dyn EntityBehavior>,
        ids: &mut EntityIdGenerator,
    ) -> Result<Self, EntityError> {
        properties.apply_defaults(&behavior.default_properties());
        let name = actor.name().to_string();
        ensure_reserved(&name, &mut properties, ids)?;
        behavior.validate_properties(&name, &properties)?;
        Ok(Self { actor, properties, stage, behavior })
    }

    /// Wrap in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> EntityRef {
        Rc::new(RefCell::new(self))
    }

    /// The entity's id; empty only if a caller removed it after construction.
    #[must_use]
    pub fn id(&self) -> &str {
        self.properties.id().unwrap_or_default()
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.properties.debug()
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.behavior.type_name()
    }

    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    #[must_use]
    pub fn properties(&self) -> &EntityProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut EntityProperties {
        &mut self.properties
    }

    #[must_use]
    pub fn stage(&self) -> Option<&StageRef> {
        self.stage.as_ref()
    }

    pub fn set_stage(&mut self, stage: Option<StageRef>) {
        self.stage = stage;
    }

    #[must_use]
    pub fn behavior(&self) -> &dyn EntityBehavior {
        self.behavior.as_ref()
    }

    #[must_use]
    pub fn map_position(&self) -> Point {
        self.actor.map_position()
    }

    #[must_use]
    pub fn blocks_actor_movement(&self, actor: &Actor) -> bool {
        self.behavior.blocks_actor_movement(&self.actor, &self.properties, actor)
    }

    pub fn trigger(&mut self, activator: Option<&Actor>) {
        self.behavior.trigger(&mut self.actor, &mut self.properties, activator);
    }

    pub fn trigger_touch(&mut self, activator: &Actor) {
        self.behavior.trigger_touch(&mut self.actor, &mut self.properties, activator);
    }

    pub fn update(&mut self, stage: &Stage, tick: u64) {
        self.behavior.update(&mut self.actor, &mut self.properties, stage, tick);
    }

    /// Draw through the behavior, then the id label when `debug` is set.
    pub fn render(&self, x: f64, y: f64, renderer: &mut dyn Renderer) {
        self.behavior.render(&self.actor, &self.properties, x, y, renderer);
        if self.debug() {
            renderer.draw_text(self.id(), x, y - DEBUG_LABEL_OFFSET, DEBUG_TEXT_COLOR);
        }
    }
}

impl SceneObject for Entity {
    fn update(&mut self, stage: &Stage, tick: u64) {
        Entity::update(self, stage, tick);
    }

    fn render(&self, x: f64, y: f64, renderer: &mut dyn Renderer) {
        Entity::render(self, x, y, renderer);
    }

    fn position(&self) -> Point {
        self.actor.position()
    }

    fn z_order(&self) -> i32 {
        self.actor.z_order()
    }
}

fn ensure_reserved(
    entity: &str,
    properties: &mut EntityProperties,
    ids: &mut EntityIdGenerator,
) -> Result<(), EntityError> {
    match properties.get(PROP_ID) {
        None => properties.set(PROP_ID, ids.next_id()),
        Some(Value::String(_)) => {}
        Some(other) => {
            return Err(EntityError::InvalidPropertyValue {
                entity: entity.to_string(),
                property: PROP_ID.to_string(),
                value: other.to_string(),
                expected: "a string".to_string(),
            });
        }
    }
    match properties.get(PROP_DEBUG) {
        None => properties.set(PROP_DEBUG, false),
        Some(Value::Bool(_)) => {}
        Some(other) => {
            return Err(EntityError::InvalidPropertyValue {
                entity: entity.to_string(),
                property: PROP_DEBUG.to_string(),
                value: other.to_string(),
                expected: "a boolean".to_string(),
            });
        }
    }
    Ok(())
}
