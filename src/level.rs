//! Query and render façade over [`LevelData`].
//!
//! A [`Level`] never changes its data; many levels may wrap the same
//! `Rc<LevelData>` (restarting a level is re-wrapping it). Entities are shared
//! handles, so queries hand out `EntityRef` clones.
//!
//! Map coordinates are signed here so callers can step off the edge of the
//! map (a facing offset from column 0) and get an out-of-bounds answer rather
//! than an underflow.

#[cfg(test)]
#[path = "level_test.rs"]
mod level_test;

use std::collections::HashMap;
use std::rc::Rc;

use tracing::warn;

use crate::actor::Actor;
use crate::consts::TILE_SIZE;
use crate::entity::EntityRef;
use crate::geom::{Point, normalize_degrees};
use crate::level_data::LevelData;
use crate::render::Renderer;
use crate::tile::{Tile, Tileset};

/// One of the four cardinal directions. Y grows downward, so south is +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    East,
    South,
    West,
    North,
}

impl Facing {
    /// Angle in degrees: east 0, south 90, west 180, north 270.
    #[must_use]
    pub fn degrees(self) -> f64 {
        match self {
            Self::East => 0.0,
            Self::South => 90.0,
            Self::West => 180.0,
            Self::North => 270.0,
        }
    }

    /// The facing for a multiple of 90 degrees (any winding); `None` otherwise.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        let d = normalize_degrees(degrees);
        if d.abs() < f64::EPSILON {
            Some(Self::East)
        } else if (d - 90.0).abs() < f64::EPSILON {
            Some(Self::South)
        } else if (d - 180.0).abs() < f64::EPSILON {
            Some(Self::West)
        } else if (d - 270.0).abs() < f64::EPSILON {
            Some(Self::North)
        } else {
            None
        }
    }

    /// One-tile step in map coordinates.
    #[must_use]
    pub fn offset(self) -> (i64, i64) {
        match self {
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::North => (0, -1),
        }
    }
}

/// Read-only view of a level for gameplay queries and tile drawing.
#[derive(Debug, Clone)]
pub struct Level {
    data: Rc<LevelData>,
}

impl Level {
    #[must_use]
    pub fn new(data: Rc<LevelData>) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn data(&self) -> &Rc<LevelData> {
        &self.data
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.data.name()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.data.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.data.height()
    }

    #[must_use]
    pub fn map_data(&self) -> &[u32] {
        self.data.map_data()
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityRef] {
        self.data.entities()
    }

    #[must_use]
    pub fn entities_by_id(&self) -> &HashMap<String, EntityRef> {
        self.data.entities_by_id()
    }

    #[must_use]
    pub fn tileset(&self) -> &Rc<Tileset> {
        self.data.tileset()
    }

    /// Row-major index of `(x, y)`, or `None` off the map.
    fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return None;
        };
        (x < self.width() && y < self.height()).then(|| y * self.width() + x)
    }

    #[must_use]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        self.index_of(x, y).is_some()
    }

    // --- Entity queries ---

    /// Entities whose behavior reports `type_name`.
    #[must_use]
    pub fn entities_with_type(&self, type_name: &str) -> Vec<EntityRef> {
        self.entities()
            .iter()
            .filter(|e| e.try_borrow().is_ok_and(|e| e.type_name() == type_name))
            .cloned()
            .collect()
    }

    /// Entities standing on map cell `(x, y)`.
    ///
    /// Returns `None` when the cell is off the map, which is distinct from an
    /// empty cell. Entities that are currently mutably borrowed (typically the
    /// caller's own entity) are skipped.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn entities_at_map_xy(&self, x: i64, y: i64) -> Option<Vec<EntityRef>> {
        self.index_of(x, y)?;
        let cell = Point::new(x as f64, y as f64);
        Some(
            self.entities()
                .iter()
                .filter(|e| e.try_borrow().is_ok_and(|e| e.map_position() == cell))
                .cloned()
                .collect(),
        )
    }

    /// [`Level::entities_at_map_xy`] for a map-position point (floored).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn entities_at_map_position(&self, map_position: Point) -> Option<Vec<EntityRef>> {
        self.entities_at_map_xy(map_position.x.floor() as i64, map_position.y.floor() as i64)
    }

    /// Entities on the cell one step from `(x, y)` in direction `facing`.
    #[must_use]
    pub fn entities_at_map_xy_facing(&self, x: i64, y: i64, facing: Facing) -> Option<Vec<EntityRef>> {
        let (dx, dy) = facing.offset();
        self.entities_at_map_xy(x.saturating_add(dx), y.saturating_add(dy))
    }

    /// Resolve ids against the id index; missing ids are logged and skipped.
    #[must_use]
    pub fn entities_with_ids(&self, ids: &[String]) -> Vec<EntityRef> {
        let found: Vec<EntityRef> = ids.iter().filter_map(|id| self.entities_by_id().get(id).cloned()).collect();
        if found.len() != ids.len() {
            warn!(level = %self.name(), requested = ids.len(), found = found.len(), ?ids, "some entity ids not found");
        }
        found
    }

    /// Trigger every entity named in `ids`. `None` does nothing.
    pub fn trigger_entities_with_ids(&self, ids: Option<&[String]>, activator: Option<&Actor>) {
        let Some(ids) = ids else {
            return;
        };
        for entity in self.entities_with_ids(ids) {
            match entity.try_borrow_mut() {
                Ok(mut entity) => entity.trigger(activator),
                Err(_) => warn!(level = %self.name(), "entity busy; trigger skipped"),
            }
        }
    }

    // --- Tiles ---

    /// The tile at map cell `(x, y)`, or `None` off the map.
    #[must_use]
    pub fn tile_at_xy(&self, x: i64, y: i64) -> Option<&Rc<Tile>> {
        let value = *self.map_data().get(self.index_of(x, y)?)?;
        self.tileset().tile(value)
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn tile_at(&self, map_position: Point) -> Option<&Rc<Tile>> {
        self.tile_at_xy(map_position.x.floor() as i64, map_position.y.floor() as i64)
    }

    /// Whether `actor` may not enter map cell `(x, y)`.
    ///
    /// Off-map cells are blocked. Otherwise the cell is blocked if its tile
    /// blocks or any entity on it blocks.
    #[must_use]
    pub fn is_blocked_at_xy(&self, x: i64, y: i64, actor: &Actor) -> bool {
        let Some(tile) = self.tile_at_xy(x, y) else {
            return true;
        };
        if tile.blocks_actor(actor) {
            return true;
        }
        self.entities_at_map_xy(x, y)
            .is_some_and(|found| found.iter().any(|e| e.try_borrow().is_ok_and(|e| e.blocks_actor_movement(actor))))
    }

    /// The map as text: one [`Tile::glyph`] per cell, one line per row.
    /// Cells whose value has no tile show `?`.
    #[must_use]
    pub fn ascii_map(&self) -> String {
        let width = self.width().max(1);
        let mut out = String::with_capacity(self.map_data().len() + self.height());
        for row in self.map_data().chunks(width) {
            out.extend(row.iter().map(|value| self.tileset().tile(*value).map_or('?', |t| t.glyph())));
            out.push('\n');
        }
        out
    }

    /// Draw every tile, row-major. Entities are the caller's to draw.
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let width = self.width();
        if width == 0 {
            return;
        }
        let sheet = self.tileset().sheet();
        for (i, value) in self.map_data().iter().enumerate() {
            let Some(tile) = self.tileset().tile(*value) else {
                continue;
            };
            let x = (i % width) as f64 * TILE_SIZE;
            let y = (i / width) as f64 * TILE_SIZE;
            tile.render(x, y, sheet, renderer);
        }
    }
}
