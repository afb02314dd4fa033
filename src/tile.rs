//! Tiles and tilesets.
//!
//! A [`Tile`] is an immutable value identified by its numeric `value`; two
//! tiles are the same tile iff their values match. A [`Tileset`] indexes its
//! tiles by name and by value. Duplicate names or values are logged and the
//! later tile wins that slot.

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::actor::Actor;
use crate::consts::TILE_SIZE;
use crate::render::Renderer;
use crate::sprite::SpriteSheet;

/// One kind of map cell.
#[derive(Debug, Clone)]
pub struct Tile {
    name: String,
    value: u32,
    debug_color: String,
    blocking: bool,
    sprite: Option<usize>,
}

impl Tile {
    /// A non-blocking tile without a sprite.
    #[must_use]
    pub fn new(name: impl Into<String>, value: u32, debug_color: impl Into<String>) -> Self {
        Self { name: name.into(), value, debug_color: debug_color.into(), blocking: false, sprite: None }
    }

    #[must_use]
    pub fn with_blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    #[must_use]
    pub fn with_sprite(mut self, sprite: Option<usize>) -> Self {
        self.sprite = sprite;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[must_use]
    pub fn debug_color(&self) -> &str {
        &self.debug_color
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    #[must_use]
    pub fn sprite(&self) -> Option<usize> {
        self.sprite
    }

    /// Whether this tile keeps `actor` out of its cell.
    #[must_use]
    pub fn blocks_actor(&self, _actor: &Actor) -> bool {
        self.blocking
    }

    /// Single character used for text dumps of a map.
    #[must_use]
    pub fn glyph(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }

    /// Draw the tile's sprite from `sheet`, or a flat debug-colored square.
    pub fn render(&self, x: f64, y: f64, sheet: Option<&SpriteSheet>, renderer: &mut dyn Renderer) {
        match (sheet, self.sprite) {
            (Some(sheet), Some(index)) if sheet.is_valid_index(index) => renderer.blit_sprite(sheet, index, x, y),
            _ => renderer.fill_rect(x, y, TILE_SIZE, TILE_SIZE, &self.debug_color),
        }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

/// Named collection of tiles, optionally drawn from one sprite sheet.
#[derive(Debug, Clone)]
pub struct Tileset {
    name: String,
    by_name: HashMap<String, Rc<Tile>>,
    by_value: HashMap<u32, Rc<Tile>>,
    sheet: Option<Rc<SpriteSheet>>,
}

impl Tileset {
    #[must_use]
    pub fn new(name: impl Into<String>, tiles: Vec<Tile>, sheet: Option<Rc<SpriteSheet>>) -> Self {
        let name = name.into();
        let mut by_name = HashMap::with_capacity(tiles.len());
        let mut by_value = HashMap::with_capacity(tiles.len());
        for tile in tiles {
            let tile = Rc::new(tile);
            if by_name.insert(tile.name.clone(), Rc::clone(&tile)).is_some() {
                warn!(tileset = %name, tile = %tile.name, "duplicate tile name; later tile wins");
            }
            if by_value.insert(tile.value, Rc::clone(&tile)).is_some() {
                warn!(tileset = %name, value = tile.value, "duplicate tile value; later tile wins");
            }
        }
        Self { name, by_name, by_value, sheet }
    }

    /// Parse a tileset from its JSON description.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let source: TilesetSource = serde_json::from_str(raw)?;
        Ok(Self::from_source(source))
    }

    #[must_use]
    pub fn from_source(source: TilesetSource) -> Self {
        let tiles = source
            .tiles
            .into_iter()
            .map(|t| Tile::new(t.name, t.value, t.color).with_blocking(t.blocking).with_sprite(t.sprite))
            .collect();
        Self::new(source.name, tiles, source.sheet.map(Rc::new))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn sheet(&self) -> Option<&SpriteSheet> {
        self.sheet.as_deref()
    }

    #[must_use]
    pub fn tile_by_name(&self, name: &str) -> Option<&Rc<Tile>> {
        self.by_name.get(name)
    }

    #[must_use]
    pub fn tile(&self, value: u32) -> Option<&Rc<Tile>> {
        self.by_value.get(&value)
    }

    /// Whether a tile with this value exists.
    #[must_use]
    pub fn is_valid_tile_id(&self, value: u32) -> bool {
        self.by_value.contains_key(&value)
    }

    /// Number of distinct tile values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_value.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_value.is_empty()
    }

    /// Tiles ordered by value.
    #[must_use]
    pub fn tiles(&self) -> Vec<&Rc<Tile>> {
        let mut tiles: Vec<_> = self.by_value.values().collect();
        tiles.sort_by_key(|t| t.value);
        tiles
    }
}

/// JSON description of a tileset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilesetSource {
    pub name: String,
    #[serde(default)]
    pub sheet: Option<SpriteSheet>,
    pub tiles: Vec<TileSource>,
}

/// JSON description of one tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSource {
    pub name: String,
    pub value: u32,
    pub color: String,
    #[serde(default)]
    pub blocking: bool,
    #[serde(default)]
    pub sprite: Option<usize>,
}
