//! Engine core for stage-sized 2D tile games.
//!
//! A single stage hosts a sequence of interchangeable scenes. Each scene owns
//! a list of actors; levels add a tile map and the entities placed on it. All
//! drawing goes through the [`render::Renderer`] trait, so everything here
//! runs headless. The `tilestage-canvas` crate binds it to a browser canvas.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geom`] | `Point`, `Vector2D` and angle normalization |
//! | [`range`] | Inclusive numeric ranges used by the collision tests |
//! | [`collision`] | `Rect`, `Circle` and the free collision and intersection functions |
//! | [`collider`] | Positioned, rotatable collision shape |
//! | [`actor`] | `Actor` and the `SceneObject` trait |
//! | [`entity`] | Property-carrying entities and their behaviors |
//! | [`sprite`] | Sprite sheets and animation lists |
//! | [`tile`] | Tiles and tilesets |
//! | [`level_data`] | Validated level content and JSON ingestion |
//! | [`level`] | Spatial and trigger queries over a level |
//! | [`scene`] | The `Scene` trait and its actor list |
//! | [`scene_manager`] | Scene registry and deferred switching |
//! | [`engine`] | Frame driver and input dispatch |
//! | [`input`] | Input event types |
//! | [`render`] | Drawing surface abstraction and a command recorder |
//! | [`stage`] / [`config`] | Stage dimensions and their configuration |
//! | [`consts`] | Shared numeric constants |

pub mod actor;
pub mod collider;
pub mod collision;
pub mod config;
pub mod consts;
pub mod engine;
pub mod entity;
pub mod geom;
pub mod input;
pub mod level;
pub mod level_data;
pub mod range;
pub mod render;
pub mod scene;
pub mod scene_manager;
pub mod sprite;
pub mod stage;
pub mod tile;
