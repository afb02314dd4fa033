//! Browser binding for the tilestage engine core.
//!
//! Compiled to WebAssembly. The host JavaScript layer creates an
//! [`engine::Engine`] for its canvas element, registers scenes and sprite
//! images, forwards DOM input events and calls [`engine::Engine::frame`] once
//! per animation frame. All game logic lives in the `tilestage` crate; this
//! crate only owns the canvas and draws on it.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | `Engine`: canvas element plus a `tilestage::engine::EngineCore` |
//! | [`render`] | `CanvasRenderer`: the `Renderer` trait over a 2D context |

pub mod engine;
pub mod render;
