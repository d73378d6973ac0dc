//! Yet Another Raycaster in Rust.
//!
//! * [`world`]    – tile grid, camera, textures and level files.
//! * [`sim`]      – hecs components for billboards/particles and the
//!   typed drawable view the renderer consumes.
//! * [`renderer`] – the column/row software renderer.

pub mod renderer;
pub mod sim;
pub mod world;
