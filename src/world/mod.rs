mod camera;
mod grid;
mod level;
pub mod procedural;
mod texture;

pub use camera::{Camera, Horizon, PLANE_SCALE, ROLL_SHEAR, ViewBasis};

pub use grid::{Grid, Tile};

pub use level::{DEMO_SIZE, LevelError, demo_level, load_grid};

pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
