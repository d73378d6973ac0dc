mod collision;
mod components;
mod systems;
mod tic;
mod view;

pub use collision::{MoveResult, slide_move};
pub use components::{Billboard, Particle, Position};
pub use systems::{GRAVITY, particles, spawn_burst, spawn_target};
pub use tic::{DT, SIM_FPS, TicRunner};
pub use view::{Drawable, Visual, drawables};
