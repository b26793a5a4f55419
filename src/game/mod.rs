//! Shared vocabulary: grid model, collision rules, messages, constants and
//! the ECS components and resources the plugins agree on.

pub mod collision;
mod components;
mod constants;
mod events;
mod grid;
mod resources;

pub use collision::Collision;
pub use components::*;
pub use constants::*;
pub use events::*;
pub use grid::*;
pub use resources::*;
