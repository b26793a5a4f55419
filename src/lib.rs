//! Neon snake: a grid arcade snake with power-ups and obstacles, and a
//! free-roam ecosystem mode, rendered with Bevy.

pub mod ecosystem;
pub mod effects;
pub mod game;
pub mod items;
pub mod rendering;
pub mod session;
pub mod snake;
pub mod storage;
pub mod ui;
