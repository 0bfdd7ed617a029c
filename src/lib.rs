pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod settings;
pub mod source;
pub mod wall;
pub mod wavefront;

#[cfg(feature = "macroquad")]
pub mod helpers;
