pub mod assets;
pub mod audio;
pub mod colors;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod log_init;
pub mod scene;
