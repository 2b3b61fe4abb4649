pub mod app;
pub mod config;
pub mod input;
pub mod render;
pub mod surface;
pub mod terminal;
pub mod visual;
