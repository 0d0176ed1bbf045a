// src/utils/mod.rs
pub mod color;

pub use color::Color;
