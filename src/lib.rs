pub mod config;
pub mod error;
pub mod filters;
pub mod heatmap;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod score;
pub mod services;

pub use pipeline::session::Session;
