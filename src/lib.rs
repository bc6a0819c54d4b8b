pub mod api;
pub mod classify;
pub mod config;
pub mod directory;
pub mod errors;
pub mod flex_time;
pub mod format;
pub mod player;
pub mod render;
pub mod samples;
pub mod validate;
