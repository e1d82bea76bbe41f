//! Configuration, data model and the small pure helpers around it.

pub mod config;
pub mod models;
pub mod pattern;
pub mod timestamp;
