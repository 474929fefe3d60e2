// HealthWave - core/mod.rs
//
// Core business logic layer: the store, its derived views, and the CSV/JSON
// codecs over Read/Write trait objects.
// Must NOT depend on: app, the clock, or the filesystem.

pub mod export;
pub mod import;
pub mod model;
pub mod store;
