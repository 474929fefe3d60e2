// HealthWave - app/mod.rs
//
// Application layer: owned session state, the manual input surface, and
// the background breathing timer.
// Dependencies: core layer, the clock, the filesystem.

pub mod breathing;
pub mod session;
