//! Umbrella crate re-exporting the workspace members.
//!
//! Depend on this crate to get the whole Garmin Custom Map export stack, or
//! on the individual member crates when only a part is needed:
//!
//! - [`inf`]: shared infrastructure (errors, progress reporting, fs helpers)
//! - [`geo`]: georeferencing, world files and raster window resampling
//! - [`kmz`]: tile planning, jpeg encoding and kmz packaging

pub use geo;
pub use inf;
pub use kmz;
