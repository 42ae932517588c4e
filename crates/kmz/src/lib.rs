#![warn(clippy::unwrap_used)]
#![feature(int_roundings)]

//! Garmin custom map exports: cut a georeferenced raster into device sized
//! jpeg tiles and package them with a KML overlay document as a kmz file.

mod deviceprofile;
mod export;
mod gridplanner;
mod kmzwriter;
mod overlay;
mod tileencoder;
mod tilerenderer;

pub use deviceprofile::Device;
pub use deviceprofile::DeviceProfile;
pub use deviceprofile::{ETREX_MAX_TILES, GPSMAP_MAX_TILES};
pub use export::{export_kmz, ExportParams, ExportSummary};
pub use gridplanner::{plan, TilePlan, MAX_TILE_PIXELS};
pub use kmzwriter::write_kmz;
pub use overlay::{tile_image_name, OverlayEntry, OverlayManifest, KML_ENTRY_NAME};
pub use tileencoder::{EncodedTile, EncoderOptions, TileEncoder, MAX_JPEG_QUALITY, MAX_TILE_BYTES};
pub use tilerenderer::{RenderedTile, TileRenderer};

pub type Error = inf::Error;
pub type Result<T = ()> = inf::Result<T>;
