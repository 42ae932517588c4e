#![warn(clippy::unwrap_used)]

pub type Result<T = ()> = inf::Result<T>;
pub use inf::Error;

mod cell;
mod coordinate;
pub mod crs;
mod georeference;
mod geotransform;
mod imagefileprovider;
mod latlonbounds;
mod rasterprovider;
mod rastersize;
pub mod resample;
mod window;
mod worldfile;

pub use cell::Cell;
pub use cell::CellIterator;
pub use coordinate::Coordinate;
#[doc(inline)]
pub use georeference::CellSize;
#[doc(inline)]
pub use georeference::GeoReference;
#[doc(inline)]
pub use geotransform::GeoTransform;
pub use imagefileprovider::ImageFileProvider;
#[doc(inline)]
pub use latlonbounds::LatLonBounds;
pub use rasterprovider::MemoryRasterProvider;
pub use rasterprovider::RasterProvider;
pub use rastersize::{Columns, RasterSize, Rows};
pub use window::Window;
pub use worldfile::WorldFile;

pub type Point<T = f64> = geo_types::Point<T>;
