pub use error::Error;
pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod duration;
mod error;
pub mod fs;
pub mod progressinfo;
