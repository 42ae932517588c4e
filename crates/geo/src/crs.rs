/// EPSG code of a spatial reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epsg(u32);

impl Epsg {
    pub const fn new(code: u32) -> Self {
        Epsg(code)
    }

    pub const fn code(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Epsg {
    fn from(code: u32) -> Self {
        Epsg(code)
    }
}

impl std::fmt::Display for Epsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

pub mod epsg {
    use super::Epsg;

    pub const WGS84: Epsg = Epsg::new(4326);
}

/// True when the projection string refers to geographic WGS84 coordinates.
pub fn projection_is_wgs84(projection: &str) -> bool {
    let projection = projection.trim();
    projection.eq_ignore_ascii_case("EPSG:4326")
        || projection.eq_ignore_ascii_case("WGS84")
        || projection.eq_ignore_ascii_case("WGS 84")
        || projection.eq_ignore_ascii_case("CRS:84")
}
