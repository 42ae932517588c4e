use inf::Error;

use crate::Result;

/// Garmin's published Custom Map tile limit for eTrex handhelds.
pub const ETREX_MAX_TILES: u32 = 100;
/// Garmin's published Custom Map tile limit for GPSMAP units.
pub const GPSMAP_MAX_TILES: u32 = 500;

/// Garmin device family a Custom Map is exported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Device {
    /// eTrex handhelds, limited to 100 Custom Map tiles.
    Etrex,
    /// GPSMAP units, limited to 500 Custom Map tiles.
    Gpsmap,
    /// Any other device, the tile cap is supplied by the user.
    Custom,
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Etrex => write!(f, "eTrex"),
            Device::Gpsmap => write!(f, "GPSMAP"),
            Device::Custom => write!(f, "Custom"),
        }
    }
}

/// Tile budget an export has to stay within for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceProfile {
    pub device: Device,
    pub max_tiles: u32,
}

impl DeviceProfile {
    /// Resolves the tile budget for a device.
    ///
    /// The cap is fixed for the known device families. `Device::Custom`
    /// requires a user supplied cap of at least one tile.
    pub fn resolve(device: Device, custom_cap: Option<u32>) -> Result<DeviceProfile> {
        let max_tiles = match device {
            Device::Etrex => ETREX_MAX_TILES,
            Device::Gpsmap => GPSMAP_MAX_TILES,
            Device::Custom => match custom_cap {
                Some(0) => {
                    return Err(Error::InvalidParameter(
                        "custom tile cap must be a positive integer".to_string(),
                    ));
                }
                Some(cap) => cap,
                None => {
                    return Err(Error::InvalidParameter(
                        "custom device requires an explicit tile cap".to_string(),
                    ));
                }
            },
        };

        Ok(DeviceProfile { device, max_tiles })
    }
}
