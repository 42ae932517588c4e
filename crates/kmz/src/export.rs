use std::path::PathBuf;

use geo::{Cell, RasterProvider};
use inf::progressinfo::ProgressNotification;
use rayon::prelude::*;

use crate::deviceprofile::{Device, DeviceProfile};
use crate::gridplanner::{self, TilePlan};
use crate::kmzwriter;
use crate::overlay::{tile_image_name, OverlayManifest};
use crate::tileencoder::{EncodedTile, EncoderOptions, TileEncoder};
use crate::tilerenderer::TileRenderer;
use crate::Result;

/// Parameters of one export job.
#[derive(Debug, Clone)]
pub struct ExportParams {
    pub device: Device,
    /// Tile cap for [`Device::Custom`], ignored for the known devices.
    pub custom_cap: Option<u32>,
    pub output: PathBuf,
    /// Overrides the provider's layer name in the overlay document.
    pub layer_name: Option<String>,
    pub encoder: EncoderOptions,
}

impl ExportParams {
    pub fn new(device: Device, output: impl Into<PathBuf>) -> Self {
        ExportParams {
            device,
            custom_cap: None,
            output: output.into(),
            layer_name: None,
            encoder: EncoderOptions::default(),
        }
    }
}

/// What an export job produced.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportSummary {
    pub plan: TilePlan,
    pub tile_count: usize,
    pub bytes_written: u64,
    pub output: PathBuf,
}

/// Runs a full export: plan the tile grid for the device, render and encode
/// every tile, then write the kmz package.
///
/// Tiles are processed in parallel but the package contents are ordered
/// row-major regardless of scheduling. Any tile failure or a cancellation
/// through `progress` aborts the job before anything is written to disk.
pub fn export_kmz<P>(provider: &P, params: &ExportParams, progress: impl ProgressNotification) -> Result<ExportSummary>
where
    P: RasterProvider + ?Sized,
{
    let profile = DeviceProfile::resolve(params.device, params.custom_cap)?;
    params.encoder.validate()?;

    let source_size = provider.describe().raster_size();
    let plan = gridplanner::plan(source_size, profile.max_tiles)?;
    log::info!(
        "Device {} (tile cap {}): input {} -> output {} (scale {:.3}), grid {} = {} tiles",
        profile.device,
        profile.max_tiles,
        source_size,
        plan.output_size,
        plan.scale_factor,
        plan.grid,
        plan.tile_count()
    );

    let layer_name = params
        .layer_name
        .clone()
        .unwrap_or_else(|| provider.layer_name().to_string());

    progress.reset(plan.tile_count() as u64);

    let renderer = TileRenderer::new(provider, &plan);
    let encoder = TileEncoder::new(params.encoder);

    let cells: Vec<Cell> = plan.cells().collect();
    let tiles: Vec<EncodedTile> = cells
        .into_par_iter()
        .map(|cell| {
            let encoded = encoder.encode(renderer.render(cell)?)?;
            progress.tick()?;
            Ok(encoded)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut manifest = OverlayManifest::new(layer_name);
    for (index, tile) in tiles.iter().enumerate() {
        manifest.record_tile(tile, tile_image_name(index));
    }

    let bytes_written = kmzwriter::write_kmz(&params.output, &manifest, &tiles)?;

    Ok(ExportSummary {
        tile_count: tiles.len(),
        bytes_written,
        output: params.output.clone(),
        plan,
    })
}
