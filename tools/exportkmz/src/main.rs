use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use env_logger::{Env, TimestampPrecision};
use geo::ImageFileProvider;
use indicatif::{MultiProgress, ProgressBar};
use indicatif_log_bridge::LogWrapper;
use inf::duration::Recorder;
use inf::progressinfo::{CallbackProgress, ComputationStatus, DummyProgress};
use kmz::{Device, EncoderOptions, ExportParams, ExportSummary};

pub type Error = kmz::Error;
pub type Result<T> = kmz::Result<T>;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DeviceOpt {
    /// eTrex and similar handhelds, 100 tile limit
    Etrex,
    /// GPSMAP units, 500 tile limit
    Gpsmap,
    /// Any other device, uses the --custom-cap value
    Custom,
}

impl From<DeviceOpt> for Device {
    fn from(value: DeviceOpt) -> Self {
        match value {
            DeviceOpt::Etrex => Device::Etrex,
            DeviceOpt::Gpsmap => Device::Gpsmap,
            DeviceOpt::Custom => Device::Custom,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "exportkmz",
    about = "Export a georeferenced raster image as a Garmin Custom Map (kmz)",
    after_help = "Garmin publishes a Custom Map limit of around 100 tiles for eTrex and \
                  Monterra handhelds and around 500 tiles for the GPSMAP, Montana and Oregon \
                  series. Selecting a device exports the highest quality that fits its cap; \
                  use --device custom with --custom-cap for units with a different limit. \
                  Every tile stays within 1 megapixel and 3 MB of baseline jpeg."
)]
pub struct Opt {
    /// Raster image to export (png, jpeg, bmp or tiff with a world file)
    #[clap(long = "input", short = 'i')]
    pub input: PathBuf,

    /// Explicit world file, defaults to the sidecar next to the input image
    #[clap(long = "world")]
    pub world: Option<PathBuf>,

    #[clap(long = "output", short = 'o')]
    pub output: PathBuf,

    #[clap(long = "device", value_enum, default_value = "etrex")]
    pub device: DeviceOpt,

    /// Tile cap applied when --device custom is selected
    #[clap(long = "custom-cap", default_value = "250")]
    pub custom_cap: u32,

    /// Layer name in the overlay document, defaults to the input file stem
    #[clap(long = "name")]
    pub name: Option<String>,

    /// Jpeg quality, at most 75
    #[clap(long = "quality", default_value = "75")]
    pub quality: u8,

    #[clap(long = "noprogress")]
    pub no_progress: bool,
}

fn main() -> Result<()> {
    let opt = Opt::parse();

    let logger = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(Some(TimestampPrecision::Millis))
        .build();

    let multi = MultiProgress::new();
    let level = logger.filter();
    LogWrapper::new(multi.clone(), logger).try_init().unwrap();
    log::set_max_level(level);

    let provider = match &opt.world {
        Some(world) => ImageFileProvider::open_with_world_file(&opt.input, world)?,
        None => ImageFileProvider::open(&opt.input)?,
    };

    let mut params = ExportParams::new(opt.device.into(), &opt.output);
    params.custom_cap = Some(opt.custom_cap);
    params.layer_name = opt.name.clone();
    params.encoder = EncoderOptions {
        quality: opt.quality,
        ..EncoderOptions::default()
    };

    let recorder = Recorder::new();
    let summary: ExportSummary;
    if opt.no_progress {
        summary = kmz::export_kmz(&provider, &params, DummyProgress)?;
    } else {
        let progress = multi.add(ProgressBar::new(100));
        let p = progress.clone();
        summary = kmz::export_kmz(
            &provider,
            &params,
            CallbackProgress::<(), _>::with_cb(move |pos, _| {
                progress.set_position((pos * 100.0) as u64);
                ComputationStatus::Continue
            }),
        )?;
        p.finish_with_message("Export done");
    }

    if summary.plan.is_scaled() {
        log::info!(
            "Map was resampled to {:.0}% of the source resolution to stay within the device tile limit",
            summary.plan.scale_factor * 100.0
        );
    }

    log::info!(
        "Wrote {} ({} tiles, {} bytes) in {}",
        summary.output.display(),
        summary.tile_count,
        summary.bytes_written,
        recorder.elapsed_time_string()
    );

    Ok(())
}
