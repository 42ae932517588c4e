use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use inf::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::overlay::{OverlayManifest, KML_ENTRY_NAME};
use crate::tileencoder::EncodedTile;
use crate::Result;

/// Writes the overlay package: a zip archive holding `doc.kml` followed by
/// one jpeg entry per tile, in manifest order.
///
/// The archive is first assembled under a `.partial` suffix and renamed onto
/// `path` once it is complete, so a failed export never leaves a truncated
/// package behind. Returns the size of the written archive in bytes.
pub fn write_kmz(path: &Path, manifest: &OverlayManifest, tiles: &[EncodedTile]) -> Result<u64> {
    if manifest.tile_count() != tiles.len() {
        return Err(Error::InvalidParameter(format!(
            "manifest lists {} tiles but {} were provided",
            manifest.tile_count(),
            tiles.len()
        )));
    }

    inf::fs::create_directory_for_file(path)?;

    let partial = partial_path(path);
    let result = write_archive(&partial, manifest, tiles)
        .and_then(|size| inf::fs::replace_file(&partial, path).map(|()| size));

    match result {
        Ok(size) => {
            log::debug!("Wrote {} ({} tiles, {} bytes)", path.display(), tiles.len(), size);
            Ok(size)
        }
        Err(e) => {
            let _ = std::fs::remove_file(&partial);
            Err(e)
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut partial = path.as_os_str().to_os_string();
    partial.push(".partial");
    PathBuf::from(partial)
}

fn write_archive(path: &Path, manifest: &OverlayManifest, tiles: &[EncodedTile]) -> Result<u64> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    zip.start_file(KML_ENTRY_NAME, options)
        .map_err(|e| Error::Runtime(format!("Failed to create the {KML_ENTRY_NAME} entry: {e}")))?;
    zip.write_all(manifest.to_kml().as_bytes())?;

    for (entry, tile) in manifest.entries().iter().zip(tiles) {
        zip.start_file(entry.filename.as_str(), options)
            .map_err(|e| Error::Runtime(format!("Failed to create the {} entry: {e}", entry.filename)))?;
        zip.write_all(&tile.data)?;
    }

    let file = zip
        .finish()
        .map_err(|e| Error::Runtime(format!("Failed to finalize the kmz archive: {e}")))?;
    file.sync_all()?;

    Ok(file.metadata()?.len())
}
