use std::fmt;

use geo::LatLonBounds;

use crate::tileencoder::EncodedTile;

/// Name of the KML document inside the archive.
pub const KML_ENTRY_NAME: &str = "doc.kml";

/// Archive entry name for the tile at `index` (row-major render order).
pub fn tile_image_name(index: usize) -> String {
    format!("image_{index:03}.jpg")
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayEntry {
    pub filename: String,
    pub bounds: LatLonBounds,
}

/// Accumulates the geographic footprint of every exported tile and renders
/// the KML document that anchors the images on the device.
///
/// Entries are kept in the order they are recorded, which has to be the
/// render order (row-major) for reproducible output.
#[derive(Debug, Clone)]
pub struct OverlayManifest {
    layer_name: String,
    entries: Vec<OverlayEntry>,
}

impl OverlayManifest {
    pub fn new(layer_name: impl Into<String>) -> Self {
        OverlayManifest {
            layer_name: layer_name.into(),
            entries: Vec::new(),
        }
    }

    pub fn record_tile(&mut self, tile: &EncodedTile, filename: String) {
        self.entries.push(OverlayEntry {
            filename,
            bounds: tile.bounds,
        });
    }

    pub fn layer_name(&self) -> &str {
        &self.layer_name
    }

    pub fn tile_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[OverlayEntry] {
        &self.entries
    }

    /// Document description, naming the exporter and the tile count.
    pub fn description(&self) -> String {
        format!(
            "QGIS GarminDeviceExport by Chris.Evans@gmail.com \u{2013} {} tiles",
            self.entries.len()
        )
    }

    pub fn to_kml(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OverlayManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version='1.0' encoding='UTF-8'?>")?;
        writeln!(f, "<kml xmlns=\"http://www.opengis.net/kml/2.2\">")?;
        writeln!(f, "  <Document>")?;
        writeln!(f, "    <name>{}</name>", escape_xml(&self.layer_name))?;
        writeln!(f, "    <description>{}</description>", self.description())?;
        for entry in &self.entries {
            writeln!(f, "    <GroundOverlay>")?;
            writeln!(f, "      <Icon>")?;
            writeln!(f, "        <href>{}</href>", escape_xml(&entry.filename))?;
            writeln!(f, "      </Icon>")?;
            writeln!(f, "      <LatLonBox>")?;
            writeln!(f, "        <north>{}</north>", entry.bounds.north())?;
            writeln!(f, "        <south>{}</south>", entry.bounds.south())?;
            writeln!(f, "        <east>{}</east>", entry.bounds.east())?;
            writeln!(f, "        <west>{}</west>", entry.bounds.west())?;
            writeln!(f, "      </LatLonBox>")?;
            writeln!(f, "    </GroundOverlay>")?;
        }
        writeln!(f, "  </Document>")?;
        write!(f, "</kml>")
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use geo::{Cell, Coordinate, RasterSize};
    use xml::reader::{EventReader, XmlEvent};

    use super::*;

    fn encoded_tile(index: i32, west: f64, south: f64) -> EncodedTile {
        EncodedTile {
            cell: Cell::from_row_col(0, index),
            bounds: LatLonBounds::hull(
                Coordinate::latlon(south, west),
                Coordinate::latlon(south + 0.25, west + 0.25),
            ),
            data: Vec::new(),
            quality_used: 75,
            pixel_size: RasterSize::square(100),
        }
    }

    fn manifest_with_tiles(count: i32) -> OverlayManifest {
        let mut manifest = OverlayManifest::new("Test layer");
        for index in 0..count {
            let tile = encoded_tile(index, 4.0 + f64::from(index) * 0.25, 51.5);
            manifest.record_tile(&tile, tile_image_name(index as usize));
        }

        manifest
    }

    #[test]
    fn tile_image_names_are_zero_padded() {
        assert_eq!(tile_image_name(0), "image_000.jpg");
        assert_eq!(tile_image_name(12), "image_012.jpg");
        assert_eq!(tile_image_name(250), "image_250.jpg");
        assert_eq!(tile_image_name(1000), "image_1000.jpg");
    }

    #[test]
    fn description_names_the_exporter_and_tile_count() {
        let manifest = manifest_with_tiles(37);
        assert_eq!(
            manifest.description(),
            "QGIS GarminDeviceExport by Chris.Evans@gmail.com – 37 tiles"
        );
    }

    #[test]
    fn kml_document_is_well_formed() {
        let manifest = manifest_with_tiles(3);
        let kml = manifest.to_kml();

        let mut elements = Vec::new();
        for event in EventReader::new(kml.as_bytes()) {
            if let XmlEvent::StartElement { name, .. } = event.unwrap() {
                elements.push(name.local_name);
            }
        }

        assert_eq!(&elements[..5], &["kml", "Document", "name", "description", "GroundOverlay"]);
        assert_eq!(elements.iter().filter(|e| *e == "GroundOverlay").count(), 3);
        assert_eq!(elements.iter().filter(|e| *e == "LatLonBox").count(), 3);
    }

    #[test]
    fn ground_overlays_keep_the_record_order_and_bounds() {
        let manifest = manifest_with_tiles(2);
        let kml = manifest.to_kml();

        let mut texts = Vec::new();
        let mut current = String::new();
        for event in EventReader::new(kml.as_bytes()) {
            match event.unwrap() {
                XmlEvent::StartElement { name, .. } => current = name.local_name,
                XmlEvent::Characters(text) => texts.push((current.clone(), text)),
                _ => {}
            }
        }

        let hrefs: Vec<&str> = texts.iter().filter(|(e, _)| e == "href").map(|(_, t)| t.as_str()).collect();
        assert_eq!(hrefs, ["image_000.jpg", "image_001.jpg"]);

        // The printed coordinates parse back to the exact recorded values.
        let norths: Vec<f64> = texts
            .iter()
            .filter(|(e, _)| e == "north")
            .map(|(_, t)| t.parse().unwrap())
            .collect();
        let wests: Vec<f64> = texts
            .iter()
            .filter(|(e, _)| e == "west")
            .map(|(_, t)| t.parse().unwrap())
            .collect();
        assert_eq!(norths, [51.75, 51.75]);
        assert_eq!(wests, [4.0, 4.25]);
    }

    #[test]
    fn layer_names_are_escaped() {
        let mut manifest = OverlayManifest::new("Trails & \"Woods\" <v2>");
        let tile = encoded_tile(0, 4.0, 51.9);
        manifest.record_tile(&tile, tile_image_name(0));

        let kml = manifest.to_kml();
        assert!(kml.contains("<name>Trails &amp; &quot;Woods&quot; &lt;v2&gt;</name>"));

        let mut parsed_name = None;
        let mut in_name = false;
        for event in EventReader::new(kml.as_bytes()) {
            match event.unwrap() {
                XmlEvent::StartElement { name, .. } => in_name = name.local_name == "name",
                XmlEvent::Characters(text) if in_name => parsed_name = Some(text),
                _ => {}
            }
        }

        assert_eq!(parsed_name.as_deref(), Some("Trails & \"Woods\" <v2>"));
    }
}
