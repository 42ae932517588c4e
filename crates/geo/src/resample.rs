use image::{Rgb, RgbImage};
use inf::Error;

use crate::{RasterSize, Result};

const ALIGNMENT_EPSILON: f64 = 1e-6;

/// Fractional pixel rectangle in source image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl SourceRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        SourceRect {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn clamped(&self, width: u32, height: u32) -> SourceRect {
        SourceRect {
            x0: self.x0.clamp(0.0, width as f64),
            y0: self.y0.clamp(0.0, height as f64),
            x1: self.x1.clamp(0.0, width as f64),
            y1: self.y1.clamp(0.0, height as f64),
        }
    }

    fn is_integer_aligned(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| (v - v.round()).abs() < ALIGNMENT_EPSILON)
    }
}

/// Resamples a fractional source region onto a target pixel grid.
///
/// Regions that cover at least one source pixel per target pixel are reduced
/// with an area weighted average, smaller regions are enlarged with bilinear
/// interpolation. Integer aligned regions at identical resolution are copied
/// as is.
pub fn resample_rgb(src: &RgbImage, rect: SourceRect, size: RasterSize) -> Result<RgbImage> {
    if size.is_empty() {
        return Err(Error::InvalidParameter("cannot resample to an empty size".to_string()));
    }

    if rect.is_empty() || src.width() == 0 || src.height() == 0 {
        return Err(Error::InvalidParameter(
            "cannot resample from an empty source region".to_string(),
        ));
    }

    let out_width = size.cols.count() as u32;
    let out_height = size.rows.count() as u32;

    if rect.is_integer_aligned() && rect.width().round() as u32 == out_width && rect.height().round() as u32 == out_height {
        let x = (rect.x0.round() as u32).min(src.width().saturating_sub(out_width));
        let y = (rect.y0.round() as u32).min(src.height().saturating_sub(out_height));
        return Ok(image::imageops::crop_imm(src, x, y, out_width, out_height).to_image());
    }

    let span_x = rect.width() / out_width as f64;
    let span_y = rect.height() / out_height as f64;

    let mut out = RgbImage::new(out_width, out_height);
    if span_x >= 1.0 && span_y >= 1.0 {
        box_average(src, rect, &mut out);
    } else {
        bilinear(src, rect, &mut out);
    }

    Ok(out)
}

fn overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Area weighted average of all source pixels covered by each target pixel,
/// including fractional coverage at the edges.
fn box_average(src: &RgbImage, rect: SourceRect, out: &mut RgbImage) {
    let (out_width, out_height) = out.dimensions();
    let span_x = rect.width() / out_width as f64;
    let span_y = rect.height() / out_height as f64;

    for out_y in 0..out_height {
        let sy0 = rect.y0 + out_y as f64 * span_y;
        let sy1 = sy0 + span_y;
        let first_row = (sy0.floor() as i64).max(0);
        let last_row = (sy1.ceil() as i64).min(src.height() as i64);

        for out_x in 0..out_width {
            let sx0 = rect.x0 + out_x as f64 * span_x;
            let sx1 = sx0 + span_x;
            let first_col = (sx0.floor() as i64).max(0);
            let last_col = (sx1.ceil() as i64).min(src.width() as i64);

            let mut acc = [0.0f64; 3];
            let mut weight_sum = 0.0;

            for src_y in first_row..last_row {
                let weight_y = overlap(src_y as f64, src_y as f64 + 1.0, sy0, sy1);
                if weight_y <= 0.0 {
                    continue;
                }

                for src_x in first_col..last_col {
                    let weight_x = overlap(src_x as f64, src_x as f64 + 1.0, sx0, sx1);
                    if weight_x <= 0.0 {
                        continue;
                    }

                    let weight = weight_x * weight_y;
                    let pixel = src.get_pixel(src_x as u32, src_y as u32);
                    acc[0] += weight * pixel[0] as f64;
                    acc[1] += weight * pixel[1] as f64;
                    acc[2] += weight * pixel[2] as f64;
                    weight_sum += weight;
                }
            }

            let pixel = if weight_sum > 0.0 {
                Rgb([
                    to_channel(acc[0] / weight_sum),
                    to_channel(acc[1] / weight_sum),
                    to_channel(acc[2] / weight_sum),
                ])
            } else {
                // Window lies entirely outside the source, sample the closest edge pixel.
                let src_x = (sx0.max(0.0) as u32).min(src.width() - 1);
                let src_y = (sy0.max(0.0) as u32).min(src.height() - 1);
                *src.get_pixel(src_x, src_y)
            };

            out.put_pixel(out_x, out_y, pixel);
        }
    }
}

fn bilinear(src: &RgbImage, rect: SourceRect, out: &mut RgbImage) {
    let (out_width, out_height) = out.dimensions();
    let span_x = rect.width() / out_width as f64;
    let span_y = rect.height() / out_height as f64;

    let max_x = (src.width() - 1) as f64;
    let max_y = (src.height() - 1) as f64;

    for out_y in 0..out_height {
        let sample_y = (rect.y0 + (out_y as f64 + 0.5) * span_y - 0.5).clamp(0.0, max_y);
        let y0 = sample_y.floor() as u32;
        let y1 = (y0 + 1).min(src.height() - 1);
        let fy = sample_y - y0 as f64;

        for out_x in 0..out_width {
            let sample_x = (rect.x0 + (out_x as f64 + 0.5) * span_x - 0.5).clamp(0.0, max_x);
            let x0 = sample_x.floor() as u32;
            let x1 = (x0 + 1).min(src.width() - 1);
            let fx = sample_x - x0 as f64;

            let mut channels = [0u8; 3];
            for (channel, value) in channels.iter_mut().enumerate() {
                let top = src.get_pixel(x0, y0)[channel] as f64 * (1.0 - fx) + src.get_pixel(x1, y0)[channel] as f64 * fx;
                let bottom = src.get_pixel(x0, y1)[channel] as f64 * (1.0 - fx) + src.get_pixel(x1, y1)[channel] as f64 * fx;
                *value = to_channel(top * (1.0 - fy) + bottom * fy);
            }

            out.put_pixel(out_x, out_y, Rgb(channels));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Columns, Rows};

    fn checkerboard(size: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn integer_aligned_window_is_copied() {
        let src = RgbImage::from_fn(8, 8, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 0]));
        let out = resample_rgb(
            &src,
            SourceRect::new(2.0, 3.0, 6.0, 7.0),
            RasterSize::with_rows_cols(Rows(4), Columns(4)),
        )
        .unwrap();

        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.get_pixel(0, 0), src.get_pixel(2, 3));
        assert_eq!(out.get_pixel(3, 3), src.get_pixel(5, 6));
    }

    #[test]
    fn downscale_averages_pixel_blocks() {
        let src = checkerboard(8);
        let out = resample_rgb(
            &src,
            SourceRect::new(0.0, 0.0, 8.0, 8.0),
            RasterSize::with_rows_cols(Rows(4), Columns(4)),
        )
        .unwrap();

        // Every 2x2 block holds two black and two white pixels.
        for pixel in out.pixels() {
            assert_eq!(pixel, &Rgb([128, 128, 128]));
        }
    }

    #[test]
    fn downscale_of_constant_image_stays_constant() {
        let src = RgbImage::from_pixel(100, 60, Rgb([12, 200, 99]));
        let out = resample_rgb(
            &src,
            SourceRect::new(0.25, 0.75, 99.5, 59.25),
            RasterSize::with_rows_cols(Rows(13), Columns(31)),
        )
        .unwrap();

        assert_eq!(out.dimensions(), (31, 13));
        for pixel in out.pixels() {
            assert_eq!(pixel, &Rgb([12, 200, 99]));
        }
    }

    #[test]
    fn upscale_interpolates_between_pixels() {
        let mut src = RgbImage::new(2, 1);
        src.put_pixel(0, 0, Rgb([0, 0, 0]));
        src.put_pixel(1, 0, Rgb([100, 100, 100]));

        let out = resample_rgb(
            &src,
            SourceRect::new(0.0, 0.0, 2.0, 1.0),
            RasterSize::with_rows_cols(Rows(1), Columns(4)),
        )
        .unwrap();

        let values: Vec<u8> = out.pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![0, 25, 75, 100]);
    }

    #[test]
    fn empty_requests_are_rejected() {
        let src = checkerboard(4);
        assert!(resample_rgb(&src, SourceRect::new(0.0, 0.0, 4.0, 4.0), RasterSize::empty()).is_err());
        assert!(resample_rgb(
            &src,
            SourceRect::new(2.0, 2.0, 2.0, 2.0),
            RasterSize::square(2)
        )
        .is_err());
    }
}
