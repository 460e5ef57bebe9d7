use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::hsv::hsv_to_rgb;
use crate::polar::disk_pixel_to_hs;

const CHANNELS: usize = 4;
const TRANSPARENT: [u8; CHANNELS] = [0, 0, 0, 0];

/// Largest accepted side of the disk texture (1 GiB of RGBA).
pub const MAX_TEXTURE_SIZE: u32 = 16384;

/// Color of one texel of the hue/saturation disk, `None` outside the circle.
pub fn disk_texel(x: u32, y: u32, size: u32) -> Option<[u8; CHANNELS]> {
    disk_pixel_to_hs(x, y, size).map(|(hue, sat)| {
        let [r, g, b] = hsv_to_rgb(hue, sat, 1.0).to_rgb8();
        [r, g, b, u8::MAX]
    })
}

/// Renders the full-brightness hue/saturation wheel as a square RGBA8 image.
///
/// Texels outside the inscribed circle are fully transparent so the image
/// can be mapped onto a circular mesh.
pub fn gradient_disk(size: u32) -> Result<Vec<u8>> {
    if size == 0 || size > MAX_TEXTURE_SIZE {
        return Err(Error::InvalidSize(format!(
            "disk texture size must be within 1..={MAX_TEXTURE_SIZE}, got {size}"
        )));
    }

    let row_len = size as usize * CHANNELS;
    let mut buf = vec![0u8; rgba_len(size, size)?];

    let mut opaque = 0usize;
    for (y, row) in buf.chunks_exact_mut(row_len).enumerate() {
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let texel = disk_texel(x as u32, y as u32, size);
            opaque += texel.is_some() as usize;
            px.copy_from_slice(&texel.unwrap_or(TRANSPARENT));
        }
    }

    debug!("Generated {size}x{size} disk texture, {opaque} opaque texels");
    Ok(buf)
}

fn rgba_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::InvalidSize(format!("{width}x{height} RGBA image is too large")))
}

pub fn encode_png_rgba8<W: Write>(buf: &[u8], width: u32, height: u32, w: W) -> Result<()> {
    let expected = rgba_len(width, height)?;
    if buf.len() != expected {
        return Err(Error::InvalidSize(format!(
            "buffer holds {} bytes, {width}x{height} RGBA needs {expected}",
            buf.len()
        )));
    }

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(buf)?;
    writer.finish()?;
    Ok(())
}

pub fn write_image_rgba8(buf: &[u8], width: u32, height: u32, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    encode_png_rgba8(buf, width, height, &mut w)?;
    w.flush()?;

    info!("Wrote {width}x{height} texture to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel(buf: &[u8], size: u32, x: u32, y: u32) -> &[u8] {
        let i = (y as usize * size as usize + x as usize) * CHANNELS;
        &buf[i..i + CHANNELS]
    }

    #[test]
    fn rejects_empty_texture() {
        assert!(matches!(gradient_disk(0), Err(Error::InvalidSize(_))));
    }

    #[test]
    fn rejects_oversized_texture() {
        assert!(matches!(gradient_disk(MAX_TEXTURE_SIZE + 1), Err(Error::InvalidSize(_))));
        assert!(matches!(gradient_disk(u32::MAX), Err(Error::InvalidSize(_))));
    }

    #[test]
    fn alpha_masks_the_circle() {
        let size = 32;
        let buf = gradient_disk(size).unwrap();
        assert_eq!(buf.len(), (size * size) as usize * CHANNELS);

        for y in 0..size {
            for x in 0..size {
                let px = texel(&buf, size, x, y);
                let inside = disk_pixel_to_hs(x, y, size).is_some();
                if inside {
                    assert_eq!(px[3], 255);
                } else {
                    assert_eq!(px, TRANSPARENT);
                }
            }
        }
    }

    #[test]
    fn center_is_white_and_rim_is_saturated() {
        let size = 64;
        let buf = gradient_disk(size).unwrap();
        assert_eq!(texel(&buf, size, 32, 32), [255, 255, 255, 255]);
        // Left rim: hue 180, full saturation.
        assert_eq!(texel(&buf, size, 0, 32), [0, 255, 255, 255]);
    }

    #[test]
    fn texels_match_direct_polar_color() {
        let size = 48;
        let buf = gradient_disk(size).unwrap();
        let half = size as f64 / 2.0;
        for (x, y) in [(30, 5), (2, 20), (40, 40), (24, 47)] {
            let dx = (x as f64 - half) / half;
            let dy = (y as f64 - half) / half;
            let r = (dx * dx + dy * dy).sqrt();
            assert!(r <= 1.0);
            let theta = dy.atan2(dx).rem_euclid(std::f64::consts::TAU);
            let [red, g, b] = hsv_to_rgb(theta.to_degrees(), r, 1.0).to_rgb8();
            assert_eq!(texel(&buf, size, x, y), [red, g, b, 255]);
        }
    }

    #[test]
    fn encode_checks_buffer_length() {
        let mut out = Vec::new();
        let err = encode_png_rgba8(&[0; 10], 2, 2, &mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidSize(_)));
    }

    #[test]
    fn encode_rejects_overflowing_dimensions() {
        let mut out = Vec::new();
        let err = encode_png_rgba8(&[0; 4], u32::MAX, u32::MAX, &mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidSize(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn encoded_png_decodes_to_same_pixels() {
        let size = 16;
        let buf = gradient_disk(size).unwrap();
        let mut out = Vec::new();
        encode_png_rgba8(&buf, size, size, &mut out).unwrap();

        let decoder = png::Decoder::new(out.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut decoded = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut decoded).unwrap();
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!((info.width, info.height), (size, size));
        assert_eq!(&decoded[..info.buffer_size()], buf.as_slice());
    }
}
