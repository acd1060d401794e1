//! Pixel format conversion between the packed formats of the catalog.
//!
//! Every conversion goes through RGBA: the source layout is decoded pixel by
//! pixel and re-encoded into the destination layout.

use crate::*;

const DECODABLE: [&str; 7] = [
    "GRAY8", "RGB24", "BGR24", "RGBA32", "BGRA32", "YUYV422", "UYVY422",
];
const ENCODABLE: [&str; 5] = ["GRAY8", "RGB24", "BGR24", "RGBA32", "BGRA32"];

pub fn can_convert(from: &PixelFormat, to: &PixelFormat) -> bool {
    from == to || (DECODABLE.contains(&from.name()) && ENCODABLE.contains(&to.name()))
}

/// Convert one `width` x `height` frame from `from` to `to`.
pub fn convert_image(
    from: &PixelFormat,
    src: &[u8],
    to: &PixelFormat,
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), VideoError> {
    let src_len = from.frame_size(width, height);
    let dst_len = to.frame_size(width, height);
    if src.len() < src_len || dst.len() < dst_len {
        return Err(VideoError::Stream(format!(
            "conversion buffers too small for {width}x{height} {from} to {to}"
        )));
    }
    if from == to {
        dst[..dst_len].copy_from_slice(&src[..src_len]);
        return Ok(());
    }
    if !can_convert(from, to) {
        return Err(VideoError::UnsupportedFormat(format!("{from} to {to}")));
    }

    let pixels = decode(from, &src[..src_len]).take(width * height);
    encode(to, pixels, &mut dst[..dst_len]);
    Ok(())
}

fn decode<'a>(format: &PixelFormat, src: &'a [u8]) -> Box<dyn Iterator<Item = [u8; 4]> + 'a> {
    match format.name() {
        "GRAY8" => Box::new(src.iter().map(|&g| [g, g, g, 255])),
        "RGB24" => Box::new(src.chunks_exact(3).map(|c| [c[0], c[1], c[2], 255])),
        "BGR24" => Box::new(src.chunks_exact(3).map(|c| [c[2], c[1], c[0], 255])),
        "RGBA32" => Box::new(src.chunks_exact(4).map(|c| [c[0], c[1], c[2], c[3]])),
        "BGRA32" => Box::new(src.chunks_exact(4).map(|c| [c[2], c[1], c[0], c[3]])),
        "YUYV422" => Box::new(src.chunks(4).flat_map(yuyv_pair).flatten()),
        "UYVY422" => Box::new(src.chunks(4).flat_map(uyvy_pair).flatten()),
        _ => Box::new(std::iter::empty()),
    }
}

// two pixels share one U and one V sample; with an odd pixel count the last
// pixel comes without its V sample and is decoded with neutral V
fn yuyv_pair(c: &[u8]) -> [Option<[u8; 4]>; 2] {
    match *c {
        [y0, u, y1, v] => [Some(yuv_to_rgba(y0, u, v)), Some(yuv_to_rgba(y1, u, v))],
        [y0, u] => [Some(yuv_to_rgba(y0, u, 128)), None],
        _ => [None, None],
    }
}

fn uyvy_pair(c: &[u8]) -> [Option<[u8; 4]>; 2] {
    match *c {
        [u, y0, v, y1] => [Some(yuv_to_rgba(y0, u, v)), Some(yuv_to_rgba(y1, u, v))],
        [u, y0] => [Some(yuv_to_rgba(y0, u, 128)), None],
        _ => [None, None],
    }
}

fn encode(format: &PixelFormat, pixels: impl Iterator<Item = [u8; 4]>, dst: &mut [u8]) {
    let bpp = format.bytes_per_pixel;
    for (out, [r, g, b, a]) in dst.chunks_exact_mut(bpp).zip(pixels) {
        match format.name() {
            "GRAY8" => out[0] = luma(r, g, b),
            "RGB24" => out.copy_from_slice(&[r, g, b]),
            "BGR24" => out.copy_from_slice(&[b, g, r]),
            "RGBA32" => out.copy_from_slice(&[r, g, b, a]),
            "BGRA32" => out.copy_from_slice(&[b, g, r, a]),
            _ => {}
        }
    }
}

// BT.601 luma, fixed-point with shift 8
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8
}

// BT.601 YUV-to-RGB conversion for a single pixel (fixed-point, shift 8)
fn yuv_to_rgba(y: u8, u: u8, v: u8) -> [u8; 4] {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    [r, g, b, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
    }

    #[test]
    fn test_yuv_grey_is_neutral() {
        assert_eq!(yuv_to_rgba(128, 128, 128), [128, 128, 128, 255]);
    }
}
