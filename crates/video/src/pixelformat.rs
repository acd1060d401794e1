use {crate::*, std::fmt};

/// Byte layout of a raw frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFormat {
    name: &'static str,
    pub channels: u32,
    pub channel_bits: [u32; 4],
    pub bytes_per_pixel: usize,
    pub planar: bool,
}

impl PixelFormat {
    const fn new(
        name: &'static str,
        channels: u32,
        channel_bits: [u32; 4],
        bytes_per_pixel: usize,
        planar: bool,
    ) -> Self {
        Self {
            name,
            channels,
            channel_bits,
            bytes_per_pixel,
            planar,
        }
    }

    /// Canonical token, as accepted by [`video_format_from_string`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Sum of the bit depths of the used channels.
    pub fn bits_per_pixel(&self) -> u32 {
        self.channel_bits[..self.channels as usize].iter().sum()
    }

    /// Bytes needed for one `width` x `height` frame, `None` on overflow.
    pub fn checked_frame_size(&self, width: usize, height: usize) -> Option<usize> {
        width.checked_mul(height)?.checked_mul(self.bytes_per_pixel)
    }

    /// Bytes needed for one `width` x `height` frame.
    ///
    /// Saturates at `usize::MAX`, which no buffer can hold, so oversized
    /// geometry fails the callers' length checks instead of wrapping.
    pub fn frame_size(&self, width: usize, height: usize) -> usize {
        self.checked_frame_size(width, height).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub static GRAY8: PixelFormat = PixelFormat::new("GRAY8", 1, [8, 0, 0, 0], 1, false);
pub static GRAY16LE: PixelFormat = PixelFormat::new("GRAY16LE", 1, [16, 0, 0, 0], 2, false);
pub static RGB24: PixelFormat = PixelFormat::new("RGB24", 3, [8, 8, 8, 0], 3, false);
pub static BGR24: PixelFormat = PixelFormat::new("BGR24", 3, [8, 8, 8, 0], 3, false);
pub static RGBA32: PixelFormat = PixelFormat::new("RGBA32", 4, [8, 8, 8, 8], 4, false);
pub static BGRA32: PixelFormat = PixelFormat::new("BGRA32", 4, [8, 8, 8, 8], 4, false);
pub static YUYV422: PixelFormat = PixelFormat::new("YUYV422", 3, [8, 4, 4, 0], 2, false);
pub static UYVY422: PixelFormat = PixelFormat::new("UYVY422", 3, [8, 4, 4, 0], 2, false);
pub static YUV422P: PixelFormat = PixelFormat::new("YUV422P", 3, [8, 4, 4, 0], 2, true);

/// Every format known to the catalog.
pub static SUPPORTED_PIXEL_FORMATS: [&PixelFormat; 9] = [
    &GRAY8, &GRAY16LE, &RGB24, &BGR24, &RGBA32, &BGRA32, &YUYV422, &UYVY422, &YUV422P,
];

/// Look up a pixel format by its exact, case-sensitive token.
pub fn video_format_from_string(token: &str) -> Result<&'static PixelFormat, VideoError> {
    SUPPORTED_PIXEL_FORMATS
        .iter()
        .copied()
        .find(|format| format.name == token)
        .ok_or_else(|| VideoError::UnsupportedFormat(token.to_string()))
}
