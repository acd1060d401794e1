use {crate::*, base::Vec2};

/// An owned copy of one captured frame.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub size: Vec2<usize>,
    pub format: &'static PixelFormat,
}

impl VideoFrame {
    /// Allocate a zeroed frame matching the geometry of `source`.
    pub fn for_source(source: &dyn VideoSource) -> Self {
        Self {
            data: vec![0u8; source.size_bytes()],
            size: Vec2::new(source.width(), source.height()),
            format: source.pix_format(),
        }
    }
}
