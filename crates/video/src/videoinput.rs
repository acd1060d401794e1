use crate::*;

/// Owns one capture source chain opened from a URI.
///
/// Every accessor fails with [`VideoError::NotOpened`] until `open` succeeds.
#[derive(Default)]
pub struct VideoInput {
    uri: Option<String>,
    video: Option<Box<dyn VideoSource>>,
}

impl VideoInput {
    /// An input with no source attached.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uri(uri: &str) -> Result<Self, VideoError> {
        let mut input = Self::new();
        input.open(uri)?;
        Ok(input)
    }

    /// Open `uri` through the default source registry.
    pub fn open(&mut self, uri: &str) -> Result<(), VideoError> {
        self.open_with(default_source_registry(), uri)
    }

    /// Open `uri` through `registry`, dropping any previously opened source first.
    pub fn open_with(&mut self, registry: &SourceRegistry, uri: &str) -> Result<(), VideoError> {
        self.reset();
        let video = registry.open(uri)?;
        log::info!(
            "opened {}: {}x{} {}",
            uri,
            video.width(),
            video.height(),
            video.pix_format()
        );
        self.video = Some(video);
        self.uri = Some(uri.to_string());
        Ok(())
    }

    /// Stop and drop the source. Never fails.
    pub fn reset(&mut self) {
        if let Some(video) = self.video.take() {
            video.stop();
            log::debug!("closed {}", self.uri.as_deref().unwrap_or_default());
        }
        self.uri = None;
    }

    pub fn is_open(&self) -> bool {
        self.video.is_some()
    }

    /// URI of the open source.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn video(&self) -> Result<&dyn VideoSource, VideoError> {
        self.video.as_deref().ok_or(VideoError::NotOpened)
    }

    pub fn width(&self) -> Result<usize, VideoError> {
        Ok(self.video()?.width())
    }

    pub fn height(&self) -> Result<usize, VideoError> {
        Ok(self.video()?.height())
    }

    pub fn size_bytes(&self) -> Result<usize, VideoError> {
        Ok(self.video()?.size_bytes())
    }

    pub fn pix_format(&self) -> Result<&'static PixelFormat, VideoError> {
        Ok(self.video()?.pix_format())
    }

    pub fn start(&self) -> Result<(), VideoError> {
        self.video()?.start()
    }

    pub fn stop(&self) -> Result<(), VideoError> {
        self.video()?.stop();
        Ok(())
    }

    pub fn grab_next(&self, image: &mut [u8], wait: bool) -> Result<bool, VideoError> {
        Ok(self.video()?.grab_next(image, wait))
    }

    pub fn grab_newest(&self, image: &mut [u8], wait: bool) -> Result<bool, VideoError> {
        Ok(self.video()?.grab_newest(image, wait))
    }

    /// Grab the next frame into a freshly allocated [`VideoFrame`].
    pub fn grab_frame(&self, wait: bool) -> Result<Option<VideoFrame>, VideoError> {
        let video = self.video()?;
        let mut frame = VideoFrame::for_source(video);
        Ok(video.grab_next(&mut frame.data, wait).then_some(frame))
    }
}

impl Drop for VideoInput {
    fn drop(&mut self) {
        self.reset();
    }
}
