use {
    crate::{pixelconvert::*, source::buffer_fits, *},
    std::sync::Mutex,
};

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub format: &'static PixelFormat,
}

impl ConvertConfig {
    pub fn from_uri(uri: &Uri) -> Result<Self, VideoError> {
        Ok(Self {
            format: uri.get_format("fmt", &RGB24)?,
        })
    }
}

/// Compositional source that converts the frames of its inner source to another pixel format.
pub struct ConvertVideo {
    inner: Box<dyn VideoSource>,
    format: &'static PixelFormat,
    scratch: Mutex<Vec<u8>>,
}

impl ConvertVideo {
    pub fn new(inner: Box<dyn VideoSource>, config: ConvertConfig) -> Result<Self, VideoError> {
        let from = inner.pix_format();
        if !can_convert(from, config.format) {
            return Err(VideoError::UnsupportedFormat(format!(
                "cannot convert {} to {}",
                from, config.format
            )));
        }
        log::debug!("converting {} to {}", from, config.format);
        let scratch = vec![0u8; inner.size_bytes()];
        Ok(Self {
            inner,
            format: config.format,
            scratch: Mutex::new(scratch),
        })
    }

    fn grab_with(
        &self,
        image: &mut [u8],
        grab: impl FnOnce(&dyn VideoSource, &mut [u8]) -> bool,
    ) -> bool {
        if !buffer_fits(image, self.size_bytes()) {
            return false;
        }
        let mut scratch = self.scratch.lock().unwrap_or_else(|e| e.into_inner());
        if !grab(self.inner.as_ref(), &mut scratch[..]) {
            return false;
        }
        match convert_image(
            self.inner.pix_format(),
            &scratch[..],
            self.format,
            image,
            self.width(),
            self.height(),
        ) {
            Ok(()) => true,
            Err(error) => {
                log::error!("convert: {}", error);
                false
            }
        }
    }
}

impl VideoSource for ConvertVideo {
    fn width(&self) -> usize {
        self.inner.width()
    }

    fn height(&self) -> usize {
        self.inner.height()
    }

    fn pix_format(&self) -> &'static PixelFormat {
        self.format
    }

    fn start(&self) -> Result<(), VideoError> {
        self.inner.start()
    }

    fn stop(&self) {
        self.inner.stop()
    }

    fn grab_next(&self, image: &mut [u8], wait: bool) -> bool {
        self.grab_with(image, |inner, scratch| inner.grab_next(scratch, wait))
    }

    fn grab_newest(&self, image: &mut [u8], wait: bool) -> bool {
        self.grab_with(image, |inner, scratch| inner.grab_newest(scratch, wait))
    }
}
