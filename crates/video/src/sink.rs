use crate::*;

/// Description of one recorded stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    pub index: usize,
    pub width: usize,
    pub height: usize,
    pub encoder_format: String,
}

impl StreamInfo {
    pub fn check_dimensions(&self, width: usize, height: usize) -> Result<(), VideoError> {
        if (width, height) != (self.width, self.height) {
            return Err(VideoError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (width, height),
            });
        }
        Ok(())
    }
}

/// Writer for one stream of a [`RecordingSink`].
pub trait StreamWriter: Send {
    fn info(&self) -> &StreamInfo;

    /// Seconds between frames when timestamps are derived automatically.
    fn base_frame_time(&self) -> f64;

    /// Write one image of `width` x `height` pixels in `format`.
    ///
    /// `time_s` of `None` (or a negative value) derives the timestamp from the
    /// base frame time and the number of frames written so far. Explicit
    /// timestamps must not decrease.
    fn write_image(
        &mut self,
        image: &[u8],
        width: usize,
        height: usize,
        format: &str,
        time_s: Option<f64>,
    ) -> Result<(), VideoError>;
}

/// A recording backend holding any number of streams.
pub trait RecordingSink: Send {
    /// Append a stream and return its index. Indices count up from 0.
    fn add_stream(
        &mut self,
        width: usize,
        height: usize,
        encoder_format: &str,
    ) -> Result<usize, VideoError>;

    fn stream_count(&self) -> usize;

    fn stream(&mut self, index: usize) -> Result<&mut dyn StreamWriter, VideoError>;
}

/// Timestamp bookkeeping shared by the built-in stream writers.
#[derive(Debug, Clone)]
pub struct FrameClock {
    base_frame_time: f64,
    frame_counter: u64,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new(base_frame_time: f64) -> Self {
        Self {
            base_frame_time,
            frame_counter: 0,
            last_time: None,
        }
    }

    pub fn base_frame_time(&self) -> f64 {
        self.base_frame_time
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    /// Resolve the timestamp for the next frame without committing it.
    ///
    /// Explicit times must not precede the previous frame. Derived times never
    /// fail; they are raised to the previous frame's time when needed.
    pub fn resolve(&self, time_s: Option<f64>) -> Result<f64, VideoError> {
        match time_s {
            Some(time) if time >= 0.0 => match self.last_time {
                Some(last) if time < last => Err(VideoError::Stream(format!(
                    "timestamp {time} precedes previous frame at {last}"
                ))),
                _ => Ok(time),
            },
            _ => {
                let derived = self.frame_counter as f64 * self.base_frame_time;
                Ok(self.last_time.map_or(derived, |last| derived.max(last)))
            }
        }
    }

    /// Record that a frame stamped `time` was written.
    pub fn commit(&mut self, time: f64) {
        self.frame_counter += 1;
        self.last_time = Some(time);
    }
}

/// Resolve the encoder format of a new stream and check its frame size fits in memory.
pub(crate) fn check_stream_format(
    width: usize,
    height: usize,
    encoder_format: &str,
) -> Result<&'static PixelFormat, VideoError> {
    let format = video_format_from_string(encoder_format)?;
    if format.checked_frame_size(width, height).is_none() {
        return Err(VideoError::InvalidParameter {
            key: "size".to_string(),
            value: format!("{width}x{height}"),
        });
    }
    Ok(format)
}

/// Check a stream index against the stream count.
pub(crate) fn check_index(index: usize, count: usize) -> Result<(), VideoError> {
    if index >= count {
        return Err(VideoError::IndexOutOfRange { index, count });
    }
    Ok(())
}

/// Check an incoming image against the stream it is written to.
pub(crate) fn check_image(
    info: &StreamInfo,
    image: &[u8],
    width: usize,
    height: usize,
    format: &str,
) -> Result<&'static PixelFormat, VideoError> {
    info.check_dimensions(width, height)?;
    if format != info.encoder_format {
        return Err(VideoError::UnsupportedFormat(format!(
            "{format} (stream {} records {})",
            info.index, info.encoder_format
        )));
    }
    let pix_format = video_format_from_string(format)?;
    let needed = pix_format.frame_size(width, height);
    if image.len() < needed {
        return Err(VideoError::Stream(format!(
            "image holds {} bytes, {}x{} {} needs {}",
            image.len(),
            width,
            height,
            format,
            needed
        )));
    }
    Ok(pix_format)
}
