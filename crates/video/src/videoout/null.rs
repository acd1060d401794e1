use crate::{sink::*, *};

#[derive(Debug, Clone)]
pub struct NullConfig {
    pub fps: f64,
}

impl NullConfig {
    pub fn from_uri(uri: &Uri) -> Result<Self, VideoError> {
        Ok(Self {
            fps: uri.get_float("fps", 30.0)?,
        })
    }
}

pub struct NullStream {
    info: StreamInfo,
    clock: FrameClock,
}

impl StreamWriter for NullStream {
    fn info(&self) -> &StreamInfo {
        &self.info
    }

    fn base_frame_time(&self) -> f64 {
        self.clock.base_frame_time()
    }

    fn write_image(
        &mut self,
        image: &[u8],
        width: usize,
        height: usize,
        format: &str,
        time_s: Option<f64>,
    ) -> Result<(), VideoError> {
        check_image(&self.info, image, width, height, format)?;
        let time = self.clock.resolve(time_s)?;
        self.clock.commit(time);
        Ok(())
    }
}

/// Sink that validates and counts frames without storing them.
pub struct NullSink {
    config: NullConfig,
    streams: Vec<NullStream>,
}

impl NullSink {
    pub fn new(config: NullConfig) -> Result<Self, VideoError> {
        if config.fps <= 0.0 {
            return Err(VideoError::InvalidParameter {
                key: "fps".to_string(),
                value: config.fps.to_string(),
            });
        }
        Ok(Self {
            config,
            streams: Vec::new(),
        })
    }
}

impl RecordingSink for NullSink {
    fn add_stream(
        &mut self,
        width: usize,
        height: usize,
        encoder_format: &str,
    ) -> Result<usize, VideoError> {
        check_stream_format(width, height, encoder_format)?;
        let index = self.streams.len();
        self.streams.push(NullStream {
            info: StreamInfo {
                index,
                width,
                height,
                encoder_format: encoder_format.to_string(),
            },
            clock: FrameClock::new(1.0 / self.config.fps),
        });
        Ok(index)
    }

    fn stream_count(&self) -> usize {
        self.streams.len()
    }

    fn stream(&mut self, index: usize) -> Result<&mut dyn StreamWriter, VideoError> {
        check_index(index, self.streams.len())?;
        Ok(&mut self.streams[index])
    }
}
