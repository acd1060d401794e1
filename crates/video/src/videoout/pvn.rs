use {
    crate::{pvn::*, sink::*, *},
    std::{
        fs::File,
        io::{BufWriter, Write},
        path::PathBuf,
        sync::{Arc, Mutex},
    },
};

#[derive(Debug, Clone)]
pub struct PvnSinkConfig {
    pub path: PathBuf,
    pub fps: f64,
}

impl PvnSinkConfig {
    pub fn from_uri(uri: &Uri) -> Result<Self, VideoError> {
        if uri.locator.is_empty() {
            return Err(VideoError::Device("pvn needs a file path".to_string()));
        }
        Ok(Self {
            path: PathBuf::from(&uri.locator),
            fps: uri.get_float("fps", 30.0)?,
        })
    }
}

/// File shared by all streams of one sink.
///
/// The header lists every stream, so it is written with the first frame and
/// the stream set is frozen from then on.
struct PvnFile {
    writer: BufWriter<File>,
    header: PvnHeader,
    header_written: bool,
}

impl PvnFile {
    fn ensure_header(&mut self) -> Result<(), VideoError> {
        if !self.header_written {
            self.header.write_to(&mut self.writer)?;
            self.header_written = true;
        }
        Ok(())
    }
}

type SharedFile = Arc<Mutex<PvnFile>>;

pub struct PvnStream {
    info: StreamInfo,
    clock: FrameClock,
    file: SharedFile,
}

impl StreamWriter for PvnStream {
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
        let pix_format = check_image(&self.info, image, width, height, format)?;
        let time = self.clock.resolve(time_s)?;

        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        file.ensure_header()?;
        let frame = &image[..pix_format.frame_size(width, height)];
        write_record(&mut file.writer, self.info.index, time, frame)?;
        self.clock.commit(time);
        Ok(())
    }
}

/// Sink recording raw frames into a PVN file.
pub struct PvnSink {
    base_frame_time: f64,
    file: SharedFile,
    streams: Vec<PvnStream>,
}

impl PvnSink {
    pub fn new(config: PvnSinkConfig) -> Result<Self, VideoError> {
        if config.fps <= 0.0 {
            return Err(VideoError::InvalidParameter {
                key: "fps".to_string(),
                value: config.fps.to_string(),
            });
        }
        let writer = BufWriter::new(File::create(&config.path)?);
        log::info!("pvn: recording to {}", config.path.display());
        Ok(Self {
            base_frame_time: 1.0 / config.fps,
            file: Arc::new(Mutex::new(PvnFile {
                writer,
                header: PvnHeader::default(),
                header_written: false,
            })),
            streams: Vec::new(),
        })
    }
}

impl RecordingSink for PvnSink {
    fn add_stream(
        &mut self,
        width: usize,
        height: usize,
        encoder_format: &str,
    ) -> Result<usize, VideoError> {
        let format = check_stream_format(width, height, encoder_format)?;
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if file.header_written {
            return Err(VideoError::Stream(
                "cannot add a stream after recording has started".to_string(),
            ));
        }
        file.header.streams.push(PvnStreamHeader {
            format,
            width,
            height,
            base_frame_time: self.base_frame_time,
        });
        drop(file);

        let index = self.streams.len();
        self.streams.push(PvnStream {
            info: StreamInfo {
                index,
                width,
                height,
                encoder_format: encoder_format.to_string(),
            },
            clock: FrameClock::new(self.base_frame_time),
            file: Arc::clone(&self.file),
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

impl Drop for PvnSink {
    fn drop(&mut self) {
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(error) = file.ensure_header() {
            log::warn!("pvn: failed to write header: {}", error);
        }
        if let Err(error) = file.writer.flush() {
            log::warn!("pvn: failed to flush: {}", error);
        }
    }
}
