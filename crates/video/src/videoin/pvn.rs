use {
    crate::{pvn::*, source::buffer_fits, *},
    std::{
        fs::File,
        io::{BufReader, Read},
        path::PathBuf,
        sync::Mutex,
    },
};

#[derive(Debug, Clone)]
pub struct PvnConfig {
    pub path: PathBuf,
    /// Which recorded stream to play back.
    pub stream: usize,
}

impl PvnConfig {
    pub fn from_uri(uri: &Uri) -> Result<Self, VideoError> {
        Ok(Self {
            path: PathBuf::from(&uri.locator),
            stream: uri.get_uint("stream", 0)?,
        })
    }
}

/// Plays back one stream of a PVN file written by the `pvn` sink.
pub struct PvnVideo {
    config: PvnConfig,
    header: PvnHeader,
    reader: Mutex<Option<BufReader<File>>>,
}

impl PvnVideo {
    pub fn new(config: PvnConfig) -> Result<Self, VideoError> {
        let (header, _) = Self::open_file(&config)?;
        if config.stream >= header.streams.len() {
            return Err(VideoError::IndexOutOfRange {
                index: config.stream,
                count: header.streams.len(),
            });
        }
        log::info!(
            "pvn: {} holds {} streams, playing stream {}",
            config.path.display(),
            header.streams.len(),
            config.stream
        );
        Ok(Self {
            config,
            header,
            reader: Mutex::new(None),
        })
    }

    fn open_file(config: &PvnConfig) -> Result<(PvnHeader, BufReader<File>), VideoError> {
        let mut reader = BufReader::new(File::open(&config.path)?);
        let header = PvnHeader::read_from(&mut reader)?;
        Ok((header, reader))
    }

    fn stream_header(&self) -> &PvnStreamHeader {
        &self.header.streams[self.config.stream]
    }

    /// Advance to the next record of the selected stream and read it into `image`.
    fn read_next(&self, reader: &mut BufReader<File>, image: &mut [u8]) -> Result<bool, VideoError> {
        while let Some((stream, _time)) = read_record_prefix(reader)? {
            let Some(stream_header) = self.header.streams.get(stream) else {
                return Err(VideoError::Stream(format!("record for unknown stream {stream}")));
            };
            let size = stream_header.frame_size();
            if stream == self.config.stream {
                reader.read_exact(&mut image[..size])?;
                return Ok(true);
            }
            reader.seek_relative(size as i64)?;
        }
        Ok(false)
    }
}

impl VideoSource for PvnVideo {
    fn width(&self) -> usize {
        self.stream_header().width
    }

    fn height(&self) -> usize {
        self.stream_header().height
    }

    fn pix_format(&self) -> &'static PixelFormat {
        self.stream_header().format
    }

    fn start(&self) -> Result<(), VideoError> {
        let mut reader = self.reader.lock().unwrap_or_else(|e| e.into_inner());
        if reader.is_none() {
            let (_, file) = Self::open_file(&self.config)?;
            *reader = Some(file);
        }
        Ok(())
    }

    fn stop(&self) {
        self.reader.lock().unwrap_or_else(|e| e.into_inner()).take();
    }

    fn grab_next(&self, image: &mut [u8], _wait: bool) -> bool {
        if !buffer_fits(image, self.size_bytes()) {
            return false;
        }
        let mut reader = self.reader.lock().unwrap_or_else(|e| e.into_inner());
        let Some(reader) = reader.as_mut() else {
            return false;
        };
        match self.read_next(reader, image) {
            Ok(read) => read,
            Err(error) => {
                log::warn!("pvn: {}", error);
                false
            }
        }
    }

    // a file has no notion of a live edge, playback stays sequential
    fn grab_newest(&self, image: &mut [u8], wait: bool) -> bool {
        self.grab_next(image, wait)
    }
}
