use {
    crate::{
        source::{buffer_fits, poll_grab},
        *,
    },
    base::Vec2,
    std::{
        io::ErrorKind,
        sync::{
            Mutex,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    },
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::CaptureStream, video::Capture,
    },
};

const DEFAULT_DEVICE: &str = "/dev/video0";

// how long one driver poll may block before the capture flag is checked again
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct V4l2Config {
    pub path: String,
    pub size: Option<Vec2<usize>>,
    pub format: Option<&'static PixelFormat>,
    pub frame_rate: Option<f32>,
    pub buffers: u32,
}

impl V4l2Config {
    pub fn from_uri(uri: &Uri) -> Result<Self, VideoError> {
        let path = if uri.locator.is_empty() {
            DEFAULT_DEVICE.to_string()
        } else {
            uri.locator.clone()
        };
        let size = match uri.contains("size") {
            true => Some(uri.get_size("size", Vec2::default())?),
            false => None,
        };
        let format = match uri.contains("fmt") {
            true => Some(uri.get_format("fmt", &YUYV422)?),
            false => None,
        };
        let frame_rate = match uri.contains("fps") {
            true => Some(uri.get_float("fps", 0.0)? as f32),
            false => None,
        };
        Ok(Self {
            path,
            size,
            format,
            frame_rate,
            buffers: uri.get_uint("buffers", 4)? as u32,
        })
    }
}

fn fourcc_for(format: &PixelFormat) -> Result<FourCC, VideoError> {
    let code = match format.name() {
        "YUYV422" => b"YUYV",
        "UYVY422" => b"UYVY",
        "RGB24" => b"RGB3",
        "BGR24" => b"BGR3",
        "GRAY8" => b"GREY",
        _ => return Err(VideoError::UnsupportedFormat(format.name().to_string())),
    };
    Ok(FourCC::new(code))
}

fn format_for(fourcc: &FourCC) -> Result<&'static PixelFormat, VideoError> {
    match &fourcc.repr {
        b"YUYV" => Ok(&YUYV422),
        b"UYVY" => Ok(&UYVY422),
        b"RGB3" => Ok(&RGB24),
        b"BGR3" => Ok(&BGR24),
        b"GREY" => Ok(&GRAY8),
        _ => Err(VideoError::UnsupportedFormat(fourcc.to_string())),
    }
}

/// Video4Linux capture device.
///
/// Blocking grabs poll the driver in short intervals so that `stop` from another
/// thread ends them promptly.
pub struct V4l2Video {
    device: Device,
    buffers: u32,
    size: Vec2<usize>,
    format: &'static PixelFormat,
    frame_rate: f32,
    stream: Mutex<Option<MmapStream<'static>>>,
    capturing: AtomicBool,
}

impl V4l2Video {
    pub fn new(config: V4l2Config) -> Result<Self, VideoError> {
        let device = Device::with_path(&config.path)?;
        let device_format = Capture::format(&device)?;

        let desired_size = config.size.unwrap_or(Vec2::new(
            device_format.width as usize,
            device_format.height as usize,
        ));
        let desired_fourcc = match config.format {
            Some(format) => fourcc_for(format)?,
            None => device_format.fourcc,
        };

        // set the format and get the actual format back
        let actual_format = Capture::set_format(
            &device,
            &Format::new(desired_size.x as u32, desired_size.y as u32, desired_fourcc),
        )?;
        let size = Vec2::new(actual_format.width as usize, actual_format.height as usize);
        let format = format_for(&actual_format.fourcc)?;

        let desired_frame_rate = match config.frame_rate {
            Some(frame_rate) => frame_rate,
            None => {
                let params = Capture::params(&device)?;
                params.interval.denominator as f32 / params.interval.numerator as f32
            }
        };
        let actual_params = Capture::set_params(
            &device,
            &v4l::video::capture::Parameters::with_fps(desired_frame_rate as u32),
        )?;
        let frame_rate =
            actual_params.interval.denominator as f32 / actual_params.interval.numerator as f32;

        log::info!(
            "v4l: {} at {}x{} {} {} fps",
            config.path,
            size.x,
            size.y,
            format,
            frame_rate
        );

        Ok(Self {
            device,
            buffers: config.buffers,
            size,
            format,
            frame_rate,
            stream: Mutex::new(None),
            capturing: AtomicBool::new(false),
        })
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }
}

impl VideoSource for V4l2Video {
    fn width(&self) -> usize {
        self.size.x
    }

    fn height(&self) -> usize {
        self.size.y
    }

    fn pix_format(&self) -> &'static PixelFormat {
        self.format
    }

    fn start(&self) -> Result<(), VideoError> {
        let mut stream = self.stream.lock().unwrap_or_else(|e| e.into_inner());
        if stream.is_none() {
            let mmap = MmapStream::with_buffers(&self.device, Type::VideoCapture, self.buffers)
                .map_err(|error| VideoError::Stream(error.to_string()))?;
            *stream = Some(mmap);
        }
        self.capturing.store(true, Ordering::Release);
        Ok(())
    }

    fn stop(&self) {
        // a blocked grab notices within one poll interval and releases the stream
        self.capturing.store(false, Ordering::Release);
        self.stream.lock().unwrap_or_else(|e| e.into_inner()).take();
    }

    fn grab_next(&self, image: &mut [u8], wait: bool) -> bool {
        if !buffer_fits(image, self.size_bytes()) {
            return false;
        }
        poll_grab(&self.capturing, wait, POLL_INTERVAL, |timeout| {
            let mut stream = self.stream.lock().unwrap_or_else(|e| e.into_inner());
            let Some(stream) = stream.as_mut() else {
                return Some(false);
            };
            stream.set_timeout(timeout);
            match CaptureStream::next(stream) {
                Ok((data, _metadata)) => {
                    let size = self.size_bytes().min(data.len());
                    image[..size].copy_from_slice(&data[..size]);
                    Some(size == self.size_bytes())
                }
                Err(error) if error.kind() == ErrorKind::TimedOut => None,
                Err(error) => {
                    log::warn!("v4l: capture failed: {}", error);
                    Some(false)
                }
            }
        })
    }

    // the driver queue is drained in order, so the next buffer is the newest one handed out
    fn grab_newest(&self, image: &mut [u8], wait: bool) -> bool {
        self.grab_next(image, wait)
    }
}
