use {
    crate::{source::buffer_fits, *},
    base::Vec2,
    std::{
        path::Path,
        sync::{
            Mutex,
            atomic::{AtomicBool, Ordering},
        },
    },
};

#[derive(Debug, Clone)]
pub struct FilesConfig {
    /// Path with an optional `%d` / `%0Nd` placeholder for the frame number.
    pub pattern: String,
    /// Number substituted for the first frame.
    pub start: usize,
}

impl FilesConfig {
    pub fn from_uri(uri: &Uri) -> Result<Self, VideoError> {
        if uri.locator.is_empty() {
            return Err(VideoError::Device("files needs a path pattern".to_string()));
        }
        Ok(Self {
            pattern: uri.locator.clone(),
            start: uri.get_uint("start", 0)?,
        })
    }
}

/// Split `pattern` around its `%d` / `%0Nd` placeholder.
///
/// Returns the prefix, the zero-padded width and the suffix, or `None` if the
/// pattern names a single file.
fn split_pattern(pattern: &str) -> Option<(&str, usize, &str)> {
    let percent = pattern.find('%')?;
    let rest = &pattern[percent + 1..];
    let d = rest.find('d')?;
    let digits = &rest[..d];
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let width = digits.parse().unwrap_or(0);
    Some((&pattern[..percent], width, &rest[d + 1..]))
}

/// Path of frame `index` for `pattern`.
pub fn frame_path(pattern: &str, index: usize) -> String {
    match split_pattern(pattern) {
        Some((prefix, width, suffix)) => format!("{prefix}{index:0width$}{suffix}"),
        None => pattern.to_string(),
    }
}

struct DecodedImage {
    size: Vec2<usize>,
    format: &'static PixelFormat,
    data: Vec<u8>,
}

fn load_image(path: &str) -> Result<DecodedImage, VideoError> {
    let decoded = image::open(Path::new(path))?;
    let size = Vec2::new(decoded.width() as usize, decoded.height() as usize);
    let (format, data) = match decoded.color() {
        image::ColorType::L8 => (&GRAY8, decoded.into_luma8().into_raw()),
        _ => (&RGB24, decoded.into_rgb8().into_raw()),
    };
    Ok(DecodedImage { size, format, data })
}

/// Source reading a numbered sequence of image files.
///
/// Geometry and pixel format come from the first image; the stream ends at the
/// first missing or mismatching file.
pub struct FilesVideo {
    config: FilesConfig,
    size: Vec2<usize>,
    format: &'static PixelFormat,
    numbered: bool,
    next_index: Mutex<usize>,
    capturing: AtomicBool,
}

impl FilesVideo {
    pub fn new(config: FilesConfig) -> Result<Self, VideoError> {
        let first = frame_path(&config.pattern, config.start);
        let image = load_image(&first)
            .map_err(|error| VideoError::Device(format!("cannot read {first}: {error}")))?;
        log::info!(
            "files: {}x{} {} starting at {}",
            image.size.x,
            image.size.y,
            image.format,
            first
        );
        Ok(Self {
            numbered: split_pattern(&config.pattern).is_some(),
            next_index: Mutex::new(config.start),
            size: image.size,
            format: image.format,
            config,
            capturing: AtomicBool::new(false),
        })
    }

    fn grab(&self, image: &mut [u8]) -> bool {
        if !self.capturing.load(Ordering::Acquire) || !buffer_fits(image, self.size_bytes()) {
            return false;
        }
        let mut next_index = self.next_index.lock().unwrap_or_else(|e| e.into_inner());
        if !self.numbered && *next_index != self.config.start {
            return false;
        }
        let path = frame_path(&self.config.pattern, *next_index);
        let decoded = match load_image(&path) {
            Ok(decoded) => decoded,
            Err(error) => {
                log::debug!("files: sequence ends at {}: {}", path, error);
                return false;
            }
        };
        if decoded.size != self.size || decoded.format != self.format {
            log::warn!("files: {} does not match the first image, stopping", path);
            return false;
        }
        image[..decoded.data.len()].copy_from_slice(&decoded.data);
        *next_index += 1;
        true
    }
}

impl VideoSource for FilesVideo {
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
        self.capturing.store(true, Ordering::Release);
        Ok(())
    }

    fn stop(&self) {
        self.capturing.store(false, Ordering::Release);
    }

    fn grab_next(&self, image: &mut [u8], _wait: bool) -> bool {
        self.grab(image)
    }

    // files are read on demand, so the next one is also the newest
    fn grab_newest(&self, image: &mut [u8], _wait: bool) -> bool {
        self.grab(image)
    }
}
