use std::fmt;

#[derive(Debug)]
pub enum VideoError {
    MalformedUri { uri: String, reason: String },
    UnknownScheme(String),
    InvalidParameter { key: String, value: String },
    UnsupportedFormat(String),
    Backend { scheme: String, source: Box<VideoError> },
    Device(String),
    Stream(String),
    IndexOutOfRange { index: usize, count: usize },
    DimensionMismatch { expected: (usize, usize), actual: (usize, usize) },
    NotOpened,
    Io(std::io::Error),
}

impl VideoError {
    /// Wrap an error raised while constructing the backend for `scheme`.
    pub fn backend(scheme: impl Into<String>, source: VideoError) -> Self {
        VideoError::Backend {
            scheme: scheme.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error of a chain of `Backend` wrappers.
    pub fn root_cause(&self) -> &VideoError {
        let mut error = self;
        while let VideoError::Backend { source, .. } = error {
            error = source;
        }
        error
    }

    /// Schemes wrapping the root cause, outermost first.
    pub fn scheme_chain(&self) -> Vec<&str> {
        let mut schemes = Vec::new();
        let mut error = self;
        while let VideoError::Backend { scheme, source } = error {
            schemes.push(scheme.as_str());
            error = source;
        }
        schemes
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::MalformedUri { uri, reason } => {
                write!(f, "malformed uri {uri:?}: {reason}")
            }
            VideoError::UnknownScheme(scheme) => write!(f, "unknown scheme: {scheme}"),
            VideoError::InvalidParameter { key, value } => {
                write!(f, "invalid value {value:?} for parameter {key}")
            }
            VideoError::UnsupportedFormat(format) => {
                write!(f, "unsupported pixel format: {format}")
            }
            VideoError::Backend { scheme, source } => write!(f, "{scheme}: {source}"),
            VideoError::Device(msg) => write!(f, "device error: {msg}"),
            VideoError::Stream(msg) => write!(f, "stream error: {msg}"),
            VideoError::IndexOutOfRange { index, count } => {
                write!(f, "stream index {index} out of range ({count} streams)")
            }
            VideoError::DimensionMismatch { expected, actual } => write!(
                f,
                "image is {}x{}, stream expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            VideoError::NotOpened => write!(f, "video not opened"),
            VideoError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for VideoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VideoError::Backend { source, .. } => Some(source.as_ref()),
            VideoError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VideoError {
    fn from(err: std::io::Error) -> Self {
        VideoError::Io(err)
    }
}

impl From<image::ImageError> for VideoError {
    fn from(err: image::ImageError) -> Self {
        VideoError::Stream(format!("image decode failed: {err}"))
    }
}
