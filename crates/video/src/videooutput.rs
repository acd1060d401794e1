use crate::*;

/// Owns one recording sink opened from a URI.
#[derive(Default)]
pub struct VideoOutput {
    uri: Option<String>,
    recorder: Option<Box<dyn RecordingSink>>,
}

impl VideoOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uri(uri: &str) -> Result<Self, VideoError> {
        let mut output = Self::new();
        output.open(uri)?;
        Ok(output)
    }

    pub fn open(&mut self, uri: &str) -> Result<(), VideoError> {
        self.open_with(default_sink_registry(), uri)
    }

    pub fn open_with(&mut self, registry: &SinkRegistry, uri: &str) -> Result<(), VideoError> {
        self.reset();
        self.recorder = Some(registry.open(uri)?);
        self.uri = Some(uri.to_string());
        log::info!("recording to {}", uri);
        Ok(())
    }

    /// Drop the sink, flushing whatever it buffered. Never fails.
    pub fn reset(&mut self) {
        self.recorder = None;
        self.uri = None;
    }

    pub fn is_open(&self) -> bool {
        self.recorder.is_some()
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    fn recorder(&mut self) -> Result<&mut dyn RecordingSink, VideoError> {
        match self.recorder.as_mut() {
            Some(recorder) => Ok(recorder.as_mut()),
            None => Err(VideoError::NotOpened),
        }
    }

    pub fn add_stream(
        &mut self,
        width: usize,
        height: usize,
        encoder_format: &str,
    ) -> Result<usize, VideoError> {
        self.recorder()?.add_stream(width, height, encoder_format)
    }

    pub fn stream_count(&self) -> Result<usize, VideoError> {
        self.recorder
            .as_ref()
            .map(|recorder| recorder.stream_count())
            .ok_or(VideoError::NotOpened)
    }

    pub fn stream(&mut self, index: usize) -> Result<&mut dyn StreamWriter, VideoError> {
        self.recorder()?.stream(index)
    }
}
