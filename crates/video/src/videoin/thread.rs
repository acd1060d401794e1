use {
    crate::{source::buffer_fits, *},
    crossbeam_channel::{Receiver, Sender, bounded, select},
    std::{
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, Ordering},
        },
        thread::{self, JoinHandle},
    },
};

#[derive(Debug, Clone)]
pub struct ThreadConfig {
    /// Frames buffered between the worker and the caller.
    pub buffers: usize,
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self { buffers: 4 }
    }
}

impl ThreadConfig {
    pub fn from_uri(uri: &Uri) -> Result<Self, VideoError> {
        let buffers = uri.get_uint("buffers", Self::default().buffers)?;
        if buffers == 0 {
            return Err(VideoError::InvalidParameter {
                key: "buffers".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(Self { buffers })
    }
}

struct Worker {
    frames: Receiver<Vec<u8>>,
    // never sent on, dropping the sender wakes everything selecting on `stopped`
    stop: Sender<()>,
    stopped: Receiver<()>,
    cancel: Arc<AtomicBool>,
    join_handle: JoinHandle<()>,
}

/// Compositional source that captures from its inner source on a worker thread.
///
/// Frames are queued in a bounded channel; when the queue is full the worker
/// waits for the caller to catch up. `stop` wakes blocked grabs, stops the inner
/// source and joins the worker before returning.
pub struct ThreadVideo {
    inner: Arc<dyn VideoSource>,
    buffers: usize,
    worker: Mutex<Option<Worker>>,
}

impl ThreadVideo {
    pub fn new(inner: Box<dyn VideoSource>, config: ThreadConfig) -> Self {
        Self {
            inner: Arc::from(inner),
            buffers: config.buffers,
            worker: Mutex::new(None),
        }
    }

    fn capture_loop(
        inner: Arc<dyn VideoSource>,
        sender: Sender<Vec<u8>>,
        stopped: Receiver<()>,
        cancel: Arc<AtomicBool>,
    ) {
        log::debug!("thread video: capture loop running");
        while !cancel.load(Ordering::Acquire) {
            let mut frame = vec![0u8; inner.size_bytes()];
            if !inner.grab_next(&mut frame, true) {
                log::debug!("thread video: inner stream ended");
                break;
            }
            select! {
                send(sender, frame) -> result => {
                    if result.is_err() {
                        break;
                    }
                }
                recv(stopped) -> _ => break,
            }
        }
        log::debug!("thread video: capture loop done");
    }

    /// Channels of the running worker, cloned so grabs never hold the worker lock.
    fn channels(&self) -> Option<(Receiver<Vec<u8>>, Receiver<()>)> {
        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        worker
            .as_ref()
            .map(|worker| (worker.frames.clone(), worker.stopped.clone()))
    }

    fn receive(frames: &Receiver<Vec<u8>>, stopped: &Receiver<()>, wait: bool) -> Option<Vec<u8>> {
        if !wait {
            return frames.try_recv().ok();
        }
        select! {
            recv(frames) -> frame => frame.ok(),
            recv(stopped) -> _ => None,
        }
    }

    fn copy_out(frame: &[u8], image: &mut [u8]) -> bool {
        if !buffer_fits(image, frame.len()) {
            return false;
        }
        image[..frame.len()].copy_from_slice(frame);
        true
    }
}

impl VideoSource for ThreadVideo {
    fn width(&self) -> usize {
        self.inner.width()
    }

    fn height(&self) -> usize {
        self.inner.height()
    }

    fn pix_format(&self) -> &'static PixelFormat {
        self.inner.pix_format()
    }

    fn size_bytes(&self) -> usize {
        self.inner.size_bytes()
    }

    fn start(&self) -> Result<(), VideoError> {
        let mut worker = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        if worker.is_some() {
            log::debug!("thread video already capturing");
            return Ok(());
        }

        self.inner.start()?;

        let (sender, frames) = bounded(self.buffers);
        let (stop, stopped) = bounded::<()>(0);
        let cancel = Arc::new(AtomicBool::new(false));
        let join_handle = thread::Builder::new()
            .name("thread-video".to_string())
            .spawn({
                let inner = Arc::clone(&self.inner);
                let stopped = stopped.clone();
                let cancel = Arc::clone(&cancel);
                move || Self::capture_loop(inner, sender, stopped, cancel)
            })
            .map_err(|error| {
                self.inner.stop();
                VideoError::Device(format!("failed to spawn capture thread: {error}"))
            })?;

        *worker = Some(Worker {
            frames,
            stop,
            stopped,
            cancel,
            join_handle,
        });
        Ok(())
    }

    fn stop(&self) {
        let worker = self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();
        let Some(worker) = worker else {
            return;
        };
        worker.cancel.store(true, Ordering::Release);
        drop(worker.stop);
        // the worker may be blocked inside the inner grab
        self.inner.stop();
        if worker.join_handle.join().is_err() {
            log::error!("thread video: capture thread panicked");
        }
    }

    fn grab_next(&self, image: &mut [u8], wait: bool) -> bool {
        let Some((frames, stopped)) = self.channels() else {
            return false;
        };
        match Self::receive(&frames, &stopped, wait) {
            Some(frame) => Self::copy_out(&frame, image),
            None => false,
        }
    }

    fn grab_newest(&self, image: &mut [u8], wait: bool) -> bool {
        let Some((frames, stopped)) = self.channels() else {
            return false;
        };
        let Some(mut newest) = Self::receive(&frames, &stopped, wait) else {
            return false;
        };
        while let Ok(frame) = frames.try_recv() {
            newest = frame;
        }
        Self::copy_out(&newest, image)
    }
}

impl Drop for ThreadVideo {
    fn drop(&mut self) {
        self.stop();
    }
}
