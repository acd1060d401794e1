use {
    crate::*,
    futures_core::Stream,
    std::{
        pin::Pin,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        task::{Context, Poll},
    },
    tokio::{sync::mpsc, task::JoinHandle},
};

// capacity of the frame channel
const CHANNEL_CAPACITY: usize = 4;

/// Async adapter yielding the frames of a [`VideoInput`].
///
/// Capture runs on a tokio blocking task that keeps calling `grab_next` with
/// `wait` set. The stream ends when the source runs out of frames. Dropping the
/// stream stops the source.
///
/// # Panics
///
/// `new()` panics if called outside a tokio runtime context.
pub struct FrameStream {
    input: Arc<VideoInput>,
    cancel: Arc<AtomicBool>,
    receiver: mpsc::Receiver<VideoFrame>,
    task_handle: Option<JoinHandle<()>>,
}

impl FrameStream {
    /// Start `input` and begin streaming its frames.
    pub fn new(input: VideoInput) -> Result<Self, VideoError> {
        input.start()?;
        let input = Arc::new(input);
        let cancel = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);

        let task_handle = tokio::task::spawn_blocking({
            let input = Arc::clone(&input);
            let cancel = Arc::clone(&cancel);
            move || Self::capture_loop(&input, sender, &cancel)
        });

        Ok(Self {
            input,
            cancel,
            receiver,
            task_handle: Some(task_handle),
        })
    }

    fn capture_loop(input: &VideoInput, sender: mpsc::Sender<VideoFrame>, cancel: &AtomicBool) {
        while !cancel.load(Ordering::Acquire) {
            let frame = match input.grab_frame(true) {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    log::debug!("frame stream: source ended");
                    break;
                }
                Err(error) => {
                    log::error!("frame stream: {}", error);
                    break;
                }
            };
            if sender.blocking_send(frame).is_err() {
                // receiver dropped
                break;
            }
        }
    }

    /// Geometry of the frames this stream yields.
    pub fn video(&self) -> Result<&dyn VideoSource, VideoError> {
        self.input.video()
    }
}

impl Stream for FrameStream {
    type Item = VideoFrame;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl Drop for FrameStream {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Release);
        // wakes the capture task if it is blocked in a grab
        if let Err(error) = self.input.stop() {
            log::debug!("frame stream: {}", error);
        }
        self.receiver.close();
        drop(self.task_handle.take());
    }
}
