use {
    crate::*,
    std::{
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    },
};

/// A capture backend.
///
/// Sources start out stopped. `start` acquires whatever the backend needs to
/// produce frames and `stop` releases it again; `stop` is idempotent and may be
/// called from another thread while a grab is blocked, which makes that grab
/// return `false`.
///
/// Calling `start` on a source that is already capturing does nothing and
/// succeeds. Grabbing from a stopped source returns `false` immediately, even
/// with `wait` set.
///
/// Only one grab may be in flight at a time; callers serialize grabs themselves.
pub trait VideoSource: Send + Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn pix_format(&self) -> &'static PixelFormat;

    /// Bytes copied by every successful grab.
    fn size_bytes(&self) -> usize {
        self.pix_format().frame_size(self.width(), self.height())
    }

    fn start(&self) -> Result<(), VideoError>;
    fn stop(&self);

    /// Copy the next frame not yet returned into `image`, oldest first.
    ///
    /// With `wait` the call blocks until a frame arrives, the stream ends or the
    /// source is stopped. Returns `true` iff a whole frame was copied.
    fn grab_next(&self, image: &mut [u8], wait: bool) -> bool;

    /// Copy the most recent frame into `image`, discarding older buffered frames.
    fn grab_newest(&self, image: &mut [u8], wait: bool) -> bool;
}

/// Check that a caller buffer can hold a frame, logging when it cannot.
pub(crate) fn buffer_fits(image: &[u8], size_bytes: usize) -> bool {
    if image.len() < size_bytes {
        log::warn!(
            "grab buffer holds {} bytes, frame needs {}",
            image.len(),
            size_bytes
        );
        return false;
    }
    true
}

/// Drive a driver-level grab that can time out until it yields a result.
///
/// `attempt` receives the timeout to wait for and returns `None` when it
/// expired. With `wait` the attempt is retried every `interval` until a frame
/// arrives or `capturing` is cleared; without it a single zero-timeout attempt
/// is made. Clearing `capturing` from another thread therefore ends a blocked
/// grab within one interval.
#[cfg_attr(not(feature = "v4l2"), allow(dead_code))]
pub(crate) fn poll_grab(
    capturing: &AtomicBool,
    wait: bool,
    interval: Duration,
    mut attempt: impl FnMut(Duration) -> Option<bool>,
) -> bool {
    loop {
        if !capturing.load(Ordering::Acquire) {
            return false;
        }
        let timeout = if wait { interval } else { Duration::ZERO };
        match attempt(timeout) {
            Some(grabbed) => return grabbed,
            None if wait => continue,
            None => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::{
            sync::Arc,
            thread,
            time::{Duration, Instant},
        },
    };

    #[test]
    fn test_poll_grab_without_wait_tries_once() {
        let capturing = AtomicBool::new(true);
        let mut timeouts = Vec::new();
        let grabbed = poll_grab(&capturing, false, Duration::from_millis(50), |timeout| {
            timeouts.push(timeout);
            None
        });
        assert!(!grabbed);
        assert_eq!(timeouts, vec![Duration::ZERO]);
    }

    #[test]
    fn test_poll_grab_retries_until_frame() {
        let capturing = AtomicBool::new(true);
        let mut attempts = 0;
        let grabbed = poll_grab(&capturing, true, Duration::from_millis(1), |_| {
            attempts += 1;
            (attempts == 3).then_some(true)
        });
        assert!(grabbed);
        assert_eq!(attempts, 3);
    }

    #[test]
    fn test_poll_grab_ends_when_capture_stops() {
        let capturing = Arc::new(AtomicBool::new(true));
        let stopper = thread::spawn({
            let capturing = Arc::clone(&capturing);
            move || {
                thread::sleep(Duration::from_millis(50));
                capturing.store(false, Ordering::Release);
            }
        });
        let started = Instant::now();
        let grabbed = poll_grab(&capturing, true, Duration::from_millis(10), |timeout| {
            thread::sleep(timeout);
            None
        });
        assert!(!grabbed);
        assert!(started.elapsed() < Duration::from_secs(2));
        stopper.join().unwrap();
    }

    #[test]
    fn test_poll_grab_stopped_source_returns_at_once() {
        let capturing = AtomicBool::new(false);
        assert!(!poll_grab(&capturing, true, Duration::from_secs(10), |_| Some(true)));
    }
}
