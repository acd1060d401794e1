use {
    std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    video::*,
};

#[derive(Default)]
struct Counters {
    constructed: AtomicUsize,
    dropped: AtomicUsize,
    started: AtomicUsize,
    stopped: AtomicUsize,
}

// 2x2 RGB24 source that records its lifecycle
struct CountingVideo {
    counters: Arc<Counters>,
}

impl CountingVideo {
    fn new(counters: Arc<Counters>) -> Self {
        counters.constructed.fetch_add(1, Ordering::SeqCst);
        Self { counters }
    }
}

impl Drop for CountingVideo {
    fn drop(&mut self) {
        self.counters.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

impl VideoSource for CountingVideo {
    fn width(&self) -> usize {
        2
    }

    fn height(&self) -> usize {
        2
    }

    fn pix_format(&self) -> &'static PixelFormat {
        &RGB24
    }

    fn start(&self) -> Result<(), VideoError> {
        self.counters.started.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.counters.stopped.fetch_add(1, Ordering::SeqCst);
    }

    fn grab_next(&self, image: &mut [u8], _wait: bool) -> bool {
        image[..12].copy_from_slice(&[255, 255, 255, 0, 0, 0, 255, 0, 0, 0, 0, 255]);
        true
    }

    fn grab_newest(&self, image: &mut [u8], wait: bool) -> bool {
        self.grab_next(image, wait)
    }
}

fn counting_registry(counters: &Arc<Counters>) -> SourceRegistry {
    let mut registry = SourceRegistry::with_builtin();
    let counters = Arc::clone(counters);
    registry.register_terminal("innerscheme", move |uri| {
        assert_eq!(uri.locator, "/dev/x");
        Ok(Box::new(CountingVideo::new(Arc::clone(&counters))))
    });
    registry
}

#[test]
fn test_unknown_scheme() {
    match open_video("bogus://x") {
        Err(VideoError::UnknownScheme(scheme)) => assert_eq!(scheme, "bogus"),
        Err(other) => panic!("expected UnknownScheme, got {other}"),
        Ok(_) => panic!("bogus scheme opened"),
    }
}

#[test]
fn test_malformed_uri_is_not_wrapped() {
    assert!(matches!(
        open_video("test:[size=1x1"),
        Err(VideoError::MalformedUri { .. })
    ));
}

#[test]
fn test_convert_chain_owns_inner_exactly_once() {
    let counters = Arc::new(Counters::default());
    let registry = counting_registry(&counters);

    let video = registry
        .open("convert:[fmt=GRAY8]//innerscheme:///dev/x")
        .unwrap();
    assert_eq!(video.pix_format().name(), "GRAY8");
    assert_eq!(video.size_bytes(), 4);
    assert_eq!(counters.constructed.load(Ordering::SeqCst), 1);
    assert_eq!(counters.dropped.load(Ordering::SeqCst), 0);

    video.start().unwrap();
    let mut image = [0u8; 4];
    assert!(video.grab_next(&mut image, true));
    assert_eq!(image, [255, 0, 76, 28]);
    video.stop();

    drop(video);
    assert_eq!(counters.constructed.load(Ordering::SeqCst), 1);
    assert_eq!(counters.dropped.load(Ordering::SeqCst), 1);
}

#[test]
fn test_start_stop_propagate_through_chain() {
    let counters = Arc::new(Counters::default());
    let registry = counting_registry(&counters);

    let video = registry
        .open("thread://convert:[fmt=RGB24]//innerscheme:///dev/x")
        .unwrap();
    video.start().unwrap();
    assert_eq!(counters.started.load(Ordering::SeqCst), 1);
    video.stop();
    assert!(counters.stopped.load(Ordering::SeqCst) >= 1);
    drop(video);
    assert_eq!(counters.dropped.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_outer_construction_drops_inner() {
    let counters = Arc::new(Counters::default());
    let registry = counting_registry(&counters);

    // RGB24 cannot be converted to a planar format
    let result = registry.open("convert:[fmt=YUV422P]//innerscheme:///dev/x");
    assert!(result.is_err());
    assert_eq!(counters.constructed.load(Ordering::SeqCst), 1);
    assert_eq!(counters.dropped.load(Ordering::SeqCst), 1);
}

#[test]
fn test_nested_error_names_each_scheme() {
    let error = match open_video("thread://convert:[fmt=GRAY8]//test:[size=abc]//") {
        Err(error) => error,
        Ok(_) => panic!("invalid size accepted"),
    };
    assert_eq!(error.scheme_chain(), vec!["thread", "convert", "test"]);
    assert!(matches!(
        error.root_cause(),
        VideoError::InvalidParameter { key, value } if key == "size" && value == "abc"
    ));
    let message = error.to_string();
    assert!(message.starts_with("thread: convert: test: "));
    assert!(message.contains("abc"));
}

#[test]
fn test_nested_unknown_scheme_is_wrapped() {
    let error = match open_video("convert:[fmt=GRAY8]//nothing://") {
        Err(error) => error,
        Ok(_) => panic!("unknown inner scheme accepted"),
    };
    assert_eq!(error.scheme_chain(), vec!["convert"]);
    assert!(matches!(error.root_cause(), VideoError::UnknownScheme(s) if s == "nothing"));
}

#[test]
fn test_builtin_schemes() {
    let registry = default_source_registry();
    for scheme in ["test", "files", "pvn", "convert", "thread"] {
        assert!(registry.contains(scheme), "missing {scheme}");
    }
    assert!(registry.get("convert").unwrap().is_compositional());
    assert!(!registry.get("test").unwrap().is_compositional());

    let sinks = default_sink_registry();
    assert_eq!(sinks.schemes(), vec!["null", "pvn"]);
}

#[test]
fn test_empty_registry_knows_nothing() {
    let registry = SourceRegistry::new();
    assert!(registry.schemes().is_empty());
    assert!(matches!(
        registry.open("test://"),
        Err(VideoError::UnknownScheme(_))
    ));
}

#[test]
fn test_reregistering_replaces_constructor() {
    let mut registry = SourceRegistry::new();
    registry.register_terminal("test", |_| Err(VideoError::Device("first".to_string())));
    registry.register_terminal("test", |_| Err(VideoError::Device("second".to_string())));
    let error = match registry.open("test://") {
        Err(error) => error,
        Ok(_) => panic!("constructor should fail"),
    };
    assert!(matches!(error.root_cause(), VideoError::Device(msg) if msg == "second"));
}
