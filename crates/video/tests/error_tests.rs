use {std::error::Error, video::*};

#[test]
fn test_backend_display_prefixes_scheme() {
    let error = VideoError::backend(
        "thread",
        VideoError::backend("v4l", VideoError::Device("busy".to_string())),
    );
    assert_eq!(error.to_string(), "thread: v4l: device error: busy");
    assert_eq!(error.scheme_chain(), vec!["thread", "v4l"]);
    assert!(matches!(error.root_cause(), VideoError::Device(msg) if msg == "busy"));
}

#[test]
fn test_source_chain() {
    let error = VideoError::backend("pvn", VideoError::NotOpened);
    let source = error.source().unwrap();
    assert_eq!(source.to_string(), "video not opened");
    assert!(source.source().is_none());
}

#[test]
fn test_unwrapped_error_is_its_own_root() {
    let error = VideoError::UnknownScheme("bogus".to_string());
    assert!(error.scheme_chain().is_empty());
    assert!(matches!(error.root_cause(), VideoError::UnknownScheme(_)));
    assert_eq!(error.to_string(), "unknown scheme: bogus");
}

#[test]
fn test_io_conversion() {
    let error: VideoError =
        std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();
    assert!(matches!(error, VideoError::Io(_)));
    assert!(error.source().is_some());
    assert!(error.to_string().contains("no such file"));
}

#[test]
fn test_messages_name_the_details() {
    let error = VideoError::IndexOutOfRange { index: 3, count: 1 };
    assert_eq!(error.to_string(), "stream index 3 out of range (1 streams)");
    let error = VideoError::DimensionMismatch {
        expected: (640, 480),
        actual: (320, 240),
    };
    assert_eq!(error.to_string(), "image is 320x240, stream expects 640x480");
    let error = VideoError::InvalidParameter {
        key: "size".to_string(),
        value: "big".to_string(),
    };
    assert_eq!(error.to_string(), "invalid value \"big\" for parameter size");
}
