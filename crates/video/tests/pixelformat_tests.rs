use video::*;

#[test]
fn test_rgb24_descriptor() {
    let format = video_format_from_string("RGB24").unwrap();
    assert_eq!(format.name(), "RGB24");
    assert_eq!(format.channels, 3);
    assert!(!format.planar);
    assert_eq!(format.bytes_per_pixel, 3);
    assert_eq!(format.channel_bits[..3], [8, 8, 8]);
}

#[test]
fn test_unknown_format() {
    match video_format_from_string("not-a-format") {
        Err(VideoError::UnsupportedFormat(token)) => assert_eq!(token, "not-a-format"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert!(video_format_from_string("rgb24").is_err());
    assert!(video_format_from_string(" RGB24").is_err());
}

#[test]
fn test_every_format_round_trips_and_fits() {
    for format in SUPPORTED_PIXEL_FORMATS {
        let found = video_format_from_string(format.name()).unwrap();
        assert_eq!(found.name(), format.name());
        assert!((1..=4).contains(&format.channels));
        assert!(
            format.bytes_per_pixel as u32 * 8 >= format.bits_per_pixel(),
            "{} does not fit its bytes per pixel",
            format
        );
    }
}

#[test]
fn test_planar_flag() {
    assert!(video_format_from_string("YUV422P").unwrap().planar);
    assert!(!video_format_from_string("YUYV422").unwrap().planar);
}

#[test]
fn test_frame_size() {
    assert_eq!(GRAY8.frame_size(640, 480), 307200);
    assert_eq!(RGB24.frame_size(640, 480), 921600);
    assert_eq!(YUYV422.frame_size(640, 480), 614400);
}

#[test]
fn test_display_is_name() {
    assert_eq!(GRAY16LE.to_string(), "GRAY16LE");
}

#[test]
fn test_frame_size_overflow() {
    assert_eq!(RGB24.checked_frame_size(640, 480), Some(921600));
    assert_eq!(RGB24.checked_frame_size(usize::MAX, 2), None);
    assert_eq!(GRAY8.checked_frame_size(usize::MAX, 1), Some(usize::MAX));
    assert_eq!(RGB24.frame_size(usize::MAX, 2), usize::MAX);
}
