use video::{pixelconvert::*, *};

#[test]
fn test_gray_from_test_pattern() {
    let video = open_video("convert:[fmt=GRAY8]//test:[size=4x2]//").unwrap();
    assert_eq!(video.pix_format().name(), "GRAY8");
    assert_eq!(video.size_bytes(), 8);
    video.start().unwrap();
    let mut image = [0u8; 8];
    assert!(video.grab_next(&mut image, false));
    // RGB pixel (v, v + 64, v + 128) has luma v + 52
    assert_eq!(image, [52, 53, 54, 55, 53, 54, 55, 56]);
}

#[test]
fn test_rgb_to_bgr_swaps_channels() {
    let video = open_video("convert:[fmt=BGR24]//test:[size=1x1]//").unwrap();
    video.start().unwrap();
    let mut image = [0u8; 3];
    assert!(video.grab_next(&mut image, false));
    assert_eq!(image, [128, 64, 0]);
}

#[test]
fn test_convert_defaults_to_rgb() {
    let video = open_video("convert://test:[size=2x1,fmt=BGRA32]//").unwrap();
    assert_eq!(video.pix_format().name(), "RGB24");
    video.start().unwrap();
    let mut image = [0u8; 6];
    assert!(video.grab_newest(&mut image, false));
    // BGRA bytes (0, 64, 128, 192) decode as r = 128, g = 64, b = 0
    assert_eq!(image[..3], [128, 64, 0]);
}

#[test]
fn test_convert_requires_start() {
    let video = open_video("convert:[fmt=GRAY8]//test:[size=2x2]//").unwrap();
    let mut image = [0u8; 4];
    assert!(!video.grab_next(&mut image, false));
}

#[test]
fn test_unsupported_conversion_rejected() {
    let error = match open_video("convert:[fmt=YUYV422]//test://") {
        Err(error) => error,
        Ok(_) => panic!("conversion to YUYV422 accepted"),
    };
    assert_eq!(error.scheme_chain(), vec!["convert"]);
    assert!(matches!(error.root_cause(), VideoError::UnsupportedFormat(_)));
}

#[test]
fn test_unknown_target_format_rejected() {
    let error = match open_video("convert:[fmt=RGB565]//test://") {
        Err(error) => error,
        Ok(_) => panic!("unknown format accepted"),
    };
    assert!(matches!(
        error.root_cause(),
        VideoError::InvalidParameter { key, value } if key == "fmt" && value == "RGB565"
    ));
}

#[test]
fn test_can_convert() {
    assert!(can_convert(&YUYV422, &RGB24));
    assert!(can_convert(&UYVY422, &GRAY8));
    assert!(can_convert(&YUV422P, &YUV422P));
    assert!(!can_convert(&RGB24, &YUYV422));
    assert!(!can_convert(&YUV422P, &RGB24));
    assert!(!can_convert(&GRAY16LE, &GRAY8));
}

#[test]
fn test_neutral_yuyv_is_grey() {
    let src = [128u8; 8];
    let mut dst = [0u8; 12];
    convert_image(&YUYV422, &src, &RGB24, &mut dst, 4, 1).unwrap();
    assert_eq!(dst, [128u8; 12]);
}

#[test]
fn test_uyvy_luma_order() {
    // U Y0 V Y1 with neutral chroma
    let src = [128u8, 10, 128, 200];
    let mut dst = [0u8; 2];
    convert_image(&UYVY422, &src, &GRAY8, &mut dst, 2, 1).unwrap();
    assert_eq!(dst, [10, 200]);
}

#[test]
fn test_gray_expands_to_rgba() {
    let src = [7u8, 250];
    let mut dst = [0u8; 8];
    convert_image(&GRAY8, &src, &RGBA32, &mut dst, 2, 1).unwrap();
    assert_eq!(dst, [7, 7, 7, 255, 250, 250, 250, 255]);
}

#[test]
fn test_identical_formats_copy() {
    let src = [1u8, 2, 3, 4];
    let mut dst = [0u8; 4];
    convert_image(&YUV422P, &src, &YUV422P, &mut dst, 2, 1).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn test_short_buffers_rejected() {
    let src = [0u8; 5];
    let mut dst = [0u8; 2];
    assert!(matches!(
        convert_image(&RGB24, &src, &GRAY8, &mut dst, 2, 1),
        Err(VideoError::Stream(_))
    ));
}

#[test]
fn test_odd_width_yuyv_decodes_last_pixel() {
    // Y0 U Y1 V, then the lone Y2 U of the third pixel
    let src = [10u8, 128, 20, 128, 30, 128];
    let mut dst = [0u8; 9];
    convert_image(&YUYV422, &src, &RGB24, &mut dst, 3, 1).unwrap();
    assert_eq!(dst, [10, 10, 10, 20, 20, 20, 30, 30, 30]);
}

#[test]
fn test_odd_width_uyvy_decodes_last_pixel() {
    let src = [128u8, 40, 128, 50, 128, 60];
    let mut dst = [0u8; 3];
    convert_image(&UYVY422, &src, &GRAY8, &mut dst, 3, 1).unwrap();
    assert_eq!(dst, [40, 50, 60]);
}
