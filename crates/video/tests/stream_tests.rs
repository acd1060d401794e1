use {futures_util::StreamExt, video::*};

#[tokio::test]
async fn test_stream_yields_all_frames() {
    let input = VideoInput::with_uri("test:[size=4x2,fmt=GRAY8,frames=5]//").unwrap();
    let stream = FrameStream::new(input).unwrap();
    assert_eq!(stream.video().unwrap().size_bytes(), 8);

    let frames: Vec<VideoFrame> = stream.collect().await;
    assert_eq!(frames.len(), 5);
    for (index, frame) in frames.iter().enumerate() {
        assert_eq!(frame.data[0], index as u8);
        assert_eq!(frame.size.x, 4);
        assert_eq!(frame.format.name(), "GRAY8");
    }
}

#[tokio::test]
async fn test_stream_take_and_drop() {
    let input = VideoInput::with_uri("thread://test:[size=2x2]//").unwrap();
    let mut stream = FrameStream::new(input).unwrap();
    for _ in 0..3 {
        let frame = stream.next().await.unwrap();
        assert_eq!(frame.data.len(), 12);
    }
    drop(stream);
}

#[tokio::test]
async fn test_stream_needs_open_input() {
    assert!(matches!(
        FrameStream::new(VideoInput::new()),
        Err(VideoError::NotOpened)
    ));
}
