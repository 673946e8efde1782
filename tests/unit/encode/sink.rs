use super::*;

fn cfg(frames: u64) -> SinkConfig {
    SinkConfig {
        size: Size::new(2, 2).unwrap(),
        frame_count: frames,
        comment: Some("RGB".to_string()),
    }
}

#[test]
fn in_memory_sink_records_lifecycle() {
    let mut sink = InMemorySink::new();
    assert!(sink.config().is_none());

    sink.begin(cfg(2)).unwrap();
    let frame = FrameRgb::black(Size::new(2, 2).unwrap());
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    assert!(!sink.is_finished());
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config().unwrap().frame_count, 2);
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.into_frames(), vec![frame.clone(), frame]);
}

#[test]
fn begin_resets_previous_run() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(1)).unwrap();
    sink.push_frame(FrameIndex(0), &FrameRgb::black(Size::new(2, 2).unwrap()))
        .unwrap();
    sink.end().unwrap();

    sink.begin(cfg(3)).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_finished());
}
