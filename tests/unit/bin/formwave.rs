use super::*;
use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("bin_unit").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn tiny_frame(v: u8) -> FrameRgb {
    FrameRgb::from_raw(Size::new(2, 2).unwrap(), vec![v; 12]).unwrap()
}

fn cfg(frames: u64) -> SinkConfig {
    SinkConfig {
        size: Size::new(2, 2).unwrap(),
        frame_count: frames,
        comment: None,
    }
}

#[test]
fn gif_sink_writes_every_frame() {
    let path = out_dir("gif_sink").join("loop.gif");
    let mut sink = GifSink::new(path.clone(), 300);
    sink.begin(cfg(3)).unwrap();
    for i in 0..3u8 {
        sink.push_frame(FrameIndex(u64::from(i)), &tiny_frame(i * 100))
            .unwrap();
    }
    sink.end().unwrap();

    let file = std::io::BufReader::new(File::open(&path).unwrap());
    let frames = GifDecoder::new(file)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 3);
}

#[cfg(target_os = "linux")]
#[test]
fn gif_sink_reports_failed_final_flush() {
    let full = Path::new("/dev/full");
    if std::fs::OpenOptions::new().write(true).open(full).is_err() {
        return;
    }
    let mut sink = GifSink::new(full.to_path_buf(), 100);
    sink.begin(cfg(1)).unwrap();
    sink.push_frame(FrameIndex(0), &tiny_frame(7)).unwrap();
    let err = sink.end().unwrap_err();
    assert!(matches!(err, FormwaveError::Io(_)), "{err:?}");
}

#[test]
fn config_conflicts_with_generation_flags() {
    let base = [
        "formwave", "animate", "--config", "seq.json", "--out", "loop.gif",
    ];
    assert!(Cli::try_parse_from(base).is_ok());

    for extra in [
        ["--width", "64"],
        ["--frames", "8"],
        ["--colorspace", "rgb"],
        ["--generator", "wave"],
    ] {
        let err = Cli::try_parse_from(base.iter().copied().chain(extra)).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict, "{extra:?}");
    }

    let err = Cli::try_parse_from(base.iter().copied().chain(["--log-polar"])).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}
