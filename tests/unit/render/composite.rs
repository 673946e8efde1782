use super::*;
use crate::foundation::core::Size;
use crate::synth::phase::PhaseDirection;
use crate::synth::wave::{WaveAxis, WaveFunction, WaveKind};

fn flat(size: Size, v: u8) -> ChannelBuffer {
    ChannelBuffer::from_raw(size, vec![v; size.pixel_count()]).unwrap()
}

#[test]
fn rgb_channels_interleave() {
    let size = Size::new(3, 2).unwrap();
    let frame = composite(
        Colorspace::Rgb,
        &[flat(size, 10), flat(size, 20), flat(size, 30)],
    )
    .unwrap();
    assert_eq!(frame.size(), size);
    for y in 0..2 {
        for x in 0..3 {
            assert_eq!(frame.get_pixel(x, y), [10, 20, 30]);
        }
    }
    assert!(frame.comment.is_none());
}

#[test]
fn single_channel_replicates_to_gray() {
    let size = Size::new(2, 2).unwrap();
    let ch = ChannelBuffer::from_raw(size, vec![0, 64, 128, 255]).unwrap();
    let frame = composite(Colorspace::L, &[ch]).unwrap();
    assert_eq!(frame.get_pixel(1, 1), [255, 255, 255]);
    assert_eq!(frame.get_pixel(1, 0), [64, 64, 64]);
}

#[test]
fn non_rgb_spaces_are_converted() {
    let size = Size::new(1, 1).unwrap();
    let cmyk = composite(
        Colorspace::Cmyk,
        &[flat(size, 0), flat(size, 0), flat(size, 0), flat(size, 255)],
    )
    .unwrap();
    assert_eq!(cmyk.get_pixel(0, 0), [0, 0, 0]);

    let hsv = composite(
        Colorspace::Hsv,
        &[flat(size, 0), flat(size, 255), flat(size, 255)],
    )
    .unwrap();
    assert_eq!(hsv.get_pixel(0, 0), [255, 0, 0]);
}

#[test]
fn wrong_channel_count_is_rejected() {
    let size = Size::new(2, 2).unwrap();
    let err = composite(Colorspace::Cmyk, &[flat(size, 0), flat(size, 0), flat(size, 0)])
        .unwrap_err();
    assert!(matches!(err, FormwaveError::Configuration(_)));
    assert!(composite(Colorspace::Rgb, &[]).is_err());
}

#[test]
fn mismatched_sizes_are_rejected() {
    let a = flat(Size::new(2, 2).unwrap(), 0);
    let b = flat(Size::new(2, 3).unwrap(), 0);
    assert!(composite(Colorspace::Rgb, &[a.clone(), b, a]).is_err());
}

#[test]
fn provenance_lists_colorspace_then_channels() {
    let w = WaveFunction::new(WaveKind::Sawtooth, WaveAxis::Y, 2).unwrap();
    let specs = vec![
        ChannelSpec::new(w, 0.25),
        ChannelSpec::new(w, 0.5).with_direction(PhaseDirection::Backward),
    ];
    let text = provenance_comment(Colorspace::Rgb, &specs);
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "RGB");
    assert_eq!(lines[1], "c 0: sawtooth(y)/freq=2/phase=0.000/shear=0/0.250/1/linear");
    assert!(lines[2].starts_with("c 1: sawtooth(y)"));
    assert!(lines[2].contains("/-1/"));
}

#[test]
fn truncation_respects_char_boundaries() {
    assert_eq!(truncate_comment("abc", 255), "abc");
    assert_eq!(truncate_comment("abcdef", 4), "abcd");
    assert_eq!(truncate_comment("aé", 2), "a");
}

#[test]
fn channel_with_short_data_is_a_configuration_error() {
    let short = ChannelBuffer {
        width: 4,
        height: 4,
        data: vec![0; 3],
    };
    let err = composite(Colorspace::L, &[short]).unwrap_err();
    assert!(matches!(err, FormwaveError::Configuration(_)));
    assert!(err.to_string().contains("3 bytes"), "{err}");
}
