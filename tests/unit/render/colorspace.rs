use super::*;

#[test]
fn names_parse_case_insensitively() {
    assert_eq!("rgb".parse::<Colorspace>().unwrap(), Colorspace::Rgb);
    assert_eq!("YCbCr".parse::<Colorspace>().unwrap(), Colorspace::YCbCr);
    assert_eq!("CMYK".parse::<Colorspace>().unwrap(), Colorspace::Cmyk);
    for c in Colorspace::MULTICHANNEL {
        assert_eq!(c.name().parse::<Colorspace>().unwrap(), c);
    }
}

#[test]
fn unknown_names_are_configuration_errors() {
    let err = "LAB".parse::<Colorspace>().unwrap_err();
    assert!(matches!(err, FormwaveError::Configuration(_)));
    assert!(err.to_string().contains("LAB"));
}

#[test]
fn channel_counts() {
    assert_eq!(Colorspace::L.channel_count(), 1);
    assert_eq!(Colorspace::Hsv.channel_count(), 3);
    assert_eq!(Colorspace::Cmyk.channel_count(), 4);
}

#[test]
fn hsv_primaries() {
    assert_eq!(Colorspace::Hsv.to_rgb(&[0, 255, 255]), [255, 0, 0]);
    assert_eq!(Colorspace::Hsv.to_rgb(&[85, 255, 255]), [0, 255, 0]);
    assert_eq!(Colorspace::Hsv.to_rgb(&[170, 255, 255]), [0, 0, 255]);
    assert_eq!(Colorspace::Hsv.to_rgb(&[40, 0, 77]), [77, 77, 77]);
    assert_eq!(Colorspace::Hsv.to_rgb(&[255, 255, 255]), [255, 0, 0]);
}

#[test]
fn ycbcr_neutral_chroma_is_gray() {
    assert_eq!(Colorspace::YCbCr.to_rgb(&[90, 128, 128]), [90, 90, 90]);
    let [r, g, b] = Colorspace::YCbCr.to_rgb(&[128, 128, 255]);
    assert_eq!(r, 255);
    assert!(g < 128);
    assert_eq!(b, 128);
}

#[test]
fn cmyk_extremes() {
    assert_eq!(Colorspace::Cmyk.to_rgb(&[0, 0, 0, 0]), [255, 255, 255]);
    assert_eq!(Colorspace::Cmyk.to_rgb(&[0, 0, 0, 255]), [0, 0, 0]);
    assert_eq!(Colorspace::Cmyk.to_rgb(&[255, 0, 255, 0]), [0, 255, 0]);
}

#[test]
fn serde_uses_canonical_names() {
    let json = serde_json::to_string(&Colorspace::YCbCr).unwrap();
    assert_eq!(json, "\"YCbCr\"");
    let parsed: Colorspace = serde_json::from_str("\"hsv\"").unwrap();
    assert_eq!(parsed, Colorspace::Hsv);
    assert!(serde_json::from_str::<Colorspace>("\"LAB\"").is_err());
}
