use super::*;

#[test]
fn floor_mod_matches_floored_semantics() {
    assert_eq!(floor_mod(3.5, 2.0), 1.5);
    assert_eq!(floor_mod(-0.5, 2.0), 1.5);
    assert_eq!(floor_mod(4.0, 2.0), 0.0);
    let tiny = floor_mod(-1e-300, 2.0);
    assert!((0.0..2.0).contains(&tiny));
}

#[test]
fn wrap_unit_stays_in_half_open_interval() {
    for p in [-2.75, -1.0, -0.25, 0.0, 0.999, 1.0, 7.25] {
        let w = wrap_unit(p);
        assert!((0.0..1.0).contains(&w), "{p} -> {w}");
    }
    assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-12);
}

#[test]
fn triangle_and_sawtooth_hit_their_extremes() {
    assert_eq!(triangle(0.0), -1.0);
    assert_eq!(triangle(0.5), 0.0);
    assert_eq!(triangle(-0.5), 0.0);
    assert_eq!(triangle(0.25), -0.5);
    assert_eq!(sawtooth(0.0), 0.0);
    assert_eq!(sawtooth(0.25), 0.5);
    assert_eq!(sawtooth(-0.5), -1.0);
}

#[test]
fn unit_to_u8_covers_full_range_and_clamps() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(1.0), 255);
    assert_eq!(unit_to_u8(0.0), 128);
    assert_eq!(unit_to_u8(5.0), 255);
    assert_eq!(unit_to_u8(-5.0), 0);
    assert_eq!(clamp_u8(f64::NAN), 0);
}

#[test]
fn mul_div255_is_rounded_and_exact_at_extremes() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 200), 0);
    assert_eq!(mul_div255_u8(255, 128), 128);
    assert_eq!(mul_div255_u8(128, 128), 64);
}
