use super::*;
use crate::foundation::core::Coord;
use crate::synth::expr::build_expression;
use crate::synth::wave::{WaveAxis, WaveFunction, WaveKind};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn sin_x(freq: u32) -> Generator {
    Generator::Wave(WaveFunction::new(WaveKind::Sin, WaveAxis::X, freq).unwrap())
}

#[test]
fn top_left_pixel_of_unsheared_sine_is_black() {
    let size = Size::new(4, 4).unwrap();
    let buf = render_channel(size, &sin_x(1), 0.0);
    assert_eq!(buf.size(), size);
    assert_eq!(buf.data.len(), 16);
    assert_eq!(buf.get_pixel(0, 0), 0);
}

#[test]
fn x_wave_is_constant_down_each_column() {
    let size = Size::new(8, 6).unwrap();
    let buf = render_channel(size, &sin_x(2), 0.3);
    for x in 0..8 {
        let top = buf.get_pixel(x, 0);
        for y in 1..6 {
            assert_eq!(buf.get_pixel(x, y), top);
        }
    }
}

#[test]
fn pixels_match_direct_evaluation() {
    let size = Size::new(9, 5).unwrap();
    let wave = WaveFunction::new(WaveKind::Triangle, WaveAxis::Y, 3)
        .unwrap()
        .with_shear(-2)
        .with_phase(0.1);
    let generator = Generator::Wave(wave);
    let buf = render_channel(size, &generator, 0.45);
    for y in 0..5 {
        for x in 0..9 {
            let c = wave.pretransform().apply(size.normalize(x, y));
            let expected = unit_to_u8(wave.evaluate(c, 0.45));
            assert_eq!(buf.get_pixel(x, y), expected, "({x},{y})");
        }
    }
}

#[test]
fn rendering_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(17);
    let generator = Generator::Expression(build_expression(&mut rng, 0.98));
    let size = Size::new(16, 12).unwrap();
    let a = render_channel(size, &generator, 0.2);
    let b = render_channel(size, &generator, 0.2);
    assert_eq!(a, b);
}

#[test]
fn generator_sample_applies_pretransform() {
    let wave = WaveFunction::new(WaveKind::Cos, WaveAxis::X, 1)
        .unwrap()
        .with_shear(1);
    let generator = Generator::Wave(wave);
    let c = Coord::new(0.25, 0.5);
    assert_eq!(
        generator.sample(c, 0.0),
        wave.evaluate(Coord::new(0.75, 0.5), 0.0)
    );
}
