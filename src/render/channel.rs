use rayon::prelude::*;

use crate::foundation::core::Size;
use crate::foundation::math::unit_to_u8;
use crate::render::frame::ChannelBuffer;
use crate::synth::generator::Generator;

/// Render one grayscale channel of `size` from `generator` at `phase`.
///
/// Each pixel is normalized to `[-1, 1]²`, sheared by the generator's pre-transform, evaluated,
/// and mapped to `round(v·127.5 + 127.5)`. Rows are rendered in parallel on the current rayon
/// pool; the result does not depend on scheduling.
pub fn render_channel(size: Size, generator: &Generator, phase: f64) -> ChannelBuffer {
    let width = size.width as usize;
    let mut data = vec![0u8; size.pixel_count()];
    let shear = generator.pretransform();

    data.par_chunks_mut(width.max(1))
        .enumerate()
        .for_each(|(py, row)| {
            for (px, out) in row.iter_mut().enumerate() {
                let c = shear.apply(size.normalize(px as u32, py as u32));
                *out = unit_to_u8(generator.evaluate(c, phase));
            }
        });

    ChannelBuffer {
        width: size.width,
        height: size.height,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/channel.rs"]
mod tests;
