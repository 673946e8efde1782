use rayon::prelude::*;

use crate::foundation::error::{FormwaveError, FormwaveResult};
use crate::render::colorspace::Colorspace;
use crate::render::frame::{ChannelBuffer, FrameRgb};
use crate::synth::channel::ChannelSpec;

/// Merge channel buffers interpreted in `colorspace` into one RGB8 frame.
///
/// Fails when the number of buffers does not match the colorspace, when a buffer's data does not
/// match its dimensions, or when buffers differ in size.
pub fn composite(colorspace: Colorspace, channels: &[ChannelBuffer]) -> FormwaveResult<FrameRgb> {
    if channels.len() != colorspace.channel_count() {
        return Err(FormwaveError::configuration(format!(
            "{} takes {} channels, got {}",
            colorspace,
            colorspace.channel_count(),
            channels.len()
        )));
    }
    let size = channels[0].size();
    for ch in channels {
        ch.validate()?;
    }
    if let Some(bad) = channels.iter().find(|c| c.size() != size) {
        return Err(FormwaveError::configuration(format!(
            "channel size {}x{} differs from {}x{}",
            bad.width, bad.height, size.width, size.height
        )));
    }

    let width = size.width as usize;
    let mut data = vec![0u8; size.pixel_count() * 3];
    data.par_chunks_mut(width * 3)
        .enumerate()
        .for_each(|(y, row)| {
            let mut px = [0u8; 4];
            for (x, out) in row.chunks_exact_mut(3).enumerate() {
                let i = y * width + x;
                for (slot, ch) in px.iter_mut().zip(channels) {
                    *slot = ch.data[i];
                }
                out.copy_from_slice(&colorspace.to_rgb(&px));
            }
        });

    Ok(FrameRgb {
        width: size.width,
        height: size.height,
        data,
        comment: None,
    })
}

/// [`composite`], then attach [`provenance_comment`] for `specs`.
pub fn composite_with_provenance(
    colorspace: Colorspace,
    channels: &[ChannelBuffer],
    specs: &[ChannelSpec],
) -> FormwaveResult<FrameRgb> {
    let frame = composite(colorspace, channels)?;
    Ok(frame.with_comment(provenance_comment(colorspace, specs)))
}

/// Colorspace name on the first line, then `c <i>: <spec>` per channel.
pub fn provenance_comment(colorspace: Colorspace, specs: &[ChannelSpec]) -> String {
    let mut lines = Vec::with_capacity(specs.len() + 1);
    lines.push(colorspace.name().to_owned());
    for (i, spec) in specs.iter().enumerate() {
        lines.push(format!("c {i}: {spec}"));
    }
    lines.join("\n")
}

/// Longest prefix of `text` no longer than `max_bytes` that ends on a char boundary.
pub fn truncate_comment(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
