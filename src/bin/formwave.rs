use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use rand::Rng;
use tracing_subscriber::EnvFilter;

use formwave::{
    Colorspace, FormwaveError, FormwaveResult, FrameIndex, FrameRgb, FrameSink, GeneratorKind,
    RenderThreading, Sequence, SequenceDoc, SinkConfig, Size, remap_log_polar, seeded_rng,
    truncate_comment,
};

/// Longest provenance text written next to an output image.
const MAX_COMMENT_BYTES: usize = 255;

#[derive(Parser, Debug)]
#[command(name = "formwave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one random frame as a PNG.
    Still(StillArgs),
    /// Render a seamlessly looping animated GIF.
    Animate(AnimateArgs),
    /// Apply the log-polar form-constant remap to an existing image.
    Remap(RemapArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GeneratorArg {
    Wave,
    Expression,
}

impl From<GeneratorArg> for GeneratorKind {
    fn from(g: GeneratorArg) -> Self {
        match g {
            GeneratorArg::Wave => GeneratorKind::Wave,
            GeneratorArg::Expression => GeneratorKind::Expression,
        }
    }
}

#[derive(Args, Debug)]
struct RandomArgs {
    /// Output width in pixels.
    #[arg(long, default_value_t = 256)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 256)]
    height: u32,

    /// RNG seed. Drawn and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Colorspace (L, RGB, HSV, YCbCr, CMYK). Drawn from the multichannel spaces when omitted.
    #[arg(long)]
    colorspace: Option<Colorspace>,

    /// Generator family for every channel.
    #[arg(long, value_enum, default_value_t = GeneratorArg::Expression)]
    generator: GeneratorArg,

    /// Always apply the log-polar remap.
    #[arg(long, conflicts_with = "no_log_polar")]
    log_polar: bool,

    /// Never apply the log-polar remap.
    #[arg(long)]
    no_log_polar: bool,

    /// Write provenance text (truncated to 255 bytes) to this path.
    #[arg(long)]
    provenance: Option<PathBuf>,
}

impl RandomArgs {
    fn size(&self) -> FormwaveResult<Size> {
        Size::new(self.width, self.height)
    }

    fn log_polar_choice(&self) -> Option<bool> {
        match (self.log_polar, self.no_log_polar) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::thread_rng().r#gen())
    }
}

#[derive(Args, Debug)]
struct StillArgs {
    #[command(flatten)]
    random: RandomArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    random: RandomArgs,

    /// Frames per loop.
    #[arg(long, default_value_t = 24)]
    frames: u64,

    /// Loop duration in milliseconds.
    #[arg(long, default_value_t = 2000)]
    duration_ms: u32,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Load the sequence from JSON instead of drawing one. Size, frame count, and generator
    /// flags come from the file and cannot be combined with it.
    #[arg(
        long,
        conflicts_with_all = [
            "width",
            "height",
            "frames",
            "seed",
            "colorspace",
            "generator",
            "log_polar",
            "no_log_polar",
        ]
    )]
    config: Option<PathBuf>,

    /// Save the sequence JSON so the loop can be rendered again.
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Render frames concurrently.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel batch.
    #[arg(long, default_value_t = 16)]
    chunk_size: usize,
}

#[derive(Args, Debug)]
struct RemapArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image. Format follows the extension.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Still(args) => cmd_still(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Remap(args) => cmd_remap(args),
    }
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let seed = args.random.seed();
    tracing::info!(seed, "drawing still");

    let mut rng = seeded_rng(seed);
    let seq = Sequence::random(
        &mut rng,
        args.random.size()?,
        1,
        args.random.colorspace,
        args.random.generator.into(),
        args.random.log_polar_choice(),
    )?;
    let frame = seq.render_frame(FrameIndex(0))?;

    ensure_parent_dir(&args.out)?;
    frame
        .to_rgb_image()?
        .save(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    write_provenance(args.random.provenance.as_deref(), seq.comment())?;

    tracing::info!(path = %args.out.display(), "wrote still");
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let doc = match &args.config {
        Some(path) => SequenceDoc::from_path(path)?,
        None => {
            let seed = args.random.seed();
            tracing::info!(seed, "drawing sequence");
            let mut rng = seeded_rng(seed);
            SequenceDoc::random(
                &mut rng,
                args.random.size()?,
                args.frames,
                args.random.colorspace,
                args.random.generator.into(),
                args.random.log_polar_choice(),
            )?
            .with_seed(seed)
        }
    };

    if let Some(path) = &args.save_config {
        ensure_parent_dir(path)?;
        std::fs::write(path, doc.to_json_string()?)
            .with_context(|| format!("write sequence JSON '{}'", path.display()))?;
    }

    let seq = doc.into_sequence()?;
    let threading = RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
        chunk_size: args.chunk_size,
        ..RenderThreading::default()
    };

    ensure_parent_dir(&args.out)?;
    let mut sink = GifSink::new(args.out.clone(), args.duration_ms);
    let stats = seq.render_into(&mut sink, &threading)?;
    write_provenance(args.random.provenance.as_deref(), seq.comment())?;

    tracing::info!(
        path = %args.out.display(),
        frames = stats.frames_total,
        colorspace = %seq.colorspace(),
        "wrote animation"
    );
    Ok(())
}

fn cmd_remap(args: RemapArgs) -> anyhow::Result<()> {
    let img = image::open(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let source = FrameRgb::from_image(&img)?;

    let started = Instant::now();
    let remapped = remap_log_polar(&source)?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    ensure_parent_dir(&args.out)?;
    remapped
        .to_rgb_image()?
        .save(&args.out)
        .with_context(|| format!("write image '{}'", args.out.display()))?;

    tracing::info!(
        path = %args.out.display(),
        width = remapped.width,
        height = remapped.height,
        elapsed_ms,
        "remapped image"
    );
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_provenance(path: Option<&Path>, comment: &str) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    ensure_parent_dir(path)?;
    std::fs::write(path, truncate_comment(comment, MAX_COMMENT_BYTES))
        .with_context(|| format!("write provenance '{}'", path.display()))
}

/// Looping GIF writer fed frame by frame from [`Sequence::render_into`].
///
/// The encoder writes into an in-memory buffer that is drained to the output file after every
/// frame, so write and flush failures surface as errors instead of being lost on drop.
struct GifSink {
    out_path: PathBuf,
    duration_ms: u32,
    delay: Delay,
    encoder: Option<GifEncoder<SharedBuf>>,
    pending: SharedBuf,
    file: Option<BufWriter<File>>,
}

impl GifSink {
    fn new(out_path: PathBuf, duration_ms: u32) -> Self {
        Self {
            out_path,
            duration_ms,
            delay: Delay::from_numer_denom_ms(duration_ms, 1),
            encoder: None,
            pending: SharedBuf::default(),
            file: None,
        }
    }

    fn drain(&mut self) -> FormwaveResult<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| FormwaveError::render("gif sink used before begin"))?;
        let bytes = self.pending.take()?;
        file.write_all(&bytes)?;
        Ok(())
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> FormwaveResult<()> {
        let frames = u32::try_from(cfg.frame_count.max(1)).map_err(|_| {
            FormwaveError::configuration("GIF output supports at most u32::MAX frames")
        })?;
        self.delay = Delay::from_numer_denom_ms(self.duration_ms, frames);

        self.file = Some(BufWriter::new(File::create(&self.out_path)?));
        let mut encoder = GifEncoder::new_with_speed(self.pending.clone(), 10);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| FormwaveError::render(format!("gif repeat: {e}")))?;
        self.encoder = Some(encoder);

        tracing::debug!(
            path = %self.out_path.display(),
            frames = cfg.frame_count,
            width = cfg.size.width,
            height = cfg.size.height,
            "gif sink opened"
        );
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> FormwaveResult<()> {
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| FormwaveError::render("gif sink used before begin"))?;
        let rgba = image::DynamicImage::ImageRgb8(frame.to_rgb_image()?).to_rgba8();
        encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, self.delay))
            .map_err(|e| FormwaveError::render(format!("gif frame {}: {e}", idx.0)))?;
        self.drain()
    }

    fn end(&mut self) -> FormwaveResult<()> {
        // Dropping the encoder appends the trailer to `pending`.
        drop(self.encoder.take());
        self.drain()?;
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Cloneable in-memory writer shared between the GIF encoder and its sink.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn take(&self) -> std::io::Result<Vec<u8>> {
        let mut buf = self
            .0
            .lock()
            .map_err(|_| std::io::Error::other("gif buffer lock poisoned"))?;
        Ok(std::mem::take(&mut *buf))
    }
}

impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("gif buffer lock poisoned"))?
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bin/formwave.rs"]
mod tests;
