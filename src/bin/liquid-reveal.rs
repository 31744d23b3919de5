use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use liquid_reveal::{
    BlobRing, Canvas, FrameRGBA, PerturbationTrigger, RevealConfig, RevealFrame, Rng64, SourceImage,
    Stimulus,
};

#[derive(Parser, Debug)]
#[command(name = "liquid-reveal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the reveal after a number of ticks as a PNG.
    Frame(FrameArgs),
    /// Render one PNG per tick into a directory.
    Sequence(SequenceArgs),
    /// Print the blob outline as SVG path data.
    Path(PathArgs),
}

#[derive(Args, Debug)]
struct AnimArgs {
    /// Config JSON (ring shape, scroll behaviour, seed).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Surface width; defaults to the image width.
    #[arg(long)]
    width: Option<u32>,

    /// Surface height; defaults to the image height.
    #[arg(long)]
    height: Option<u32>,

    /// Tick (1-based) before which a scroll stimulus is delivered. Repeatable.
    #[arg(long = "scroll-at")]
    scroll_at: Vec<u64>,

    /// Draw a red dot at every oscillator.
    #[arg(long)]
    helpers: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Ticks to advance before rendering.
    #[arg(long, default_value_t = 60)]
    ticks: u64,

    #[command(flatten)]
    anim: AnimArgs,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames to write.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    #[command(flatten)]
    anim: AnimArgs,
}

#[derive(Args, Debug)]
struct PathArgs {
    /// Ticks to advance before printing.
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    #[command(flatten)]
    anim: AnimArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Path(args) => cmd_path(args),
    }
}

fn load_config(anim: &AnimArgs) -> anyhow::Result<RevealConfig> {
    let mut cfg = match &anim.config {
        Some(path) => RevealConfig::from_path(path)?,
        None => RevealConfig::default(),
    };
    if let Some(seed) = anim.seed {
        cfg.seed = seed;
    }
    cfg.show_helpers |= anim.helpers;
    Ok(cfg)
}

fn surface(anim: &AnimArgs, natural: Option<Canvas>) -> anyhow::Result<Canvas> {
    let width = anim.width.or(natural.map(|c| c.width));
    let height = anim.height.or(natural.map(|c| c.height));
    match (width, height) {
        (Some(w), Some(h)) => Ok(Canvas::new(w, h)?),
        _ => anyhow::bail!("--width and --height are required without an image"),
    }
}

fn open_frame(image_path: &Path, anim: &AnimArgs) -> anyhow::Result<RevealFrame> {
    let cfg = load_config(anim)?;
    let image = SourceImage::open(image_path)?;
    let canvas = surface(anim, Some(image.canvas()?))?;
    let mut frame = RevealFrame::seeded(canvas, cfg)?;
    frame.set_image(image);
    Ok(frame)
}

/// Delivers scroll stimuli scheduled before tick `next_tick`.
fn deliver_scrolls(frame: &mut RevealFrame, scrolls: &BTreeSet<u64>, next_tick: u64) {
    if scrolls.contains(&next_tick) {
        frame.on_stimulus(Stimulus::Scroll);
    }
}

fn write_png(frame: &FrameRGBA, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .to_rgba_image()?
        .save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut frame = open_frame(&args.image, &args.anim)?;
    let scrolls: BTreeSet<u64> = args.anim.scroll_at.iter().copied().collect();

    let mut last = None;
    for t in 1..=args.ticks {
        deliver_scrolls(&mut frame, &scrolls, t);
        last = frame.tick()?;
    }
    let rendered = match last {
        Some(rendered) => rendered,
        None => frame
            .render_current()?
            .context("image was not attached to the frame")?,
    };
    write_png(&rendered, &args.out)?;

    tracing::info!(ticks = args.ticks, out = %args.out.display(), "wrote frame");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let mut frame = open_frame(&args.image, &args.anim)?;
    let scrolls: BTreeSet<u64> = args.anim.scroll_at.iter().copied().collect();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for t in 1..=args.frames {
        deliver_scrolls(&mut frame, &scrolls, t);
        let rendered = frame
            .tick()?
            .context("image was not attached to the frame")?;
        let out = args.out_dir.join(format!("frame_{:05}.png", t - 1));
        write_png(&rendered, &out)?;
    }

    tracing::info!(frames = args.frames, dir = %args.out_dir.display(), "wrote sequence");
    eprintln!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}

fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.anim)?;
    let canvas = surface(&args.anim, None)?;
    let scrolls: BTreeSet<u64> = args.anim.scroll_at.iter().copied().collect();

    // Same seed, same draws as a frame built from this config.
    let mut rng = Rng64::new(cfg.seed);
    let mut ring = BlobRing::new(cfg.ring.params_for(canvas), &mut rng)?;
    let mut trigger = PerturbationTrigger::new(cfg.perturb_on_scroll);

    for t in 1..=args.ticks {
        if scrolls.contains(&t) {
            trigger.fire(&mut ring, Stimulus::Scroll, &mut rng);
        }
        ring.update();
    }

    println!("{}", ring.curve_geometry().to_svg());
    Ok(())
}
