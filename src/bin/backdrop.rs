use std::path::{Path, PathBuf};

use anyhow::Context as _;
use backdrop::{
    BackdropOptions, Frame, FrameStatus, HeadlessContainer, HeadlessHost, LogicalSize, Quality,
    Renderer, Rgba8, ScrollOverlay, Theme, Variant,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the animation headlessly and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Write every frame of a run as numbered PNGs.
    Sequence(SequenceArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Container width in logical pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Container height in logical pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Options JSON; command line flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    quality: Option<QualityChoice>,

    #[arg(long, value_enum)]
    variant: Option<VariantChoice>,

    /// Scroll overlay intensity.
    #[arg(long)]
    intensity: Option<f64>,

    #[arg(long, value_enum, default_value_t = ThemeChoice::Dark)]
    theme: ThemeChoice,

    /// Number of frames to run.
    #[arg(long, default_value_t = 30)]
    frames: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory for frame_00000.png, frame_00001.png, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Apply the scroll overlay with a scroll fraction rising from 0 to 1
    /// over the sequence.
    #[arg(long)]
    scroll: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityChoice {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantChoice {
    WavesAndOrbs,
    ParticlesAndFlares,
    StarfieldNebula,
    Constellation,
    Aurora,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Light,
    Dark,
}

impl From<QualityChoice> for Quality {
    fn from(choice: QualityChoice) -> Self {
        match choice {
            QualityChoice::High => Quality::High,
            QualityChoice::Medium => Quality::Medium,
            QualityChoice::Low => Quality::Low,
        }
    }
}

impl From<VariantChoice> for Variant {
    fn from(choice: VariantChoice) -> Self {
        match choice {
            VariantChoice::WavesAndOrbs => Variant::WavesAndOrbs,
            VariantChoice::ParticlesAndFlares => Variant::ParticlesAndFlares,
            VariantChoice::StarfieldNebula => Variant::StarfieldNebula,
            VariantChoice::Constellation => Variant::Constellation,
            VariantChoice::Aurora => Variant::Aurora,
        }
    }
}

impl From<ThemeChoice> for Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
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
    }
}

fn resolve_options(args: &SceneArgs) -> anyhow::Result<BackdropOptions> {
    let mut opts = match &args.config {
        Some(path) => BackdropOptions::from_json_file(path)
            .with_context(|| format!("load options '{}'", path.display()))?,
        None => BackdropOptions::default(),
    };
    if let Some(q) = args.quality {
        opts.quality = q.into();
    }
    if let Some(v) = args.variant {
        opts.variant = v.into();
    }
    if let Some(i) = args.intensity {
        opts.intensity = i;
    }
    opts.validate()?;
    Ok(opts)
}

fn mount(args: &SceneArgs) -> anyhow::Result<Renderer<HeadlessContainer, Theme>> {
    let options = resolve_options(args)?;
    let size = LogicalSize::new(args.width, args.height)?;
    let renderer = Renderer::mount(
        HeadlessContainer::new(size, args.dpr),
        Theme::from(args.theme),
        options,
    );
    if renderer.pending_frame().is_none() {
        anyhow::bail!(
            "renderer did not start ({:?}); check the size and device pixel ratio",
            renderer.state()
        );
    }
    Ok(renderer)
}

fn write_png(path: &Path, frame: &Frame) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let straight = backdrop::unpremultiply(&frame.data);
    image::save_buffer_with_format(
        path,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut renderer = mount(&args.scene)?;
    let mut host = HeadlessHost::default();
    let summary = host.run(&mut renderer, args.scene.frames);
    if summary.halted {
        anyhow::bail!("animation halted after {} frames", summary.rendered);
    }
    let frame = renderer
        .frame()
        .context("renderer has no visible frame")?;
    write_png(&args.out, &frame)?;
    renderer.unmount();

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let mut renderer = mount(&args.scene)?;
    let mut host = HeadlessHost::default();
    let frames = args.scene.frames;
    let intensity = renderer.options().intensity;
    let background: Rgba8 = renderer.background_color();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for i in 0..frames {
        match host.present(&mut renderer) {
            Some(FrameStatus::Rendered { .. }) => {}
            Some(status) => anyhow::bail!("frame {i} not rendered: {status:?}"),
            None => anyhow::bail!("frame {i} was never requested"),
        }
        let mut frame = renderer
            .frame()
            .context("renderer has no visible frame")?;
        if args.scroll {
            let fraction = if frames > 1 {
                i as f64 / (frames - 1) as f64
            } else {
                0.0
            };
            frame = ScrollOverlay::at(fraction, intensity).compose_onto(&frame, background);
        }
        write_png(&args.out_dir.join(format!("frame_{i:05}.png")), &frame)?;
    }
    renderer.unmount();

    eprintln!("wrote {frames} frames to {}", args.out_dir.display());
    Ok(())
}
