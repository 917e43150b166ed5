use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mandala::{
    AudioParams, Canvas, CpuRasterizer, GifSink, History, MandalaConfig, OverlayFont, Pacing,
    PlaybackPlan, Session,
    audio::synth::{synthesize, write_f32le, write_wav},
    export::gif::{DEFAULT_GIF_FPS, DEFAULT_GIF_SECS},
    session::history::default_history_path,
};

#[derive(Parser, Debug)]
#[command(name = "mandala", version, about = "Turn an intention into a deterministic mandala")]
struct Cli {
    /// JSON config file. Missing fields take their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// History file; defaults to the config value or the per-user data directory.
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print digest, parameters, points and audio parameters as JSON.
    Inspect(InspectArgs),
    /// Render breathing frame N as a PNG.
    Frame(FrameArgs),
    /// Render a breathing window as an animated GIF.
    Animate(AnimateArgs),
    /// Render the dissolve sequence as an animated GIF.
    Dissolve(DissolveArgs),
    /// Render the audio texture as WAV (or raw f32le).
    Audio(AudioArgs),
    /// Show or edit the stored intention history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Intention text, hashed exactly as given.
    text: String,
}

#[derive(Parser, Debug)]
struct RenderOpts {
    /// Square canvas side in pixels. Overrides the config.
    #[arg(long)]
    size: Option<u32>,

    /// Font file for the intention overlay. Overrides the config.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    text: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Breathing frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    text: String,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Window length in seconds.
    #[arg(long, default_value_t = DEFAULT_GIF_SECS)]
    secs: f64,

    /// GIF frame rate. Animation frames are sampled down to this rate.
    #[arg(long, default_value_t = DEFAULT_GIF_FPS)]
    gif_fps: u32,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Parser, Debug)]
struct DissolveArgs {
    text: String,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Breathing frames to play before the dissolve starts.
    #[arg(long, default_value_t = 0)]
    lead_frames: u64,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Parser, Debug)]
struct AudioArgs {
    text: String,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Length in seconds.
    #[arg(long, default_value_t = 30.0)]
    secs: f64,

    /// Write interleaved little-endian f32 instead of WAV.
    #[arg(long)]
    raw: bool,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List entries, newest first.
    List,
    /// Delete the entry at INDEX (as shown by `list`).
    Delete { index: usize },
    /// Remove every entry.
    Clear,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut cfg = load_config(cli.config.as_deref())?;
    if let Some(path) = cli.history_file {
        cfg.history_path = Some(path);
    }

    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(cfg, args),
        Command::Frame(args) => cmd_frame(cfg, args),
        Command::Animate(args) => cmd_animate(cfg, args),
        Command::Dissolve(args) => cmd_dissolve(cfg, args),
        Command::Audio(args) => cmd_audio(cfg, args),
        Command::History { action } => cmd_history(&cfg, action),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MandalaConfig> {
    match path {
        Some(p) => MandalaConfig::load(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(MandalaConfig::default()),
    }
}

fn apply_render_opts(cfg: &mut MandalaConfig, opts: RenderOpts) -> anyhow::Result<()> {
    if let Some(side) = opts.size {
        cfg.scene.canvas = Canvas::square(side);
    }
    if let Some(font) = opts.font {
        cfg.overlay_font = Some(font);
    }
    cfg.validate().context("invalid render options")?;
    Ok(())
}

fn make_rasterizer(cfg: &MandalaConfig) -> anyhow::Result<CpuRasterizer> {
    let raster = CpuRasterizer::new(cfg.scene.canvas).context("create raster surface")?;
    Ok(match &cfg.overlay_font {
        Some(path) => raster.with_font(
            OverlayFont::load(path)
                .with_context(|| format!("load overlay font '{}'", path.display()))?,
        ),
        None => raster,
    })
}

fn history_path(cfg: &MandalaConfig) -> Option<PathBuf> {
    cfg.history_path.clone().or_else(default_history_path)
}

/// Session backed by the configured history file. An unreadable history is replaced by an
/// in-memory one so rendering still works.
fn open_session(cfg: MandalaConfig) -> anyhow::Result<Session> {
    let history = match history_path(&cfg) {
        Some(path) => History::load(&path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "history unavailable; not saving");
            History::in_memory()
        }),
        None => {
            tracing::warn!("no data directory for history; not saving");
            History::in_memory()
        }
    };
    Session::new(cfg, history).context("invalid config")
}

/// Validate, classify and record `text`, leaving the session breathing.
fn start_session(cfg: MandalaConfig, text: &str) -> anyhow::Result<Session> {
    let mut session = open_session(cfg)?;
    session
        .generate(text)
        .with_context(|| format!("intention \"{text}\" not accepted"))?;
    Ok(session)
}

fn cmd_inspect(cfg: MandalaConfig, args: InspectArgs) -> anyhow::Result<()> {
    // Same checks as every other command, but inspecting is not recorded.
    let mut session = Session::new(cfg, History::in_memory()).context("invalid config")?;
    let pattern = session
        .generate(&args.text)
        .with_context(|| format!("intention \"{}\" not accepted", args.text))?;
    let report = serde_json::json!({
        "pattern": pattern,
        "audio": AudioParams::extract(&pattern.digest),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize report")?
    );
    Ok(())
}

fn cmd_frame(mut cfg: MandalaConfig, args: FrameArgs) -> anyhow::Result<()> {
    apply_render_opts(&mut cfg, args.render)?;
    let mut raster = make_rasterizer(&cfg)?;
    let mut session = start_session(cfg, &args.text)?;

    let mut frame = None;
    for _ in 0..=args.frame {
        let scene = session
            .tick()
            .context("animation stopped before the requested frame")?;
        frame = Some(raster.render(&scene)?);
    }
    let frame = frame.context("no frame rendered")?;

    mandala::save_png(&frame, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(mut cfg: MandalaConfig, args: AnimateArgs) -> anyhow::Result<()> {
    apply_render_opts(&mut cfg, args.render)?;
    if args.gif_fps == 0 {
        anyhow::bail!("--gif-fps must be > 0");
    }
    let stride = (cfg.fps.as_f64() / f64::from(args.gif_fps)).round().max(1.0) as u64;
    let plan = PlaybackPlan {
        breathing_frames: cfg.fps.secs_to_frames_floor(args.secs).max(1),
        dissolve: false,
        stride,
    };
    let mut raster = make_rasterizer(&cfg)?;
    let mut session = start_session(cfg, &args.text)?;

    let mut sink = GifSink::new(&args.out);
    let stats = session
        .play(&mut raster, plan, Pacing::Offline, &mut sink)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        stats.frames_pushed
    );
    Ok(())
}

fn cmd_dissolve(mut cfg: MandalaConfig, args: DissolveArgs) -> anyhow::Result<()> {
    apply_render_opts(&mut cfg, args.render)?;
    let plan = PlaybackPlan {
        breathing_frames: args.lead_frames,
        dissolve: true,
        stride: 1,
    };
    let mut raster = make_rasterizer(&cfg)?;
    let mut session = start_session(cfg, &args.text)?;

    let mut sink = GifSink::new(&args.out);
    let stats = session
        .play(&mut raster, plan, Pacing::Offline, &mut sink)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;
    if !stats.ended_black {
        anyhow::bail!("dissolve did not reach the black frame");
    }
    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        sink.frames_written()
    );
    Ok(())
}

fn cmd_audio(cfg: MandalaConfig, args: AudioArgs) -> anyhow::Result<()> {
    let audio = cfg.audio.clone();
    let session = start_session(cfg, &args.text)?;
    let digest = session
        .current()
        .context("no pattern after generate")?
        .digest;
    let params = AudioParams::extract(&digest);
    let pcm = synthesize(&params, &audio, args.secs).context("synthesize audio")?;
    if args.raw {
        write_f32le(&pcm.samples, &args.out)?;
    } else {
        write_wav(&pcm, &args.out)?;
    }
    eprintln!(
        "wrote {} ({:.1} s, root {:.2} Hz)",
        args.out.display(),
        pcm.duration_secs(),
        params.root_hz
    );
    Ok(())
}

fn cmd_history(cfg: &MandalaConfig, action: HistoryAction) -> anyhow::Result<()> {
    let path =
        history_path(cfg).context("no history path: pass --history-file or set history_path")?;
    let mut history =
        History::load(&path).with_context(|| format!("load history '{}'", path.display()))?;

    match action {
        HistoryAction::List => {
            for (i, entry) in history.entries().iter().enumerate() {
                println!(
                    "{i:>3}  {}  {}  {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    &entry.digest.to_hex()[..12],
                    entry.text
                );
            }
            return Ok(());
        }
        HistoryAction::Delete { index } => {
            let removed = history.delete(index)?;
            eprintln!("deleted \"{}\"", removed.text);
        }
        HistoryAction::Clear => {
            history.clear();
            eprintln!("cleared {}", path.display());
        }
    }
    history
        .save()
        .with_context(|| format!("save history '{}'", path.display()))?;
    Ok(())
}
