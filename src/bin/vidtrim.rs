use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use vidtrim::{
    CacheDir, EditorLifecycle, EditorSessionConfig, EngineConfig, FfmpegEngine, HeadlessHost,
    HttpFetcher, NullPlayer, OpenOutcome, VideoMetadata,
};

#[derive(Parser, Debug)]
#[command(name = "vidtrim", version)]
struct Cli {
    /// Increase log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    tools: ToolArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct ToolArgs {
    /// `ffmpeg` executable.
    #[arg(long, global = true, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// `ffprobe` executable.
    #[arg(long, global = true, default_value = "ffprobe")]
    ffprobe: PathBuf,

    /// Directory for fetched copies and produced files.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print width, height and duration of a source as JSON.
    Probe(ProbeArgs),
    /// Trim a source to a range (requires `ffmpeg` on PATH).
    Trim(TrimArgs),
    /// Extract one still frame as JPEG.
    Snapshot(SnapshotArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Source path or URL.
    #[arg(long = "in")]
    source: String,

    /// Copy the source into the cache before editing (for `http(s)://` and `file://` URIs).
    #[arg(long)]
    remote: bool,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    /// Source path or URL.
    #[arg(long = "in")]
    source: String,
}

#[derive(Args, Debug)]
struct TrimArgs {
    #[command(flatten)]
    src: SourceArgs,

    /// Range start in seconds.
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// Range end in seconds (defaults to the source duration).
    #[arg(long)]
    end: Option<f64>,

    /// Remove audio.
    #[arg(long)]
    mute: bool,

    /// Cap for the longer output dimension.
    #[arg(long)]
    max_size: Option<u32>,

    /// Cap for the output duration in seconds.
    #[arg(long)]
    max_duration: Option<u32>,

    /// Session config JSON; `--in` and flags given here override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Copy the result here instead of leaving it in the cache.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    src: SourceArgs,

    /// Frame time in seconds (defaults to a quarter of the duration).
    #[arg(long)]
    time: Option<f64>,

    /// Cap for the longer image dimension.
    #[arg(long)]
    max_size: Option<u32>,

    /// Copy the image here instead of leaving it in the cache.
    #[arg(long)]
    out: Option<PathBuf>,
}

type CliLifecycle = EditorLifecycle<FfmpegEngine, HttpFetcher, NullPlayer, HeadlessHost>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Probe(args) => cmd_probe(&cli.tools, args).await,
        Command::Trim(args) => cmd_trim(&cli.tools, args).await,
        Command::Snapshot(args) => cmd_snapshot(&cli.tools, args).await,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn make_engine(tools: &ToolArgs) -> FfmpegEngine {
    FfmpegEngine::new(EngineConfig {
        ffmpeg_bin: tools.ffmpeg.clone(),
        ffprobe_bin: tools.ffprobe.clone(),
    })
}

fn make_lifecycle(tools: &ToolArgs) -> anyhow::Result<CliLifecycle> {
    let cache = tools
        .cache_dir
        .clone()
        .map(CacheDir::new)
        .unwrap_or_default();
    Ok(EditorLifecycle::new(
        make_engine(tools),
        HttpFetcher::new()?,
        NullPlayer,
        HeadlessHost,
        cache,
    ))
}

async fn open(lc: &CliLifecycle, cfg: EditorSessionConfig) -> anyhow::Result<VideoMetadata> {
    match lc.open(cfg, |_| {}).await? {
        OpenOutcome::Ready(meta) => Ok(meta),
        OpenOutcome::Failed(err) => {
            lc.close().await;
            Err(err).context("open source")
        }
        OpenOutcome::Ignored | OpenOutcome::Discarded => {
            anyhow::bail!("editor session did not open")
        }
    }
}

async fn cmd_probe(tools: &ToolArgs, args: ProbeArgs) -> anyhow::Result<()> {
    let engine = make_engine(tools);
    let probe = vidtrim::probe_stream(&engine, &args.source)
        .await
        .with_context(|| format!("probe '{}'", args.source))?;
    println!("{}", serde_json::to_string_pretty(&probe)?);
    Ok(())
}

async fn cmd_trim(tools: &ToolArgs, args: TrimArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => EditorSessionConfig::from_json_file(path)?,
        None => EditorSessionConfig::default(),
    };
    cfg.source_uri = args.src.source.clone();
    cfg.is_local_source = !args.src.remote;
    if args.max_size.is_some() {
        cfg.max_output_size = args.max_size;
    }
    if args.max_duration.is_some() {
        cfg.max_duration_seconds = args.max_duration;
    }

    let lc = make_lifecycle(tools)?;
    let meta = open(&lc, cfg).await?;

    let range = match lc
        .commit_range(args.start, args.end.unwrap_or(meta.duration))
        .await
    {
        Ok(range) => range,
        Err(err) => {
            lc.close().await;
            return Err(err).context("apply range");
        }
    };
    tracing::info!(start = range.start, end = range.end, "range committed");

    if args.mute {
        lc.toggle_mute().await;
    }

    let mut clip = match lc.confirm().await {
        Ok(clip) => clip,
        Err(err) => {
            lc.close().await;
            return Err(err).context("trim");
        }
    };

    if let Some(out) = &args.out {
        copy_out(&clip.uri, out).await?;
        clip.uri = out.clone();
    }
    println!("{}", serde_json::to_string_pretty(&clip)?);
    Ok(())
}

async fn cmd_snapshot(tools: &ToolArgs, args: SnapshotArgs) -> anyhow::Result<()> {
    let cfg = EditorSessionConfig::new(args.src.source.clone())
        .with_local_source(!args.src.remote)
        .with_snapshot(true, args.max_size);

    let lc = make_lifecycle(tools)?;
    open(&lc, cfg).await?;
    let snapshot = lc.capture_snapshot(args.time).await;
    lc.close().await;

    let Some(path) = snapshot? else {
        anyhow::bail!("no frame could be extracted from '{}'", args.src.source);
    };
    let path = match &args.out {
        Some(out) => {
            copy_out(&path, out).await?;
            out.clone()
        }
        None => path,
    };
    println!("{}", path.display());
    Ok(())
}

async fn copy_out(from: &Path, to: &Path) -> anyhow::Result<()> {
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    tokio::fs::copy(from, to)
        .await
        .with_context(|| format!("copy '{}' to '{}'", from.display(), to.display()))?;
    Ok(())
}
