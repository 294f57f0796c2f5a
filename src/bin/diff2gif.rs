use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "diff2gif", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one step as a PNG.
    Frame(FrameArgs),
    /// Render every step into an animated GIF.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Step index (0-based).
    #[arg(long)]
    step: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Number of iterations to render (defaults to the job's value, then to all recorded).
    #[arg(long)]
    iterations: Option<usize>,

    /// Seconds per frame (defaults to the job's `frame_duration`).
    #[arg(long)]
    duration: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut job = diff2gif::Job::from_path(&args.in_path)?;
    // Only steps up to the requested one are needed.
    job.iterations = Some(args.step.saturating_add(1));
    let assembler = job.into_assembler()?;
    let frame = assembler.render_frame(args.step)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    diff2gif::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut job = diff2gif::Job::from_path(&args.in_path)?;
    if let Some(n) = args.iterations {
        job.iterations = Some(n);
    }
    let assembler = job.into_assembler()?;
    let stats = match args.duration {
        Some(secs) => assembler.build(&args.out, secs)?,
        None => assembler.build_with_config_duration(&args.out)?,
    };

    eprintln!(
        "wrote {} ({} frames, {}s each)",
        args.out.display(),
        stats.frames,
        stats.frame_duration
    );
    Ok(())
}
