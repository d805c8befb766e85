//! rootbar binary: runs the bar until SIGINT, SIGTERM or SIGQUIT.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rootbar::{BarConfig, DisplaySink, LogWriter, StdoutSink, Subscribe, Supervisor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    /// X11 root window title.
    #[cfg(feature = "x11")]
    Xroot,
    /// One line per update on standard output.
    Stdout,
}

impl Default for SinkKind {
    fn default() -> Self {
        #[cfg(feature = "x11")]
        return SinkKind::Xroot;
        #[cfg(not(feature = "x11"))]
        return SinkKind::Stdout;
    }
}

#[derive(Debug, Parser)]
#[command(name = "rootbar", version, about = "Status bar for the X11 root window title")]
struct Args {
    /// TOML file replacing the built-in section list.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where the composed bar is published.
    #[arg(long, value_enum, default_value_t = SinkKind::default())]
    sink: SinkKind,

    /// X display to connect to (defaults to `$DISPLAY`).
    #[cfg(feature = "x11")]
    #[arg(long)]
    display: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rootbar=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_sink(args: &Args) -> Result<Box<dyn DisplaySink>, rootbar::RuntimeError> {
    match args.sink {
        #[cfg(feature = "x11")]
        SinkKind::Xroot => rootbar::XRootSink::open(args.display.as_deref())
            .map(|sink| Box::new(sink) as Box<dyn DisplaySink>)
            .map_err(rootbar::RuntimeError::Display),
        SinkKind::Stdout => Ok(Box::new(StdoutSink::new())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => BarConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BarConfig::default(),
    };

    let sink = open_sink(&args).context("opening display sink")?;
    info!(sink = sink.name(), sections = cfg.sections.len(), "starting");

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let sup = Supervisor::builder(cfg).with_subscribers(subs).build(sink)?;
    sup.run().await?;

    info!("stopped");
    Ok(())
}
