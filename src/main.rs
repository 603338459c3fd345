use std::path::{Path, PathBuf};

use anyhow::Context;
use binroute::{init_logging, summarize, EditorConfig, SessionLoad};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "binroute",
    version,
    about = "Load an editing session and print what the map would show"
)]
struct Cli {
    /// Session JSON in host page form (initialBoundary, routePolyline, ...)
    session: PathBuf,

    /// Editor config (TOML or JSON); defaults to the platform config dir
    #[arg(long, env = "BINROUTE_CONFIG")]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    if let Some(path) = path {
        return EditorConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }

    match EditorConfig::default_path() {
        Ok(path) => Ok(EditorConfig::load_or_default(&path)?),
        Err(e) => {
            tracing::warn!("{}, using default config", e);
            Ok(EditorConfig::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;

    let config = load_config(cli.config.as_deref())?;

    let text = std::fs::read_to_string(&cli.session)
        .with_context(|| format!("reading {}", cli.session.display()))?;
    let initial: SessionLoad = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", cli.session.display()))?;

    let summary = summarize(initial, &config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
