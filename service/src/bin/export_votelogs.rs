//! Write vote-log page models as JSON for the static site build.
//!
//! Usage: `cargo run --bin export_votelogs -- --out ../web/public/votelog`

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use votelog_api::{
    config::Config,
    votelog::{export_pages, PageSettings, YamlVoteLogRepository},
};

#[derive(Debug, Parser)]
#[command(name = "export_votelogs", about = "Export vote-log pages as JSON")]
struct Args {
    /// YAML config file (missing file falls back to defaults and env)
    #[arg(long, default_value = "config.yaml")]
    config: String,

    /// Output directory
    #[arg(long, default_value = "public/votelog")]
    out: PathBuf,

    /// Export only this vote event id (repeatable)
    #[arg(long = "only", value_name = "ID")]
    only: Vec<String>,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let config = Config::load_from(&args.config).map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    let repo = YamlVoteLogRepository::load(&config.data)?;
    let report = export_pages(
        &repo,
        &PageSettings::from(&config.site),
        &args.out,
        &args.only,
    )?;

    for page in &report.pages {
        println!("{}", page.display());
    }
    println!("{}", report.index.display());
    Ok(())
}
