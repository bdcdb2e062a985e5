//! `render` and `render-resolved` command handlers.
//!
//! Both build a [`NetworkPipeline`] from the loaded config, run it over the
//! input files, and write the result as JSON or a standalone HTML map.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use whmap_core::{AppConfig, WarehouseFallback};
use whmap_network::{
    parse_override_list, read_centers, read_resolved_stores, ColorOverride, NetworkConfig,
    NetworkPipeline, NetworkRender,
};

use crate::html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Html,
}

/// Output options shared by the render commands.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Warehouse colors in index order, e.g. `--color '#ff0000,#00ff00'`
    #[arg(long = "color", value_delimiter = ',')]
    pub colors: Vec<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Attach rows without warehouse coordinates to the customer centroid
    #[arg(long)]
    pub centroid_fallback: bool,
}

impl OutputArgs {
    fn overrides(&self) -> Option<Vec<ColorOverride>> {
        let list = parse_override_list(&self.colors.join(","));
        (!list.is_empty()).then_some(list)
    }
}

fn build_pipeline(config: &AppConfig, args: &OutputArgs) -> NetworkPipeline {
    let mut network = NetworkConfig::from_app_config(config);
    if args.centroid_fallback {
        network.warehouse_fallback = WarehouseFallback::Centroid;
    }
    NetworkPipeline::new(network)
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Render a four-column customer/warehouse CSV.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is malformed, or the
/// output cannot be written.
pub(crate) fn run_render(config: &AppConfig, input: &Path, args: &OutputArgs) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config, args);
    let overrides = args.overrides();
    let render = pipeline
        .render_csv(open(input)?, overrides.as_deref())
        .with_context(|| format!("failed to render {}", input.display()))?;
    emit(config, &render, args)
}

/// Render a pre-resolved store table against explicit warehouse centers.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed, a store points
/// at a missing center, or the output cannot be written.
pub(crate) fn run_render_resolved(
    config: &AppConfig,
    stores: &Path,
    centers: &Path,
    args: &OutputArgs,
) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config, args);
    let report = read_resolved_stores(open(stores)?)
        .with_context(|| format!("failed to read stores from {}", stores.display()))?;
    let centers = read_centers(open(centers)?)
        .with_context(|| format!("failed to read centers from {}", centers.display()))?;

    let overrides = args.overrides();
    let mut render = pipeline.render_resolved(&report.rows, &centers, overrides.as_deref())?;
    render.summary.skipped_rows = report.skipped;
    emit(config, &render, args)
}

fn emit(config: &AppConfig, render: &NetworkRender, args: &OutputArgs) -> anyhow::Result<()> {
    let body = match args.format {
        OutputFormat::Json if args.pretty => serde_json::to_string_pretty(render)?,
        OutputFormat::Json => serde_json::to_string(render)?,
        OutputFormat::Html => html::render_page(render, config.mapbox_api_key.as_deref())?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, body.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote scene");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    eprintln!("{}", render.summary);
    Ok(())
}
