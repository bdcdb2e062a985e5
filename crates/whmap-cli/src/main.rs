mod html;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::render::OutputArgs;

#[derive(Debug, Parser)]
#[command(name = "whmap")]
#[command(about = "Render customer to warehouse networks as map scenes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a CSV of customer lat, customer lon, warehouse lat, warehouse lon
    Render {
        /// Path to the CSV file (header row optional)
        #[arg(long, short)]
        input: std::path::PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render stores with precomputed warehouse indices against explicit centers
    RenderResolved {
        /// CSV with Longitude, Latitude and Warehouse columns
        #[arg(long)]
        stores: std::path::PathBuf,

        /// Headerless CSV of warehouse lon, lat in index order
        #[arg(long)]
        centers: std::path::PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the default warehouse palette as hex colors
    Palette,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = whmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Render { input, output }) => render::run_render(&config, &input, &output),
        Some(Commands::RenderResolved {
            stores,
            centers,
            output,
        }) => render::run_render_resolved(&config, &stores, &centers, &output),
        Some(Commands::Palette) => {
            for hex in whmap_network::ColorPalette::tableau10().hex_entries() {
                println!("{hex}");
            }
            Ok(())
        }
        None => {
            println!("whmap: no command given; run `whmap --help` for usage");
            Ok(())
        }
    }
}
