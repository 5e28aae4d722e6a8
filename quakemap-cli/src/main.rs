use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{info, warn};
use quakemap_data::{decode_earthquakes, make_fetcher, GeoJsonFetcher};
use quakemap_guides::legend::swatch::make_depth_legend;
use quakemap_map::export::styled_geojson;
use quakemap_map::html::{render_html, render_legend_html};
use quakemap_map::popup::PopupRenderer;
use quakemap_map::{build_map, MapConfig, QuakeMapError};

const DEFAULT_MAP_FILE: &str = "map.html";
const DEFAULT_STYLED_FILE: &str = "styled.geojson";

/// Earthquake map builder: styles the USGS weekly feed by depth and magnitude
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch both feeds and write the interactive map as a standalone HTML page
    Render {
        /// Output path for the HTML page
        #[arg(short, long, default_value = DEFAULT_MAP_FILE)]
        output: PathBuf,

        /// JSON file overriding the default map configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Earthquake feed URL or local GeoJSON file
        #[arg(long)]
        quakes: Option<String>,

        /// Plate boundary URL or local GeoJSON file
        #[arg(long)]
        plates: Option<String>,
    },

    /// Write the earthquake feed as GeoJSON with the computed marker styles
    Style {
        /// Output path for the styled GeoJSON
        #[arg(short, long, default_value = DEFAULT_STYLED_FILE)]
        output: PathBuf,

        /// JSON file overriding the default map configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Earthquake feed URL or local GeoJSON file
        #[arg(long)]
        quakes: Option<String>,
    },

    /// Print the depth legend
    Legend {
        /// Print the HTML fragment shown on the map instead of plain text
        #[arg(long)]
        html: bool,

        /// JSON file overriding the default map configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(
    path: Option<&Path>,
    quakes: Option<String>,
    plates: Option<String>,
) -> Result<MapConfig, QuakeMapError> {
    let mut config = match path {
        Some(path) => MapConfig::from_json_file(path)?,
        None => MapConfig::default(),
    };
    if let Some(quakes) = quakes {
        config.earthquakes.source = quakes;
    }
    if let Some(plates) = plates {
        config.plate_boundaries.source = plates;
    }
    Ok(config)
}

fn write_output(path: &Path, contents: &str) -> Result<(), QuakeMapError> {
    let io_error = |source| QuakeMapError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }
    fs::write(path, contents).map_err(io_error)
}

async fn render_map(config: &MapConfig, output: &Path) -> Result<(), QuakeMapError> {
    let fetcher = make_fetcher()?;
    let (surface, report) = build_map(fetcher.as_ref(), config).await?;
    for (feed, reason) in &report.failures {
        warn!("The map was written without {feed}: {reason}");
    }

    write_output(output, &render_html(&surface)?)?;
    info!("Saved map to {}", output.display());
    Ok(())
}

async fn write_styled(config: &MapConfig, output: &Path) -> Result<(), QuakeMapError> {
    config.validate()?;
    let fetcher = make_fetcher()?;
    let value = fetcher.fetch(&config.earthquakes.source).await?;
    let quakes = decode_earthquakes(&value)?;

    let styled = styled_geojson(&quakes, &config.styler()?, &PopupRenderer::try_new()?)?;
    write_output(output, &serde_json::to_string_pretty(&styled)?)?;
    info!("Saved {} styled earthquakes to {}", quakes.len(), output.display());
    Ok(())
}

fn print_legend(config: &MapConfig, html: bool) -> Result<(), QuakeMapError> {
    config.validate()?;
    let legend = make_depth_legend(&config.depth_colors, &config.legend.swatch_config());
    if html {
        println!("{}", render_legend_html(&legend)?);
    } else {
        println!("{}", legend.to_text());
    }
    Ok(())
}

fn main() -> Result<(), QuakeMapError> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            output,
            config,
            quakes,
            plates,
        } => {
            let config = load_config(config.as_deref(), quakes, plates)?;
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(QuakeMapError::Runtime)?;
            rt.block_on(render_map(&config, &output))
        }
        Commands::Style {
            output,
            config,
            quakes,
        } => {
            let config = load_config(config.as_deref(), quakes, None)?;
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(QuakeMapError::Runtime)?;
            rt.block_on(write_styled(&config, &output))
        }
        Commands::Legend { html, config } => {
            let config = load_config(config.as_deref(), None, None)?;
            print_legend(&config, html)
        }
    }
}
