use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, ValueEnum};
use mdpages::{ConvertOptions, FontSet, OutputFormat, StyleConfig, convert_file};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Render Markdown documents as paginated images")]
struct Cli {
    /// Markdown files to convert
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Directory for the generated images (defaults to each input's directory)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
    /// Base file name for the images (single input only)
    #[arg(short = 'n', long = "name")]
    name: Option<String>,
    /// Page width in pixels [default: 900]
    #[arg(short = 'W', long = "width", value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,
    /// Page height in pixels [default: 1600]
    #[arg(short = 'H', long = "height", value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,
    /// TOML file overriding fonts, spacing and colours
    #[arg(long = "style")]
    style: Option<PathBuf>,
    /// Image encoding
    #[arg(long = "format", value_enum, default_value_t = Format::Png)]
    format: Format,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Png,
    Jpeg,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => OutputFormat::Png,
            Format::Jpeg => OutputFormat::Jpeg,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_style(cli: &Cli) -> anyhow::Result<StyleConfig> {
    let mut style = match &cli.style {
        Some(path) => StyleConfig::load(path)?,
        None => StyleConfig::default(),
    };
    if let Some(width) = cli.width {
        style.page.width = width;
    }
    if let Some(height) = cli.height {
        style.page.height = height;
    }
    Ok(style)
}

fn convert(
    input: &Path,
    opts: &ConvertOptions,
    style: &StyleConfig,
    fonts: &FontSet,
) -> anyhow::Result<Vec<PathBuf>> {
    convert_file(input, opts, style, fonts)
        .with_context(|| format!("failed to convert '{}'", input.display()))
}

/// Entry point for the command-line tool that renders Markdown as images.
///
/// Every input is converted independently and in parallel. The run stops
/// with an error if any input fails, after the others have finished.
///
/// # Examples
///
/// ```sh
/// # Pages next to the input: notes_001.png, notes_002.png, ...
/// mdpages notes.md
///
/// # Shorter JPEG pages into a separate directory
/// mdpages -H 1200 --format jpeg -o out/ a.md b.md
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.name.is_some() && cli.inputs.len() > 1 {
        bail!("--name can only be used with a single input file");
    }

    let style = load_style(&cli)?;
    let fonts = FontSet::load(&style.fonts);
    let opts = ConvertOptions {
        output_dir: cli.output.clone(),
        base_name: cli.name.clone(),
        format: cli.format.into(),
    };

    let results: Vec<anyhow::Result<Vec<PathBuf>>> = cli
        .inputs
        .par_iter()
        .map(|input| convert(input, &opts, &style, &fonts))
        .collect();

    let mut paths = Vec::new();
    for result in results {
        paths.extend(result?);
    }

    println!("Generated {} image(s):", paths.len());
    for path in &paths {
        println!("  {}", path.display());
    }
    Ok(())
}
