use std::{
    io::{self, BufReader},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use config::AssetConfig;

mod common;
mod compress;
mod config;
mod helpers;
mod import;
mod persist;
mod render;

#[derive(Parser, Debug)]
#[command(about = "Generates memory-initialization files for the VGA tile and background buffers")]
struct Args {
    /// JSON settings file replacing the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the block tile sheet, save a PNG preview and its 12-bit .mem dump
    Blocks {
        #[arg(long)]
        preview: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Resize a background image and dump it as a 12-bit .mem file
    Resize {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
    /// Convert 12-bit hex values (stdin unless --input is given) to 8-bit RGB332
    Compress {
        output: PathBuf,
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Write the default settings as JSON
    DumpConfig { path: PathBuf },
}

fn generate_blocks(config: &config::TileSheetConfig) -> Result<()> {
    info!(
        "Drawing tile sheet {}x{}",
        config.sheet_width(),
        config.sheet_height()
    );
    let sheet = render::render_tile_sheet(config);
    persist::save_png(&config.preview_path, &sheet)?;
    let count = persist::save_mem(&config.mem_path, &sheet)?;
    info!("Wrote {} pixels to {}", count, config.mem_path.display());
    Ok(())
}

fn generate_background(config: &config::ResizeConfig) -> Result<()> {
    info!("Reading {}", config.input_path.display());
    let bitmap = import::load_resized(config)?;
    let count = persist::save_mem(&config.mem_path, &bitmap)?;
    info!("Wrote {} pixels to {}", count, config.mem_path.display());
    info!("Top-level parameters: MEM_BG_SIZE = {}; VBUF_W = {};", count, bitmap.width());
    Ok(())
}

/// Loads `--config` (or the defaults) and applies the subcommand's flags on top.
fn resolve_config(args: &Args) -> Result<AssetConfig> {
    let mut config = match &args.config {
        Some(path) => AssetConfig::load(path)?,
        None => AssetConfig::default(),
    };

    match &args.command {
        Command::Blocks { preview, output } => {
            let blocks = &mut config.blocks;
            if let Some(p) = preview {
                blocks.preview_path = p.clone();
            }
            if let Some(p) = output {
                blocks.mem_path = p.clone();
            }
        }
        Command::Resize {
            input,
            output,
            width,
            height,
        } => {
            let bg = &mut config.background;
            if let Some(p) = input {
                bg.input_path = p.clone();
            }
            if let Some(p) = output {
                bg.mem_path = p.clone();
            }
            bg.width = width.unwrap_or(bg.width);
            bg.height = height.unwrap_or(bg.height);
        }
        Command::Compress { .. } | Command::DumpConfig { .. } => {}
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;

    match args.command {
        Command::Blocks { .. } => generate_blocks(&config.blocks),
        Command::Resize { .. } => generate_background(&config.background),
        Command::Compress { output, input } => {
            let count = match input {
                Some(path) => {
                    let file = std::fs::File::open(&path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    compress::compress_to_file(BufReader::new(file), &output, &config.compress)?
                }
                None => {
                    info!("Paste 12-bit hex data, then end input (Ctrl+D, or Ctrl+Z on Windows)");
                    compress::compress_to_file(io::stdin().lock(), &output, &config.compress)?
                }
            };
            info!("Done! {} pixels written to '{}'", count, output.display());
            Ok(())
        }
        Command::DumpConfig { path } => config.save(&path),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
