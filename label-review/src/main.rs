mod config;
mod dataset;
mod review;

use crate::config::Config;
use anyhow::Result;
use clap::Parser;
use serde_loader::Json5Path;
use std::path::PathBuf;

/// Step through a YOLO dataset image by image with the annotated boxes
/// drawn on, accepting, rejecting or re-inspecting each frame from the
/// keyboard.
#[derive(Debug, Parser)]
struct Opts {
    /// Show each annotated frame in a window.
    #[clap(short = 'v', long = "enable_image_view")]
    pub enable_image_view: bool,

    /// Save each accepted annotated frame.
    #[clap(short = 's', long = "enable_image_save")]
    pub enable_image_save: bool,

    /// JSON5 config file overriding the default dataset layout.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    if !opts.enable_image_view && !opts.enable_image_save {
        println!("Either --enable_image_view or --enable_image_save must be specified.");
        return Ok(());
    }

    let config: Config = match &opts.config {
        Some(path) => Json5Path::open_and_take(path)?,
        None => Config::default(),
    };

    review::run(&config, opts.enable_image_view, opts.enable_image_save)
}
