use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use carousel::constants::{RENDER_HEIGHT, RENDER_WIDTH};
use carousel::{CarouselConfig, load_deck};

mod viewer;

use crate::viewer::ViewOptions;

/// Hero banner carousel viewer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Deck file (TOML) or a directory of images and videos
    path: PathBuf,

    /// Seconds each image slide stays up
    #[arg(long)]
    image_duration: Option<f32>,

    /// Seconds each video slide stays up
    #[arg(long)]
    video_duration: Option<f32>,

    /// Horizontal drag in pixels that counts as a swipe
    #[arg(long)]
    swipe_threshold: Option<f32>,

    /// Let videos stop at their end instead of looping
    #[arg(long)]
    no_loop_video: bool,

    #[arg(long, default_value_t = RENDER_WIDTH)]
    width: i32,

    #[arg(long, default_value_t = RENDER_HEIGHT)]
    height: i32,

    /// ffmpeg binary used to decode video slides
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: String,

    /// TTF/OTF font for native-script titles
    #[arg(long)]
    font: Option<PathBuf>,
}

impl Args {
    /// Command-line flags win over the deck's `[carousel]` table.
    fn apply_overrides(&self, mut config: CarouselConfig) -> CarouselConfig {
        if let Some(d) = self.image_duration {
            config.image_duration = d;
        }
        if let Some(d) = self.video_duration {
            config.video_duration = d;
        }
        if let Some(t) = self.swipe_threshold {
            config.swipe_threshold = t;
        }
        if self.no_loop_video {
            config.loop_video = false;
        }
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let deck = load_deck(&args.path)
        .with_context(|| format!("Error loading slides from '{}'", args.path.display()))?;
    let config = args.apply_overrides(deck.config);
    config.validate().context("Invalid carousel settings")?;

    info!(
        path = %args.path.display(),
        slides = deck.slides.len(),
        image_duration = config.image_duration,
        video_duration = config.video_duration,
        "starting carousel"
    );

    viewer::run(
        deck.slides,
        config,
        ViewOptions {
            width: args.width,
            height: args.height,
            ffmpeg: args.ffmpeg,
            font: args.font,
        },
    )
}
