use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::ColumnOrder;
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Four spheres including a hollow glass ball
    Practice,
    /// Grid of random small spheres with three large ones
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Path trace a scene of spheres into a PPM or PNG image")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Image aspect ratio (width / height)
    #[arg(long, default_value_t = 16.0 / 9.0, value_parser = parse_aspect)]
    pub aspect: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100)]
    pub samples: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value_t = 50)]
    pub max_depth: i32,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneKind::Practice)]
    pub scene: SceneKind,

    /// Seed for scene generation and sampling (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Trace columns left to right instead of right to left, which stores
    /// the image unmirrored
    #[arg(long)]
    pub left_to_right: bool,

    /// Render scanlines in parallel on all cores
    #[arg(long, short = 'p')]
    pub parallel: bool,

    /// Output file (.ppm or .png), or "-" for PPM on stdout
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Set the logging level [default: info, or RUST_LOG when set]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Accept only a finite, positive aspect ratio.
fn parse_aspect(s: &str) -> Result<f32, String> {
    let aspect: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if aspect.is_finite() && aspect > 0.0 {
        Ok(aspect)
    } else {
        Err(format!("aspect ratio must be a finite positive number, got {s}"))
    }
}

impl Args {
    /// Image height derived from width and aspect ratio.
    pub fn height(&self) -> u32 {
        (self.width as f32 / self.aspect) as u32
    }

    /// Column traversal within each scanline.
    pub fn column_order(&self) -> ColumnOrder {
        if self.left_to_right {
            ColumnOrder::LeftToRight
        } else {
            ColumnOrder::RightToLeft
        }
    }

    /// True when the image goes to stdout.
    pub fn to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}
