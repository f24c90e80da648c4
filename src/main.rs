use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use datestamp::{Anchor, Color, ConsoleReporter, Reporter, RunError, WatermarkConfig};

const POSITIONS: [&str; 7] = [
    "top-left",
    "top-center",
    "top-right",
    "center",
    "bottom-left",
    "bottom-center",
    "bottom-right",
];

/// Stamp each photo in a directory with the date it was taken.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Examples:\n  datestamp ~/photos\n  datestamp ~/photos --font-size 60 --color red\n  datestamp ~/photos --position top-left --margin 30\n  datestamp ~/photos --color \"255,200,0\""
)]
struct Cli {
    /// Directory containing the photos
    directory: PathBuf,

    /// Font size in pixels
    #[arg(long, default_value_t = 50)]
    font_size: u32,

    /// Text color: a name (white/black/red/green/blue/yellow/cyan/magenta) or "R,G,B"
    #[arg(long, default_value = "white")]
    color: String,

    /// Where to place the date
    #[arg(long, default_value = "bottom-right", value_parser = POSITIONS)]
    position: String,

    /// Distance from the image edges in pixels
    #[arg(long, default_value_t = 20)]
    margin: u32,

    /// TrueType font to try before the system fonts
    #[arg(long)]
    font: Option<PathBuf>,

    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = WatermarkConfig {
        font_size: cli.font_size,
        color: Color::resolve(&cli.color),
        position: Anchor::from_name(&cli.position),
        margin: cli.margin,
        font_path: cli.font,
    };

    print_banner(&cli.directory, &config);

    let mut reporter = ConsoleReporter;
    match datestamp::run(&cli.directory, &config, &mut reporter) {
        Ok(_) => Ok(()),
        Err(RunError::NoImagesFound(dir)) => {
            reporter.error(&format!("No images found in {}", dir.display()));
            Ok(())
        }
        Err(e) => {
            reporter.error(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn print_banner(directory: &std::path::Path, config: &WatermarkConfig) {
    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("📷 Photo date stamp");
    println!("{}", rule);
    println!("Input directory: {}", directory.display());
    println!("Font size:       {}", config.font_size);
    println!("Color:           {}", config.color);
    println!("Position:        {}", config.position);
    println!("Margin:          {}px", config.margin);
    println!("{}", rule);
    println!();
}
