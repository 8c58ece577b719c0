use clap::{Parser, Subcommand};
use image_resizer::config::{self, ConfigOverrides};
use image_resizer::imaging::{ImageKind, RustBackend, supported_input_extensions};
use image_resizer::{output, probe_dimensions, resize_detected};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Dimension and encoder flags for the resize command.
#[derive(clap::Args, Clone)]
struct ResizeArgs {
    /// Source image (.gif, .jpg, .jpeg or .png)
    input: PathBuf,

    /// Destination file, written in the source's format
    output: PathBuf,

    /// Preset file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// proportional | fixed | fixed-width | fixed-height
    #[arg(long)]
    mode: Option<String>,

    /// Percentage for proportional mode (1-99)
    #[arg(long, allow_negative_numbers = true)]
    ratio: Option<i64>,

    /// Target width in pixels
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Target height in pixels
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// Encoder quality, 0 (worst) to 100 (best)
    #[arg(long)]
    quality: Option<u32>,

    /// Request interlaced GIF / progressive JPEG output
    #[arg(long, overrides_with = "no_interlace")]
    interlace: bool,

    /// Turn interlacing off even if the preset enables it
    #[arg(long, overrides_with = "interlace")]
    no_interlace: bool,
}

impl ResizeArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            mode: self.mode.clone(),
            ratio: self.ratio,
            width: self.width,
            height: self.height,
            quality: self.quality,
            interlace: match (self.interlace, self.no_interlace) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
}

#[derive(Parser)]
#[command(name = "image-resizer")]
#[command(about = "Resize GIF, JPEG and PNG images")]
#[command(long_about = "\
Resize GIF, JPEG and PNG images

Modes:

  proportional   --ratio N            both axes scaled to N percent (0 < N < 100)
  fixed          --width W --height H exact size, aspect ratio not kept
  fixed-width    --width W            height follows the source aspect ratio
  fixed-height   --height H           width follows the source aspect ratio

Examples:

  image-resizer resize --mode proportional --ratio 50 in.png out.png
  image-resizer resize --mode fixed-width --width 180 --quality 85 in.jpg out.jpg
  image-resizer resize --config thumbs.toml in.gif out.gif

Run 'image-resizer gen-config' to generate a documented preset file.")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize one image
    Resize(ResizeArgs),
    /// Print an image's format and dimensions
    Info {
        /// Image to inspect
        input: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a stock preset file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Resize(args) => {
            let preset = config::load_config(args.config.as_deref(), &args.overrides())?;
            debug!(?preset, "resolved preset");
            let (kind, outcome) = resize_detected(
                &RustBackend::new(),
                preset.mode()?,
                &preset.dimension_spec(),
                preset.option_set(),
                &args.input,
                &args.output,
            )?;
            output::print_resize_output(&args.input, &args.output, kind, &outcome);
        }
        Command::Info { input, json } => {
            let dims = probe_dimensions(&RustBackend::new(), &input)?;
            let kind = ImageKind::from_path(&input);
            if json {
                let info = serde_json::json!({
                    "path": input.display().to_string(),
                    "format": kind.map(|k| k.to_string()),
                    "supported": kind.is_some(),
                    "width": dims.width,
                    "height": dims.height,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                output::print_info_output(&input, kind, dims);
                if kind.is_none() {
                    println!(
                        "    Resizable extensions: {}",
                        supported_input_extensions().join(", ")
                    );
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
