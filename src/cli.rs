// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "room-viewer")]
#[command(about = "Fixed-scene 3D room viewer", long_about = None)]
pub struct Cli {
    /// Scene description file (JSON). Uses the built-in bedroom scene
    /// when omitted.
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}
