use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fcam", about = "Run followcam scenes headless", version)]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the demo scene to a TOML file
    Init {
        /// Where to write the scene file
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Simulate a scene for a number of frames
    Run {
        /// Scene file to load
        scene: PathBuf,
        /// Number of frames to simulate
        #[arg(long, default_value_t = 60)]
        frames: u32,
        /// Fixed time step in seconds
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Use wall-clock time between frames instead of --dt
        #[arg(long)]
        realtime: bool,
        /// Override the scene's aspect ratio
        #[arg(long)]
        aspect: Option<f32>,
    },
    /// Compose a scene once and print its world transforms
    Inspect {
        /// Scene file to load
        scene: PathBuf,
    },
}
