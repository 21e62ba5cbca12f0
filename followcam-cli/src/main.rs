mod cli;
mod commands;
mod scene_file;

use clap::Parser;

use cli::{Cli, Command};
use commands::run_cmd::RunOptions;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Init { path, force } => commands::init_cmd::run(&path, force),
        Command::Run {
            scene,
            frames,
            dt,
            realtime,
            aspect,
        } => commands::run_cmd::run(
            &scene,
            RunOptions {
                frames,
                dt,
                realtime,
                aspect,
            },
        ),
        Command::Inspect { scene } => commands::inspect_cmd::run(&scene),
    }
}
