//! Deadlift video analysis: skeleton overlay, heel stabilization and rep counting.

use anyhow::Result;
use clap::Parser;
use deadlift_analysis::{
    app::{AppConfig, DeadliftApp},
    config::Config,
    processor::ProcessorType,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Process video files for deadlift analysis", long_about = None)]
struct Args {
    /// Input video files
    #[arg(short = 'f', long = "input-filenames", num_args = 1.., required = true)]
    input_filenames: Vec<PathBuf>,

    /// Video processors to run on each input
    #[arg(short = 't', long = "processor-types", num_args = 1.., required = true, value_enum)]
    processor_types: Vec<ProcessorType>,

    /// Directory for annotated videos (overrides the configuration file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Directory holding pose tracks (defaults to each video's directory)
    #[arg(long)]
    pose_dir: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Write a YAML summary beside each output video
    #[arg(long)]
    summary: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Deadlift Analysis v{} ({})", env!("CARGO_PKG_VERSION"), env!("BUILD_TARGET"));

    let mut settings = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    if let Some(dir) = args.output_dir {
        settings.video.output_dir = dir;
    }

    let config = AppConfig {
        inputs: args.input_filenames,
        processors: args.processor_types,
        pose_dir: args.pose_dir,
        write_summary: args.summary,
        settings,
    };

    let app = DeadliftApp::new(config)?;
    app.run()?;

    Ok(())
}
