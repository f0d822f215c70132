use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use tapmath::core::config;
use tapmath::tui;

#[derive(Parser)]
#[command(name = "tapmath", about = "Schema-recognition math trainer (Trigger · Action · Pitfall)")]
struct Args {
    /// Problem id the capture flow loads
    #[arg(short, long)]
    problem: Option<String>,

    /// Skip the capture/graph delays (deterministic for scripted runs)
    #[arg(long)]
    instant: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to tapmath.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("tapmath.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tapmath: {e}");
            std::process::exit(1);
        }
    };
    let mut resolved = config::resolve(&file_config, args.instant);
    if args.problem.is_some() {
        resolved.default_problem = args.problem;
    }

    log::info!("TapMath starting up with config: {:?}", resolved);

    tui::run(resolved)
}
