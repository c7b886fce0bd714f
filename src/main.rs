use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use route_replay::config::ReplayConfig;
use route_replay::stream::{MarkerStream, SampleSource};

#[derive(Parser)]
#[command(name = "route-replay")]
#[command(about = "Replay a recorded route as map marker animation segments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a route dataset
    Validate { dataset: String },
    /// Replay a route per a playback config file
    Run { config: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { dataset } => validate(&dataset).await,
        Commands::Run { config } => run(&config).await,
    }
}

async fn validate(path: &str) -> ExitCode {
    let mut source = match SampleSource::open(path, Duration::ZERO) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error opening dataset: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut valid = 0usize;
    let mut malformed = 0usize;
    while let Some(result) = source.next().await {
        match result {
            Ok(_) => valid += 1,
            Err(e) => {
                eprintln!("  {e}");
                malformed += 1;
            }
        }
    }

    println!("{valid} fixes readable, {malformed} malformed");
    if malformed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn run(path: &str) -> ExitCode {
    let config = match ReplayConfig::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let interval = match config.interval() {
        Ok(i) => i,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let source = match SampleSource::open(&config.dataset, interval) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error opening dataset {}: {e}", config.dataset.display());
            return ExitCode::FAILURE;
        }
    };

    println!("Starting replay at {}", chrono::Utc::now());

    let mut marker_stream = MarkerStream::new(Arc::new(config.camera.to_camera()));
    let mut updates = marker_stream.subscribe();

    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let descriptor = updates.borrow_and_update().clone();
            if let Some(descriptor) = descriptor {
                match serde_json::to_string(&descriptor) {
                    Ok(line) => println!("{line}"),
                    Err(e) => log::warn!("cannot serialize descriptor: {e}"),
                }
            }
        }
    });

    if let Err(e) = marker_stream.start(source) {
        eprintln!("Error starting stream: {e}");
        return ExitCode::FAILURE;
    }
    marker_stream.wait().await;

    // Dropping the stream closes the update cell, letting the printer drain.
    drop(marker_stream);
    let _ = printer.await;

    println!("Replay completed");
    ExitCode::SUCCESS
}
