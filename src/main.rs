mod config;
mod console;
mod display;
mod provider;
mod runtime;
mod web;

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::provider::Providers;
use crate::runtime::spawn_display;
use crate::web::AppState;

const STATUS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "radarscope")]
#[command(about = "Live air traffic radar display")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the display and serve it over HTTP
    Serve {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Run the display in the terminal, reading input from stdin
    Watch {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Validate a configuration file
    Validate { config: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Watch { config } => watch(config.as_deref()).await,
        Commands::Validate { config } => validate(&config),
    }
}

fn validate(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let range = &config.display.range;
    println!("Config is valid");
    println!("  airport:  {}", config.display.default_airport);
    println!("  fps:      {}", config.display.fps);
    println!(
        "  range:    {}NM ({}..{})",
        range.initial, range.minimum, range.maximum
    );
    println!("  timeout:  {}", config.providers.timeout);
    println!("  bind:     {}", config.web.bind);
    ExitCode::SUCCESS
}

fn load(path: Option<&str>) -> Option<(Config, Providers)> {
    let config = match Config::load(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return None;
        }
    };
    let providers = match config
        .providers
        .timeout()
        .map_err(|e| e.to_string())
        .and_then(|timeout| {
            Providers::http(&config.providers, timeout).map_err(|e| e.to_string())
        }) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to set up providers: {}", e);
            return None;
        }
    };
    Some((config, providers))
}

async fn serve(path: Option<&str>) -> ExitCode {
    let Some((config, providers)) = load(path) else {
        return ExitCode::FAILURE;
    };

    let display = spawn_display(&config.display, providers.clone());
    let state = AppState::new(providers, &display, config.display.canvas_size);
    let result = web::run_server(&config.web, state).await;
    display.stop().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn watch(path: Option<&str>) -> ExitCode {
    let Some((config, providers)) = load(path) else {
        return ExitCode::FAILURE;
    };

    let display = spawn_display(&config.display, providers);
    let inputs = display.inputs();
    let snapshots = display.snapshots();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut status = tokio::time::interval(STATUS_INTERVAL);

    println!("Type an airport code and Enter to switch, + / - to zoom, < to delete");
    'input: loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !console::forward_line(&line, &inputs) {
                        eprintln!("Display stopped");
                        break 'input;
                    }
                }
                Ok(None) => break 'input,
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    break 'input;
                }
            },
            _ = status.tick() => {
                println!("{}", console::status_line(&snapshots.borrow()));
            }
            _ = tokio::signal::ctrl_c() => break 'input,
        }
    }

    display.stop().await;
    ExitCode::SUCCESS
}
