//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `namazio` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::process;

use namazio::initialization::init_logger_with;
use namazio::{run_report, start_watch, Config, ScheduleUpdate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), e.g. RUST_LOG
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let result = if config.watch {
        watch(&config).await
    } else {
        run_report(&config).await.map(|report| println!("{}", report))
    };

    if let Err(e) = result {
        eprintln!("namazio error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn watch(config: &Config) -> Result<()> {
    let mut watch = start_watch(config).await?;

    print!("{}", watch.location.display_name());
    if watch.location.is_fallback {
        print!(" (approximate)");
    }
    println!();
    println!("{}", watch.service.qibla(&watch.location));

    loop {
        tokio::select! {
            update = watch.updates.recv() => match update {
                Some(ScheduleUpdate::Schedule(schedule)) => {
                    let times: Vec<String> = schedule
                        .boundaries()
                        .iter()
                        .map(|b| format!("{} {}", b.label.turkish_name(), b.clock_time))
                        .collect();
                    println!("{}: {}", schedule.date().format("%d.%m.%Y"), times.join(" · "));
                }
                Some(ScheduleUpdate::State(state)) => {
                    println!(
                        "{} · {} vaktine {} kaldı",
                        state.current_label.turkish_name(),
                        state.next_label.turkish_name(),
                        state.remaining
                    );
                }
                Some(ScheduleUpdate::Unavailable { date, reason }) => {
                    eprintln!("Prayer times for {} are unavailable: {}", date, reason);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
        }
    }

    watch.stop().await;
    Ok(())
}
