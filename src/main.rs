mod cli;
mod render;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use sunny_webconnect::{Api, Session};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let api = Api::try_new()?;
    let session = api
        .login(&args.connection.host, &args.connection.password)
        .await
        .context("failed to log in")?;
    let outcome = run(&api, &session, args.command).await;
    // Free the server-side session slot even when the call failed:
    if let Err(error) = api.logout(&session).await {
        warn!("failed to log out: {error}");
    }
    outcome
}

async fn run(api: &Api, session: &Session, command: Command) -> Result<()> {
    match command {
        Command::Time => {
            let time = api.current_time(session).await?;
            info!(time = %time.time, utc_offset_hours = time.utc_offset_hours, "Inverter clock");
        }

        Command::DeviceInfo => {
            let info = api.device_info(session).await?;
            info!(name = %info.name, serial_number = info.serial_number, "Device");
        }

        Command::Status => {
            let status = api.health_status(session).await?;
            info!(tag = status.tag, classification = %status.classification, "Health");
        }

        Command::Watts => {
            let watts = api.current_watts(session).await?;
            info!(watts, "Current output");
        }

        Command::TotalYield => {
            let watt_hours = api.total_yield(session).await?;
            info!(watt_hours, "Total yield");
        }

        Command::YieldDaily(args) => {
            let end = args.end.unwrap_or_else(Utc::now);
            let samples = api.yield_daily(session, args.start, end).await?;
            println!("{}", render::build_yield_table(&samples));
        }

        Command::Yield5Min(args) => {
            let end = args.end.unwrap_or_else(Utc::now);
            let samples = api.yield_5min(session, args.start, end).await?;
            println!("{}", render::build_yield_table(&samples));
        }
    }
    Ok(())
}
