use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, propagate_version = true)]
pub struct Args {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser)]
pub struct ConnectionArgs {
    /// Base URL of the inverter's web interface, including the scheme.
    /// For example: `https://192.168.1.42`.
    #[clap(long, env = "INVERTER_HOST")]
    pub host: String,

    /// Password of the `usr` account.
    #[clap(long, env = "INVERTER_PASSWORD")]
    pub password: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read the inverter's clock.
    Time,

    /// Read the device name and serial number.
    DeviceInfo,

    /// Read the operating health.
    Status,

    /// Read the instantaneous output power.
    Watts,

    /// Read the lifetime yield counter.
    TotalYield,

    /// Fetch the daily yield series.
    YieldDaily(YieldArgs),

    /// Fetch the 5-minute yield series.
    #[clap(name = "yield-5min")]
    Yield5Min(YieldArgs),
}

#[derive(Parser)]
pub struct YieldArgs {
    /// Range start, RFC 3339.
    #[clap(long)]
    pub start: DateTime<Utc>,

    /// Range end, RFC 3339. Defaults to now.
    #[clap(long)]
    pub end: Option<DateTime<Utc>>,
}
