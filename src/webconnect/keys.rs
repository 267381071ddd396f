//! Vendor channel identifiers and interval codes.

/// Device name channel.
pub const DEVICE_NAME: &str = "6800_10821E00";

/// Serial number channel.
pub const SERIAL_NUMBER: &str = "6800_00A21E00";

/// Operating health channel.
pub const HEALTH_STATUS: &str = "6180_08214800";

/// Instantaneous output power channel.
pub const CURRENT_WATTS: &str = "6100_0046C200";

/// Lifetime yield counter channel.
pub const TOTAL_YIELD: &str = "6400_00260100";

/// Time granularity of a `getLogger.json` query.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Interval {
    Daily,
    FiveMinutes,
}

impl Interval {
    /// Vendor code selecting the logger series.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Daily => 28704,
            Self::FiveMinutes => 28672,
        }
    }
}
