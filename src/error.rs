use serde_json::Value;
use thiserror::Error as ThisError;

/// Client error.
///
/// Transport and body-decoding failures pass through from [`reqwest`]
/// unmodified. Everything else is raised by the envelope-unwrapping layer.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The inverter returned an empty or null session id on login,
    /// meaning a wrong password or no free session slot.
    #[error("the inverter returned no session id")]
    Auth,

    #[error("invalid time range: start {start} must be non-negative and not after end {end}")]
    InvalidTimeRange { start: i64, end: i64 },

    /// The decoded JSON did not match the expected envelope or field
    /// structure. Carries the offending fragment for diagnosis.
    #[error("unexpected response shape at `{context}`: {fragment}")]
    UnexpectedShape { context: String, fragment: Value },

    #[error("the inverter did not confirm the logout")]
    LogoutRejected,
}

impl Error {
    pub(crate) fn shape(context: impl Into<String>, fragment: &Value) -> Self {
        Self::UnexpectedShape { context: context.into(), fragment: fragment.clone() }
    }
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
