//! Client library for the local WebConnect interface of SMA solar inverters.
//!
//! The inverter exposes a session-based JSON-over-HTTP API on its built-in web
//! server. [`Api`] logs in, reads device identity, health, current output and
//! historical yield, and logs out again. Session state is an immutable
//! [`Session`] value passed explicitly between calls.

pub mod error;
mod prelude;
pub mod webconnect;

pub use self::{
    error::{Error, Result},
    webconnect::{
        Api,
        CurrentTime,
        DeviceInfo,
        HealthClassification,
        HealthStatus,
        Session,
        YieldSample,
    },
};
