//! Client for the session-based JSON-over-HTTP API of the inverter's local
//! web interface.

mod envelope;
mod keys;
mod models;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

pub use self::models::{
    CurrentTime,
    DeviceInfo,
    HealthClassification,
    HealthStatus,
    Session,
    YieldSample,
};
use self::keys::Interval;
use crate::prelude::*;

pub struct Api {
    client: reqwest::Client,
}

/// Body of the endpoints that take nothing but the device selector.
#[derive(Serialize)]
struct DestDevRequest {
    #[serde(rename = "destDev")]
    destination_devices: [&'static str; 0],
}

impl DestDevRequest {
    const fn new() -> Self {
        Self { destination_devices: [] }
    }
}

impl Api {
    /// Build the client with the default 10-second timeout.
    ///
    /// The inverter serves a self-signed certificate, so certificate
    /// validation is off.
    pub fn try_new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { client })
    }

    /// Build the client on a caller-configured [`reqwest::Client`],
    /// for custom timeouts or TLS settings.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Log in and return an authenticated [`Session`].
    ///
    /// Fails with [`Error::Auth`] when the inverter returns an empty or null
    /// session id, which it does for a wrong password and for an exhausted
    /// session pool alike.
    #[instrument(skip_all, fields(host = host))]
    pub async fn login(&self, host: &str, password: &str) -> Result<Session> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            right: &'static str,
            pass: &'a str,
        }

        let session = Session::new(host);
        let response = self
            .call(&session, "/dyn/login.json", &LoginRequest { right: "usr", pass: password })
            .await?;
        let sid =
            response.pointer("/result/sid").ok_or_else(|| Error::shape("result.sid", &response))?;
        match sid {
            Value::Null => Err(Error::Auth),
            Value::String(sid) if sid.is_empty() => Err(Error::Auth),
            Value::String(sid) => {
                info!("Logged in");
                Ok(Session { sid: Some(sid.clone()), ..session })
            }
            _ => Err(Error::shape("result.sid", sid)),
        }
    }

    /// Read the inverter's clock: current time and UTC offset in hours.
    #[instrument(skip_all)]
    pub async fn current_time(&self, session: &Session) -> Result<CurrentTime> {
        let response = self.call(session, "/dyn/getTime.json", &DestDevRequest::new()).await?;
        let payload = envelope::unwrap_result(&response)?;
        let tm = payload.get("tm").ok_or_else(|| Error::shape("tm", payload))?;
        let ofs = payload.get("ofs").ok_or_else(|| Error::shape("ofs", payload))?;
        let time = DateTime::from_timestamp(envelope::as_i64(tm, "tm")?, 0)
            .ok_or_else(|| Error::shape("tm", tm))?;
        // The wire carries the offset in seconds:
        let utc_offset_hours = envelope::as_i64(ofs, "ofs")? / 3600;
        Ok(CurrentTime { time, utc_offset_hours })
    }

    /// Fetch the device name and serial number in one combined lookup.
    #[instrument(skip_all)]
    pub async fn device_info(&self, session: &Session) -> Result<DeviceInfo> {
        let response =
            self.get_values(session, &[keys::DEVICE_NAME, keys::SERIAL_NUMBER]).await?;
        let payload = envelope::unwrap_result(&response)?;
        let name = envelope::as_str(
            envelope::data_point(payload, keys::DEVICE_NAME)?,
            keys::DEVICE_NAME,
        )?;
        let serial_number = envelope::as_u64(
            envelope::data_point(payload, keys::SERIAL_NUMBER)?,
            keys::SERIAL_NUMBER,
        )?;
        Ok(DeviceInfo { name: name.to_owned(), serial_number })
    }

    /// Read the operating health tag and classify it.
    #[instrument(skip_all)]
    pub async fn health_status(&self, session: &Session) -> Result<HealthStatus> {
        let response = self.get_values(session, &[keys::HEALTH_STATUS]).await?;
        let payload = envelope::unwrap_result(&response)?;
        let value = envelope::data_point(payload, keys::HEALTH_STATUS)?;

        // The health channel wraps its value once more: a one-element list
        // whose element carries the `tag`.
        let entries = value.as_array().ok_or_else(|| Error::shape(keys::HEALTH_STATUS, value))?;
        let [entry] = entries.as_slice() else {
            return Err(Error::shape(keys::HEALTH_STATUS, value));
        };
        let tag = entry.get("tag").ok_or_else(|| Error::shape("tag", entry))?;
        let tag = u32::try_from(envelope::as_u64(tag, "tag")?)
            .map_err(|_| Error::shape("tag", tag))?;
        Ok(HealthStatus { tag, classification: HealthClassification::from_tag(tag) })
    }

    /// Read the instantaneous output power in watts.
    ///
    /// An absent value is reported as 0, the way the inverter itself treats
    /// "no current output" — for example at night.
    #[instrument(skip_all)]
    pub async fn current_watts(&self, session: &Session) -> Result<u64> {
        let response = self.get_values(session, &[keys::CURRENT_WATTS]).await?;
        let payload = envelope::unwrap_result(&response)?;
        match envelope::data_point(payload, keys::CURRENT_WATTS)? {
            Value::Null => Ok(0),
            value => envelope::as_u64(value, keys::CURRENT_WATTS),
        }
    }

    /// Read the lifetime yield counter in watt-hours.
    #[instrument(skip_all)]
    pub async fn total_yield(&self, session: &Session) -> Result<u64> {
        let response = self.get_values(session, &[keys::TOTAL_YIELD]).await?;
        let payload = envelope::unwrap_result(&response)?;
        envelope::as_u64(envelope::data_point(payload, keys::TOTAL_YIELD)?, keys::TOTAL_YIELD)
    }

    /// Query the daily yield series over the given time range.
    #[instrument(skip_all, fields(start = %start, end = %end))]
    pub async fn yield_daily(
        &self,
        session: &Session,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<YieldSample>> {
        self.get_logger(session, Interval::Daily, start, end).await
    }

    /// Query the 5-minute yield series over the given time range.
    #[instrument(skip_all, fields(start = %start, end = %end))]
    pub async fn yield_5min(
        &self,
        session: &Session,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<YieldSample>> {
        self.get_logger(session, Interval::FiveMinutes, start, end).await
    }

    /// Log out and free the server-side session slot.
    ///
    /// Succeeds only when the inverter confirms the session is no longer
    /// logged in.
    #[instrument(skip_all)]
    pub async fn logout(&self, session: &Session) -> Result {
        #[derive(Serialize)]
        struct LogoutRequest {}

        let response = self.call(session, "/dyn/logout.json", &LogoutRequest {}).await?;
        match response.pointer("/result/isLogin") {
            Some(Value::Bool(false)) => {
                info!("Logged out");
                Ok(())
            }
            Some(_) => Err(Error::LogoutRejected),
            None => Err(Error::shape("result.isLogin", &response)),
        }
    }

    async fn get_values(&self, session: &Session, keys: &[&str]) -> Result<Value> {
        #[derive(Serialize)]
        struct GetValuesRequest<'a> {
            #[serde(rename = "destDev")]
            destination_devices: [&'a str; 0],

            keys: &'a [&'a str],
        }

        self.call(
            session,
            "/dyn/getValues.json",
            &GetValuesRequest { destination_devices: [], keys },
        )
        .await
    }

    /// Shared historical-query routine behind [`Self::yield_daily`] and
    /// [`Self::yield_5min`].
    async fn get_logger(
        &self,
        session: &Session,
        interval: Interval,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<YieldSample>> {
        #[derive(Serialize)]
        struct GetLoggerRequest {
            #[serde(rename = "destDev")]
            destination_devices: [&'static str; 0],

            key: u32,

            #[serde(rename = "tStart")]
            start: i64,

            #[serde(rename = "tEnd")]
            end: i64,
        }

        let (start, end) = (start.timestamp(), end.timestamp());
        if start < 0 || start > end {
            return Err(Error::InvalidTimeRange { start, end });
        }
        let response = self
            .call(
                session,
                "/dyn/getLogger.json",
                &GetLoggerRequest {
                    destination_devices: [],
                    key: interval.code(),
                    start,
                    end,
                },
            )
            .await?;
        let payload = envelope::unwrap_result(&response)?;
        let samples = serde_json::from_value::<Vec<YieldSample>>(payload.clone())
            .map_err(|_| Error::shape("samples", payload))?;
        debug!(n_samples = samples.len(), "Fetched");
        Ok(samples)
    }

    /// Perform the one POST every operation boils down to. The session id,
    /// once known, rides along as a query parameter.
    #[instrument(skip_all, level = Level::DEBUG, fields(path = path))]
    async fn call<B: Serialize>(&self, session: &Session, path: &str, body: &B) -> Result<Value> {
        let mut request =
            self.client.post(format!("{host}{path}", host = session.host)).json(body);
        if let Some(sid) = &session.sid {
            request = request.query(&[("sid", sid)]);
        }
        let response =
            request.send().await?.error_for_status()?.json::<Value>().await?;
        debug!(%response, "Call succeeded");
        Ok(response)
    }
}
