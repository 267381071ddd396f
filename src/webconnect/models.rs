use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::serde_as;

/// Authentication state against one inverter host.
///
/// Immutable value: created by [`crate::Api::login`], passed by reference to
/// every subsequent call, discarded by the caller after
/// [`crate::Api::logout`].
#[derive(Clone, Debug)]
pub struct Session {
    /// Base URL of the inverter's web interface, including the scheme.
    /// For example: `https://192.168.1.42`.
    pub host: String,

    /// Server-issued session id, [`None`] until authenticated.
    pub sid: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into(), sid: None }
    }
}

/// The inverter's own clock.
#[derive(Copy, Clone, Debug)]
pub struct CurrentTime {
    pub time: DateTime<Utc>,
    pub utc_offset_hours: i64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeviceInfo {
    pub name: String,
    pub serial_number: u64,
}

/// Operating health: the raw vendor tag plus its classification.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HealthStatus {
    pub tag: u32,
    pub classification: HealthClassification,
}

/// Classification of the nine known health tags. Tags outside the table map
/// to [`HealthClassification::Unknown`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum HealthClassification {
    #[display("alm")]
    Alarm,

    #[display("off")]
    Off,

    #[display("ok")]
    Ok,

    #[display("wrn")]
    Warning,

    #[display("com_nok")]
    CommunicationFault,

    #[display("not_conn")]
    NotConnected,

    #[display("conn_sett")]
    ConnectionSettling,

    #[display("conn_fail")]
    ConnectionFailed,

    #[display("wps_is_act")]
    WpsActive,

    #[display("unknown")]
    Unknown,
}

impl HealthClassification {
    #[must_use]
    pub const fn from_tag(tag: u32) -> Self {
        match tag {
            35 => Self::Alarm,
            303 => Self::Off,
            307 => Self::Ok,
            455 => Self::Warning,
            1719 => Self::CommunicationFault,
            1725 => Self::NotConnected,
            2130 => Self::ConnectionSettling,
            3325 => Self::ConnectionFailed,
            3426 => Self::WpsActive,
            _ => Self::Unknown,
        }
    }
}

/// One point of a historical yield series: the sample time and the
/// cumulative yield counter in watt-hours at that time.
#[must_use]
#[serde_as]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct YieldSample {
    #[serde_as(as = "serde_with::TimestampSeconds<i64>")]
    #[serde(rename = "t")]
    pub time: DateTime<Utc>,

    #[serde(rename = "v")]
    pub value: u64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_known_tags_classify() {
        assert_eq!(HealthClassification::from_tag(307), HealthClassification::Ok);
        assert_eq!(HealthClassification::from_tag(35), HealthClassification::Alarm);
        assert_eq!(HealthClassification::from_tag(3426), HealthClassification::WpsActive);
    }

    #[test]
    fn test_unknown_tag_classifies_as_unknown() {
        assert_eq!(HealthClassification::from_tag(9999), HealthClassification::Unknown);
    }

    #[test]
    fn test_classification_labels() {
        assert_eq!(HealthClassification::Ok.to_string(), "ok");
        assert_eq!(HealthClassification::CommunicationFault.to_string(), "com_nok");
    }

    #[test]
    fn test_deserialize_yield_samples_preserve_order() {
        // language=JSON
        const PAYLOAD: &str = r#"
            [
                {"t": 1609459200, "v": 1500},
                {"t": 1609545600, "v": 1900},
                {"t": 1609632000, "v": 2400}
            ]
        "#;
        let samples = serde_json::from_str::<Vec<YieldSample>>(PAYLOAD).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].time, Utc.timestamp_opt(1_609_459_200, 0).unwrap());
        assert_eq!(samples[0].value, 1500);
        assert_eq!(samples[2].value, 2400);
        assert!(samples.is_sorted_by_key(|sample| sample.time));
    }
}
