use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_regex::{regex, regex_captures};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `led` value while the FRITZ!Box is connected to the internet
pub const LED_ONLINE: &str = "globe_online";

/// The `internet` block of the overview page.
///
/// Only the raw fields come from the FRITZ!Box, everything else is derived
/// from them by [`ConnectionInfo::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionInfo {
    /// Example:
    /// - `Verbunden seit 12.03.2021, 10:15 Uhr` is preceded by
    /// - `Anbieter: Telekom`
    pub txt: Vec<String>,
    pub led: String,
    pub title: String,
    /// Example: `↓ 100,0 Mbit/s / 116,8 Mbit/s`
    #[serde(rename = "down")]
    pub download_text: String,
    /// Example: `↑ 40,0 Mbit/s / 46,7 Mbit/s`
    #[serde(rename = "up")]
    pub upload_text: String,
    pub link: String,
    pub link2: String,

    #[serde(skip)]
    pub online: bool,
    #[serde(skip)]
    pub provider: String,
    /// bytes per second
    #[serde(skip)]
    pub download: u64,
    /// bytes per second
    #[serde(skip)]
    pub upload: u64,
    #[serde(skip)]
    pub connection_time: Option<NaiveDateTime>,
}

#[derive(Debug, Error)]
pub enum ConnectionInfoError {
    #[error("no provider in {0:?}")]
    Provider(Option<String>),
    #[error("expected two rates in {field} text {text:?}")]
    Rate { field: &'static str, text: String },
}

impl ConnectionInfo {
    /// Derive the online flag, provider, connection time and rates from the raw text.
    pub fn normalize(&mut self) -> Result<(), ConnectionInfoError> {
        self.online = self.led == LED_ONLINE;

        self.provider = self
            .txt
            .first()
            .and_then(|line| line.split_once(": "))
            .map(|(_, provider)| provider.to_string())
            .ok_or_else(|| ConnectionInfoError::Provider(self.txt.first().cloned()))?;

        self.connection_time = self
            .txt
            .get(1)
            .map(String::as_str)
            .and_then(parse_connection_time);

        self.upload = first_of_two_rates("up", &self.upload_text)?;
        self.download = first_of_two_rates("down", &self.download_text)?;

        Ok(())
    }
}

/// Finds `D.M.Y, H:M` in `text`, `None` if there is none or it isn't a valid date.
pub fn parse_connection_time(text: &str) -> Option<NaiveDateTime> {
    let (_, day, month, year, hour, minute) = regex_captures!(
        r#"([0-9]{1,2})\.([0-9]{1,2})\.([0-9]{1,4}), ([0-9]{1,2}):([0-9]{1,2})"#,
        text
    )?;

    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    let time = NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)?;
    Some(NaiveDateTime::new(date, time))
}

/// All rates like `1234,5 Mbit/s` in `text`, in bytes per second.
///
/// The value is read as tenths and scaled by `multiplier / 100`, so
/// `1234,5 Mbit/s` becomes `123450000`.
pub fn parse_rates(text: &str) -> impl Iterator<Item = u64> + '_ {
    regex!(r#"([0-9]{1,5}),([0-9]) (Mbit/s|Gbit/s|Tbit/s)"#)
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps[1].parse::<u64>().ok()?;
            let fraction = caps[2].parse::<u64>().ok()?;
            let multiplier: u64 = match &caps[3] {
                "Mbit/s" => 1_000_000,
                "Gbit/s" => 1_000_000_000,
                _ => 1_000_000_000_000,
            };
            Some((whole * 10 + fraction) * multiplier / 100)
        })
}

/// The first rate in `text`, `None` if there is no rate at all.
pub fn parse_rate(text: &str) -> Option<u64> {
    parse_rates(text).next()
}

fn first_of_two_rates(field: &'static str, text: &str) -> Result<u64, ConnectionInfoError> {
    let mut rates = parse_rates(text);
    match (rates.next(), rates.next()) {
        (Some(rate), Some(_)) => Ok(rate),
        _ => Err(ConnectionInfoError::Rate {
            field,
            text: text.to_string(),
        }),
    }
}
