//! Lenient deserializers, the FRITZ!Box sends numbers as JSON numbers or as
//! strings (sometimes empty) and graph series of varying length.

use serde::{Deserialize, Deserializer};

use super::stats::{Series, SAMPLES};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

/// Accepts `12`, `"12"` and `""` (as `0`).
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => match s.trim() {
            "" => Ok(0),
            s => s.parse().map_err(serde::de::Error::custom),
        },
    }
}

/// Series of any length, missing samples are `0` and extra ones are dropped.
pub fn series<'de, D>(deserializer: D) -> Result<Series, D::Error>
where
    D: Deserializer<'de>,
{
    let samples = Vec::<i64>::deserialize(deserializer)?;
    let mut series = [0; SAMPLES];
    for (slot, sample) in series.iter_mut().zip(samples) {
        *slot = sample;
    }
    Ok(series)
}
