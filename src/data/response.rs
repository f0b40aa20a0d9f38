use serde::Deserialize;

use super::dsl::DslInfo;
use super::logs::Logs;

/// The whole response of `data.lua`.
#[derive(Debug, Clone, Deserialize)]
pub struct Response<T> {
    #[serde(default)]
    pub pid: String,
    #[serde(default)]
    pub sid: String,
    pub data: T,
}

/// The `data` field of the log page.
#[derive(Debug, Clone, Deserialize)]
pub struct LogData {
    #[serde(rename = "log")]
    pub logs: Option<Logs>,
}

/// The `data` field of the DSL overview page.
#[derive(Debug, Clone, Deserialize)]
pub struct DslData {
    #[serde(rename = "connectionData")]
    pub connection_data: Option<DslInfo>,
}
