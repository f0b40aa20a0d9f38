use serde::{Deserialize, Serialize};

use super::de;

/// `connectionData` of the DSL overview page (`page=dslOv`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DslInfo {
    #[serde(rename = "externApValue")]
    pub extern_ap_value: String,
    /// Example: `VDSL2`
    #[serde(rename = "modell")]
    pub model: String,
    #[serde(rename = "isDebug")]
    pub is_debug: bool,
    /// in meters
    #[serde(rename = "lineLength", deserialize_with = "de::int")]
    pub line_length: i64,
    #[serde(rename = "externAPHeader")]
    pub extern_ap_header: String,
    #[serde(rename = "externApText")]
    pub extern_ap_text: String,
    pub line: Vec<Line>,
    pub version: String,
    #[serde(rename = "versiontext")]
    pub version_text: String,
    #[serde(rename = "dsRate")]
    pub downstream_rate: String,
    #[serde(rename = "usRate")]
    pub upstream_rate: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Line {
    pub state: String,
    #[serde(rename = "timePrefix")]
    pub time_prefix: String,
    #[serde(rename = "trainState")]
    pub train_state: String,
    pub mode: String,
    #[serde(rename = "trainStatePrefix")]
    pub train_state_prefix: String,
    pub time: String,
}
