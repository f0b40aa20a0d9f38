use serde::{Deserialize, Serialize};

use super::de;
use super::internet::{ConnectionInfo, ConnectionInfoError};

/// The `data` field of the overview page (`page=overview`).
///
/// Fields are optional, which ones are present depends on model and firmware.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    pub naslink: String,
    pub fritzos: Option<FritzOs>,
    #[serde(deserialize_with = "de::int")]
    pub webdav: i64,
    #[serde(rename = "MANUAL_URL")]
    pub manual_url: String,
    pub language: String,
    #[serde(rename = "AVM_URL")]
    pub avm_url: String,
    pub usbconnect: String,
    pub foncalls: Option<Foncalls>,
    pub vpn: Option<Vpn>,
    pub internet: Option<ConnectionInfo>,
    pub dsl: Option<Dsl>,
    #[serde(rename = "SERVICEPORTAL_URL")]
    pub service_portal_url: String,
    pub comfort: Option<Comfort>,
    pub changelog: Option<Changelog>,
    pub tamcalls: Option<TamCalls>,
    pub lan: Option<Summary>,
    pub usb: Option<Summary>,
    pub fonnum: Option<Summary>,
    #[serde(rename = "NEWSLETTER_URL")]
    pub newsletter_url: String,
    pub net: Option<Net>,
    pub dect: Option<Summary>,
    pub wlan: Option<Wlan>,
}

impl StatusSnapshot {
    /// Normalize the derived connection fields, if there is an `internet` block.
    pub fn normalize(&mut self) -> Result<(), ConnectionInfoError> {
        match self.internet.as_mut() {
            Some(internet) => internet.normalize(),
            None => Ok(()),
        }
    }
}

/// Firmware and device information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FritzOs {
    #[serde(rename = "Productname")]
    pub product_name: String,
    #[serde(rename = "NoPwd")]
    pub no_password: bool,
    #[serde(rename = "ShowDefaults")]
    pub show_defaults: bool,
    #[serde(rename = "expert_mode", deserialize_with = "de::int")]
    pub expert_mode: i64,
    #[serde(rename = "fb_name")]
    pub box_name: String,
    /// Example: `7.29`
    #[serde(rename = "nspver")]
    pub version: String,
    #[serde(rename = "isLabor")]
    pub is_labor: bool,
    #[serde(rename = "twofactor_disabled")]
    pub two_factor_disabled: bool,
    #[serde(rename = "FirmwareSigned")]
    pub firmware_signed: bool,
    #[serde(rename = "showUpdate")]
    pub show_update: bool,
    #[serde(rename = "isUpdateAvail")]
    pub update_available: bool,
    #[serde(deserialize_with = "de::int")]
    pub energy: i64,
    #[serde(rename = "boxDate")]
    pub box_date: String,
}

/// Phone call counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Foncalls {
    #[serde(rename = "activecalls")]
    pub active_calls: String,
    #[serde(rename = "callsToday", deserialize_with = "de::int")]
    pub calls_today: i64,
    #[serde(rename = "count_all", deserialize_with = "de::int")]
    pub count: i64,
    #[serde(deserialize_with = "de::int")]
    pub count_today: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vpn {
    /// Untyped, the layout differs between VPN kinds.
    pub elements: Vec<serde_json::Value>,
    pub title: String,
    pub link: String,
}

/// DSL line state as shown on the overview page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dsl {
    pub txt: String,
    pub led: String,
    pub title: String,
    pub diag_stop_pid: String,
    #[serde(deserialize_with = "de::int")]
    pub diag_active: i64,
    #[serde(rename = "addDiag")]
    pub add_diag: String,
    pub link: String,
    #[serde(rename = "up")]
    pub upload: String,
    #[serde(rename = "down")]
    pub download: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Comfort {
    #[serde(rename = "func")]
    pub functions: Vec<ComfortFunc>,
    #[serde(rename = "anyComfort")]
    pub any: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComfortFunc {
    #[serde(rename = "linktxt")]
    pub name: String,
    pub details: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Changelog {
    #[serde(rename = "deviceName")]
    pub device_name: String,
    #[serde(rename = "fritzOsVersion")]
    pub fritz_os_version: String,
    #[serde(rename = "connectionStatus")]
    pub connection_status: bool,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "iframeUrl")]
    pub iframe_url: String,
}

/// Answering machine counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TamCalls {
    pub calls: String,
    #[serde(rename = "tam_configured")]
    pub configured: bool,
    #[serde(deserialize_with = "de::int")]
    pub count: i64,
    #[serde(rename = "callsToday", deserialize_with = "de::int")]
    pub calls_today: i64,
}

/// Used by `lan`, `usb`, `fonnum` and `dect`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub txt: String,
    pub led: String,
    pub title: String,
    pub link: String,
}

/// Devices in the home network
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Net {
    #[serde(rename = "anyUnmeshedDevices")]
    pub any_unmeshed_devices: bool,
    #[serde(deserialize_with = "de::int")]
    pub count: i64,
    #[serde(deserialize_with = "de::int")]
    pub active_count: i64,
    #[serde(rename = "more_link")]
    pub more: String,
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub classes: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub url: String,
}

/// `wlan` is `false` when the WLAN is switched off, an object otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wlan {
    Info(WlanInfo),
    Flag(bool),
}

impl Wlan {
    pub fn info(&self) -> Option<&WlanInfo> {
        match self {
            Wlan::Info(info) => Some(info),
            Wlan::Flag(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WlanInfo {
    pub txt: String,
    pub led: String,
    pub title: String,
    pub link: String,
    pub tooltip: String,
}
