//! Typed versions of the JSON answers of the FRITZ!Box web interface.

mod de;

mod dsl;
pub use dsl::{DslInfo, Line};

mod internet;
pub use internet::{
    parse_connection_time, parse_rate, parse_rates, ConnectionInfo, ConnectionInfoError,
    LED_ONLINE,
};

mod logs;
pub use logs::{LogCategory, LogEntry, Logs, CATEGORY_COLUMN};

mod response;
pub use response::{DslData, LogData, Response};

mod stats;
pub use stats::{Series, TrafficStats, SAMPLES};

mod status;
pub use status::{
    Changelog, Comfort, ComfortFunc, Device, Dsl, Foncalls, FritzOs, Net, StatusSnapshot,
    Summary, TamCalls, Vpn, Wlan, WlanInfo,
};
