use serde::{Deserialize, Serialize};

use super::de;

/// Number of samples per series in the online monitor graph
pub const SAMPLES: usize = 19;

pub type Series = [i64; SAMPLES];

/// Data behind the online monitor graph (`action=get_graphic`).
///
/// The totals aren't sent by the FRITZ!Box, see [`TrafficStats::compute_totals`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficStats {
    #[serde(rename = "ds_bps_curr_max")]
    pub downstream_max: i64,
    #[serde(rename = "us_bps_curr_max")]
    pub upstream_max: i64,
    #[serde(rename = "downstream")]
    pub downstream_capacity: i64,
    #[serde(rename = "upstream")]
    pub upstream_capacity: i64,
    #[serde(rename = "ds_bps_max")]
    pub static_downstream_max: i64,
    #[serde(rename = "us_bps_max")]
    pub static_upstream_max: i64,
    pub dynamic: bool,
    #[serde(rename = "_node")]
    pub node: String,
    pub mode: String,
    pub name: String,

    #[serde(rename = "ds_bps_curr", deserialize_with = "de::series")]
    pub downstream_internet: Series,
    #[serde(rename = "ds_mc_bps_curr", deserialize_with = "de::series")]
    pub downstream_iptv: Series,
    #[serde(rename = "ds_guest_bps_curr", deserialize_with = "de::series")]
    pub downstream_guest: Series,
    #[serde(rename = "us_realtime_bps_curr", deserialize_with = "de::series")]
    pub upstream_realtime: Series,
    #[serde(rename = "us_important_bps_curr", deserialize_with = "de::series")]
    pub upstream_priority: Series,
    #[serde(
        rename = "us_default_bps_curr",
        alias = "us_default19_bps_curr",
        deserialize_with = "de::series"
    )]
    pub upstream_normal: Series,
    #[serde(rename = "us_background_bps_curr", deserialize_with = "de::series")]
    pub upstream_background: Series,
    #[serde(rename = "guest_us_bps", deserialize_with = "de::series")]
    pub upstream_guest: Series,

    #[serde(skip)]
    pub downstream_total: Series,
    #[serde(skip)]
    pub upstream_total: Series,
}

impl TrafficStats {
    /// Sum up the downstream and upstream series per sample.
    ///
    /// Sums wrap on overflow.
    pub fn compute_totals(&mut self) {
        for i in 0..SAMPLES {
            self.downstream_total[i] = [
                self.downstream_internet[i],
                self.downstream_iptv[i],
                self.downstream_guest[i],
            ]
            .into_iter()
            .fold(0, i64::wrapping_add);
            self.upstream_total[i] = [
                self.upstream_realtime[i],
                self.upstream_priority[i],
                self.upstream_normal[i],
                self.upstream_background[i],
                self.upstream_guest[i],
            ]
            .into_iter()
            .fold(0, i64::wrapping_add);
        }
    }
}
