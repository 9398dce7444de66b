//! The configuration record the controller firmware ingests.
//!
//! Field names, the historical `manufacture` spelling, declaration order, and
//! the fixed radio-timing blocks all mirror the firmware's parser. The
//! serialized form has to stay byte-stable, so the structs below are declared
//! in wire order and serialized compactly.

use crate::error::CompileResult;
use serde::{Deserialize, Serialize};

/// Schema revision the firmware expects.
pub const CONFIG_VERSION: u32 = 2;

/// Debounce window in scan ticks.
pub const DEBOUNCE_DEFAULT: u8 = 1;

/// Separator between visual rows in the flattened layout table.
pub const ROW_BREAK: u16 = 0;

/// Added to the diode code when a matrix is folded: more placed keys than
/// electrical intersections, so the firmware scans each line both ways.
pub const DIODE_FOLDED_FLAG: u8 = 4;

/// Added to the diode code when both split halves hang off one shared
/// electrical bus instead of talking over a serial link.
pub const DIODE_MERGED_FLAG: u8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub config: ConfigBody,
}

impl ConfigRecord {
    /// Serialize in the compact form the firmware ingests.
    pub fn to_json(&self) -> CompileResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigBody {
    pub version: u32,
    pub device_info: DeviceInfo,
    pub matrix: MatrixBlock,
    pub mode: OperatingMode,
    pub startup: u8,
    pub peripheral: ConnectionParams,
    pub central: ConnectionParams,
    pub led: LedBlock,
    pub keymap: KeymapBlock,
    pub reserved: [u8; 8],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub vid: String,
    pub pid: String,
    pub name: String,
    /// The firmware's parser wants this spelling.
    #[serde(rename = "manufacture")]
    pub manufacturer: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixBlock {
    /// Logical dimensions: for split boards these span both halves.
    pub rows: u8,
    pub cols: u8,
    /// Physical dimensions of the half this record configures.
    pub device_rows: u8,
    pub device_cols: u8,
    pub debounce: u8,
    pub is_left_hand: u8,
    pub diode_direction: u8,
    pub row_pins: Vec<u8>,
    pub col_pins: Vec<u8>,
    pub layout: Vec<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingMode {
    Single,
    SplitMaster,
    SplitSlave,
}

/// BLE connection-interval settings. The firmware treats these as opaque
/// tuning constants; the converter never varies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub max_interval: u8,
    pub min_interval: u8,
    pub slave_latency: u8,
}

impl ConnectionParams {
    /// Timing advertised when the board talks to its host.
    pub const PERIPHERAL: Self = Self {
        max_interval: 30,
        min_interval: 30,
        slave_latency: 16,
    };

    /// Timing used when a master polls its slave half.
    pub const CENTRAL: Self = Self {
        max_interval: 30,
        min_interval: 30,
        slave_latency: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedBlock {
    pub pin: u8,
    pub num: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeymapBlock {
    pub locale: String,
    pub use_ascii: u8,
}

impl Default for KeymapBlock {
    fn default() -> Self {
        Self {
            locale: "US".to_string(),
            use_ascii: 0,
        }
    }
}
