//! Lenient model of the source keyboard document.
//!
//! Descriptors come from the public keyboard catalogue (or a local file) and
//! carry far more fields than the converter reads, so everything unknown is
//! ignored and everything used is optional at the type level. Required-field
//! checks happen during compilation, where a missing block can surface as a
//! `MalformedDescriptor` with a usable message instead of a serde error.

use serde::Deserialize;
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyboardDescriptor {
    #[serde(default)]
    pub keyboard_name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub usb: Option<UsbIdentity>,
    #[serde(default)]
    pub diode_direction: Option<String>,
    #[serde(default)]
    pub matrix_pins: Option<MatrixPins>,
    #[serde(default)]
    pub layouts: HashMap<String, LayoutEntry>,
    #[serde(default)]
    pub split: Option<SplitBlock>,
    #[serde(default)]
    pub rgblight: Option<RgbLight>,
}

/// USB identity as the catalogue publishes it: hex strings like `"0xFEED"`,
/// passed through to the output verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsbIdentity {
    #[serde(default)]
    pub vid: Option<String>,
    #[serde(default)]
    pub pid: Option<String>,
}

/// Electrical wiring of one half. Either `direct` (one GPIO per switch) or a
/// `rows`/`cols` pair; `null` entries mark unpopulated lines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixPins {
    #[serde(default)]
    pub direct: Option<Vec<PinNode>>,
    #[serde(default)]
    pub rows: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub cols: Option<Vec<Option<String>>>,
}

/// One entry of a `direct` arrangement. The catalogue nests these per visual
/// row, at arbitrary depth.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PinNode {
    Pin(Option<String>),
    Group(Vec<PinNode>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutEntry {
    #[serde(default)]
    pub layout: Vec<KeyPosition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeyPosition {
    /// Electrical matrix cell this key occupies, as `[row, col]`.
    #[serde(default)]
    pub matrix: Option<[usize; 2]>,
    /// Visual position in key units. `y` may be fractional for staggered
    /// boards.
    pub x: f64,
    pub y: f64,
}

/// Marks the keyboard as a two-half design. The right half may wire its
/// matrix differently from the left.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SplitBlock {
    #[serde(default)]
    pub matrix_pins: Option<SplitMatrixPins>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SplitMatrixPins {
    #[serde(default)]
    pub right: Option<MatrixPins>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RgbLight {
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub led_count: Option<u16>,
}

/// Diode orientation vocabulary. Anything missing or unrecognized falls back
/// to `Col2Row`, matching the firmware default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum DiodeDirection {
    #[default]
    #[strum(serialize = "COL2ROW")]
    Col2Row,
    #[strum(serialize = "ROW2COL")]
    Row2Col,
}

impl DiodeDirection {
    /// Numeric code the firmware stores for the base direction.
    pub fn code(self) -> u8 {
        match self {
            DiodeDirection::Col2Row => 0,
            DiodeDirection::Row2Col => 1,
        }
    }

    /// Parse the descriptor's string form.
    pub fn from_descriptor(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}
