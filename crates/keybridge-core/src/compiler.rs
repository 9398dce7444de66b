//! Conversion from a keyboard descriptor to firmware configuration records.
//!
//! `compile` is a pure function over its two inputs: it resolves pin names,
//! rebuilds the firmware's flat layout table from visual key positions,
//! infers the diode code, and expands split keyboards into their topology
//! variants. Any failure aborts the whole conversion; there is no partial
//! output.

use crate::descriptor::{
    DiodeDirection, KeyPosition, KeyboardDescriptor, MatrixPins, PinNode, RgbLight,
};
use crate::error::{CompileError, CompileResult};
use crate::pins;
use crate::record::{
    ConfigBody, ConfigRecord, ConnectionParams, DeviceInfo, KeymapBlock, LedBlock, MatrixBlock,
    OperatingMode, CONFIG_VERSION, DEBOUNCE_DEFAULT, DIODE_FOLDED_FLAG, DIODE_MERGED_FLAG,
    ROW_BREAK,
};
use strum_macros::{Display, EnumString};
use tracing::debug;

/// Names for the records one conversion can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    Default,
    Master,
    Slave,
    Lpme,
}

/// The serialized records of one conversion, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    entries: Vec<(Variant, String)>,
}

impl VariantSet {
    fn single(record: String) -> Self {
        Self {
            entries: vec![(Variant::Default, record)],
        }
    }

    fn split(master: String, slave: String, lpme: Option<String>) -> Self {
        let mut entries = vec![(Variant::Master, master), (Variant::Slave, slave)];
        if let Some(lpme) = lpme {
            entries.push((Variant::Lpme, lpme));
        }
        Self { entries }
    }

    pub fn get(&self, variant: Variant) -> Option<&str> {
        self.entries
            .iter()
            .find(|(v, _)| *v == variant)
            .map(|(_, record)| record.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variant, &str)> {
        self.entries.iter().map(|(v, record)| (*v, record.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct ResolvedMatrix {
    row_pins: Vec<u8>,
    col_pins: Vec<u8>,
    direct: bool,
}

/// Convert one named layout of a descriptor into its configuration records.
///
/// A board without a `split` block yields a single `default` record. A split
/// board yields `master` and `slave` records, plus an `lpme` record when
/// neither half occupies the UART pins the halves would otherwise link over.
pub fn compile(descriptor: &KeyboardDescriptor, layout_name: &str) -> CompileResult<VariantSet> {
    let matrix_pins = descriptor.matrix_pins.as_ref().ok_or_else(|| {
        CompileError::MalformedDescriptor("matrix_pins block is missing".into())
    })?;
    let resolved = resolve_matrix(matrix_pins)?;

    let keys = descriptor
        .layouts
        .get(layout_name)
        .map(|entry| entry.layout.as_slice())
        .ok_or_else(|| CompileError::LayoutNotFound(layout_name.to_string()))?;
    if keys.is_empty() {
        return Err(CompileError::MalformedDescriptor(format!(
            "layout '{layout_name}' defines no key positions"
        )));
    }
    let layout_table = build_layout_table(keys)?;

    let name = descriptor
        .keyboard_name
        .as_deref()
        .ok_or_else(|| CompileError::MalformedDescriptor("keyboard_name is missing".into()))?;
    let usb = descriptor
        .usb
        .as_ref()
        .ok_or_else(|| CompileError::MalformedDescriptor("usb block is missing".into()))?;
    let vid = usb
        .vid
        .clone()
        .ok_or_else(|| CompileError::MalformedDescriptor("usb.vid is missing".into()))?;
    let pid = usb
        .pid
        .clone()
        .ok_or_else(|| CompileError::MalformedDescriptor("usb.pid is missing".into()))?;

    let direction = DiodeDirection::from_descriptor(descriptor.diode_direction.as_deref());
    let mut diode_code = direction.code();
    if !resolved.direct
        && descriptor.split.is_none()
        && resolved.row_pins.len() * resolved.col_pins.len() < keys.len()
    {
        debug!("more keys than electrical intersections, marking the matrix folded");
        diode_code += DIODE_FOLDED_FLAG;
    }

    let device_rows = pin_count(&resolved.row_pins, "row")?;
    let device_cols = pin_count(&resolved.col_pins, "col")?;

    let record = ConfigRecord {
        config: ConfigBody {
            version: CONFIG_VERSION,
            device_info: DeviceInfo {
                vid,
                pid,
                name: name.to_string(),
                manufacturer: descriptor.manufacturer.clone().unwrap_or_default(),
                description: String::new(),
            },
            matrix: MatrixBlock {
                rows: device_rows,
                cols: device_cols,
                device_rows,
                device_cols,
                debounce: DEBOUNCE_DEFAULT,
                is_left_hand: 1,
                diode_direction: diode_code,
                row_pins: resolved.row_pins,
                col_pins: resolved.col_pins,
                layout: layout_table,
            },
            mode: OperatingMode::Single,
            startup: 1,
            peripheral: ConnectionParams::PERIPHERAL,
            central: ConnectionParams::CENTRAL,
            led: resolve_led(descriptor.rgblight.as_ref())?,
            keymap: KeymapBlock::default(),
            reserved: [0; 8],
        },
    };

    let Some(split) = descriptor.split.as_ref() else {
        return Ok(VariantSet::single(record.to_json()?));
    };

    // The unmerged single-board form doubles as the template for the
    // shared-bus variant, so keep a copy before flipping any split state.
    let template = record.clone();

    let mut master = record;
    master.config.mode = OperatingMode::SplitMaster;

    let mut slave = master.clone();
    slave.config.mode = OperatingMode::SplitSlave;
    slave.config.matrix.is_left_hand = 0;

    if let Some(right) = split.matrix_pins.as_ref().and_then(|p| p.right.as_ref()) {
        debug!("right half declares its own pins, re-resolving");
        let right = resolve_matrix(right)?;
        slave.config.matrix.device_rows = pin_count(&right.row_pins, "row")?;
        slave.config.matrix.device_cols = pin_count(&right.col_pins, "col")?;
        slave.config.matrix.row_pins = right.row_pins;
        slave.config.matrix.col_pins = right.col_pins;
    }

    // Both halves report through one logical matrix: stack the slave's rows
    // under the master's, or its columns beside, depending on the wiring.
    match direction {
        DiodeDirection::Col2Row => {
            let merged = merged_dimension(
                master.config.matrix.rows,
                slave.config.matrix.device_rows,
                "row",
            )?;
            master.config.matrix.rows = merged;
            slave.config.matrix.rows = merged;
        }
        DiodeDirection::Row2Col => {
            let merged = merged_dimension(
                master.config.matrix.cols,
                slave.config.matrix.device_cols,
                "col",
            )?;
            master.config.matrix.cols = merged;
            slave.config.matrix.cols = merged;
        }
    }

    if uses_serial_pins(&master.config.matrix) || uses_serial_pins(&slave.config.matrix) {
        debug!("a half drives its matrix over the UART pins, skipping the merged variant");
        return Ok(VariantSet::split(master.to_json()?, slave.to_json()?, None));
    }

    let mut lpme = template;
    lpme.config
        .matrix
        .row_pins
        .extend_from_slice(&slave.config.matrix.row_pins);
    lpme.config
        .matrix
        .col_pins
        .extend_from_slice(&slave.config.matrix.col_pins);
    lpme.config.matrix.diode_direction += DIODE_MERGED_FLAG;

    Ok(VariantSet::split(
        master.to_json()?,
        slave.to_json()?,
        Some(lpme.to_json()?),
    ))
}

fn resolve_matrix(pins: &MatrixPins) -> CompileResult<ResolvedMatrix> {
    if let Some(direct) = pins.direct.as_ref() {
        let mut names = Vec::new();
        flatten_direct(direct, &mut names);
        return Ok(ResolvedMatrix {
            // Direct wiring has no row lines; the firmware addresses every
            // switch as row zero.
            row_pins: vec![pins::UNUSED_PIN],
            col_pins: resolve_pin_names(&names)?,
            direct: true,
        });
    }

    match (pins.rows.as_ref(), pins.cols.as_ref()) {
        (Some(rows), Some(cols)) => Ok(ResolvedMatrix {
            row_pins: resolve_pin_names(rows)?,
            col_pins: resolve_pin_names(cols)?,
            direct: false,
        }),
        _ => Err(CompileError::MalformedDescriptor(
            "matrix_pins must declare either direct wiring or both rows and cols".into(),
        )),
    }
}

fn flatten_direct(nodes: &[PinNode], names: &mut Vec<Option<String>>) {
    for node in nodes {
        match node {
            PinNode::Pin(name) => names.push(name.clone()),
            PinNode::Group(inner) => flatten_direct(inner, names),
        }
    }
}

fn resolve_pin_names(names: &[Option<String>]) -> CompileResult<Vec<u8>> {
    names
        .iter()
        .map(|name| match name {
            Some(name) => {
                pins::lookup(name).ok_or_else(|| CompileError::UnresolvedPin(name.clone()))
            }
            None => Ok(pins::UNUSED_PIN),
        })
        .collect()
}

// The record stores per-axis dimensions as single bytes.
fn pin_count(resolved: &[u8], axis: &str) -> CompileResult<u8> {
    u8::try_from(resolved.len()).map_err(|_| {
        CompileError::MalformedDescriptor(format!(
            "{} {axis} pins exceed the record limit of 255",
            resolved.len()
        ))
    })
}

fn merged_dimension(base: u8, added: u8, axis: &str) -> CompileResult<u8> {
    base.checked_add(added).ok_or_else(|| {
        CompileError::MalformedDescriptor(format!(
            "merged halves exceed the record limit of 255 {axis}s"
        ))
    })
}

fn uses_serial_pins(matrix: &MatrixBlock) -> bool {
    matrix
        .row_pins
        .iter()
        .chain(matrix.col_pins.iter())
        .any(|&pin| pins::is_serial(pin))
}

/// Rebuild the firmware's flat keymap table from visual key positions.
///
/// Keys are grouped into unit-height bands swept from the topmost (possibly
/// fractional) `y`, ordered left to right within a band, and emitted as
/// 1-based matrix-cell indices with a `ROW_BREAK` between bands. The result
/// reads like the physical board, top to bottom.
fn build_layout_table(keys: &[KeyPosition]) -> CompileResult<Vec<u16>> {
    let mut cells = Vec::with_capacity(keys.len());
    for key in keys {
        let [row, col] = key.matrix.ok_or_else(|| {
            CompileError::MalformedDescriptor(format!(
                "key at ({}, {}) has no matrix coordinates",
                key.x, key.y
            ))
        })?;
        // Coordinates this large can never yield a representable cell, and
        // bounding them here keeps the index arithmetic below overflow-free.
        if row >= u16::MAX as usize || col >= u16::MAX as usize {
            return Err(CompileError::MalformedDescriptor(format!(
                "matrix cell ({row}, {col}) does not fit the layout table"
            )));
        }
        cells.push((key.x, key.y, row, col));
    }

    // The electrical column count is not spelled out anywhere; recover it
    // from the widest column index the layout references.
    let col_count = cells.iter().map(|&(_, _, _, col)| col).max().unwrap_or(0) + 1;

    let min_y = cells
        .iter()
        .map(|&(_, y, _, _)| y)
        .fold(f64::INFINITY, f64::min);
    let max_y = cells
        .iter()
        .map(|&(_, y, _, _)| y)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut table = Vec::with_capacity(cells.len() * 2);
    let mut band = min_y;
    while band <= max_y {
        let mut row_keys: Vec<_> = cells
            .iter()
            .filter(|&&(_, y, _, _)| y >= band && y < band + 1.0)
            .collect();
        if !row_keys.is_empty() {
            row_keys.sort_by(|a, b| a.0.total_cmp(&b.0));
            for &&(_, _, row, col) in &row_keys {
                let cell = u16::try_from(row * col_count + col + 1).map_err(|_| {
                    CompileError::MalformedDescriptor(format!(
                        "matrix cell ({row}, {col}) does not fit the layout table"
                    ))
                })?;
                table.push(cell);
            }
            table.push(ROW_BREAK);
        }
        band += 1.0;
    }
    table.pop();
    Ok(table)
}

fn resolve_led(rgblight: Option<&RgbLight>) -> CompileResult<LedBlock> {
    let Some(rgblight) = rgblight else {
        return Ok(LedBlock {
            pin: pins::LED_PIN_NONE,
            num: 0,
        });
    };
    let pin = match rgblight.pin.as_deref() {
        Some(name) => {
            pins::lookup(name).ok_or_else(|| CompileError::UnresolvedPin(name.to_string()))?
        }
        None => pins::LED_PIN_NONE,
    };
    Ok(LedBlock {
        pin,
        num: rgblight.led_count.unwrap_or(0),
    })
}
