#![allow(dead_code)] // Not every test binary uses every helper.

use keybridge_core::descriptor::{
    KeyPosition, KeyboardDescriptor, LayoutEntry, MatrixPins, PinNode, RgbLight, SplitBlock,
    SplitMatrixPins, UsbIdentity,
};

/// Layout name the builder populates by default.
pub const LAYOUT: &str = "LAYOUT";

/// Builder for KeyboardDescriptor to keep tests readable.
pub struct DescriptorBuilder {
    descriptor: KeyboardDescriptor,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        let mut descriptor = KeyboardDescriptor {
            keyboard_name: Some("testkb".to_string()),
            manufacturer: Some("acme".to_string()),
            usb: Some(UsbIdentity {
                vid: Some("0xFEED".to_string()),
                pid: Some("0x6060".to_string()),
            }),
            ..Default::default()
        };
        descriptor
            .layouts
            .insert(LAYOUT.to_string(), LayoutEntry::default());
        Self { descriptor }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.descriptor.keyboard_name = Some(name.to_string());
        self
    }

    pub fn no_name(mut self) -> Self {
        self.descriptor.keyboard_name = None;
        self
    }

    pub fn no_usb(mut self) -> Self {
        self.descriptor.usb = None;
        self
    }

    pub fn diode(mut self, direction: &str) -> Self {
        self.descriptor.diode_direction = Some(direction.to_string());
        self
    }

    pub fn rows_cols(self, rows: &[&str], cols: &[&str]) -> Self {
        self.matrix_pins(MatrixPins {
            rows: Some(named(rows)),
            cols: Some(named(cols)),
            ..Default::default()
        })
    }

    pub fn rows_cols_nullable(self, rows: &[Option<&str>], cols: &[Option<&str>]) -> Self {
        self.matrix_pins(MatrixPins {
            rows: Some(nullable(rows)),
            cols: Some(nullable(cols)),
            ..Default::default()
        })
    }

    pub fn direct(self, nodes: Vec<PinNode>) -> Self {
        self.matrix_pins(MatrixPins {
            direct: Some(nodes),
            ..Default::default()
        })
    }

    pub fn matrix_pins(mut self, pins: MatrixPins) -> Self {
        self.descriptor.matrix_pins = Some(pins);
        self
    }

    pub fn key(self, x: f64, y: f64, row: usize, col: usize) -> Self {
        self.layout_key(LAYOUT, x, y, row, col)
    }

    pub fn layout_key(mut self, layout: &str, x: f64, y: f64, row: usize, col: usize) -> Self {
        self.descriptor
            .layouts
            .entry(layout.to_string())
            .or_default()
            .layout
            .push(KeyPosition {
                matrix: Some([row, col]),
                x,
                y,
            });
        self
    }

    /// A key with no matrix pair, as broken documents sometimes carry.
    pub fn unwired_key(mut self, x: f64, y: f64) -> Self {
        self.descriptor
            .layouts
            .entry(LAYOUT.to_string())
            .or_default()
            .layout
            .push(KeyPosition { matrix: None, x, y });
        self
    }

    pub fn split(mut self) -> Self {
        self.descriptor.split = Some(SplitBlock::default());
        self
    }

    pub fn split_right(mut self, rows: &[&str], cols: &[&str]) -> Self {
        self.descriptor.split = Some(SplitBlock {
            matrix_pins: Some(SplitMatrixPins {
                right: Some(MatrixPins {
                    rows: Some(named(rows)),
                    cols: Some(named(cols)),
                    ..Default::default()
                }),
            }),
        });
        self
    }

    pub fn split_right_direct(mut self, nodes: Vec<PinNode>) -> Self {
        self.descriptor.split = Some(SplitBlock {
            matrix_pins: Some(SplitMatrixPins {
                right: Some(MatrixPins {
                    direct: Some(nodes),
                    ..Default::default()
                }),
            }),
        });
        self
    }

    pub fn rgblight(mut self, pin: Option<&str>, count: Option<u16>) -> Self {
        self.descriptor.rgblight = Some(RgbLight {
            pin: pin.map(str::to_string),
            led_count: count,
        });
        self
    }

    pub fn build(self) -> KeyboardDescriptor {
        self.descriptor
    }
}

fn named(names: &[&str]) -> Vec<Option<String>> {
    names.iter().map(|n| Some((*n).to_string())).collect()
}

fn nullable(names: &[Option<&str>]) -> Vec<Option<String>> {
    names.iter().map(|n| n.map(str::to_string)).collect()
}

pub fn pin(name: &str) -> PinNode {
    PinNode::Pin(Some(name.to_string()))
}

pub fn empty_pin() -> PinNode {
    PinNode::Pin(None)
}

pub fn group(nodes: Vec<PinNode>) -> PinNode {
    PinNode::Group(nodes)
}

/// Parse one serialized variant back into a JSON value for assertions.
pub fn parse_record(record: &str) -> serde_json::Value {
    serde_json::from_str(record).expect("variant should be valid JSON")
}

/// Two-key single-column board used by the worked conversion example.
pub fn two_row_board() -> KeyboardDescriptor {
    DescriptorBuilder::new()
        .rows_cols(&["D3", "D2"], &["B5"])
        .key(0.0, 0.0, 0, 0)
        .key(0.0, 1.0, 1, 0)
        .build()
}
