//! Pin-name resolution for the target controller.
//!
//! The converter targets a BLE drop-in replacement for the Pro Micro, so the
//! only pin vocabulary it accepts is the Pro Micro silk-screen naming (`D3`,
//! `B5`, ...). Each name maps to the index the firmware uses to address that
//! pin; a name outside this table means the keyboard cannot run on this
//! controller family at all.

/// Pro Micro pin name to controller pin index.
pub const PIN_TABLE: [(&str, u8); 18] = [
    ("D3", 1),
    ("D2", 2),
    ("D1", 5),
    ("D0", 6),
    ("D4", 7),
    ("C6", 8),
    ("D7", 9),
    ("E6", 10),
    ("B4", 11),
    ("B5", 12),
    ("B6", 13),
    ("B2", 14),
    ("B3", 15),
    ("B1", 16),
    ("F7", 17),
    ("F6", 18),
    ("F5", 19),
    ("F4", 20),
];

/// Index written for unpopulated matrix positions (`null` in the source
/// document).
pub const UNUSED_PIN: u8 = 0;

/// LED pin value meaning no LED strip is attached.
pub const LED_PIN_NONE: u8 = 255;

/// Indices of the UART lines (D1/D0) that link split halves. A half driving
/// its matrix through either of them cannot join a shared merged bus.
pub const SERIAL_PINS: [u8; 2] = [5, 6];

/// Look up the controller index for a Pro Micro pin name. Case sensitive,
/// exactly as the names appear on the silk screen.
pub fn lookup(name: &str) -> Option<u8> {
    PIN_TABLE
        .iter()
        .find(|(pin, _)| *pin == name)
        .map(|(_, index)| *index)
}

pub fn is_serial(index: u8) -> bool {
    SERIAL_PINS.contains(&index)
}
