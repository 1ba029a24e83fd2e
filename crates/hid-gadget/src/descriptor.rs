//! HID report descriptor for the absolute pointer.
//!
//! The gadget function must be created with this descriptor (configfs
//! `report_desc`) and `report_length` of [`REPORT_LEN`] so the host parses
//! the reports written by [`crate::ReportWriter`].

use gerbil_model::REPORT_LEN;

/// Two buttons, six padding bits, then 16-bit absolute X and Y in `[0, 32767]`.
#[rustfmt::skip]
pub const REPORT_DESCRIPTOR: [u8; 52] = [
    0x05, 0x01,         // Usage Page (Generic Desktop)
    0x09, 0x02,         // Usage (Mouse)
    0xA1, 0x01,         // Collection (Application)
    0x09, 0x01,         //   Usage (Pointer)
    0xA1, 0x00,         //   Collection (Physical)
    0x05, 0x09,         //     Usage Page (Button)
    0x19, 0x01,         //     Usage Minimum (1)
    0x29, 0x02,         //     Usage Maximum (2)
    0x15, 0x00,         //     Logical Minimum (0)
    0x25, 0x01,         //     Logical Maximum (1)
    0x95, 0x02,         //     Report Count (2)
    0x75, 0x01,         //     Report Size (1)
    0x81, 0x02,         //     Input (Data, Var, Abs)
    0x95, 0x01,         //     Report Count (1)
    0x75, 0x06,         //     Report Size (6)
    0x81, 0x03,         //     Input (Const)
    0x05, 0x01,         //     Usage Page (Generic Desktop)
    0x09, 0x30,         //     Usage (X)
    0x09, 0x31,         //     Usage (Y)
    0x16, 0x00, 0x00,   //     Logical Minimum (0)
    0x26, 0xFF, 0x7F,   //     Logical Maximum (32767)
    0x75, 0x10,         //     Report Size (16)
    0x95, 0x02,         //     Report Count (2)
    0x81, 0x02,         //     Input (Data, Var, Abs)
    0xC0,               //   End Collection
    0xC0,               // End Collection
];

/// Values for the configfs attributes of the HID function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GadgetFunctionAttrs {
    pub protocol: u8,
    pub subclass: u8,
    pub report_length: usize,
}

/// Mouse protocol, no boot subclass (boot mice are relative-only).
pub const FUNCTION_ATTRS: GadgetFunctionAttrs = GadgetFunctionAttrs {
    protocol: 2,
    subclass: 0,
    report_length: REPORT_LEN,
};

/// Hex rendering used by `gerbil descriptor`, e.g. `05 01 09 02 ...`.
pub fn descriptor_hex() -> String {
    REPORT_DESCRIPTOR
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sum of the Report Size x Report Count pairs declared for Input items, in bits.
fn declared_input_bits(descriptor: &[u8]) -> usize {
    let mut size = 0usize;
    let mut count = 0usize;
    let mut bits = 0usize;
    let mut i = 0;

    while i < descriptor.len() {
        let prefix = descriptor[i];
        let len = match prefix & 0b11 {
            3 => 4,
            n => n as usize,
        };
        let data = &descriptor[i + 1..(i + 1 + len).min(descriptor.len())];
        let value = data
            .iter()
            .rev()
            .fold(0usize, |acc, b| (acc << 8) | *b as usize);

        match prefix & 0b1111_1100 {
            0x74 => size = value,
            0x94 => count = value,
            0x80 => bits += size * count,
            _ => {}
        }
        i += 1 + len;
    }

    bits
}

/// Whether the descriptor declares exactly one [`REPORT_LEN`]-byte input report.
pub fn matches_report_len() -> bool {
    declared_input_bits(&REPORT_DESCRIPTOR) == REPORT_LEN * 8
}

#[cfg(test)]
mod tests {
    use super::*;
    use gerbil_model::HID_AXIS_MAX;

    #[test]
    fn test_descriptor_declares_five_byte_report() {
        assert_eq!(declared_input_bits(&REPORT_DESCRIPTOR), 40);
        assert!(matches_report_len());
    }

    #[test]
    fn test_axis_range_matches_screen_range() {
        let max = u16::from_le_bytes([REPORT_DESCRIPTOR[42], REPORT_DESCRIPTOR[43]]);
        assert_eq!(REPORT_DESCRIPTOR[41], 0x26);
        assert_eq!(max, HID_AXIS_MAX);
    }

    #[test]
    fn test_collections_are_balanced() {
        let opens = REPORT_DESCRIPTOR.iter().filter(|&&b| b == 0xA1).count();
        let closes = REPORT_DESCRIPTOR.iter().filter(|&&b| b == 0xC0).count();
        assert_eq!(opens, 2);
        assert_eq!(closes, 2);
    }

    #[test]
    fn test_hex_rendering() {
        let hex = descriptor_hex();
        assert!(hex.starts_with("05 01 09 02 a1 01"));
        assert!(hex.ends_with("c0 c0"));
        assert_eq!(hex.split(' ').count(), REPORT_DESCRIPTOR.len());
    }
}
