//! HID pointer report and its wire format.
//!
//! ```text
//! byte 0     buttons (bit0 = primary, bit1 = secondary, bits 2-7 zero)
//! bytes 1-2  cursor x, u16 little-endian
//! bytes 3-4  cursor y, u16 little-endian
//! ```

use crate::state::{CursorState, GestureState};

/// Length of an encoded report in bytes.
pub const REPORT_LEN: usize = 5;

const PRIMARY_BIT: u8 = 0b01;
const SECONDARY_BIT: u8 = 0b10;

/// One absolute pointer report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HidReport {
    pub buttons: u8,
    pub x: u16,
    pub y: u16,
}

impl HidReport {
    /// Pack the held button state and cursor position into a report.
    pub fn encode(state: &GestureState, cursor: &CursorState) -> Self {
        let mut buttons = 0;
        if state.primary_pressed {
            buttons |= PRIMARY_BIT;
        }
        if state.secondary_pressed {
            buttons |= SECONDARY_BIT;
        }

        Self {
            buttons,
            x: cursor.x,
            y: cursor.y,
        }
    }

    /// Wire representation.
    pub fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let [x_lo, x_hi] = self.x.to_le_bytes();
        let [y_lo, y_hi] = self.y.to_le_bytes();
        [self.buttons, x_lo, x_hi, y_lo, y_hi]
    }

    /// Parse a wire report; used when inspecting recorded traffic.
    pub fn from_bytes(bytes: [u8; REPORT_LEN]) -> Self {
        Self {
            buttons: bytes[0],
            x: u16::from_le_bytes([bytes[1], bytes[2]]),
            y: u16::from_le_bytes([bytes[3], bytes[4]]),
        }
    }

    pub fn primary_pressed(&self) -> bool {
        self.buttons & PRIMARY_BIT != 0
    }

    pub fn secondary_pressed(&self) -> bool {
        self.buttons & SECONDARY_BIT != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_reserved_button_bits_stay_clear(
            primary in any::<bool>(),
            secondary in any::<bool>(),
            x in 0u16..=32767,
            y in 0u16..=32767,
        ) {
            let state = GestureState { primary_pressed: primary, secondary_pressed: secondary };
            let bytes = HidReport::encode(&state, &CursorState::new(x, y)).to_bytes();
            prop_assert_eq!(bytes[0] & 0b1111_1100, 0);
            prop_assert_eq!(bytes[0] & 1 == 1, primary);
            prop_assert_eq!(u16::from_le_bytes([bytes[1], bytes[2]]), x);
            prop_assert_eq!(u16::from_le_bytes([bytes[3], bytes[4]]), y);
        }
    }

    #[test]
    fn test_encode_primary_only() {
        let state = GestureState {
            primary_pressed: true,
            secondary_pressed: false,
        };
        let report = HidReport::encode(&state, &CursorState::new(300, 10));
        assert_eq!(report.to_bytes(), [0x01, 0x2C, 0x01, 0x0A, 0x00]);
    }

    #[test]
    fn test_button_bits() {
        let both = GestureState {
            primary_pressed: true,
            secondary_pressed: true,
        };
        let secondary = GestureState {
            primary_pressed: false,
            secondary_pressed: true,
        };
        let cursor = CursorState::ORIGIN;

        assert_eq!(HidReport::encode(&both, &cursor).buttons, 0b11);
        assert_eq!(HidReport::encode(&secondary, &cursor).buttons, 0b10);
        assert_eq!(HidReport::encode(&GestureState::RELEASED, &cursor).buttons, 0);
    }

    #[test]
    fn test_axis_max_encoding() {
        let report = HidReport::encode(&GestureState::RELEASED, &CursorState::new(32767, 32767));
        assert_eq!(report.to_bytes(), [0x00, 0xFF, 0x7F, 0xFF, 0x7F]);
    }

    #[test]
    fn test_parse_recorded_report() {
        let report = HidReport::from_bytes([0x02, 0x34, 0x12, 0x00, 0x01]);
        assert!(!report.primary_pressed());
        assert!(report.secondary_pressed());
        assert_eq!(report.x, 0x1234);
        assert_eq!(report.y, 0x0100);
    }
}
