//! Radio command decoding
//!
//! Commands arrive as fixed-layout ASCII frames:
//!
//! ```text
//! offset 0..4   code, "MODE" or "POTS"
//! offset 4      separator
//! offset 5..10  channel number, 1-based, decimal
//! offset 10..   value, decimal (POTS only)
//! ```
//!
//! Numeric fields are scanned leniently: leading spaces are skipped, the
//! digit run stops at the first non-digit, and a field with no digits
//! reads as 0.

use core::fmt;

/// Size of a command frame on the wire
pub const FRAME_SIZE: usize = 16;

/// Mode change code
pub const CODE_MODE: &[u8; CODE_LEN] = b"MODE";
/// Potentiometer change code
pub const CODE_POTS: &[u8; CODE_LEN] = b"POTS";

const CODE_LEN: usize = 4;
const CHANNEL_OFFSET: usize = 5;
const VALUE_OFFSET: usize = 10;

/// Decoded radio command
///
/// `channel` is zero-based and not yet validated against the channel count,
/// so it may be negative (wire channel 0) or past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Advance the channel to its next mode
    ModeChange { channel: i32 },
    /// Raw potentiometer reading (0-1023) for the channel
    PotChange { channel: i32, value: u32 },
}

impl Command {
    /// Zero-based target channel
    pub const fn channel(&self) -> i32 {
        match self {
            Self::ModeChange { channel } | Self::PotChange { channel, .. } => *channel,
        }
    }
}

/// Error returned when a frame cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame is shorter than the code field
    TooShort,
    /// Code field is neither `MODE` nor `POTS`
    UnknownCode([u8; CODE_LEN]),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => f.write_str("frame too short"),
            Self::UnknownCode(code) => {
                f.write_str("unknown code \"")?;
                for byte in code {
                    write!(f, "{}", core::ascii::escape_default(*byte))?;
                }
                f.write_str("\"")
            }
        }
    }
}

/// Decode a command frame
///
/// The frame may be NUL-terminated; anything past [`FRAME_SIZE`] bytes is ignored.
pub fn decode(frame: &[u8]) -> Result<Command, DecodeError> {
    let frame = payload(frame);

    let channel_field = frame.get(CHANNEL_OFFSET..frame.len().min(VALUE_OFFSET));
    let (wire_channel, channel_end) = match channel_field {
        Some(field) => {
            let (number, end) = scan_number(field);
            (number, end.map(|end| CHANNEL_OFFSET + end))
        }
        None => (0, None),
    };

    let value = channel_end
        .and_then(|start| compact_value(frame, start))
        .unwrap_or_else(|| {
            frame
                .get(VALUE_OFFSET..)
                .map_or(0, |field| scan_number(field).0)
        });

    let Some(code) = frame.first_chunk::<CODE_LEN>() else {
        return Err(DecodeError::TooShort);
    };
    let channel = i32::try_from(wire_channel).map_or(i32::MAX, |wire| wire - 1);

    match code {
        CODE_MODE => Ok(Command::ModeChange { channel }),
        CODE_POTS => Ok(Command::PotChange { channel, value }),
        _ => Err(DecodeError::UnknownCode(*code)),
    }
}

/// Bytes of the frame up to the size limit or the first NUL
fn payload(frame: &[u8]) -> &[u8] {
    let frame = &frame[..frame.len().min(FRAME_SIZE)];
    match frame.iter().position(|&byte| byte == 0) {
        Some(end) => &frame[..end],
        None => frame,
    }
}

/// Value of a compact frame whose value starts inside the channel field
///
/// Only spaces may sit between the channel digits at `start` and the value,
/// and the value digits must run past offset 10. Anything else leaves the
/// value at its fixed offset.
fn compact_value(frame: &[u8], start: usize) -> Option<u32> {
    let (number, end) = scan_number(frame.get(start..)?);
    (start + end? > VALUE_OFFSET).then_some(number)
}

/// Scan a decimal number, skipping leading spaces
///
/// Returns the number and, if any digit was found, the offset just past
/// the last digit.
fn scan_number(field: &[u8]) -> (u32, Option<usize>) {
    let start = field
        .iter()
        .position(|&byte| byte != b' ')
        .unwrap_or(field.len());

    let mut number: u32 = 0;
    let mut end = None;
    for (offset, &byte) in field.iter().enumerate().skip(start) {
        if !byte.is_ascii_digit() {
            break;
        }
        number = number
            .saturating_mul(10)
            .saturating_add(u32::from(byte - b'0'));
        end = Some(offset + 1);
    }
    (number, end)
}
