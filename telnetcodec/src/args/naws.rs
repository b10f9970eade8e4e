//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Negotiate About Window Size
//!

use crate::args::{DecodeOutcome, expect_byte};
use crate::consts;
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

/// Size of a complete `IAC SB NAWS w_hi w_lo h_hi h_lo IAC SE` unit.
pub const UNIT_LEN: usize = 9;

/// Represents the Negotiate About Window Size (NAWS) option data.
///
/// # Format
/// The window size is encoded as four bytes in big-endian format:
/// - 2 bytes for width (columns)
/// - 2 bytes for height (rows)
///
/// # Example
/// ```
/// use iacstream_telnetcodec::naws::WindowSize;
///
/// let size = WindowSize::new(80, 24);
/// assert_eq!(size.width, 80);
/// assert_eq!(size.height, 24);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// The number of columns in the terminal window
    pub width: u16,
    /// The number of rows in the terminal window
    pub height: u16,
}

impl WindowSize {
    /// Creates a new `WindowSize` with the specified width and height.
    pub fn new(width: u16, height: u16) -> Self {
        WindowSize { width, height }
    }

    /// Decodes a NAWS unit from the front of `src`.
    ///
    /// The unit has a fixed length of [`UNIT_LEN`] bytes and is validated
    /// positionally. A framing mismatch still consumes all nine bytes.
    ///
    /// # Example
    /// ```
    /// use iacstream_telnetcodec::DecodeOutcome;
    /// use iacstream_telnetcodec::naws::WindowSize;
    ///
    /// let src = [255, 250, 31, 0x00, 0x50, 0x00, 0x18, 255, 240];
    /// assert_eq!(
    ///     WindowSize::decode(&src),
    ///     DecodeOutcome::Complete { value: WindowSize::new(80, 24), consumed: 9 }
    /// );
    /// ```
    pub fn decode(src: &[u8]) -> DecodeOutcome<WindowSize> {
        if src.len() < UNIT_LEN {
            return DecodeOutcome::Incomplete;
        }
        let framing = [
            (0, consts::IAC),
            (1, consts::SB),
            (2, consts::option::NAWS),
            (7, consts::IAC),
            (8, consts::SE),
        ];
        for (offset, expected) in framing {
            if let Err(error) = expect_byte(src, offset, expected) {
                return DecodeOutcome::Malformed {
                    error,
                    consumed: UNIT_LEN,
                };
            }
        }
        DecodeOutcome::Complete {
            value: WindowSize {
                width: BigEndian::read_u16(&src[3..5]),
                height: BigEndian::read_u16(&src[5..7]),
            },
            consumed: UNIT_LEN,
        }
    }

    /// Writes the four body bytes: width then height, both big-endian.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u16::<BigEndian>(self.width)?;
        writer.write_u16::<BigEndian>(self.height)?;
        Ok(4)
    }
}

impl Default for WindowSize {
    /// A standard 80x24 terminal.
    fn default() -> Self {
        WindowSize {
            width: 80,
            height: 24,
        }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.width, self.height)
    }
}
