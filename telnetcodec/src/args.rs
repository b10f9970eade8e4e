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

//! Sub-negotiation payloads and their decoders.
//!
//! Every decoder is handed the pending input positioned at the `IAC` that
//! opens the unit (`IAC SB OPTION ...`) and answers with a [`DecodeOutcome`].
//! Decoders never consume on [`DecodeOutcome::Incomplete`], so the caller can
//! retry from the same start once more bytes arrive.

use crate::args::environ::Environment;
use crate::args::naws::WindowSize;
use crate::args::ttype::TerminalType;
use crate::result::{CodecError, CodecResult, DecodeError};
use crate::{TelnetOption, consts};
use bytes::{BufMut, Bytes};
use std::fmt::Formatter;

pub mod environ;
pub mod naws;
pub mod ttype;

/// Length of the `IAC SB OPTION` prefix shared by every sub-negotiation.
pub(crate) const HEADER_LEN: usize = 3;

/// Result of attempting to decode one unit from the front of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeOutcome<T> {
    /// A unit was decoded from the first `consumed` bytes.
    Complete {
        /// The decoded value
        value: T,
        /// Bytes to remove from the front of the input
        consumed: usize,
    },
    /// More input is required; nothing may be consumed.
    Incomplete,
    /// The unit is malformed. `consumed` bytes are still removed so decoding
    /// can make progress.
    Malformed {
        /// Why the unit was rejected
        error: DecodeError,
        /// Bytes to remove from the front of the input
        consumed: usize,
    },
}

impl<T> DecodeOutcome<T> {
    /// Transforms the decoded value, keeping the consumption unchanged.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> DecodeOutcome<U> {
        match self {
            DecodeOutcome::Complete { value, consumed } => DecodeOutcome::Complete {
                value: f(value),
                consumed,
            },
            DecodeOutcome::Incomplete => DecodeOutcome::Incomplete,
            DecodeOutcome::Malformed { error, consumed } => {
                DecodeOutcome::Malformed { error, consumed }
            }
        }
    }
}

/// Locates the `IAC SE` terminator at or after `from`, returning the offset of
/// its `IAC`. Escaped `IAC IAC` pairs are stepped over so a literal 0xFF
/// followed by 0xF0 inside a body is not mistaken for the end.
///
/// Any other byte after an `IAC` means the body was cut short by a new
/// command; everything before that `IAC` is reported as malformed so the
/// command that follows is decoded normally. Without a terminator the unit
/// waits, bounded by `limit`.
pub(crate) fn find_terminator<T>(src: &[u8], from: usize, limit: usize) -> Result<usize, DecodeOutcome<T>> {
    let mut index = from;
    while index + 1 < src.len() {
        if src[index] == consts::IAC {
            match src[index + 1] {
                consts::SE => return Ok(index),
                consts::IAC => {
                    index += 2;
                    continue;
                }
                found => {
                    return Err(DecodeOutcome::Malformed {
                        error: DecodeError::InvalidFraming {
                            offset: index + 1,
                            expected: consts::SE,
                            found,
                        },
                        consumed: index,
                    });
                }
            }
        }
        index += 1;
    }
    Err(unterminated(src, limit))
}

/// Outcome for a body-scanning decoder whose terminator is not buffered yet.
///
/// Waits while the pending unit fits within `limit`; beyond it, reports an
/// overflow and consumes just the header.
fn unterminated<T>(src: &[u8], limit: usize) -> DecodeOutcome<T> {
    if src.len() > limit {
        DecodeOutcome::Malformed {
            error: DecodeError::Overflow { limit },
            consumed: HEADER_LEN,
        }
    } else {
        DecodeOutcome::Incomplete
    }
}

/// Collapses escaped `IAC IAC` pairs in a sub-negotiation body.
pub(crate) fn unescape_iac(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len());
    let mut iter = body.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        if byte == consts::IAC && iter.peek() == Some(&consts::IAC) {
            iter.next();
        }
        out.push(byte);
    }
    out
}

/// Checks the byte at `offset` of a unit against its expected framing value.
pub(crate) fn expect_byte(src: &[u8], offset: usize, expected: u8) -> Result<(), DecodeError> {
    let found = src[offset];
    if found == expected {
        Ok(())
    } else {
        Err(DecodeError::InvalidFraming {
            offset,
            expected,
            found,
        })
    }
}

/// Bytes decoded as ASCII, keeping any high-bit byte as its Latin-1 character.
pub(crate) fn ascii_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Inverse of [`ascii_string`]: characters beyond Latin-1 become `?`.
pub(crate) fn latin1_bytes(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

///
/// Telnet Subnegotiation Argument
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetArgument {
    /// Window dimensions reported through NAWS.
    WindowSize(WindowSize),
    /// Terminal name reported through TTYPE IS.
    TerminalType(TerminalType),
    /// Variables reported through NEW-ENVIRON IS or INFO.
    Environment(Environment),
    /// A sub-negotiation with no specialised decoder; the bytes span the whole
    /// unit from `IAC SB` through `IAC SE`.
    Raw(TelnetOption, Bytes),
}

impl TelnetArgument {
    /// Decodes the sub-negotiation at the front of `src`, choosing the decoder
    /// by option code and falling back to [`TelnetArgument::Raw`].
    ///
    /// Input shorter than `IAC SB OPTION` is incomplete; `limit` bounds how
    /// long a unit may grow while its terminator is missing.
    pub fn decode(src: &[u8], limit: usize) -> DecodeOutcome<TelnetArgument> {
        if src.len() < HEADER_LEN {
            return DecodeOutcome::Incomplete;
        }
        match src[2] {
            consts::option::NAWS => WindowSize::decode(src).map(TelnetArgument::WindowSize),
            consts::option::TTYPE => {
                TerminalType::decode(src, limit).map(TelnetArgument::TerminalType)
            }
            consts::option::NEW_ENVIRONMENT => {
                Environment::decode(src, limit).map(TelnetArgument::Environment)
            }
            option => match find_terminator(src, HEADER_LEN, limit) {
                Ok(end) => DecodeOutcome::Complete {
                    value: TelnetArgument::Raw(
                        TelnetOption::from_u8(option),
                        Bytes::copy_from_slice(&src[..end + 2]),
                    ),
                    consumed: end + 2,
                },
                Err(outcome) => outcome,
            },
        }
    }

    /// Returns the `TelnetOption` this argument belongs to.
    pub fn option(&self) -> TelnetOption {
        match self {
            TelnetArgument::WindowSize(_) => TelnetOption::NAWS,
            TelnetArgument::TerminalType(_) => TelnetOption::TTYPE,
            TelnetArgument::Environment(_) => TelnetOption::NewEnvironment,
            TelnetArgument::Raw(option, _) => *option,
        }
    }

    /// Encodes this argument as a complete `IAC SB OPTION ... IAC SE` unit.
    ///
    /// Terminal type and environment bodies have their `IAC` bytes doubled.
    /// A window size is always four value bytes, matching the fixed nine byte
    /// unit the decoder reads. A [`TelnetArgument::Raw`] unit already carries
    /// its framing and is written verbatim, provided it starts with
    /// `IAC SB <option>` for its own option and ends with `IAC SE`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use iacstream_telnetcodec::TelnetArgument;
    /// use iacstream_telnetcodec::naws::WindowSize;
    ///
    /// let arg = TelnetArgument::WindowSize(WindowSize::new(80, 24));
    /// let mut buffer = BytesMut::new();
    /// let written = arg.encode(&mut buffer)?;
    /// assert_eq!(&buffer[..], &[255, 250, 31, 0, 80, 0, 24, 255, 240]);
    /// assert_eq!(written, 9);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> CodecResult<usize> {
        let mut body = Vec::new();
        let escape = !matches!(self, TelnetArgument::WindowSize(_));
        match self {
            TelnetArgument::WindowSize(inner) => inner.write(&mut body)?,
            TelnetArgument::TerminalType(inner) => inner.write(&mut body)?,
            TelnetArgument::Environment(inner) => inner.write(&mut body)?,
            TelnetArgument::Raw(option, unit) => {
                let framed = unit.len() >= HEADER_LEN + 2
                    && unit[..HEADER_LEN] == [consts::IAC, consts::SB, option.to_u8()]
                    && unit.ends_with(&[consts::IAC, consts::SE]);
                if !framed {
                    return Err(CodecError::UnframedSubnegotiation {
                        option: option.to_u8(),
                        length: unit.len(),
                    });
                }
                dst.put_slice(unit);
                return Ok(unit.len());
            }
        };
        dst.put_slice(&[consts::IAC, consts::SB, self.option().to_u8()]);
        let mut written = HEADER_LEN + 2;
        for byte in body {
            if escape && byte == consts::IAC {
                dst.put_u8(consts::IAC);
                written += 1;
            }
            dst.put_u8(byte);
            written += 1;
        }
        dst.put_slice(&[consts::IAC, consts::SE]);
        Ok(written)
    }
}

impl std::fmt::Display for TelnetArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetArgument::WindowSize(v) => write!(f, "{v}"),
            TelnetArgument::TerminalType(v) => write!(f, "{v}"),
            TelnetArgument::Environment(v) => write!(f, "{v}"),
            TelnetArgument::Raw(o, v) => write!(f, "{o}-{v:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn terminator_skips_escaped_iac() {
        let src = [consts::IAC, consts::SB, 201, consts::IAC, consts::IAC, consts::SE, b'x', consts::IAC, consts::SE];
        assert_eq!(find_terminator::<()>(&src, HEADER_LEN, 64), Ok(7));
    }

    #[test]
    fn terminator_missing() {
        let src = [consts::IAC, consts::SB, 201, b'a', consts::IAC];
        assert_eq!(find_terminator::<()>(&src, HEADER_LEN, 64), Err(DecodeOutcome::Incomplete));
    }

    #[test]
    fn stray_command_cuts_body_short() {
        let src = [consts::IAC, consts::SB, 201, b'a', b'b', consts::IAC, consts::NOP];
        assert_eq!(
            find_terminator::<()>(&src, HEADER_LEN, 64),
            Err(DecodeOutcome::Malformed {
                error: DecodeError::InvalidFraming {
                    offset: 6,
                    expected: consts::SE,
                    found: consts::NOP,
                },
                consumed: 5,
            })
        );
    }

    #[test]
    fn unescape_collapses_pairs_only() {
        assert_eq!(unescape_iac(&[1, 255, 255, 2, 255]), vec![1, 255, 2, 255]);
    }

    #[test]
    fn raw_fallback_keeps_framing() {
        let src = [consts::IAC, consts::SB, consts::option::GMCP, b'h', b'i', consts::IAC, consts::SE, b'!'];
        let outcome = TelnetArgument::decode(&src, 64);
        assert_eq!(
            outcome,
            DecodeOutcome::Complete {
                value: TelnetArgument::Raw(TelnetOption::GMCP, Bytes::copy_from_slice(&src[..7])),
                consumed: 7,
            }
        );
    }

    #[test]
    fn short_input_is_incomplete() {
        assert_eq!(TelnetArgument::decode(&[], 64), DecodeOutcome::Incomplete);
        assert_eq!(TelnetArgument::decode(&[consts::IAC, consts::SB], 64), DecodeOutcome::Incomplete);
    }

    #[test]
    fn raw_fallback_waits_then_overflows() {
        let src = [consts::IAC, consts::SB, 99, 1, 2, 3, 4, 5];
        assert_eq!(TelnetArgument::decode(&src, 64), DecodeOutcome::Incomplete);
        assert_eq!(
            TelnetArgument::decode(&src, 4),
            DecodeOutcome::Malformed {
                error: DecodeError::Overflow { limit: 4 },
                consumed: HEADER_LEN,
            }
        );
    }

    #[test]
    fn encode_window_size_is_fixed_length() {
        let mut dst = BytesMut::new();
        let written = TelnetArgument::WindowSize(WindowSize::new(0xFFFF, 0x00FF))
            .encode(&mut dst)
            .unwrap();
        assert_eq!(written, 9);
        assert_eq!(&dst[..], &[consts::IAC, consts::SB, consts::option::NAWS, 255, 255, 0, 255, consts::IAC, consts::SE]);
    }

    #[test]
    fn encode_terminal_type_doubles_iac() {
        let mut dst = BytesMut::new();
        let written = TelnetArgument::TerminalType(TerminalType::new("a\u{ff}"))
            .encode(&mut dst)
            .unwrap();
        assert_eq!(written, 9);
        assert_eq!(
            &dst[..],
            &[consts::IAC, consts::SB, consts::option::TTYPE, consts::sub::IS, b'a', 255, 255, consts::IAC, consts::SE]
        );
        assert_eq!(
            TelnetArgument::decode(&dst, 64),
            DecodeOutcome::Complete {
                value: TelnetArgument::TerminalType(TerminalType::new("a\u{ff}")),
                consumed: 9,
            }
        );
    }

    #[test]
    fn encode_raw_is_verbatim() {
        let unit = Bytes::from_static(&[consts::IAC, consts::SB, 201, b'{', consts::IAC, consts::SE]);
        let mut dst = BytesMut::new();
        let written = TelnetArgument::Raw(TelnetOption::GMCP, unit.clone())
            .encode(&mut dst)
            .unwrap();
        assert_eq!(written, unit.len());
        assert_eq!(&dst[..], &unit[..]);
    }

    #[test]
    fn encode_raw_rejects_unframed_units() {
        let mut dst = BytesMut::new();
        let short = TelnetArgument::Raw(TelnetOption::GMCP, Bytes::from_static(b"{}"));
        assert_eq!(
            short.encode(&mut dst),
            Err(CodecError::UnframedSubnegotiation { option: 201, length: 2 })
        );

        let mismatched = TelnetArgument::Raw(
            TelnetOption::GMCP,
            Bytes::from_static(&[consts::IAC, consts::SB, consts::option::TTYPE, consts::sub::SEND, consts::IAC, consts::SE]),
        );
        assert_eq!(
            mismatched.encode(&mut dst),
            Err(CodecError::UnframedSubnegotiation { option: 201, length: 6 })
        );

        let unterminated = TelnetArgument::Raw(
            TelnetOption::GMCP,
            Bytes::from_static(&[consts::IAC, consts::SB, 201, b'{', b'}']),
        );
        assert!(unterminated.encode(&mut dst).is_err());
        assert!(dst.is_empty());
    }
}
