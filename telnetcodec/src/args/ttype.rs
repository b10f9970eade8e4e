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

//! Terminal Type (RFC 1091)
//!

use crate::args::{self, DecodeOutcome, ascii_string, expect_byte, find_terminator, latin1_bytes, unescape_iac};
use crate::consts;
use crate::result::DecodeError;

/// `IAC SB TTYPE IS`
const HEADER_LEN: usize = 4;

/// A terminal name reported with `IAC SB TTYPE IS <name> IAC SE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalType {
    /// Terminal name, cut at the first NUL byte
    pub value: String,
}

impl TerminalType {
    /// Creates a `TerminalType` with the given name.
    pub fn new<S: Into<String>>(value: S) -> Self {
        TerminalType {
            value: value.into(),
        }
    }

    /// Decodes a TTYPE IS unit from the front of `src`.
    ///
    /// Some clients NUL-terminate the name; anything from the first NUL
    /// onwards is dropped. A header that is not `IAC SB TTYPE IS` or an empty
    /// name is malformed, and the unit through its terminator is consumed.
    pub fn decode(src: &[u8], limit: usize) -> DecodeOutcome<TerminalType> {
        let end = match find_terminator(src, args::HEADER_LEN, limit) {
            Ok(end) => end,
            Err(outcome) => return outcome,
        };
        let consumed = end + 2;
        let malformed = |error| DecodeOutcome::Malformed { error, consumed };

        for (offset, expected) in [(0, consts::IAC), (1, consts::SB), (2, consts::option::TTYPE)] {
            if let Err(error) = expect_byte(src, offset, expected) {
                return malformed(error);
            }
        }
        if src[3] != consts::sub::IS {
            return malformed(DecodeError::InvalidCommand {
                command: src[3],
                expected: vec![consts::sub::IS],
            });
        }
        let body = unescape_iac(&src[HEADER_LEN..end]);
        if body.is_empty() {
            return malformed(DecodeError::EmptyValue);
        }
        let value = match body.iter().position(|&b| b == 0) {
            Some(nul) => &body[..nul],
            None => &body[..],
        };
        DecodeOutcome::Complete {
            value: TerminalType {
                value: ascii_string(value),
            },
            consumed,
        }
    }

    /// Writes the body `IS <name>`.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        let name = latin1_bytes(&self.value);
        writer.write_all(&[consts::sub::IS])?;
        writer.write_all(&name)?;
        Ok(1 + name.len())
    }
}

impl std::fmt::Display for TerminalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
