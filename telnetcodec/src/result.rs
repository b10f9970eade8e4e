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

use thiserror::Error;

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors surfaced by the codec to its caller.
///
/// Malformed input from the peer is never reported here; it becomes a
/// [`crate::TelnetEvent::DecodeError`] and decoding carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// An I/O error occurred while reading from or writing to the underlying stream.
    #[error("I/O error during {operation}: {kind:?}")]
    IOError {
        /// The kind of I/O error that occurred
        kind: std::io::ErrorKind,
        /// Description of the operation that failed
        operation: String,
    },
    /// A [`crate::TelnetArgument::Raw`] unit is not framed as
    /// `IAC SB <option> ... IAC SE` for the option it claims.
    #[error("raw sub-negotiation for option {option} is not a framed unit ({length} bytes)")]
    UnframedSubnegotiation {
        /// Option code the argument was built for
        option: u8,
        /// Length of the supplied unit
        length: usize,
    },
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::IOError {
            kind: err.kind(),
            operation: err.to_string(),
        }
    }
}

/// Why a command unit could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A framing byte (`IAC`, `SB`, option code or `SE`) was not where it belongs.
    #[error("invalid framing at offset {offset}: expected 0x{expected:02X}, found 0x{found:02X}")]
    InvalidFraming {
        /// Offset of the byte within the unit
        offset: usize,
        /// The byte that should have been there
        expected: u8,
        /// The byte that was there
        found: u8,
    },

    /// The sub-negotiation command byte is not one this option accepts.
    #[error("invalid command 0x{command:02X} (expected one of: {expected:?})")]
    InvalidCommand {
        /// The invalid command byte
        command: u8,
        /// Command bytes the option accepts
        expected: Vec<u8>,
    },

    /// A sub-negotiation that requires a value carried none.
    #[error("empty value")]
    EmptyValue,

    /// An environment list did not start with `VAR` or `USERVAR`.
    #[error("invalid variable type 0x{byte:02X}")]
    InvalidVariableType {
        /// The byte found where a type marker was expected
        byte: u8,
    },

    /// No terminator arrived before the pending unit outgrew the configured limit.
    #[error("sub-negotiation exceeds {limit} bytes without terminator")]
    Overflow {
        /// The configured maximum pending length
        limit: usize,
    },
}
