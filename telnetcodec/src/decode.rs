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

//! Command recognition.
//!
//! Given input that starts with `IAC`, works out which kind of unit follows
//! and how many bytes it spans.

use crate::args::{DecodeOutcome, TelnetArgument};
use crate::command::{CommandCode, TelnetCommand};
use crate::result::DecodeError;
use crate::{TelnetOption, consts};
use tracing::warn;

/// A unit identified at the front of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recognized {
    /// The unit is not fully buffered yet.
    Incomplete,
    /// `IAC IAC`: a single literal 0xFF data byte spanning two input bytes.
    EscapedIac,
    /// A complete command.
    Command {
        /// The decoded command
        command: TelnetCommand,
        /// Bytes the command spans
        consumed: usize,
    },
    /// A command whose structure was invalid.
    Malformed {
        /// The command as far as it could be identified
        command: TelnetCommand,
        /// Why it was rejected
        error: DecodeError,
        /// Bytes to discard
        consumed: usize,
    },
}

/// Recognizes the unit at the front of `src`, which must begin with `IAC`.
///
/// - `IAC IAC` is one escaped data byte.
/// - `IAC DO|DONT|WILL|WONT OPTION` is a three byte negotiation.
/// - `IAC SB OPTION ...` is handed to the option's payload decoder.
/// - Anything else is a two byte command, named "unknown command" when the
///   code is not in the command table.
///
/// `limit` bounds a sub-negotiation that is still waiting for `IAC SE`.
pub fn recognize(src: &[u8], limit: usize) -> Recognized {
    debug_assert!(src.first() == Some(&consts::IAC));
    let Some(&byte) = src.get(1) else {
        return Recognized::Incomplete;
    };
    let code = CommandCode::from_u8(byte);
    match byte {
        consts::IAC => Recognized::EscapedIac,
        consts::DO | consts::DONT | consts::WILL | consts::WONT => match (src.get(2), code.negotiation()) {
            (Some(&option), Some(verb)) => Recognized::Command {
                command: TelnetCommand::negotiation(verb, TelnetOption::from_u8(option)),
                consumed: 3,
            },
            _ => Recognized::Incomplete,
        },
        consts::SB => {
            let Some(&option) = src.get(2) else {
                return Recognized::Incomplete;
            };
            let option = TelnetOption::from_u8(option);
            match TelnetArgument::decode(src, limit) {
                DecodeOutcome::Complete { value, consumed } => Recognized::Command {
                    command: TelnetCommand::subnegotiation(option, Some(value)),
                    consumed,
                },
                DecodeOutcome::Incomplete => Recognized::Incomplete,
                DecodeOutcome::Malformed { error, consumed } => Recognized::Malformed {
                    command: TelnetCommand::subnegotiation(option, None),
                    error,
                    consumed,
                },
            }
        }
        _ => {
            if let CommandCode::Unknown(_) = code {
                warn!("Received Unknown Command {:#X}", byte);
            }
            Recognized::Command {
                command: TelnetCommand::simple(code),
                consumed: 2,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::naws::WindowSize;
    use crate::command::Negotiation;

    const LIMIT: usize = 1024;

    #[test]
    fn lone_iac_is_incomplete() {
        assert_eq!(recognize(&[consts::IAC], LIMIT), Recognized::Incomplete);
    }

    #[test]
    fn escaped_iac() {
        assert_eq!(recognize(&[consts::IAC, consts::IAC, b'x'], LIMIT), Recognized::EscapedIac);
    }

    #[test]
    fn negotiation_needs_three_bytes() {
        assert_eq!(recognize(&[consts::IAC, consts::WILL], LIMIT), Recognized::Incomplete);
        assert_eq!(
            recognize(&[consts::IAC, consts::WILL, consts::option::ECHO, b'z'], LIMIT),
            Recognized::Command {
                command: TelnetCommand::negotiation(Negotiation::Will, TelnetOption::Echo),
                consumed: 3,
            }
        );
    }

    #[test]
    fn simple_commands_are_two_bytes() {
        for byte in [consts::NOP, consts::DM, consts::BRK, consts::IP, consts::AO, consts::AYT, consts::EC, consts::EL, consts::GA] {
            assert_eq!(
                recognize(&[consts::IAC, byte], LIMIT),
                Recognized::Command {
                    command: TelnetCommand::simple(CommandCode::from_u8(byte)),
                    consumed: 2,
                }
            );
        }
    }

    #[test]
    fn unknown_command_is_two_bytes() {
        let Recognized::Command { command, consumed } = recognize(&[consts::IAC, 0x99, b'h'], LIMIT) else {
            panic!("expected a command");
        };
        assert_eq!(consumed, 2);
        assert_eq!(command.name(), consts::UNKNOWN_COMMAND);
    }

    #[test]
    fn subnegotiation_dispatches_by_option() {
        let src = [consts::IAC, consts::SB, consts::option::NAWS, 0, 80, 0, 24, consts::IAC, consts::SE];
        assert_eq!(
            recognize(&src, LIMIT),
            Recognized::Command {
                command: TelnetCommand::subnegotiation(
                    TelnetOption::NAWS,
                    Some(TelnetArgument::WindowSize(WindowSize::new(80, 24)))
                ),
                consumed: 9,
            }
        );
        assert_eq!(recognize(&src[..2], LIMIT), Recognized::Incomplete);
        assert_eq!(recognize(&src[..8], LIMIT), Recognized::Incomplete);
    }

    #[test]
    fn malformed_subnegotiation_keeps_command_shape() {
        let src = [consts::IAC, consts::SB, consts::option::TTYPE, consts::sub::IS, consts::IAC, consts::SE];
        assert_eq!(
            recognize(&src, LIMIT),
            Recognized::Malformed {
                command: TelnetCommand::subnegotiation(TelnetOption::TTYPE, None),
                error: DecodeError::EmptyValue,
                consumed: 6,
            }
        );
    }
}
