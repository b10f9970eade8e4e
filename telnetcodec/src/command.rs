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

use crate::args::TelnetArgument;
use crate::{TelnetOption, consts};

/// Command byte following an `IAC`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommandCode {
    /// End of subnegotiation parameters
    SubnegotiationEnd,
    /// No Operation
    NoOperation,
    /// End of urgent Data Stream
    DataMark,
    /// Operator pressed the Break key or the Attention key.
    Break,
    /// Interrupt current process.
    InterruptProcess,
    /// Cancel output from the current process.
    AbortOutput,
    /// Request acknowledgment.
    AreYouThere,
    /// Request that the operator erase the previous character.
    EraseCharacter,
    /// Request that the operator erase the previous line.
    EraseLine,
    /// End of input for half-duplex connections.
    GoAhead,
    /// Begin subnegotiation
    Subnegotiate,
    /// Offer or confirm an option
    Will,
    /// Refuse an option
    Wont,
    /// Request an option
    Do,
    /// Demand an option stop
    Dont,
    /// A command byte without a meaning in RFC 854
    Unknown(u8),
}

impl CommandCode {
    /// Converts a command byte into a `CommandCode`.
    ///
    /// `IAC` itself has no command meaning and maps to
    /// [`CommandCode::Unknown`]; the decoder treats `IAC IAC` as data before
    /// this is ever consulted.
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::SE => CommandCode::SubnegotiationEnd,
            consts::NOP => CommandCode::NoOperation,
            consts::DM => CommandCode::DataMark,
            consts::BRK => CommandCode::Break,
            consts::IP => CommandCode::InterruptProcess,
            consts::AO => CommandCode::AbortOutput,
            consts::AYT => CommandCode::AreYouThere,
            consts::EC => CommandCode::EraseCharacter,
            consts::EL => CommandCode::EraseLine,
            consts::GA => CommandCode::GoAhead,
            consts::SB => CommandCode::Subnegotiate,
            consts::WILL => CommandCode::Will,
            consts::WONT => CommandCode::Wont,
            consts::DO => CommandCode::Do,
            consts::DONT => CommandCode::Dont,
            byte => CommandCode::Unknown(byte),
        }
    }

    /// Wire byte of this command.
    pub fn to_u8(&self) -> u8 {
        match self {
            CommandCode::SubnegotiationEnd => consts::SE,
            CommandCode::NoOperation => consts::NOP,
            CommandCode::DataMark => consts::DM,
            CommandCode::Break => consts::BRK,
            CommandCode::InterruptProcess => consts::IP,
            CommandCode::AbortOutput => consts::AO,
            CommandCode::AreYouThere => consts::AYT,
            CommandCode::EraseCharacter => consts::EC,
            CommandCode::EraseLine => consts::EL,
            CommandCode::GoAhead => consts::GA,
            CommandCode::Subnegotiate => consts::SB,
            CommandCode::Will => consts::WILL,
            CommandCode::Wont => consts::WONT,
            CommandCode::Do => consts::DO,
            CommandCode::Dont => consts::DONT,
            CommandCode::Unknown(byte) => *byte,
        }
    }

    /// Protocol name (`"WILL"`, `"SB"`, ...), or [`consts::UNKNOWN_COMMAND`].
    pub fn name(&self) -> &'static str {
        match self {
            CommandCode::Unknown(_) => consts::UNKNOWN_COMMAND,
            code => consts::command_name(code.to_u8()),
        }
    }

    /// The negotiation verb, if this is one.
    pub fn negotiation(&self) -> Option<Negotiation> {
        match self {
            CommandCode::Will => Some(Negotiation::Will),
            CommandCode::Wont => Some(Negotiation::Wont),
            CommandCode::Do => Some(Negotiation::Do),
            CommandCode::Dont => Some(Negotiation::Dont),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommandCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The four option negotiation verbs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Negotiation {
    /// Offer to enable an option locally
    Will,
    /// Refuse or disable an option locally
    Wont,
    /// Request the other party enable an option
    Do,
    /// Request the other party disable an option
    Dont,
}

impl From<Negotiation> for CommandCode {
    fn from(verb: Negotiation) -> Self {
        match verb {
            Negotiation::Will => CommandCode::Will,
            Negotiation::Wont => CommandCode::Wont,
            Negotiation::Do => CommandCode::Do,
            Negotiation::Dont => CommandCode::Dont,
        }
    }
}

/// One decoded command unit.
///
/// Names are derived from the constant tables on demand, so an unknown code
/// still produces a usable label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelnetCommand {
    code: CommandCode,
    option: Option<TelnetOption>,
    payload: Option<TelnetArgument>,
}

impl TelnetCommand {
    /// A two byte `IAC CODE` command.
    pub fn simple(code: CommandCode) -> Self {
        TelnetCommand {
            code,
            option: None,
            payload: None,
        }
    }

    /// A three byte `IAC DO|DONT|WILL|WONT OPTION` command.
    pub fn negotiation(verb: Negotiation, option: TelnetOption) -> Self {
        TelnetCommand {
            code: verb.into(),
            option: Some(option),
            payload: None,
        }
    }

    /// A sub-negotiation for `option`, with its payload when it decoded.
    pub fn subnegotiation(option: TelnetOption, payload: Option<TelnetArgument>) -> Self {
        TelnetCommand {
            code: CommandCode::Subnegotiate,
            option: Some(option),
            payload,
        }
    }

    /// The command code.
    pub fn code(&self) -> CommandCode {
        self.code
    }

    /// The option, for negotiation and sub-negotiation commands.
    pub fn option(&self) -> Option<TelnetOption> {
        self.option
    }

    /// The decoded sub-negotiation payload.
    pub fn payload(&self) -> Option<&TelnetArgument> {
        self.payload.as_ref()
    }

    /// Resolved command name.
    pub fn name(&self) -> &'static str {
        self.code.name()
    }

    /// Resolved option name, for commands that carry an option.
    pub fn option_name(&self) -> Option<&'static str> {
        self.option.map(|option| option.name())
    }
}

impl std::fmt::Display for TelnetCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.option, &self.payload) {
            (Some(option), Some(payload)) => write!(f, "{} {} {}", self.code, option, payload),
            (Some(option), None) => write!(f, "{} {}", self.code, option),
            _ => write!(f, "{}", self.code),
        }
    }
}
