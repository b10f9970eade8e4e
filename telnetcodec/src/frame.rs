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
use crate::command::{CommandCode, Negotiation};
use crate::result::CodecResult;
use crate::{TelnetOption, consts};
use bytes::{Bytes, BytesMut};

/// Variables requested by [`TelnetFrame::request_environment`] when the caller
/// has no preference.
pub const DEFAULT_ENVIRONMENT_VARIABLES: [&str; 4] = ["LINES", "COLUMNS", "TERM", "TERM_PROGRAM"];

///
/// `TelnetFrame` is an outbound unit handed to the encoder.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetFrame {
    /// Application data; `IAC` bytes are doubled unless escaping is disabled
    /// or the codec is in passthrough mode.
    Data(Bytes),
    /// A two byte `IAC CODE` command.
    Control(CommandCode),
    /// `IAC DO|DONT|WILL|WONT OPTION`
    Negotiate(Negotiation, TelnetOption),
    /// `IAC CODE OPTION` followed by `extra` exactly as given. Nothing in
    /// this frame is ever escaped.
    Command {
        /// Command code
        code: CommandCode,
        /// Option the command refers to
        option: TelnetOption,
        /// Bytes appended after the option, e.g. a hand-built sub-negotiation
        extra: Bytes,
    },
}

impl TelnetFrame {
    /// `IAC SB TTYPE SEND IAC SE`
    pub fn request_terminal_type() -> Self {
        TelnetFrame::Command {
            code: CommandCode::Subnegotiate,
            option: TelnetOption::TTYPE,
            extra: Bytes::from_static(&[consts::sub::SEND, consts::IAC, consts::SE]),
        }
    }

    /// `IAC SB NEW-ENVIRON SEND VAR <name> ... USERVAR IAC SE`
    ///
    /// The trailing bare `USERVAR` asks for every user variable.
    ///
    /// ```
    /// use iacstream_telnetcodec::TelnetFrame;
    ///
    /// let frame = TelnetFrame::request_environment(["TERM"]);
    /// assert_eq!(frame.len(), 12);
    /// ```
    pub fn request_environment<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extra = vec![consts::sub::SEND];
        for name in names {
            extra.push(consts::env::VAR);
            extra.extend_from_slice(name.as_ref().as_bytes());
        }
        extra.extend_from_slice(&[consts::env::USERVAR, consts::IAC, consts::SE]);
        TelnetFrame::Command {
            code: CommandCode::Subnegotiate,
            option: TelnetOption::NewEnvironment,
            extra: Bytes::from(extra),
        }
    }

    /// A complete sub-negotiation carrying `argument`.
    ///
    /// Fails with [`crate::CodecError::UnframedSubnegotiation`] when a
    /// [`TelnetArgument::Raw`] unit is not framed for its own option.
    pub fn subnegotiate(argument: &TelnetArgument) -> CodecResult<Self> {
        let mut unit = BytesMut::new();
        argument.encode(&mut unit)?;
        Ok(TelnetFrame::Command {
            code: CommandCode::Subnegotiate,
            option: argument.option(),
            extra: unit.freeze().split_off(3),
        })
    }

    /// Number of bytes this frame occupies before any data escaping.
    pub fn len(&self) -> usize {
        match self {
            TelnetFrame::Data(data) => data.len(),
            TelnetFrame::Control(_) => 2,
            TelnetFrame::Negotiate(_, _) => 3,
            TelnetFrame::Command { extra, .. } => 3 + extra.len(),
        }
    }

    /// Whether the frame carries no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Bytes> for TelnetFrame {
    fn from(data: Bytes) -> Self {
        TelnetFrame::Data(data)
    }
}

impl From<&str> for TelnetFrame {
    fn from(data: &str) -> Self {
        TelnetFrame::Data(Bytes::copy_from_slice(data.as_bytes()))
    }
}
