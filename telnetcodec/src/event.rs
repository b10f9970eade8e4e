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

use crate::command::TelnetCommand;
use crate::result::DecodeError;
use bytes::Bytes;

///
/// `TelnetEvent` is one decoded unit of the inbound stream. Events are produced
/// in exactly the order their bytes appeared on the wire.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetEvent {
    /// A run of application data with commands stripped and `IAC IAC`
    /// collapsed to a single 0xFF.
    Data(Bytes),
    /// A command decoded successfully.
    Command(TelnetCommand),
    /// A command unit whose structure was invalid. Its bytes were consumed
    /// and decoding continues with whatever follows.
    DecodeError {
        /// The command as far as it could be identified
        command: TelnetCommand,
        /// Why decoding failed
        error: DecodeError,
    },
}

impl TelnetEvent {
    /// Borrow the data bytes, if this is a data event.
    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            TelnetEvent::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Borrow the command, if this is a command event.
    pub fn as_command(&self) -> Option<&TelnetCommand> {
        match self {
            TelnetEvent::Command(command) => Some(command),
            _ => None,
        }
    }
}
