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

//! New Environment (RFC 1572)
//!
//! A NEW-ENVIRON report is a run of variables, each introduced by `VAR` or
//! `USERVAR`, with an optional `VALUE` marker before its value. Marker bytes
//! inside a name or value are escaped with `ESC`.

use crate::args::{self, DecodeOutcome, ascii_string, expect_byte, find_terminator, latin1_bytes, unescape_iac};
use crate::consts::{self, env};
use crate::result::DecodeError;

/// `IAC SB NEW-ENVIRON IS|INFO`
const HEADER_LEN: usize = 4;

/// A decoded variable: uppercased name and its value, `None` when the sender
/// supplied no `VALUE` marker.
pub type Variable = (String, Option<String>);

/// Whether the report answers a request or is unsolicited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentKind {
    /// Reply to a SEND
    Is,
    /// Unsolicited change notification
    Info,
}

impl EnvironmentKind {
    /// Wire byte of this kind.
    pub fn to_u8(self) -> u8 {
        match self {
            EnvironmentKind::Is => consts::sub::IS,
            EnvironmentKind::Info => consts::sub::INFO,
        }
    }

    /// `"IS"` or `"INFO"`.
    pub fn name(self) -> &'static str {
        match self {
            EnvironmentKind::Is => "IS",
            EnvironmentKind::Info => "INFO",
        }
    }
}

/// Variables reported through NEW-ENVIRON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
    /// IS or INFO
    pub kind: EnvironmentKind,
    /// Well-known variables, in wire order
    pub vars: Vec<Variable>,
    /// User-defined variables, in wire order
    pub uservars: Vec<Variable>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum List {
    Var,
    User,
}

impl List {
    fn from_marker(byte: u8) -> Option<List> {
        match byte {
            env::VAR => Some(List::Var),
            env::USERVAR => Some(List::User),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Type,
    Name(List),
    NameEsc(List),
    Value(List),
    ValueEsc(List),
}

#[derive(Default)]
struct Collector {
    name: Vec<u8>,
    value: Vec<u8>,
    vars: Vec<Variable>,
    uservars: Vec<Variable>,
}

impl Collector {
    fn close(&mut self, list: List, has_value: bool) {
        let name = ascii_string(&self.name).to_ascii_uppercase();
        let value = has_value.then(|| ascii_string(&self.value));
        match list {
            List::Var => self.vars.push((name, value)),
            List::User => self.uservars.push((name, value)),
        }
        self.name.clear();
        self.value.clear();
    }
}

impl Environment {
    /// Creates an empty report of the given kind.
    pub fn new(kind: EnvironmentKind) -> Self {
        Environment {
            kind,
            vars: Vec::new(),
            uservars: Vec::new(),
        }
    }

    /// Decodes a NEW-ENVIRON IS/INFO unit from the front of `src`.
    ///
    /// # Example
    /// ```
    /// use iacstream_telnetcodec::DecodeOutcome;
    /// use iacstream_telnetcodec::environ::{Environment, EnvironmentKind};
    ///
    /// let src = b"\xff\xfa\x27\x00\x00TERM\x01ansi\xff\xf0";
    /// let DecodeOutcome::Complete { value, .. } = Environment::decode(src, 1024) else {
    ///     panic!("expected a complete unit");
    /// };
    /// assert_eq!(value.kind, EnvironmentKind::Is);
    /// assert_eq!(value.vars, vec![("TERM".to_string(), Some("ansi".to_string()))]);
    /// ```
    pub fn decode(src: &[u8], limit: usize) -> DecodeOutcome<Environment> {
        let end = match find_terminator(src, args::HEADER_LEN, limit) {
            Ok(end) => end,
            Err(outcome) => return outcome,
        };
        let consumed = end + 2;
        let malformed = |error| DecodeOutcome::Malformed { error, consumed };

        for (offset, expected) in [
            (0, consts::IAC),
            (1, consts::SB),
            (2, consts::option::NEW_ENVIRONMENT),
        ] {
            if let Err(error) = expect_byte(src, offset, expected) {
                return malformed(error);
            }
        }
        let kind = match src[3] {
            consts::sub::IS => EnvironmentKind::Is,
            consts::sub::INFO => EnvironmentKind::Info,
            command => {
                return malformed(DecodeError::InvalidCommand {
                    command,
                    expected: vec![consts::sub::IS, consts::sub::INFO],
                });
            }
        };
        match parse_variables(&unescape_iac(&src[HEADER_LEN..end])) {
            Ok((vars, uservars)) => DecodeOutcome::Complete {
                value: Environment {
                    kind,
                    vars,
                    uservars,
                },
                consumed,
            },
            Err(error) => malformed(error),
        }
    }

    /// Writes the body `IS|INFO` followed by each variable, escaping marker
    /// bytes inside names and values. Well-known variables precede user ones.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        let mut body = vec![self.kind.to_u8()];
        let lists = [(env::VAR, &self.vars), (env::USERVAR, &self.uservars)];
        for (marker, list) in lists {
            for (name, value) in list {
                body.push(marker);
                escape_into(&mut body, &latin1_bytes(name));
                if let Some(value) = value {
                    body.push(env::VALUE);
                    escape_into(&mut body, &latin1_bytes(value));
                }
            }
        }
        writer.write_all(&body)?;
        Ok(body.len())
    }
}

fn escape_into(dst: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        if matches!(byte, env::VAR | env::VALUE | env::ESC | env::USERVAR) {
            dst.push(env::ESC);
        }
        dst.push(byte);
    }
}

fn parse_variables(body: &[u8]) -> Result<(Vec<Variable>, Vec<Variable>), DecodeError> {
    let mut state = State::Type;
    let mut out = Collector::default();

    for &byte in body {
        state = match state {
            State::Type => match List::from_marker(byte) {
                Some(list) => State::Name(list),
                None => return Err(DecodeError::InvalidVariableType { byte }),
            },
            State::Name(list) => match byte {
                env::VALUE => State::Value(list),
                env::ESC => State::NameEsc(list),
                env::VAR | env::USERVAR => {
                    out.close(list, false);
                    State::Name(List::from_marker(byte).unwrap_or(list))
                }
                _ => {
                    out.name.push(byte);
                    State::Name(list)
                }
            },
            State::NameEsc(list) => {
                out.name.push(byte);
                State::Name(list)
            }
            State::Value(list) => match byte {
                env::ESC => State::ValueEsc(list),
                env::VAR | env::USERVAR => {
                    out.close(list, true);
                    State::Name(List::from_marker(byte).unwrap_or(list))
                }
                _ => {
                    out.value.push(byte);
                    State::Value(list)
                }
            },
            State::ValueEsc(list) => {
                out.value.push(byte);
                State::Value(list)
            }
        };
    }

    match state {
        State::Type => {}
        State::Name(list) | State::NameEsc(list) => {
            if !out.name.is_empty() {
                out.close(list, false);
            }
        }
        State::Value(list) | State::ValueEsc(list) => out.close(list, true),
    }
    Ok((out.vars, out.uservars))
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vars={:?} uservars={:?}", self.kind.name(), self.vars, self.uservars)
    }
}
