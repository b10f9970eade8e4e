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

//! Telnet protocol constants.
//!
//! Command codes (RFC 854), option codes (IANA telnet-options registry) and the
//! option-scoped sub-negotiation markers, together with the name tables used to
//! label decoded commands. Lookups never fail: unresolved codes map to
//! [`UNKNOWN_COMMAND`] or [`UNKNOWN_OPTION`].

/// Interpret As Command
pub const IAC: u8 = 255;
/// Don't
pub const DONT: u8 = 254;
/// Do
pub const DO: u8 = 253;
/// Won't
pub const WONT: u8 = 252;
/// Will
pub const WILL: u8 = 251;
/// Subnegotiation Begin
pub const SB: u8 = 250;
/// Go Ahead
pub const GA: u8 = 249;
/// Erase Line
pub const EL: u8 = 248;
/// Erase Character
pub const EC: u8 = 247;
/// Are You There?
pub const AYT: u8 = 246;
/// Abort Output
pub const AO: u8 = 245;
/// Interrupt Process
pub const IP: u8 = 244;
/// Break
pub const BRK: u8 = 243;
/// Data Mark
pub const DM: u8 = 242;
/// No Operation
pub const NOP: u8 = 241;
/// Subnegotiation End
pub const SE: u8 = 240;

/// Label given to command codes missing from [`COMMANDS`].
pub const UNKNOWN_COMMAND: &str = "unknown command";
/// Label given to option codes missing from [`option::OPTIONS`].
pub const UNKNOWN_OPTION: &str = "unknown option";

/// Command code to name table.
pub const COMMANDS: &[(u8, &str)] = &[
    (SE, "SE"),
    (NOP, "NOP"),
    (DM, "DM"),
    (BRK, "BRK"),
    (IP, "IP"),
    (AO, "AO"),
    (AYT, "AYT"),
    (EC, "EC"),
    (EL, "EL"),
    (GA, "GA"),
    (SB, "SB"),
    (WILL, "WILL"),
    (WONT, "WONT"),
    (DO, "DO"),
    (DONT, "DONT"),
    (IAC, "IAC"),
];

/// Resolve a command code to its name.
pub fn command_name(code: u8) -> &'static str {
    COMMANDS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(UNKNOWN_COMMAND, |(_, name)| name)
}

/// Resolve a command name (case-insensitive) to its code.
pub fn command_code(name: &str) -> Option<u8> {
    COMMANDS
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}

/// Telnet option codes.
pub mod option {
    /// RFC 856 - Transmit Binary
    pub const BINARY: u8 = 0;
    /// RFC 857 - Echo
    pub const ECHO: u8 = 1;
    /// RFC 858 - Suppress Go Ahead
    pub const SGA: u8 = 3;
    /// RFC 859 - Status
    pub const STATUS: u8 = 5;
    /// RFC 860 - Timing Mark
    pub const TM: u8 = 6;
    /// RFC 1091 - Terminal Type
    pub const TTYPE: u8 = 24;
    /// RFC 885 - End of Record
    pub const EOR: u8 = 25;
    /// RFC 927 - TACACS User Identification
    pub const TUID: u8 = 26;
    /// RFC 933 - Output Marking
    pub const OUTMRK: u8 = 27;
    /// RFC 1073 - Negotiate About Window Size
    pub const NAWS: u8 = 31;
    /// RFC 1079 - Terminal Speed
    pub const TSPEED: u8 = 32;
    /// RFC 1184 - Linemode
    pub const LINEMODE: u8 = 34;
    /// RFC 1408 - Environment, superseded by [`NEW_ENVIRONMENT`]
    pub const OLD_ENVIRONMENT: u8 = 36;
    /// RFC 2946 - Data Encryption
    pub const ENCRYPTION: u8 = 38;
    /// RFC 1572 - New Environment
    pub const NEW_ENVIRONMENT: u8 = 39;
    /// Generic Mud Communication Protocol
    pub const GMCP: u8 = 201;
    /// RFC 861 - Extended Options List
    pub const EXOPL: u8 = 255;

    /// Option code to name table.
    pub const OPTIONS: &[(u8, &str)] = &[
        (BINARY, "TRANSMIT_BINARY"),
        (ECHO, "ECHO"),
        (SGA, "SGA"),
        (STATUS, "STATUS"),
        (TM, "TIMING_MARK"),
        (TTYPE, "TTYPE"),
        (EOR, "EOR"),
        (TUID, "TACACS_USER_ID"),
        (OUTMRK, "OUTPUT_MARKING"),
        (NAWS, "NAWS"),
        (TSPEED, "TERMINAL_SPEED"),
        (LINEMODE, "LINEMODE"),
        (OLD_ENVIRONMENT, "NEW_ENVIRON_OLD"),
        (ENCRYPTION, "ENCRYPT"),
        (NEW_ENVIRONMENT, "NEW_ENVIRON"),
        (GMCP, "GMCP"),
        (EXOPL, "EXOPL"),
    ];

    /// Resolve an option code to its name.
    pub fn name(code: u8) -> &'static str {
        OPTIONS
            .iter()
            .find(|(c, _)| *c == code)
            .map_or(super::UNKNOWN_OPTION, |(_, name)| name)
    }

    /// Resolve an option name (case-insensitive) to its code.
    pub fn code(name: &str) -> Option<u8> {
        OPTIONS
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(code, _)| *code)
    }
}

/// Sub-negotiation commands shared by TTYPE and generic option bodies.
///
/// These collide numerically with [`env`] markers; the two sets belong to
/// different options and must not be cross-interpreted.
pub mod sub {
    /// Here is my value
    pub const IS: u8 = 0;
    /// Send me your value
    pub const SEND: u8 = 1;
    /// Unsolicited update (NEW-ENVIRON)
    pub const INFO: u8 = 2;
}

/// NEW-ENVIRON (RFC 1572) variable markers.
pub mod env {
    /// Well-known variable follows
    pub const VAR: u8 = 0;
    /// Value of the preceding variable follows
    pub const VALUE: u8 = 1;
    /// Next byte is literal
    pub const ESC: u8 = 2;
    /// User-defined variable follows
    pub const USERVAR: u8 = 3;
}
