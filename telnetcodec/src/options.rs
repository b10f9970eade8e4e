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

use crate::consts;

///
/// [Telnet Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
/// understood by name. Any other code is carried as [`TelnetOption::Unknown`].
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`consts::option::BINARY`] Telnet Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    TransmitBinary,
    /// [`consts::option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`consts::option::SGA`] Suppress Go ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`consts::option::STATUS`] Telnet Status Option [RFC859](http://www.iana.org/go/rfc859)
    Status,
    /// [`consts::option::TM`] Telnet Timing Mark Option [RFC860](http://www.iana.org/go/rfc860)
    TimingMark,
    /// [`consts::option::TTYPE`] Terminal Type [RFC1091](http://www.iana.org/go/rfc1091)
    TTYPE,
    /// [`consts::option::EOR`] End of Record [RFC885](http://www.iana.org/go/rfc885)
    EOR,
    /// [`consts::option::TUID`] TACACS User Identification [RFC927](http://www.iana.org/go/rfc927)
    TUID,
    /// [`consts::option::OUTMRK`] Output Marking [RFC933](http://www.iana.org/go/rfc933)
    OUTMRK,
    /// [`consts::option::NAWS`] Negotiate About Window Size [RFC1073](http://www.iana.org/go/rfc1073)
    NAWS,
    /// [`consts::option::TSPEED`] Terminal Speed [RFC1079](http://www.iana.org/go/rfc1079)
    TSPEED,
    /// [`consts::option::LINEMODE`] Linemode [RFC1184](http://www.iana.org/go/rfc1184)
    Linemode,
    /// [`consts::option::OLD_ENVIRONMENT`] Environment Option [RFC1408](http://www.iana.org/go/rfc1408)
    Environment,
    /// [`consts::option::ENCRYPTION`] Encryption Option [RFC2946](http://www.iana.org/go/rfc2946)
    Encryption,
    /// [`consts::option::NEW_ENVIRONMENT`] New Environment Option [RFC1572](http://www.iana.org/go/rfc1572)
    NewEnvironment,
    /// [`consts::option::GMCP`] Generic Mud Communication Protocol [GMCP Protocol](https://www.gammon.com.au/gmcp)
    GMCP,
    /// [`consts::option::EXOPL`] Extended-Options-List [RFC861](http://www.iana.org/go/rfc861)
    EXOPL,
    /// Unknown Option
    Unknown(u8),
}

impl TelnetOption {
    /// Every named option, in code order.
    ///
    /// Used to drive per-option negotiation requests without reflection:
    ///
    /// ```
    /// use iacstream_telnetcodec::{Negotiation, TelnetFrame, TelnetOption};
    ///
    /// let offers: Vec<TelnetFrame> = TelnetOption::ALL
    ///     .iter()
    ///     .map(|option| TelnetFrame::Negotiate(Negotiation::Will, *option))
    ///     .collect();
    /// assert_eq!(offers.len(), TelnetOption::ALL.len());
    /// ```
    pub const ALL: [TelnetOption; 17] = [
        TelnetOption::TransmitBinary,
        TelnetOption::Echo,
        TelnetOption::SuppressGoAhead,
        TelnetOption::Status,
        TelnetOption::TimingMark,
        TelnetOption::TTYPE,
        TelnetOption::EOR,
        TelnetOption::TUID,
        TelnetOption::OUTMRK,
        TelnetOption::NAWS,
        TelnetOption::TSPEED,
        TelnetOption::Linemode,
        TelnetOption::Environment,
        TelnetOption::Encryption,
        TelnetOption::NewEnvironment,
        TelnetOption::GMCP,
        TelnetOption::EXOPL,
    ];

    /// Converts a `TelnetOption` into its wire code.
    pub fn to_u8(&self) -> u8 {
        match self {
            TelnetOption::TransmitBinary => consts::option::BINARY,
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SGA,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::TimingMark => consts::option::TM,
            TelnetOption::TTYPE => consts::option::TTYPE,
            TelnetOption::EOR => consts::option::EOR,
            TelnetOption::TUID => consts::option::TUID,
            TelnetOption::OUTMRK => consts::option::OUTMRK,
            TelnetOption::NAWS => consts::option::NAWS,
            TelnetOption::TSPEED => consts::option::TSPEED,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::Environment => consts::option::OLD_ENVIRONMENT,
            TelnetOption::Encryption => consts::option::ENCRYPTION,
            TelnetOption::NewEnvironment => consts::option::NEW_ENVIRONMENT,
            TelnetOption::GMCP => consts::option::GMCP,
            TelnetOption::EXOPL => consts::option::EXOPL,
            TelnetOption::Unknown(byte) => *byte,
        }
    }

    /// Converts a wire code into a `TelnetOption`, falling back to
    /// [`TelnetOption::Unknown`] for codes without a name.
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::option::BINARY => TelnetOption::TransmitBinary,
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SGA => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::TM => TelnetOption::TimingMark,
            consts::option::TTYPE => TelnetOption::TTYPE,
            consts::option::EOR => TelnetOption::EOR,
            consts::option::TUID => TelnetOption::TUID,
            consts::option::OUTMRK => TelnetOption::OUTMRK,
            consts::option::NAWS => TelnetOption::NAWS,
            consts::option::TSPEED => TelnetOption::TSPEED,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::OLD_ENVIRONMENT => TelnetOption::Environment,
            consts::option::ENCRYPTION => TelnetOption::Encryption,
            consts::option::NEW_ENVIRONMENT => TelnetOption::NewEnvironment,
            consts::option::GMCP => TelnetOption::GMCP,
            consts::option::EXOPL => TelnetOption::EXOPL,
            byte => TelnetOption::Unknown(byte),
        }
    }

    /// The protocol name of this option (`"NAWS"`, `"NEW_ENVIRON"`, ...), or
    /// [`consts::UNKNOWN_OPTION`].
    pub fn name(&self) -> &'static str {
        consts::option::name(self.to_u8())
    }

    /// Looks an option up by its protocol name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        consts::option::code(name).map(TelnetOption::from_u8)
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::Unknown(byte) => write!(f, "Unknown({byte})"),
            option => write!(f, "{}", option.name()),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        TelnetOption::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}
