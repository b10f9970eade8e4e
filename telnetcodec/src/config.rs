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

/// Default ceiling on a pending sub-negotiation that is still waiting for its
/// `IAC SE` terminator.
///
/// Past this size the unit is reported as overflowed and the decoder moves on,
/// so a peer that never terminates a sub-negotiation cannot grow the buffer
/// without bound.
pub const MAX_SUBNEGOTIATION_LENGTH: usize = 8192;

/// Runtime behaviour of a [`crate::TelnetCodec`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TelnetConfig {
    /// Double every outbound `IAC` data byte
    pub escape_outbound: bool,
    /// Forward bytes verbatim in both directions, decoding nothing
    pub passthrough: bool,
    /// Largest pending sub-negotiation held while waiting for `IAC SE`
    pub max_subnegotiation_len: usize,
}

impl TelnetConfig {
    /// Full protocol handling.
    pub fn enabled() -> TelnetConfig {
        TelnetConfig {
            escape_outbound: true,
            passthrough: false,
            max_subnegotiation_len: MAX_SUBNEGOTIATION_LENGTH,
        }
    }

    /// Raw byte relay, for streams that have finished negotiating.
    pub fn passthrough() -> TelnetConfig {
        TelnetConfig {
            passthrough: true,
            ..TelnetConfig::enabled()
        }
    }

    /// Set whether outbound data is byte-stuffed
    pub fn with_escape_outbound(mut self, escape: bool) -> Self {
        self.escape_outbound = escape;
        self
    }

    /// Set passthrough mode
    pub fn with_passthrough(mut self, passthrough: bool) -> Self {
        self.passthrough = passthrough;
        self
    }

    /// Set the pending sub-negotiation ceiling
    pub fn with_max_subnegotiation_len(mut self, len: usize) -> Self {
        self.max_subnegotiation_len = len;
        self
    }
}

impl Default for TelnetConfig {
    fn default() -> Self {
        Self::enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_escape_and_decode() {
        let config = TelnetConfig::default();
        assert!(config.escape_outbound);
        assert!(!config.passthrough);
        assert_eq!(config.max_subnegotiation_len, MAX_SUBNEGOTIATION_LENGTH);
    }

    #[test]
    fn builders_override_fields() {
        let config = TelnetConfig::passthrough()
            .with_escape_outbound(false)
            .with_max_subnegotiation_len(64);
        assert!(config.passthrough);
        assert!(!config.escape_outbound);
        assert_eq!(config.max_subnegotiation_len, 64);
    }
}
