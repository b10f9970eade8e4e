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

//! Error types for the Telnet socket

use iacstream_telnetcodec::CodecError;
use thiserror::Error;

/// Result type for socket operations
pub type Result<T> = std::result::Result<T, SocketError>;

/// Telnet socket error types
#[derive(Debug, Error)]
pub enum SocketError {
    /// I/O error from the underlying transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the codec, usually a transport failure seen while
    /// reading or writing through it
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// The socket was closed locally and no longer accepts writes
    #[error("Socket closed")]
    Closed,
}

impl SocketError {
    /// Check if the error came from the transport rather than local state
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            SocketError::Io(_) | SocketError::Codec(CodecError::IOError { .. })
        )
    }
}
