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

//! # iacstream Telnet Socket
//!
//! Wraps any `AsyncRead + AsyncWrite` transport, such as a `TcpStream`, in a
//! Telnet filter built on [`iacstream_telnetcodec::TelnetCodec`].
//!
//! - Reading yields application data with commands stripped, one event per
//!   decoded command, and a decode error event for any malformed command.
//! - Writing stuffs `IAC` in application data; negotiation and
//!   sub-negotiation senders write commands unescaped.
//! - Escaping and passthrough can be switched at any time.
//!
//! # Example
//!
//! ```no_run
//! use iacstream_socket::TelnetSocket;
//! use iacstream_telnetcodec::{Negotiation, TelnetEvent, TelnetOption};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut socket = TelnetSocket::connect("127.0.0.1:4000").await?;
//!     socket.negotiate(Negotiation::Do, TelnetOption::NAWS).await?;
//!     socket.request_terminal_type().await?;
//!     while let Some(event) = socket.next().await? {
//!         match event {
//!             TelnetEvent::Data(data) => socket.write(data).await?,
//!             TelnetEvent::Command(command) => println!("{}", command.name()),
//!             TelnetEvent::DecodeError { error, .. } => eprintln!("{error}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod error;
mod socket;

pub use self::error::{Result, SocketError};
pub use self::socket::TelnetSocket;
