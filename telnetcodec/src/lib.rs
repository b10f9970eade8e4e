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

//! # iacstream Telnet Codec
//!
//! An incremental Telnet (RFC 854) protocol engine. Inbound bytes are split
//! into application data and the commands interleaved with it; outbound data
//! and commands are turned back into wire bytes.
//!
//! ## Overview
//!
//! - **Data**: runs of application bytes, with `IAC IAC` collapsed to a
//!   single 0xFF
//! - **Commands**: `IAC <code>` two byte commands such as NOP or AYT
//! - **Negotiation**: `IAC <DO|DONT|WILL|WONT> <option>`
//! - **Sub-negotiation**: `IAC SB <option> ... IAC SE`, with typed payloads
//!   for NAWS (RFC 1073), TTYPE (RFC 1091) and NEW-ENVIRON (RFC 1572)
//!
//! Input may arrive in pieces of any size. A command split across reads is
//! held until it is complete, and a malformed command is reported as a
//! [`TelnetEvent::DecodeError`] without ending the stream.
//!
//! The codec does not negotiate on its own. Deciding how to answer `DO`,
//! `WILL` and friends is left to the application.
//!
//! ## Core Components
//!
//! ### [`TelnetCodec`]
//!
//! Implements [`tokio_util::codec::Decoder`] and [`tokio_util::codec::Encoder`],
//! and can also be fed directly through [`TelnetCodec::receive`].
//!
//! ### [`TelnetEvent`]
//!
//! One decoded inbound unit: data, a command, or a decode error.
//!
//! ### [`TelnetFrame`]
//!
//! One outbound unit: data, a command, a negotiation, or a raw command with
//! trailing bytes.
//!
//! ### [`TelnetArgument`]
//!
//! A decoded sub-negotiation payload.
//!
//! ## Usage Example
//!
//! ```rust
//! use iacstream_telnetcodec::{Negotiation, TelnetCodec, TelnetEvent, TelnetFrame, TelnetOption};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! let mut codec = TelnetCodec::new();
//!
//! let mut input = BytesMut::from(&b"Hello\xFF\xFD\x01"[..]);
//! let mut events = Vec::new();
//! while let Some(event) = codec.decode(&mut input).unwrap() {
//!     events.push(event);
//! }
//! assert_eq!(events[0].as_data(), Some(&b"Hello"[..]));
//! assert_eq!(events[1].as_command().map(|c| c.name()), Some("DO"));
//!
//! let mut output = BytesMut::new();
//! codec.encode(TelnetFrame::Negotiate(Negotiation::Will, TelnetOption::Echo), &mut output).unwrap();
//! codec.encode(TelnetFrame::from("100%"), &mut output).unwrap();
//! assert_eq!(&output[..3], &[0xFF, 0xFB, 0x01]);
//! ```
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 1073: Telnet Window Size Option
//! - RFC 1091: Telnet Terminal-Type Option
//! - RFC 1572: Telnet Environment Option

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

mod args;
mod codec;
mod command;
mod config;
pub mod consts;
mod decode;
mod event;
mod frame;
mod options;
mod result;

pub use self::args::{DecodeOutcome, TelnetArgument, environ, naws, ttype};
pub use self::codec::TelnetCodec;
pub use self::command::{CommandCode, Negotiation, TelnetCommand};
pub use self::config::{MAX_SUBNEGOTIATION_LENGTH, TelnetConfig};
pub use self::decode::{Recognized, recognize};
pub use self::event::TelnetEvent;
pub use self::frame::{DEFAULT_ENVIRONMENT_VARIABLES, TelnetFrame};
pub use self::options::TelnetOption;
pub use self::result::{CodecError, CodecResult, DecodeError};
