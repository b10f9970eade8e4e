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

//! Telnet socket implementation

use crate::{Result, SocketError};
use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use iacstream_telnetcodec::{
    CodecError, CommandCode, DEFAULT_ENVIRONMENT_VARIABLES, Negotiation, TelnetArgument, TelnetCodec,
    TelnetConfig, TelnetEvent, TelnetFrame, TelnetOption,
};
use metrics::counter;
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio_util::codec::{Encoder, Framed};
use tracing::{debug, error, instrument, trace, warn};

/// A Telnet stream filter over a byte transport.
///
/// Reading yields [`TelnetEvent`]s in wire order: application data with
/// commands stripped out, each decoded command, and a decode error in place
/// of any command that could not be decoded. Writing stuffs `IAC` in
/// application data and sends commands exactly as built.
///
/// Transport errors and end of stream are passed through untouched. No
/// negotiation happens on its own; the application answers `DO`, `WILL`
/// and friends with [`TelnetSocket::negotiate`].
pub struct TelnetSocket<T> {
    framed: Framed<T, TelnetCodec>,
    closed: bool,
}

impl<T> TelnetSocket<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap a transport with full protocol handling.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, TelnetConfig::default())
    }

    /// Wrap a transport with the given codec configuration.
    pub fn with_config(transport: T, config: TelnetConfig) -> Self {
        TelnetSocket {
            framed: Framed::new(transport, TelnetCodec::with_config(config)),
            closed: false,
        }
    }

    /// Receive the next event.
    ///
    /// Returns `Ok(None)` once the transport reaches end of stream. A partial
    /// command still buffered at that point is dropped.
    #[instrument(skip(self))]
    pub async fn next(&mut self) -> Result<Option<TelnetEvent>> {
        match self.framed.next().await {
            Some(Ok(event)) => {
                match &event {
                    TelnetEvent::Data(data) => {
                        counter!("iacstream.bytes.received").increment(data.len() as u64);
                        trace!(len = data.len(), "Data received");
                    }
                    TelnetEvent::Command(command) => {
                        counter!("iacstream.commands.received").increment(1);
                        trace!(command = %command, "Command received");
                    }
                    TelnetEvent::DecodeError { command, error } => {
                        counter!("iacstream.errors.decode").increment(1);
                        debug!(command = %command, error = %error, "Command could not be decoded");
                    }
                }
                Ok(Some(event))
            }
            Some(Err(e)) => {
                error!(error = %e, "Error receiving from transport");
                Err(e.into())
            }
            None => {
                debug!("Transport stream ended");
                Ok(None)
            }
        }
    }

    /// Write application data, doubling `IAC` bytes unless escaping is off
    /// or the socket is in passthrough mode.
    #[instrument(skip(self, data))]
    pub async fn write(&mut self, data: impl Into<Bytes>) -> Result<()> {
        let data = data.into();
        let len = data.len() as u64;
        self.send(data).await?;
        counter!("iacstream.bytes.sent").increment(len);
        Ok(())
    }

    /// Send `IAC CODE OPTION` followed by `extra` exactly as given.
    ///
    /// Nothing is escaped, so `extra` can carry a hand-built sub-negotiation
    /// body and its `IAC SE` terminator.
    #[instrument(skip(self, extra))]
    pub async fn command(&mut self, code: CommandCode, option: TelnetOption, extra: &[u8]) -> Result<()> {
        self.send(TelnetFrame::Command {
            code,
            option,
            extra: Bytes::copy_from_slice(extra),
        })
        .await
    }

    /// Send a two byte `IAC CODE` command such as `AYT` or `GA`.
    #[instrument(skip(self))]
    pub async fn control(&mut self, code: CommandCode) -> Result<()> {
        self.send(TelnetFrame::Control(code)).await
    }

    /// Send `IAC DO|DONT|WILL|WONT OPTION`.
    #[instrument(skip(self))]
    pub async fn negotiate(&mut self, verb: Negotiation, option: TelnetOption) -> Result<()> {
        self.send(TelnetFrame::Negotiate(verb, option)).await
    }

    /// Ask the peer for its terminal type.
    #[instrument(skip(self))]
    pub async fn request_terminal_type(&mut self) -> Result<()> {
        self.send(TelnetFrame::request_terminal_type()).await
    }

    /// Ask the peer for the named environment variables and all of its user
    /// variables.
    #[instrument(skip(self, names))]
    pub async fn request_environment<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.send(TelnetFrame::request_environment(names)).await
    }

    /// Ask the peer for [`DEFAULT_ENVIRONMENT_VARIABLES`].
    pub async fn request_default_environment(&mut self) -> Result<()> {
        self.request_environment(DEFAULT_ENVIRONMENT_VARIABLES).await
    }

    /// Send a complete sub-negotiation carrying `argument`.
    #[instrument(skip(self), fields(option = %argument.option()))]
    pub async fn subnegotiate(&mut self, argument: &TelnetArgument) -> Result<()> {
        let frame = TelnetFrame::subnegotiate(argument)?;
        self.send(frame).await
    }

    /// Flush and close the write half of the transport.
    ///
    /// Later writes fail with [`SocketError::Closed`]; reading may continue
    /// until the peer ends the stream.
    #[instrument(skip(self))]
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        SinkExt::<Bytes>::close(&mut self.framed).await?;
        Ok(())
    }

    /// Whether outbound `IAC` data bytes are doubled.
    pub fn escape_outbound(&self) -> bool {
        self.framed.codec().escape_outbound()
    }

    /// Enable or disable outbound `IAC` doubling for subsequent writes.
    pub fn set_escape_outbound(&mut self, escape: bool) {
        self.framed.codec_mut().set_escape_outbound(escape);
    }

    /// Whether bytes are relayed verbatim in both directions.
    pub fn passthrough(&self) -> bool {
        self.framed.codec().passthrough()
    }

    /// Enable or disable passthrough for subsequent reads and writes.
    ///
    /// Bytes already read from the transport but not yet returned by
    /// [`TelnetSocket::next`], such as the start of a split command, are
    /// relayed as data once passthrough is on.
    pub fn set_passthrough(&mut self, passthrough: bool) {
        self.framed.codec_mut().set_passthrough(passthrough);
    }

    /// Borrow the underlying transport.
    pub fn get_ref(&self) -> &T {
        self.framed.get_ref()
    }

    /// Mutably borrow the underlying transport.
    ///
    /// Bytes written directly bypass the codec.
    pub fn get_mut(&mut self) -> &mut T {
        self.framed.get_mut()
    }

    /// Unwrap the transport. Buffered but undecoded input is lost.
    pub fn into_inner(self) -> T {
        let parts = self.framed.into_parts();
        if !parts.read_buf.is_empty() {
            warn!(pending = parts.read_buf.len(), "Dropping undecoded input");
        }
        parts.io
    }

    async fn send<I>(&mut self, item: I) -> Result<()>
    where
        TelnetCodec: Encoder<I, Error = CodecError>,
    {
        if self.closed {
            return Err(SocketError::Closed);
        }
        match self.framed.send(item).await {
            Ok(()) => Ok(()),
            Err(e) => {
                error!(error = %e, "Failed to write to transport");
                Err(e.into())
            }
        }
    }
}

impl TelnetSocket<TcpStream> {
    /// Open a TCP connection and wrap it.
    #[instrument(skip(addr))]
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        debug!(peer = ?stream.peer_addr().ok(), "Connected");
        Ok(TelnetSocket::new(stream))
    }

    /// Address of the connected peer.
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        Ok(self.get_ref().peer_addr()?)
    }
}

impl<T> std::fmt::Debug for TelnetSocket<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnetSocket")
            .field("codec", self.framed.codec())
            .field("closed", &self.closed)
            .finish()
    }
}
