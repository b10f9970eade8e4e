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

use crate::command::CommandCode;
use crate::config::TelnetConfig;
use crate::decode::{Recognized, recognize};
use crate::result::DecodeError;
use crate::{CodecError, TelnetEvent, TelnetFrame, consts};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace, warn};

/// An incremental Telnet codec.
///
/// Inbound, `TelnetCodec` splits a byte stream into [`TelnetEvent`]s: runs of
/// application data and the commands embedded between them. Input may arrive
/// in arbitrarily small pieces; a unit that is not fully buffered stays
/// pending until more bytes arrive, so the events produced never depend on how
/// the stream was fragmented (apart from where data runs are split).
///
/// Outbound, it writes [`TelnetFrame`]s, raw [`Bytes`] and byte slices, doubling
/// `IAC` in application data when `escape_outbound` is set.
///
/// The codec can be driven through [`tokio_util::codec::Framed`] or directly
/// with [`TelnetCodec::receive`], which keeps its own accumulator.
#[derive(Clone, Debug, Default)]
pub struct TelnetCodec {
    config: TelnetConfig,
    accumulator: BytesMut,
}

impl TelnetCodec {
    /// Creates a codec with full protocol handling.
    ///
    /// # Example
    /// ```
    /// use iacstream_telnetcodec::TelnetCodec;
    ///
    /// let codec = TelnetCodec::new();
    /// assert!(codec.escape_outbound());
    /// assert!(!codec.passthrough());
    /// ```
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }

    /// Creates a codec with the given configuration.
    pub fn with_config(config: TelnetConfig) -> TelnetCodec {
        TelnetCodec {
            config,
            accumulator: BytesMut::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &TelnetConfig {
        &self.config
    }

    /// Whether outbound `IAC` data bytes are doubled.
    pub fn escape_outbound(&self) -> bool {
        self.config.escape_outbound
    }

    /// Enables or disables outbound `IAC` doubling. Takes effect for the next
    /// write.
    pub fn set_escape_outbound(&mut self, escape: bool) {
        self.config.escape_outbound = escape;
    }

    /// Whether the codec forwards bytes verbatim in both directions.
    pub fn passthrough(&self) -> bool {
        self.config.passthrough
    }

    /// Enables or disables passthrough. Takes effect for the next chunk read
    /// or the next write.
    ///
    /// Bytes already pending in the accumulator used by [`TelnetCodec::receive`]
    /// are kept and are decoded normally once passthrough is switched off
    /// again. Through [`Decoder::decode`] the buffer belongs to the caller, so
    /// whatever it still holds, a partial command included, is emitted as data
    /// on the next call.
    pub fn set_passthrough(&mut self, passthrough: bool) {
        self.config.passthrough = passthrough;
    }

    /// Bytes received through [`TelnetCodec::receive`] that do not yet form
    /// a complete unit.
    pub fn pending(&self) -> &[u8] {
        &self.accumulator
    }

    ///
    /// Feeds one chunk of inbound bytes and returns every event that can be
    /// decoded so far, in wire order.
    ///
    /// An incomplete trailing unit is retained and completed by later chunks.
    /// In passthrough mode the chunk is returned as a single data event and
    /// the accumulator is left alone.
    ///
    /// # Example
    /// ```
    /// use iacstream_telnetcodec::{TelnetCodec, TelnetEvent};
    ///
    /// let mut codec = TelnetCodec::new();
    /// assert!(codec.receive(&[b'h', b'i', 255]).len() == 1);
    /// assert_eq!(codec.pending(), &[255]);
    ///
    /// let events = codec.receive(&[241]);
    /// assert_eq!(events[0].as_command().map(|c| c.name()), Some("NOP"));
    /// assert!(codec.pending().is_empty());
    /// ```
    pub fn receive(&mut self, chunk: &[u8]) -> Vec<TelnetEvent> {
        if self.config.passthrough {
            if chunk.is_empty() {
                return Vec::new();
            }
            return vec![TelnetEvent::Data(Bytes::copy_from_slice(chunk))];
        }
        self.accumulator.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(event) = decode_unit(&self.config, &mut self.accumulator) {
            events.push(event);
        }
        events
    }

    fn encode_data(&self, data: &[u8], dst: &mut BytesMut) {
        if self.config.passthrough || !self.config.escape_outbound {
            dst.extend_from_slice(data);
            return;
        }
        dst.reserve(data.len());
        let mut rest = data;
        while let Some(pos) = rest.iter().position(|&b| b == consts::IAC) {
            dst.put_slice(&rest[..=pos]);
            dst.put_u8(consts::IAC);
            rest = &rest[pos + 1..];
        }
        dst.put_slice(rest);
    }
}

/// Removes and returns the next complete unit at the front of `src`.
///
/// Returns `None` when `src` is empty or holds only an incomplete unit, in
/// which case `src` is left untouched.
fn decode_unit(config: &TelnetConfig, src: &mut BytesMut) -> Option<TelnetEvent> {
    if src.is_empty() {
        return None;
    }
    if config.passthrough {
        return Some(TelnetEvent::Data(src.split().freeze()));
    }
    match src.iter().position(|&b| b == consts::IAC) {
        None => Some(TelnetEvent::Data(src.split().freeze())),
        Some(0) => match recognize(src, config.max_subnegotiation_len) {
            Recognized::Incomplete => None,
            Recognized::EscapedIac => {
                src.advance(2);
                Some(TelnetEvent::Data(Bytes::from_static(&[consts::IAC])))
            }
            Recognized::Command { command, consumed } => {
                src.advance(consumed);
                trace!("Decoded {} ({} bytes)", command, consumed);
                Some(TelnetEvent::Command(command))
            }
            Recognized::Malformed {
                command,
                error,
                consumed,
            } => {
                src.advance(consumed);
                if let DecodeError::Overflow { limit } = error {
                    debug!("Abandoning {} after {} bytes without IAC SE", command, limit);
                } else {
                    warn!("Malformed {}: {}", command, error);
                }
                Some(TelnetEvent::DecodeError { command, error })
            }
        },
        Some(offset) => Some(TelnetEvent::Data(src.split_to(offset).freeze())),
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = CodecError;

    /// Decodes the next unit from `src`.
    ///
    /// Data before the first `IAC` is returned as one [`TelnetEvent::Data`].
    /// When `src` starts with `IAC` the command is recognized and consumed;
    /// if it is not fully buffered `Ok(None)` is returned and `src` is left
    /// as it was. Malformed commands are reported as
    /// [`TelnetEvent::DecodeError`] and never fail the stream.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        Ok(decode_unit(&self.config, src))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        if let Some(event) = self.decode(buf)? {
            return Ok(Some(event));
        }
        if !buf.is_empty() {
            debug!("Discarding {} bytes of incomplete command at end of stream", buf.len());
            buf.clear();
        }
        Ok(None)
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    /// Writes `item` to `dst`.
    ///
    /// Only [`TelnetFrame::Data`] is subject to `IAC` doubling. Command frames
    /// are written exactly as built.
    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Data(data) => self.encode_data(&data, dst),
            TelnetFrame::Control(code) => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(code.to_u8());
            }
            TelnetFrame::Negotiate(verb, option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(CommandCode::from(verb).to_u8());
                dst.put_u8(option.to_u8());
            }
            TelnetFrame::Command { code, option, extra } => {
                dst.reserve(3 + extra.len());
                dst.put_u8(consts::IAC);
                dst.put_u8(code.to_u8());
                dst.put_u8(option.to_u8());
                dst.put_slice(&extra);
            }
        }
        Ok(())
    }
}

impl Encoder<Bytes> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_data(&item, dst);
        Ok(())
    }
}

impl Encoder<&[u8]> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_data(item, dst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::TelnetArgument;
    use crate::args::naws::WindowSize;
    use crate::args::ttype::TerminalType;
    use crate::command::{Negotiation, TelnetCommand};
    use crate::options::TelnetOption;

    // ============================================================================
    // Helper Functions
    // ============================================================================

    fn collect_all(codec: &mut TelnetCodec, mut src: BytesMut) -> Vec<TelnetEvent> {
        let mut out = Vec::new();
        while let Some(event) = codec.decode(&mut src).expect("decode should not error") {
            out.push(event);
        }
        out
    }

    fn encode_frame(codec: &mut TelnetCodec, frame: TelnetFrame) -> BytesMut {
        let mut dst = BytesMut::new();
        codec.encode(frame, &mut dst).expect("encode ok");
        dst
    }

    fn data(bytes: &[u8]) -> TelnetEvent {
        TelnetEvent::Data(Bytes::copy_from_slice(bytes))
    }

    // ============================================================================
    // Encoding Tests
    // ============================================================================

    #[test]
    fn encode_data_doubles_iac() {
        let mut codec = TelnetCodec::new();
        let out = encode_frame(&mut codec, TelnetFrame::Data(Bytes::from_static(&[1, 255, 2, 255])));
        assert_eq!(&out[..], &[1, 255, 255, 2, 255, 255]);
    }

    #[test]
    fn encode_data_without_escaping() {
        let mut codec = TelnetCodec::new();
        codec.set_escape_outbound(false);
        let out = encode_frame(&mut codec, TelnetFrame::Data(Bytes::from_static(&[1, 255, 2])));
        assert_eq!(&out[..], &[1, 255, 2]);
    }

    #[test]
    fn encode_data_in_passthrough_is_verbatim() {
        let mut codec = TelnetCodec::with_config(TelnetConfig::passthrough());
        let out = encode_frame(&mut codec, TelnetFrame::Data(Bytes::from_static(&[255, 255])));
        assert_eq!(&out[..], &[255, 255]);
    }

    #[test]
    fn encode_slice_and_bytes() {
        let mut codec = TelnetCodec::new();
        let mut dst = BytesMut::new();
        codec.encode(&b"a\xffb"[..], &mut dst).unwrap();
        codec.encode(Bytes::from_static(b"\xff"), &mut dst).unwrap();
        assert_eq!(&dst[..], b"a\xff\xffb\xff\xff");
    }

    #[test]
    fn encode_control() {
        let mut codec = TelnetCodec::new();
        let out = encode_frame(&mut codec, TelnetFrame::Control(CommandCode::AreYouThere));
        assert_eq!(&out[..], &[consts::IAC, consts::AYT]);
    }

    #[test]
    fn encode_negotiation() {
        let mut codec = TelnetCodec::new();
        let out = encode_frame(&mut codec, TelnetFrame::Negotiate(Negotiation::Do, TelnetOption::NAWS));
        assert_eq!(&out[..], &[consts::IAC, consts::DO, consts::option::NAWS]);
    }

    #[test]
    fn encode_command_extra_is_never_escaped() {
        let mut codec = TelnetCodec::new();
        let frame = TelnetFrame::Command {
            code: CommandCode::Subnegotiate,
            option: TelnetOption::TTYPE,
            extra: Bytes::from_static(&[consts::sub::SEND, consts::IAC, consts::SE]),
        };
        let out = encode_frame(&mut codec, frame);
        assert_eq!(
            &out[..],
            &[consts::IAC, consts::SB, consts::option::TTYPE, consts::sub::SEND, consts::IAC, consts::SE]
        );
    }

    // ============================================================================
    // Decoding Tests
    // ============================================================================

    #[test]
    fn decode_empty_buffer() {
        let mut codec = TelnetCodec::new();
        let mut src = BytesMut::new();
        assert_eq!(codec.decode(&mut src).unwrap(), None);
    }

    #[test]
    fn decode_plain_data_is_one_event() {
        let mut codec = TelnetCodec::new();
        let events = collect_all(&mut codec, BytesMut::from(&b"hello\r\n"[..]));
        assert_eq!(events, vec![data(b"hello\r\n")]);
    }

    #[test]
    fn decode_escaped_iac_is_data() {
        let mut codec = TelnetCodec::new();
        let events = collect_all(&mut codec, BytesMut::from(&[b'a', 255, 255, b'b'][..]));
        assert_eq!(events, vec![data(b"a"), data(&[255]), data(b"b")]);
    }

    #[test]
    fn decode_negotiation_between_data() {
        let mut codec = TelnetCodec::new();
        let events = collect_all(
            &mut codec,
            BytesMut::from(&[b'x', consts::IAC, consts::WILL, consts::option::ECHO, b'y'][..]),
        );
        assert_eq!(
            events,
            vec![
                data(b"x"),
                TelnetEvent::Command(TelnetCommand::negotiation(Negotiation::Will, TelnetOption::Echo)),
                data(b"y"),
            ]
        );
    }

    #[test]
    fn decode_incomplete_leaves_source_untouched() {
        let mut codec = TelnetCodec::new();
        let mut src = BytesMut::from(&[consts::IAC, consts::SB, consts::option::NAWS, 0, 80][..]);
        assert_eq!(codec.decode(&mut src).unwrap(), None);
        assert_eq!(src.len(), 5);
    }

    #[test]
    fn decode_eof_discards_partial_command() {
        let mut codec = TelnetCodec::new();
        let mut src = BytesMut::from(&[b'z', consts::IAC, consts::DO][..]);
        assert_eq!(codec.decode_eof(&mut src).unwrap(), Some(data(b"z")));
        assert_eq!(codec.decode_eof(&mut src).unwrap(), None);
        assert!(src.is_empty());
    }

    #[test]
    fn decode_malformed_continues() {
        let mut codec = TelnetCodec::new();
        let mut src = BytesMut::new();
        src.extend_from_slice(&[consts::IAC, consts::SB, consts::option::NAWS, 0, 80, 0, 24, b'?', b'?']);
        src.extend_from_slice(b"ok");
        let events = collect_all(&mut codec, src);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            TelnetEvent::DecodeError { error: DecodeError::InvalidFraming { offset: 7, .. }, .. }
        ));
        assert_eq!(events[1], data(b"ok"));
    }

    #[test]
    fn decode_unterminated_subnegotiation_overflows() {
        let mut codec = TelnetCodec::with_config(TelnetConfig::enabled().with_max_subnegotiation_len(16));
        let mut src = BytesMut::from(&[consts::IAC, consts::SB, consts::option::TTYPE, consts::sub::IS][..]);
        src.extend_from_slice(&[b'x'; 32]);
        let event = codec.decode(&mut src).unwrap();
        assert!(matches!(
            event,
            Some(TelnetEvent::DecodeError { error: DecodeError::Overflow { limit: 16 }, .. })
        ));
        assert_eq!(src.len(), 33);
    }

    #[test]
    fn decode_passthrough_forwards_everything() {
        let mut codec = TelnetCodec::with_config(TelnetConfig::passthrough());
        let raw = [b'a', consts::IAC, consts::DO, consts::option::ECHO];
        let events = collect_all(&mut codec, BytesMut::from(&raw[..]));
        assert_eq!(events, vec![data(&raw)]);
    }

    // ============================================================================
    // Receive Tests
    // ============================================================================

    #[test]
    fn receive_retains_partial_unit() {
        let mut codec = TelnetCodec::new();
        assert!(codec.receive(&[consts::IAC, consts::SB, consts::option::TTYPE]).is_empty());
        assert_eq!(codec.pending().len(), 3);
        assert!(codec.receive(&[consts::sub::IS, b'V', b'T']).is_empty());
        let events = codec.receive(&[b'1', b'0', b'0', consts::IAC, consts::SE]);
        assert_eq!(
            events,
            vec![TelnetEvent::Command(TelnetCommand::subnegotiation(
                TelnetOption::TTYPE,
                Some(TelnetArgument::TerminalType(TerminalType::new("VT100")))
            ))]
        );
        assert!(codec.pending().is_empty());
    }

    #[test]
    fn receive_byte_at_a_time() {
        let mut codec = TelnetCodec::new();
        let wire = [b'A', consts::IAC, consts::SB, consts::option::NAWS, 0, 132, 0, 50, consts::IAC, consts::SE];
        let mut events = Vec::new();
        for byte in wire {
            events.extend(codec.receive(&[byte]));
        }
        assert_eq!(
            events,
            vec![
                data(b"A"),
                TelnetEvent::Command(TelnetCommand::subnegotiation(
                    TelnetOption::NAWS,
                    Some(TelnetArgument::WindowSize(WindowSize::new(132, 50)))
                )),
            ]
        );
    }

    #[test]
    fn receive_passthrough_keeps_accumulator() {
        let mut codec = TelnetCodec::new();
        assert!(codec.receive(&[consts::IAC]).is_empty());
        codec.set_passthrough(true);
        assert_eq!(codec.receive(&[consts::DO, 1]), vec![data(&[consts::DO, 1])]);
        assert_eq!(codec.pending(), &[consts::IAC]);
        codec.set_passthrough(false);
        assert_eq!(
            codec.receive(&[consts::NOP]),
            vec![TelnetEvent::Command(TelnetCommand::simple(CommandCode::NoOperation))]
        );
    }
}
