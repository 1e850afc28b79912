//! # Message Assembly - Owned Chat-Message Buffers
//!
//! ## Purpose
//!
//! [`Message`] owns the complete wire representation of one chat message:
//! the 32-byte packed header, the extension region, then the payload. The
//! buffer is allocated once and never resized; header fields may be
//! rewritten in place through the setters, and the extension/payload
//! regions may be overwritten byte-for-byte, but nothing ever changes the
//! buffer's length after construction.
//!
//! ## Trust boundary
//!
//! [`Message::from_raw`] wraps transport output without re-validation: the
//! transport reads the fixed header, learns both region lengths, reads
//! exactly that many more bytes, and hands the buffer over. Anything that
//! accepts bytes from a less disciplined source goes through
//! [`Message::from_raw_validated`] instead.
//!
//! ```text
//! Application → [Header + content] → Message buffer → Transport
//! Transport   → [exact-length read] → from_raw        (trusted)
//!             → [anything else]     → from_raw_validated
//! ```

use std::fmt::{Display, Formatter};

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use types::{Header, MessageType, EXTENSION_MAX, HEADER_SIZE, PAYLOAD_MAX};

use crate::error::{CodecError, CodecResult};
use crate::header;

/// An owned, wire-ready chat message: header ++ extension ++ payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message(Vec<u8>);

impl Message {
    /// Allocate a zero-filled message sized from the header's declared
    /// lengths, with the encoded header already written. The caller fills
    /// the extension/payload regions afterwards, which lets a builder know
    /// the final message size before it knows transport chunking.
    pub fn preallocate(header: &Header) -> CodecResult<Self> {
        let block = header::encode(header)?;
        let total =
            HEADER_SIZE + header.extension_length as usize + header.payload_length as usize;
        let mut buf = vec![0u8; total];
        buf[..HEADER_SIZE].copy_from_slice(&block);
        Ok(Self(buf))
    }

    /// Assemble a message from a logical header and its two content
    /// regions. The supplied byte counts must match the header's declared
    /// lengths exactly; a disagreement is [`CodecError::LengthMismatch`].
    pub fn from_parts(header: &Header, extension: &[u8], payload: &[u8]) -> CodecResult<Self> {
        if extension.len() != header.extension_length as usize {
            return Err(CodecError::length_mismatch(
                "extension",
                header.extension_length as usize,
                extension.len(),
            ));
        }
        if payload.len() != header.payload_length as usize {
            return Err(CodecError::length_mismatch(
                "payload",
                header.payload_length as usize,
                payload.len(),
            ));
        }
        let block = header::encode(header)?;
        let mut buf = Vec::with_capacity(HEADER_SIZE + extension.len() + payload.len());
        buf.extend_from_slice(&block);
        buf.extend_from_slice(extension);
        buf.extend_from_slice(payload);
        Ok(Self(buf))
    }

    /// Zero-copy wrap of a buffer received off the wire.
    ///
    /// Precondition (transport contract, not re-checked here): the buffer
    /// holds exactly `32 + extension_length + payload_length` bytes as
    /// declared by its own header. Accessors panic if this is violated;
    /// use [`Message::from_raw_validated`] for untrusted input.
    #[inline]
    pub fn from_raw(buf: Vec<u8>) -> Self {
        Self(buf)
    }

    /// Validating wrap for buffers that did not come from a length-framed
    /// transport read. Checks the fixed-header minimum and that the total
    /// length equals what the header declares.
    pub fn from_raw_validated(buf: Vec<u8>) -> CodecResult<Self> {
        if buf.len() < HEADER_SIZE {
            debug!(got = buf.len(), "rejecting undersized message buffer");
            return Err(CodecError::message_too_small(
                HEADER_SIZE,
                buf.len(),
                "message wrap",
            ));
        }
        let declared =
            HEADER_SIZE + header::extension_length(&buf)? + header::payload_length(&buf)?;
        if buf.len() != declared {
            debug!(
                declared,
                actual = buf.len(),
                "rejecting message with inconsistent length"
            );
            return Err(CodecError::length_mismatch("message", declared, buf.len()));
        }
        Ok(Self(buf))
    }

    /// Full wire representation, no copy.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// Consume the message, yielding its buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Decode the full logical header.
    #[inline]
    pub fn header(&self) -> Header {
        header::unpack(&types::RawHeader::new(
            self.word(0),
            self.word(1),
            self.word(2),
            self.word(3),
        ))
    }

    #[inline]
    fn word(&self, index: usize) -> u64 {
        BigEndian::read_u64(&self.0[index * 8..(index + 1) * 8])
    }

    #[inline]
    fn put_word(&mut self, index: usize, value: u64) {
        BigEndian::write_u64(&mut self.0[index * 8..(index + 1) * 8], value);
    }

    #[inline]
    pub fn version(&self) -> u32 {
        header::version_of(self.word(0))
    }

    #[inline]
    pub fn sender(&self) -> u64 {
        header::sender_of(self.word(0))
    }

    #[inline]
    pub fn node_id(&self) -> u32 {
        header::node_id_of(self.word(1))
    }

    #[inline]
    pub fn receiver(&self) -> u64 {
        header::receiver_of(self.word(1))
    }

    #[inline]
    pub fn typ(&self) -> MessageType {
        header::typ_of(self.word(2))
    }

    #[inline]
    pub fn extension_length(&self) -> usize {
        header::extension_length_of(self.word(2)) as usize
    }

    #[inline]
    pub fn timestamp(&self) -> u64 {
        header::timestamp_of(self.word(2))
    }

    #[inline]
    pub fn payload_length(&self) -> usize {
        header::payload_length_of(self.word(3)) as usize
    }

    #[inline]
    pub fn seqnum(&self) -> u64 {
        header::seqnum_of(self.word(3))
    }

    #[inline]
    pub fn set_version(&mut self, version: u32) -> CodecResult<()> {
        header::check_range("version", version as u64, header::VERSION_MAX)?;
        let w = self.word(0);
        self.put_word(0, header::with_version(w, version));
        Ok(())
    }

    #[inline]
    pub fn set_sender(&mut self, sender: u64) -> CodecResult<()> {
        header::check_range("sender", sender, header::USER_ID_MAX)?;
        let w = self.word(0);
        self.put_word(0, header::with_sender(w, sender));
        Ok(())
    }

    #[inline]
    pub fn set_node_id(&mut self, node_id: u32) -> CodecResult<()> {
        header::check_range("node_id", node_id as u64, header::NODE_ID_MAX)?;
        let w = self.word(1);
        self.put_word(1, header::with_node_id(w, node_id));
        Ok(())
    }

    #[inline]
    pub fn set_receiver(&mut self, receiver: u64) -> CodecResult<()> {
        header::check_range("receiver", receiver, header::USER_ID_MAX)?;
        let w = self.word(1);
        self.put_word(1, header::with_receiver(w, receiver));
        Ok(())
    }

    /// Registry values always fit the 12-bit field, so this cannot fail.
    #[inline]
    pub fn set_typ(&mut self, typ: MessageType) {
        let w = self.word(2);
        self.put_word(2, header::with_typ(w, typ));
    }

    #[inline]
    pub fn set_timestamp(&mut self, timestamp: u64) -> CodecResult<()> {
        header::check_range("timestamp", timestamp, header::TIMESTAMP_MAX)?;
        let w = self.word(2);
        self.put_word(2, header::with_timestamp(w, timestamp));
        Ok(())
    }

    #[inline]
    pub fn set_seqnum(&mut self, seqnum: u64) -> CodecResult<()> {
        header::check_range("seqnum", seqnum, header::SEQNUM_MAX)?;
        let w = self.word(3);
        self.put_word(3, header::with_seqnum(w, seqnum));
        Ok(())
    }

    /// Extension region: opaque metadata between header and payload.
    #[inline]
    pub fn extension(&self) -> &[u8] {
        &self.0[HEADER_SIZE..HEADER_SIZE + self.extension_length()]
    }

    #[inline]
    pub fn extension_mut(&mut self) -> &mut [u8] {
        let end = HEADER_SIZE + self.extension_length();
        &mut self.0[HEADER_SIZE..end]
    }

    /// Payload region: the message content, after the extension.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        let start = HEADER_SIZE + self.extension_length();
        &self.0[start..start + self.payload_length()]
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut [u8] {
        let start = HEADER_SIZE + self.extension_length();
        let end = start + self.payload_length();
        &mut self.0[start..end]
    }

    /// Overwrite the extension region in place. The replacement must have
    /// the declared length; region sizes are fixed at allocation.
    pub fn set_extension(&mut self, extension: &[u8]) -> CodecResult<()> {
        let declared = self.extension_length();
        if extension.len() != declared {
            return Err(CodecError::length_mismatch(
                "extension",
                declared,
                extension.len(),
            ));
        }
        self.extension_mut().copy_from_slice(extension);
        Ok(())
    }

    /// Overwrite the payload region in place, same-length only.
    pub fn set_payload(&mut self, payload: &[u8]) -> CodecResult<()> {
        let declared = self.payload_length();
        if payload.len() != declared {
            return Err(CodecError::length_mismatch(
                "payload",
                declared,
                payload.len(),
            ));
        }
        self.payload_mut().copy_from_slice(payload);
        Ok(())
    }

    fn content(
        typ: MessageType,
        sender: u64,
        receiver: u64,
        node_id: u32,
        extension: &[u8],
        payload: &[u8],
    ) -> CodecResult<Self> {
        if extension.len() > EXTENSION_MAX {
            return Err(CodecError::field_out_of_range(
                "extension_length",
                extension.len() as u64,
                EXTENSION_MAX as u64,
            ));
        }
        if payload.len() > PAYLOAD_MAX {
            return Err(CodecError::field_out_of_range(
                "payload_length",
                payload.len() as u64,
                PAYLOAD_MAX as u64,
            ));
        }
        let mut header = Header::new(typ, sender, receiver, node_id);
        header.extension_length = extension.len() as u8;
        header.payload_length = payload.len() as u16;
        Self::from_parts(&header, extension, payload)
    }

    /// Text message with the current wall-clock timestamp and no seqnum.
    pub fn text(sender: u64, receiver: u64, node_id: u32, text: &str) -> CodecResult<Self> {
        Self::content(MessageType::Text, sender, receiver, node_id, &[], text.as_bytes())
    }

    /// Text message carrying a note in the extension region.
    pub fn text_with_extension(
        sender: u64,
        receiver: u64,
        node_id: u32,
        text: &str,
        note: &str,
    ) -> CodecResult<Self> {
        Self::content(
            MessageType::Text,
            sender,
            receiver,
            node_id,
            note.as_bytes(),
            text.as_bytes(),
        )
    }

    pub fn ping(sender: u64, receiver: u64, node_id: u32) -> CodecResult<Self> {
        Self::content(MessageType::Ping, sender, receiver, node_id, &[], b"ping")
    }

    pub fn pong(sender: u64, receiver: u64, node_id: u32) -> CodecResult<Self> {
        Self::content(MessageType::Pong, sender, receiver, node_id, &[], b"pong")
    }

    pub fn error_message(
        sender: u64,
        receiver: u64,
        node_id: u32,
        reason: &str,
    ) -> CodecResult<Self> {
        Self::content(
            MessageType::Error,
            sender,
            receiver,
            node_id,
            &[],
            reason.as_bytes(),
        )
    }

    pub fn auth(sender: u64, receiver: u64, node_id: u32, token: &str) -> CodecResult<Self> {
        Self::content(
            MessageType::Auth,
            sender,
            receiver,
            node_id,
            &[],
            token.as_bytes(),
        )
    }

    /// Standalone acknowledgement carrying the client's own timestamp as a
    /// decimal string.
    pub fn ack(client_timestamp: u64) -> CodecResult<Self> {
        Self::content(
            MessageType::Ack,
            0,
            0,
            0,
            &[],
            client_timestamp.to_string().as_bytes(),
        )
    }

    /// Acknowledgement of a received message: addressed back to its sender,
    /// carrying its seqnum and its send timestamp as the payload.
    pub fn ack_of(&self) -> CodecResult<Self> {
        let stamp = self.timestamp().to_string();
        let mut header = Header::new(MessageType::Ack, 0, self.sender(), 0);
        header.seqnum = self.seqnum();
        header.payload_length = stamp.len() as u16;
        Self::from_parts(&header, &[], stamp.as_bytes())
    }

    /// Header-only message of type NA.
    pub fn empty() -> CodecResult<Self> {
        Self::content(MessageType::NA, 0, 0, 0, &[], &[])
    }

    /// Header-only keep-alive.
    pub fn noop() -> CodecResult<Self> {
        let mut msg = Self::empty()?;
        msg.set_typ(MessageType::Noop);
        Ok(msg)
    }

    /// Untyped message around arbitrary payload bytes.
    pub fn raw(sender: u64, receiver: u64, node_id: u32, payload: &[u8]) -> CodecResult<Self> {
        Self::content(MessageType::NA, sender, receiver, node_id, &[], payload)
    }

    pub fn raw_with_extension(
        sender: u64,
        receiver: u64,
        node_id: u32,
        payload: &[u8],
        extension: &[u8],
    ) -> CodecResult<Self> {
        Self::content(MessageType::NA, sender, receiver, node_id, extension, payload)
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Message [ {}, extension: {}, payload: {} ]",
            self.header(),
            String::from_utf8_lossy(self.extension()),
            String::from_utf8_lossy(self.payload()),
        )
    }
}
