//! # Header Codec - Bit-Level Packing for the 32-Byte Message Header
//!
//! ## Purpose
//!
//! Single home for every shift and mask in the message header format. The
//! nine logical fields are packed most-significant-bits-first into four
//! big-endian 64-bit words (18|46, 18|46, 12|6|46, 14|50); none of the
//! field boundaries falls on a byte, so a one-bit error here silently
//! corrupts every message in the system. Callers work with
//! [`Header`]/[`RawHeader`] and the functions below; the masks never leak.
//!
//! ## Contract
//!
//! - [`pack`]/[`encode`] reject any field outside its bit-width domain with
//!   [`CodecError::FieldOutOfRange`]; there is no silent wraparound.
//! - [`unpack`]/[`decode`] are exact inverses for in-domain values.
//! - [`decode`] and the per-field views never panic: a buffer shorter than
//!   [`HEADER_SIZE`] is [`CodecError::MessageTooSmall`].
//! - Per-field views read one word each, so routing code can inspect
//!   `typ`/`payload_length` without decoding the whole header.

use byteorder::{BigEndian, ByteOrder};
use zerocopy::Ref;

use types::{Header, MessageType, RawHeader, EXTENSION_MAX, HEADER_SIZE, PAYLOAD_MAX};

use crate::error::{CodecError, CodecResult};

const MASK_LEFT_46: u64 = 0xFFFF_C000_0000_0000;
const MASK_RIGHT_46: u64 = 0x0000_3FFF_FFFF_FFFF;
const MASK_LEFT_50: u64 = 0xFFFC_0000_0000_0000;
const MASK_RIGHT_50: u64 = 0x0003_FFFF_FFFF_FFFF;
const MASK_LEFT_12: u64 = 0xFFF0_0000_0000_0000;
const MASK_RIGHT_12: u64 = 0x000F_FFFF_FFFF_FFFF;

/// Inclusive maxima of each field's domain.
pub const VERSION_MAX: u64 = (1 << 18) - 1;
pub const NODE_ID_MAX: u64 = (1 << 18) - 1;
pub const USER_ID_MAX: u64 = (1 << 46) - 1;
pub const TIMESTAMP_MAX: u64 = (1 << 46) - 1;
pub const SEQNUM_MAX: u64 = (1 << 50) - 1;

#[inline]
pub(crate) fn check_range(field: &'static str, value: u64, max: u64) -> CodecResult<()> {
    if value > max {
        return Err(CodecError::field_out_of_range(field, value, max));
    }
    Ok(())
}

// Word-level field extraction and insertion. `Message` reads its own words
// and funnels them through these, so the bit layout stays in this module.

#[inline]
pub(crate) fn version_of(w0: u64) -> u32 {
    (w0 >> 46) as u32
}

#[inline]
pub(crate) fn sender_of(w0: u64) -> u64 {
    w0 & MASK_RIGHT_46
}

#[inline]
pub(crate) fn node_id_of(w1: u64) -> u32 {
    (w1 >> 46) as u32
}

#[inline]
pub(crate) fn receiver_of(w1: u64) -> u64 {
    w1 & MASK_RIGHT_46
}

#[inline]
pub(crate) fn typ_of(w2: u64) -> MessageType {
    MessageType::from_u16((w2 >> 52) as u16)
}

#[inline]
pub(crate) fn extension_length_of(w2: u64) -> u8 {
    ((w2 & MASK_RIGHT_12) >> 46) as u8
}

#[inline]
pub(crate) fn timestamp_of(w2: u64) -> u64 {
    w2 & MASK_RIGHT_46
}

#[inline]
pub(crate) fn payload_length_of(w3: u64) -> u16 {
    (w3 >> 50) as u16
}

#[inline]
pub(crate) fn seqnum_of(w3: u64) -> u64 {
    w3 & MASK_RIGHT_50
}

#[inline]
pub(crate) fn with_version(w0: u64, version: u32) -> u64 {
    (w0 & MASK_RIGHT_46) | ((version as u64) << 46)
}

#[inline]
pub(crate) fn with_sender(w0: u64, sender: u64) -> u64 {
    (w0 & MASK_LEFT_46) | sender
}

#[inline]
pub(crate) fn with_node_id(w1: u64, node_id: u32) -> u64 {
    (w1 & MASK_RIGHT_46) | ((node_id as u64) << 46)
}

#[inline]
pub(crate) fn with_receiver(w1: u64, receiver: u64) -> u64 {
    (w1 & MASK_LEFT_46) | receiver
}

#[inline]
pub(crate) fn with_typ(w2: u64, typ: MessageType) -> u64 {
    (w2 & MASK_RIGHT_12) | ((typ.value() as u64) << 52)
}

#[inline]
pub(crate) fn with_extension_length(w2: u64, extension_length: u8) -> u64 {
    (w2 & (MASK_LEFT_12 | MASK_RIGHT_46)) | ((extension_length as u64) << 46)
}

#[inline]
pub(crate) fn with_timestamp(w2: u64, timestamp: u64) -> u64 {
    (w2 & MASK_LEFT_46) | timestamp
}

#[inline]
pub(crate) fn with_payload_length(w3: u64, payload_length: u16) -> u64 {
    (w3 & MASK_RIGHT_50) | ((payload_length as u64) << 50)
}

#[inline]
pub(crate) fn with_seqnum(w3: u64, seqnum: u64) -> u64 {
    (w3 & MASK_LEFT_50) | seqnum
}

/// Pack a logical header into its four-word wire form.
///
/// Every field is range-checked against its declared bit width before any
/// shifting happens; the first violation is returned as
/// [`CodecError::FieldOutOfRange`]. `typ` needs no check: the registry's
/// values all fit the 12-bit field by construction.
pub fn pack(header: &Header) -> CodecResult<RawHeader> {
    check_range("version", header.version as u64, VERSION_MAX)?;
    check_range("sender", header.sender, USER_ID_MAX)?;
    check_range("node_id", header.node_id as u64, NODE_ID_MAX)?;
    check_range("receiver", header.receiver, USER_ID_MAX)?;
    check_range(
        "extension_length",
        header.extension_length as u64,
        EXTENSION_MAX as u64,
    )?;
    check_range("timestamp", header.timestamp, TIMESTAMP_MAX)?;
    check_range(
        "payload_length",
        header.payload_length as u64,
        PAYLOAD_MAX as u64,
    )?;
    check_range("seqnum", header.seqnum, SEQNUM_MAX)?;

    let version_sender = ((header.version as u64) << 46) | header.sender;
    let node_id_receiver = ((header.node_id as u64) << 46) | header.receiver;
    let type_extension_timestamp = ((header.typ.value() as u64) << 52)
        | ((header.extension_length as u64) << 46)
        | header.timestamp;
    let payload_seqnum = ((header.payload_length as u64) << 50) | header.seqnum;

    Ok(RawHeader::new(
        version_sender,
        node_id_receiver,
        type_extension_timestamp,
        payload_seqnum,
    ))
}

/// Unpack the four-word wire form into a logical header. Pure and
/// infallible: any 32 bytes are some header; an unregistered type value
/// decodes as [`MessageType::NA`].
pub fn unpack(raw: &RawHeader) -> Header {
    let w0 = raw.version_sender.get();
    let w1 = raw.node_id_receiver.get();
    let w2 = raw.type_extension_timestamp.get();
    let w3 = raw.payload_seqnum.get();
    Header {
        version: version_of(w0),
        sender: sender_of(w0),
        node_id: node_id_of(w1),
        receiver: receiver_of(w1),
        typ: typ_of(w2),
        extension_length: extension_length_of(w2),
        timestamp: timestamp_of(w2),
        payload_length: payload_length_of(w3),
        seqnum: seqnum_of(w3),
    }
}

/// Encode a logical header into its 32-byte wire block.
pub fn encode(header: &Header) -> CodecResult<[u8; HEADER_SIZE]> {
    use zerocopy::AsBytes;
    let raw = pack(header)?;
    let mut block = [0u8; HEADER_SIZE];
    block.copy_from_slice(raw.as_bytes());
    Ok(block)
}

/// Decode the fixed header from the front of a buffer.
///
/// Accepts any buffer of at least [`HEADER_SIZE`] bytes; bytes past the
/// header (extension/payload) are ignored, so the transport can decode the
/// header first and branch on `typ`/`payload_length` before reading the
/// body. Exact inverse of [`encode`] for in-domain values.
pub fn decode(buf: &[u8]) -> CodecResult<Header> {
    let (raw, _rest) = Ref::<_, RawHeader>::new_from_prefix(buf)
        .ok_or_else(|| CodecError::message_too_small(HEADER_SIZE, buf.len(), "header decode"))?;
    Ok(unpack(raw.into_ref()))
}

#[inline]
fn word(buf: &[u8], index: usize, context: &'static str) -> CodecResult<u64> {
    if buf.len() < HEADER_SIZE {
        return Err(CodecError::message_too_small(
            HEADER_SIZE,
            buf.len(),
            context,
        ));
    }
    Ok(BigEndian::read_u64(&buf[index * 8..(index + 1) * 8]))
}

#[inline]
fn put_word(buf: &mut [u8], index: usize, value: u64) {
    BigEndian::write_u64(&mut buf[index * 8..(index + 1) * 8], value);
}

// Per-field views over a raw buffer. Each reads exactly one word; routing
// code uses these on the hot path instead of a full decode.

#[inline]
pub fn version(buf: &[u8]) -> CodecResult<u32> {
    Ok(version_of(word(buf, 0, "version view")?))
}

#[inline]
pub fn sender(buf: &[u8]) -> CodecResult<u64> {
    Ok(sender_of(word(buf, 0, "sender view")?))
}

#[inline]
pub fn node_id(buf: &[u8]) -> CodecResult<u32> {
    Ok(node_id_of(word(buf, 1, "node_id view")?))
}

#[inline]
pub fn receiver(buf: &[u8]) -> CodecResult<u64> {
    Ok(receiver_of(word(buf, 1, "receiver view")?))
}

#[inline]
pub fn typ(buf: &[u8]) -> CodecResult<MessageType> {
    Ok(typ_of(word(buf, 2, "typ view")?))
}

#[inline]
pub fn extension_length(buf: &[u8]) -> CodecResult<usize> {
    Ok(extension_length_of(word(buf, 2, "extension_length view")?) as usize)
}

#[inline]
pub fn timestamp(buf: &[u8]) -> CodecResult<u64> {
    Ok(timestamp_of(word(buf, 2, "timestamp view")?))
}

#[inline]
pub fn payload_length(buf: &[u8]) -> CodecResult<usize> {
    Ok(payload_length_of(word(buf, 3, "payload_length view")?) as usize)
}

#[inline]
pub fn seqnum(buf: &[u8]) -> CodecResult<u64> {
    Ok(seqnum_of(word(buf, 3, "seqnum view")?))
}

// In-place field setters. Like the views these are fixed-offset word
// rewrites; like `pack` they refuse out-of-domain values.

#[inline]
pub fn set_version(buf: &mut [u8], version: u32) -> CodecResult<()> {
    check_range("version", version as u64, VERSION_MAX)?;
    let w = word(buf, 0, "set_version")?;
    put_word(buf, 0, with_version(w, version));
    Ok(())
}

#[inline]
pub fn set_sender(buf: &mut [u8], sender: u64) -> CodecResult<()> {
    check_range("sender", sender, USER_ID_MAX)?;
    let w = word(buf, 0, "set_sender")?;
    put_word(buf, 0, with_sender(w, sender));
    Ok(())
}

#[inline]
pub fn set_node_id(buf: &mut [u8], node_id: u32) -> CodecResult<()> {
    check_range("node_id", node_id as u64, NODE_ID_MAX)?;
    let w = word(buf, 1, "set_node_id")?;
    put_word(buf, 1, with_node_id(w, node_id));
    Ok(())
}

#[inline]
pub fn set_receiver(buf: &mut [u8], receiver: u64) -> CodecResult<()> {
    check_range("receiver", receiver, USER_ID_MAX)?;
    let w = word(buf, 1, "set_receiver")?;
    put_word(buf, 1, with_receiver(w, receiver));
    Ok(())
}

#[inline]
pub fn set_typ(buf: &mut [u8], typ: MessageType) -> CodecResult<()> {
    let w = word(buf, 2, "set_typ")?;
    put_word(buf, 2, with_typ(w, typ));
    Ok(())
}

#[inline]
pub fn set_extension_length(buf: &mut [u8], extension_length: u8) -> CodecResult<()> {
    check_range(
        "extension_length",
        extension_length as u64,
        EXTENSION_MAX as u64,
    )?;
    let w = word(buf, 2, "set_extension_length")?;
    put_word(buf, 2, with_extension_length(w, extension_length));
    Ok(())
}

#[inline]
pub fn set_timestamp(buf: &mut [u8], timestamp: u64) -> CodecResult<()> {
    check_range("timestamp", timestamp, TIMESTAMP_MAX)?;
    let w = word(buf, 2, "set_timestamp")?;
    put_word(buf, 2, with_timestamp(w, timestamp));
    Ok(())
}

#[inline]
pub fn set_payload_length(buf: &mut [u8], payload_length: u16) -> CodecResult<()> {
    check_range("payload_length", payload_length as u64, PAYLOAD_MAX as u64)?;
    let w = word(buf, 3, "set_payload_length")?;
    put_word(buf, 3, with_payload_length(w, payload_length));
    Ok(())
}

#[inline]
pub fn set_seqnum(buf: &mut [u8], seqnum: u64) -> CodecResult<()> {
    check_range("seqnum", seqnum, SEQNUM_MAX)?;
    let w = word(buf, 3, "set_seqnum")?;
    put_word(buf, 3, with_seqnum(w, seqnum));
    Ok(())
}
