//! Message Header Implementation
//!
//! The header is identical for all messages and packs nine logical fields
//! into four 64-bit words, serialized big-endian:
//!
//! ```text
//! word 0 (bytes  0-7):  version(18) | sender(46)
//! word 1 (bytes  8-15): node_id(18) | receiver(46)
//! word 2 (bytes 16-23): type(12) | extension_length(6) | timestamp(46)
//! word 3 (bytes 24-31): payload_length(14) | seqnum(50)
//! ```
//!
//! Fields do not fall on byte boundaries, so the packed form is opaque: all
//! shift/mask arithmetic lives in `codec::header`, never here. This module
//! only defines the two representations and the invariant that the packed
//! form is exactly [`HEADER_SIZE`] bytes.

use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use zerocopy::byteorder::{BigEndian, U64};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

use crate::protocol::constants::{HEADER_SIZE, PROTOCOL_VERSION};
use crate::protocol::message_type::MessageType;

/// Logical message header: one properly-sized integer field per wire field.
///
/// Field domains are narrower than the Rust types (`sender` is 46 bits, not
/// 64); encoding rejects out-of-domain values rather than truncating them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Protocol version of the sending node (18 bits).
    pub version: u32,
    /// Sender user id (46 bits).
    pub sender: u64,
    /// Id of the relaying/owning node (18 bits).
    pub node_id: u32,
    /// Recipient user or group id (46 bits, opaque to the codec).
    pub receiver: u64,
    /// Message type from the closed registry (12 bits).
    pub typ: MessageType,
    /// Byte length of the extension region (6 bits).
    pub extension_length: u8,
    /// Milliseconds since the Unix epoch (46 bits).
    pub timestamp: u64,
    /// Byte length of the payload region (14 bits).
    pub payload_length: u16,
    /// Monotonically assigned sequence number (50 bits). Assigned by the
    /// seqnum service, not by the codec; 0 means not yet assigned.
    pub seqnum: u64,
}

impl Header {
    /// New header for a freshly authored message: current protocol version,
    /// wall-clock timestamp, empty regions, unassigned seqnum.
    pub fn new(typ: MessageType, sender: u64, receiver: u64, node_id: u32) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            sender,
            node_id,
            receiver,
            typ,
            extension_length: 0,
            timestamp: timestamp_ms(),
            payload_length: 0,
            seqnum: 0,
        }
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Header [ typ: {}, sender: {}, receiver: {}, node_id: {}, timestamp: {}, seqnum: {}, version: {}, extension_length: {}, payload_length: {} ]",
            self.typ,
            self.sender,
            self.receiver,
            self.node_id,
            self.timestamp,
            self.seqnum,
            self.version,
            self.extension_length,
            self.payload_length,
        )
    }
}

/// Packed wire header: four big-endian 64-bit words, 32 bytes, no padding.
///
/// Word fields are byte arrays under the hood (`U64<BigEndian>`), so the
/// struct is `Unaligned` and can be viewed at any offset of a received
/// buffer without copying.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct RawHeader {
    pub version_sender: U64<BigEndian>,
    pub node_id_receiver: U64<BigEndian>,
    pub type_extension_timestamp: U64<BigEndian>,
    pub payload_seqnum: U64<BigEndian>,
}

impl RawHeader {
    /// Header size in bytes.
    pub const SIZE: usize = HEADER_SIZE;

    /// Assemble from native-endian word values.
    #[inline]
    pub fn new(
        version_sender: u64,
        node_id_receiver: u64,
        type_extension_timestamp: u64,
        payload_seqnum: u64,
    ) -> Self {
        Self {
            version_sender: U64::new(version_sender),
            node_id_receiver: U64::new(node_id_receiver),
            type_extension_timestamp: U64::new(type_extension_timestamp),
            payload_seqnum: U64::new(payload_seqnum),
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// This is the resolution the 46-bit timestamp field carries; it overflows
/// in the year 4199.
pub fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_millis() as u64
}
