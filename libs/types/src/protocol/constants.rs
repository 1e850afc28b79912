//! # Protocol Constants - Quill Wire Format Core Constants
//!
//! Central registry of protocol-level constants used throughout the Quill
//! system. These values define the wire format and must remain stable for
//! backward compatibility across all services.

/// Current protocol version, stamped into the header's 18-bit version field
/// by message builders.
pub const PROTOCOL_VERSION: u32 = 1;

/// Fixed size of the packed message header in bytes. Every message starts
/// with exactly this many bytes regardless of content.
pub const HEADER_SIZE: usize = 32;

/// Maximum byte length of the extension region (6-bit length field).
pub const EXTENSION_MAX: usize = (1 << 6) - 1;

/// Maximum byte length of the payload region (14-bit length field).
pub const PAYLOAD_MAX: usize = (1 << 14) - 1;

/// Receiver ids at or above this value denote a group rather than a single
/// user. The codec does not act on this partition; `receiver` is carried as
/// an opaque 46-bit identifier and the split is interpreted by routing
/// components downstream.
pub const GROUP_ID_THRESHOLD: u64 = 1 << 36;

/// Size of a request frame's length prefix in bytes (u16, big-endian).
pub const FRAME_PREFIX_SIZE: usize = 2;

/// Total fixed overhead of a request frame: 2-byte length prefix, 8-byte
/// request id, 2-byte resource id. The payload starts at this offset.
pub const FRAME_HEADER_SIZE: usize = 12;

/// Maximum value of a frame's length prefix, i.e. the largest byte count of
/// request id + resource id + payload a single frame can carry.
pub const FRAME_BODY_MAX: usize = u16::MAX as usize;
