//! # Quill Protocol Codec
//!
//! ## Purpose
//!
//! This crate is the "Rules" layer of the Quill wire protocol:
//! - Bit-level packing/unpacking of the fixed 32-byte chat-message header
//! - Assembly and slicing of complete messages (header + extension + payload)
//! - The length-prefixed request frame used for node-to-node control traffic
//! - Typed, recoverable error reporting for every malformed input
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → transport (external)
//!     ↑           ↓            ↓
//! Pure Data   Protocol     Sockets,
//! Structures  Rules        TLS, framing
//! ```
//!
//! ## What This Crate Contains
//!
//! - [`header`]: every shift and mask of the bit-packed header format,
//!   plus per-field views over raw buffers for hot-path routing
//! - [`Message`]: owned chat-message buffers with in-place field setters
//!   and convenience constructors
//! - [`Frame`]: owned control frames with fixed-offset accessors
//! - [`CodecError`]: the four recoverable failure kinds shared by both
//!   codecs
//!
//! ## What This Crate Does NOT Contain
//!
//! - Network transport logic (connection management, framing reads)
//! - Sequence-number or request-id generation: both are assigned by
//!   external services and only carried here
//! - Content validation, authentication, or retry policy
//!
//! ## Concurrency
//!
//! Everything here is a pure, synchronous transformation over an owned
//! buffer. No locks, no global state, no I/O; messages and frames move
//! between tasks by ownership transfer.

pub mod error;
pub mod frame;
pub mod header;
pub mod message;

// Re-export key types for convenience
pub use error::{CodecError, CodecResult};
pub use frame::Frame;
pub use header::{decode, encode, pack, unpack};
pub use message::Message;

// Re-export the data layer so consumers rarely need to import `types`
// directly.
pub use types::{
    timestamp_ms, Header, MessageType, RawHeader, ResourceId, EXTENSION_MAX, FRAME_BODY_MAX,
    FRAME_HEADER_SIZE, FRAME_PREFIX_SIZE, GROUP_ID_THRESHOLD, HEADER_SIZE, PAYLOAD_MAX,
    PROTOCOL_VERSION,
};
