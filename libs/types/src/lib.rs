//! # Quill Unified Types Library
//!
//! Pure data structures for the Quill wire protocol: the logical message
//! header, its packed 32-byte wire form, protocol constants, and the two
//! closed registries (chat message types and control resource ids).
//!
//! ## Design Philosophy
//!
//! - **Pure Data**: no encoding rules, no validation policy, no I/O; those
//!   live in the `codec` crate
//! - **Zero-Copy Ready**: the packed header is a zerocopy-enabled struct so
//!   parsers can reinterpret received buffers without allocation
//! - **Closed Registries**: message types and resource ids are `#[repr(u16)]`
//!   enums with strict primitive conversion; dispatch logic never sees a
//!   bare integer it did not ask for
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → libs/codec → transport (external)
//!     ↑             ↓              ↓
//! Pure Data    Protocol Rules   Sockets
//! Structures   Encoding/Decode  Framing
//! ```

pub mod protocol;

// Re-export key types for convenience
pub use protocol::constants::{
    EXTENSION_MAX, FRAME_BODY_MAX, FRAME_HEADER_SIZE, FRAME_PREFIX_SIZE, GROUP_ID_THRESHOLD,
    HEADER_SIZE, PAYLOAD_MAX, PROTOCOL_VERSION,
};
pub use protocol::message::{timestamp_ms, Header, RawHeader};
pub use protocol::message_type::MessageType;
pub use protocol::resource_id::ResourceId;
