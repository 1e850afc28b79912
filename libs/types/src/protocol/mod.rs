//! Protocol layer modules for the Quill system
//!
//! This module contains protocol-specific data definitions: wire constants,
//! the message header in both logical and packed form, and the closed
//! registries consumed by dispatch logic.

pub mod constants;
pub mod message;
pub mod message_type;
pub mod resource_id;

pub use constants::{
    EXTENSION_MAX, FRAME_BODY_MAX, FRAME_HEADER_SIZE, FRAME_PREFIX_SIZE, GROUP_ID_THRESHOLD,
    HEADER_SIZE, PAYLOAD_MAX, PROTOCOL_VERSION,
};
pub use message::{Header, RawHeader};
pub use message_type::MessageType;
pub use resource_id::ResourceId;
