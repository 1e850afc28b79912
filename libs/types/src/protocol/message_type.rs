//! Chat message type registry
//!
//! Closed set of message types carried in the header's 12-bit type field.
//! Values are grouped by purpose and leave gaps for future additions within
//! each group.

use std::fmt::{Display, Formatter};

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// Message types for the chat envelope's 12-bit type field.
///
/// The numeric ranges partition the space by who talks to whom:
/// user↔user content (32..), user↔server logic (96..), server-originated
/// business events (128..), and server-internal signals (160..).
#[repr(u16)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TryFromPrimitive, Default,
)]
pub enum MessageType {
    #[default]
    NA = 0,
    /// Acknowledges a previously sent message; carried with the seqnum of
    /// the message being acknowledged.
    Ack = 1,

    // User-to-user content.
    Text = 32,
    Meme = 33,
    File = 34,
    Image = 35,
    Video = 36,
    Audio = 37,
    // Content control.
    Edit = 64,
    Withdraw = 65,

    // User-to-server logic.
    Auth = 96,
    Ping = 97,
    Pong = 98,
    Echo = 99,
    Error = 100,
    BeOffline = 101,
    InternalError = 102,

    // Business events. Some originate from a user but travel between
    // servers; those are still classified here.
    SystemMessage = 128,
    AddFriend = 129,
    RemoveFriend = 130,
    JoinGroup = 131,
    LeaveGroup = 132,
    RemoteInvoke = 133,
    SetRelationship = 134,

    // Server-internal signals.
    Noop = 160,
    Close = 161,
    Compressed = 162,
}

impl MessageType {
    /// Numeric wire value of this type.
    #[inline]
    pub fn value(&self) -> u16 {
        *self as u16
    }

    /// Wire-tolerant conversion: any value outside the registry decodes as
    /// [`MessageType::NA`]. Use `MessageType::try_from` where an unknown
    /// value must be surfaced instead of absorbed.
    #[inline]
    pub fn from_u16(value: u16) -> Self {
        MessageType::try_from(value).unwrap_or(MessageType::NA)
    }
}

impl From<MessageType> for u16 {
    #[inline]
    fn from(typ: MessageType) -> Self {
        typ as u16
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MessageType::Ack => "Ack",
            MessageType::Text => "Text",
            MessageType::Meme => "Meme",
            MessageType::File => "File",
            MessageType::Image => "Image",
            MessageType::Video => "Video",
            MessageType::Audio => "Audio",
            MessageType::Edit => "Edit",
            MessageType::Withdraw => "Withdraw",
            MessageType::Auth => "Auth",
            MessageType::Ping => "Ping",
            MessageType::Pong => "Pong",
            MessageType::Echo => "Echo",
            MessageType::Error => "Error",
            MessageType::BeOffline => "BeOffline",
            MessageType::InternalError => "InternalError",
            MessageType::SystemMessage => "SystemMessage",
            MessageType::AddFriend => "AddFriend",
            MessageType::RemoveFriend => "RemoveFriend",
            MessageType::JoinGroup => "JoinGroup",
            MessageType::LeaveGroup => "LeaveGroup",
            MessageType::RemoteInvoke => "RemoteInvoke",
            MessageType::SetRelationship => "SetRelationship",
            MessageType::Noop => "Noop",
            MessageType::Close => "Close",
            MessageType::Compressed => "Compressed",
            MessageType::NA => "NA",
        };
        write!(f, "{}", name)
    }
}
