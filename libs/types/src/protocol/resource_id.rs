//! Control resource registry
//!
//! Closed set of resource ids carried by request frames. A resource id
//! selects which control operation the receiving node should perform;
//! dispatch is exact, so unlike [`MessageType`](crate::MessageType) there is
//! no tolerant fallback; unknown values stay errors.

use std::fmt::{Display, Formatter};

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// Resource ids for node-to-node control frames, allocated sequentially.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TryFromPrimitive)]
pub enum ResourceId {
    Noop = 0,
    Ping = 1,
    Pong = 2,
    /// Acquire a fresh sequence number from the seqnum service.
    Seqnum = 3,
    /// Authenticate a newly opened node connection.
    NodeAuth = 4,
    /// Scheduler pushes a chat message to the message service.
    MessageForward = 5,
    /// Scheduler stops a running service.
    InterruptSignal = 6,
    ConnectionTimeout = 7,
    SeqnumNodeRegister = 8,
    MessageNodeRegister = 9,
    SeqnumNodeUnregister = 10,
    MessageNodeUnregister = 11,
    SchedulerNodeRegister = 12,
    SchedulerNodeUnregister = 13,
    MsgprocessorNodeRegister = 14,
    MsgprocessorNodeUnregister = 15,
    /// Scheduler reloads a service's configuration in place. May briefly
    /// interrupt the service.
    MessageConfigHotReload = 16,
    AssignMQProcessor = 17,
    UnassignMQProcessor = 18,
}

impl ResourceId {
    /// Numeric wire value of this resource id.
    #[inline]
    pub fn value(&self) -> u16 {
        *self as u16
    }
}

impl From<ResourceId> for u16 {
    #[inline]
    fn from(id: ResourceId) -> Self {
        id as u16
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_allocation() {
        assert_eq!(ResourceId::Noop.value(), 0);
        assert_eq!(ResourceId::Seqnum.value(), 3);
        assert_eq!(ResourceId::SchedulerNodeRegister.value(), 12);
        assert_eq!(ResourceId::UnassignMQProcessor.value(), 18);
    }

    #[test]
    fn test_strict_conversion_only() {
        assert_eq!(ResourceId::try_from(3u16).unwrap(), ResourceId::Seqnum);
        assert!(ResourceId::try_from(19u16).is_err());
        assert!(ResourceId::try_from(u16::MAX).is_err());
    }
}
