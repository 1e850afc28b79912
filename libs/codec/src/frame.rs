//! # Request Frame Codec - Control Envelope for Node-to-Node Traffic
//!
//! ## Purpose
//!
//! [`Frame`] is the length-prefixed envelope platform nodes exchange for
//! control operations: seqnum allocation, node registration, scheduler and
//! processor assignment, config hot-reload. Unlike the chat header nothing
//! here is bit-packed; every field sits on a byte boundary:
//!
//! ```text
//! bytes 0-1:   length (= 10 + payload bytes), u16 big-endian
//! bytes 2-9:   req_id, u64 big-endian (0 = unset / fire-and-forget)
//! bytes 10-11: resource_id, u16 big-endian
//! bytes 12..:  payload (opaque)
//! ```
//!
//! The length prefix counts everything after itself, so a transport reads
//! two bytes, then exactly `length` more, and hands the whole buffer to
//! [`Frame::from_raw`]. `req_id` is a correlation token assigned by the
//! requesting side's correlation layer after construction; `req_id` and
//! `resource_id` occupy fixed offsets and may be rewritten in place.

use std::fmt::{Display, Formatter};

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use types::{ResourceId, FRAME_BODY_MAX, FRAME_HEADER_SIZE, FRAME_PREFIX_SIZE};

use crate::error::{CodecError, CodecResult};

const REQ_ID_OFFSET: usize = 2;
const RESOURCE_ID_OFFSET: usize = 10;

/// An owned, wire-ready control frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame(Vec<u8>);

impl Frame {
    /// Allocate a zero-filled frame for a body of the given length, with
    /// the length prefix already written. The transport fills the body via
    /// [`Frame::body_mut`] as it reads from the socket.
    ///
    /// The `u16` parameter is the whole domain of the prefix, so this
    /// cannot oversize; the fallible path for caller-supplied payloads is
    /// [`Frame::from_resource_and_payload`].
    pub fn preallocate(body_length: u16) -> Self {
        let mut buf = vec![0u8; body_length as usize + FRAME_PREFIX_SIZE];
        BigEndian::write_u16(&mut buf[0..FRAME_PREFIX_SIZE], body_length);
        Self(buf)
    }

    /// Build a new request for the given resource. The req_id region is
    /// zeroed (unset); the correlation layer assigns it with
    /// [`Frame::set_req_id`] when the request is dispatched.
    pub fn from_resource_and_payload(resource_id: ResourceId, payload: &[u8]) -> CodecResult<Self> {
        let body_length = FRAME_HEADER_SIZE - FRAME_PREFIX_SIZE + payload.len();
        if body_length > FRAME_BODY_MAX {
            return Err(CodecError::body_too_large(body_length, FRAME_BODY_MAX));
        }
        let mut buf = vec![0u8; FRAME_HEADER_SIZE + payload.len()];
        BigEndian::write_u16(&mut buf[0..FRAME_PREFIX_SIZE], body_length as u16);
        // bytes 2-9 stay zero: req_id unset
        BigEndian::write_u16(
            &mut buf[RESOURCE_ID_OFFSET..FRAME_HEADER_SIZE],
            resource_id.value(),
        );
        buf[FRAME_HEADER_SIZE..].copy_from_slice(payload);
        Ok(Self(buf))
    }

    /// Zero-copy wrap of a buffer received off the wire.
    ///
    /// Precondition (transport contract, not re-checked here): the buffer
    /// holds exactly `2 + length` bytes for a well-formed frame, so at
    /// least [`FRAME_HEADER_SIZE`] in total. Accessors panic if this is
    /// violated; use [`Frame::from_raw_validated`] for untrusted input.
    #[inline]
    pub fn from_raw(buf: Vec<u8>) -> Self {
        Self(buf)
    }

    /// Validating wrap: checks the fixed-offset minimum and that the
    /// buffer length agrees with the length prefix.
    pub fn from_raw_validated(buf: Vec<u8>) -> CodecResult<Self> {
        if buf.len() < FRAME_HEADER_SIZE {
            debug!(got = buf.len(), "rejecting undersized frame buffer");
            return Err(CodecError::message_too_small(
                FRAME_HEADER_SIZE,
                buf.len(),
                "frame wrap",
            ));
        }
        let declared = FRAME_PREFIX_SIZE + BigEndian::read_u16(&buf[0..FRAME_PREFIX_SIZE]) as usize;
        if buf.len() != declared {
            debug!(
                declared,
                actual = buf.len(),
                "rejecting frame with inconsistent length prefix"
            );
            return Err(CodecError::length_mismatch("frame body", declared, buf.len()));
        }
        Ok(Self(buf))
    }

    /// Full wire representation, no copy.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Consume the frame, yielding its buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Declared body length: everything after the 2-byte prefix.
    #[inline]
    pub fn length(&self) -> u16 {
        BigEndian::read_u16(&self.0[0..FRAME_PREFIX_SIZE])
    }

    /// Correlation token; 0 means unset/fire-and-forget.
    #[inline]
    pub fn req_id(&self) -> u64 {
        BigEndian::read_u64(&self.0[REQ_ID_OFFSET..RESOURCE_ID_OFFSET])
    }

    #[inline]
    pub fn set_req_id(&mut self, req_id: u64) {
        BigEndian::write_u64(&mut self.0[REQ_ID_OFFSET..RESOURCE_ID_OFFSET], req_id);
    }

    /// Raw resource id for dispatch on values outside the registry.
    #[inline]
    pub fn resource_id_raw(&self) -> u16 {
        BigEndian::read_u16(&self.0[RESOURCE_ID_OFFSET..FRAME_HEADER_SIZE])
    }

    /// Resource id, `None` if the wire value is not in the registry.
    #[inline]
    pub fn resource_id(&self) -> Option<ResourceId> {
        ResourceId::try_from(self.resource_id_raw()).ok()
    }

    #[inline]
    pub fn set_resource_id(&mut self, resource_id: ResourceId) {
        BigEndian::write_u16(
            &mut self.0[RESOURCE_ID_OFFSET..FRAME_HEADER_SIZE],
            resource_id.value(),
        );
    }

    /// Opaque request payload: everything after the fixed offsets.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.0[FRAME_HEADER_SIZE..]
    }

    /// Everything the length prefix counts: req_id, resource_id, payload.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.0[FRAME_PREFIX_SIZE..]
    }

    /// Mutable body view, used by transports filling a preallocated frame.
    #[inline]
    pub fn body_mut(&mut self) -> &mut [u8] {
        &mut self.0[FRAME_PREFIX_SIZE..]
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Frame [ length: {}, req_id: {}, resource_id: {}, payload: {} bytes ]",
            self.length(),
            self.req_id(),
            self.resource_id_raw(),
            self.payload().len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preallocate_writes_prefix_only() {
        let frame = Frame::preallocate(26);
        assert_eq!(frame.as_slice().len(), 28);
        assert_eq!(frame.length(), 26);
        assert!(frame.body().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_resource_and_payload() {
        let payload = [7u8; 16];
        let frame = Frame::from_resource_and_payload(ResourceId::Seqnum, &payload).unwrap();

        assert_eq!(frame.length(), 26);
        assert_eq!(frame.req_id(), 0);
        assert_eq!(frame.resource_id(), Some(ResourceId::Seqnum));
        assert_eq!(frame.payload(), &payload);
        assert_eq!(frame.as_slice().len(), 28);
        assert_eq!(frame.body().len(), 26);
    }

    #[test]
    fn test_set_req_id_leaves_other_fields() {
        let payload = [7u8; 16];
        let mut frame = Frame::from_resource_and_payload(ResourceId::Seqnum, &payload).unwrap();
        frame.set_req_id(7);

        assert_eq!(frame.req_id(), 7);
        assert_eq!(frame.length(), 26);
        assert_eq!(frame.resource_id(), Some(ResourceId::Seqnum));
        assert_eq!(frame.payload(), &payload);
    }

    #[test]
    fn test_set_resource_id_in_place() {
        let mut frame = Frame::from_resource_and_payload(ResourceId::Ping, b"").unwrap();
        frame.set_resource_id(ResourceId::Pong);
        assert_eq!(frame.resource_id(), Some(ResourceId::Pong));
        assert_eq!(frame.length(), 10);
    }

    #[test]
    fn test_oversized_body_is_rejected() {
        let payload = vec![0u8; FRAME_BODY_MAX - 10];
        assert!(Frame::from_resource_and_payload(ResourceId::Noop, &payload).is_ok());

        let payload = vec![0u8; FRAME_BODY_MAX - 9];
        assert_eq!(
            Frame::from_resource_and_payload(ResourceId::Noop, &payload).unwrap_err(),
            CodecError::body_too_large(FRAME_BODY_MAX + 1, FRAME_BODY_MAX)
        );
    }

    #[test]
    fn test_from_raw_validated() {
        let frame = Frame::from_resource_and_payload(ResourceId::NodeAuth, b"token").unwrap();
        let wire = frame.clone().into_vec();
        assert_eq!(Frame::from_raw_validated(wire.clone()).unwrap(), frame);

        let mut truncated = wire.clone();
        truncated.pop();
        assert!(matches!(
            Frame::from_raw_validated(truncated),
            Err(CodecError::LengthMismatch { .. })
        ));

        assert!(matches!(
            Frame::from_raw_validated(vec![0u8; 5]),
            Err(CodecError::MessageTooSmall { .. })
        ));
    }

    #[test]
    fn test_unknown_resource_id_stays_raw() {
        let mut frame = Frame::from_resource_and_payload(ResourceId::Noop, b"").unwrap();
        BigEndian::write_u16(&mut frame.0[RESOURCE_ID_OFFSET..FRAME_HEADER_SIZE], 999);
        assert_eq!(frame.resource_id(), None);
        assert_eq!(frame.resource_id_raw(), 999);
    }
}
