//! Golden wire-format fixtures
//!
//! Hand-computed byte images pinning the exact bit layout of both
//! envelopes. If any shift or mask moves, these fail before anything
//! subtler does; a one-bit error here corrupts every message silently, so
//! the expected bytes are written out literally rather than derived.

use codec::{decode, encode, Frame, Header, MessageType, ResourceId};
use hex_literal::hex;

/// Distinct small values in every field, so a swapped pair of fields or a
/// misplaced shift changes the image.
#[test]
fn header_fixture_distinct_fields() {
    let header = Header {
        version: 6,
        sender: 1,
        node_id: 3,
        receiver: 2,
        typ: MessageType::Ack,
        extension_length: 8,
        timestamp: 4,
        payload_length: 7,
        seqnum: 5,
    };

    let expected = hex!(
        "0001800000000001" // version 6 << 46 | sender 1
        "0000c00000000002" // node_id 3 << 46 | receiver 2
        "0012000000000004" // typ 1 << 52 | ext 8 << 46 | timestamp 4
        "001c000000000005" // payload 7 << 50 | seqnum 5
    );

    assert_eq!(encode(&header).unwrap(), expected);
    assert_eq!(decode(&expected).unwrap(), header);
}

/// Every field set to 1: each word image shows exactly where each field's
/// least significant bit lands.
#[test]
fn header_fixture_shift_sentinel() {
    let header = Header {
        version: 1,
        sender: 1,
        node_id: 1,
        receiver: 1,
        typ: MessageType::Ack, // = 1
        extension_length: 1,
        timestamp: 1,
        payload_length: 1,
        seqnum: 1,
    };

    let expected = hex!(
        "0000400000000001" // 1 << 46 | 1
        "0000400000000001" // 1 << 46 | 1
        "0010400000000001" // 1 << 52 | 1 << 46 | 1
        "0004000000000001" // 1 << 50 | 1
    );

    assert_eq!(encode(&header).unwrap(), expected);
    assert_eq!(decode(&expected).unwrap(), header);
}

#[test]
fn frame_fixture() {
    let frame = Frame::from_resource_and_payload(ResourceId::Seqnum, &[1, 2, 3]).unwrap();

    let expected = hex!(
        "000d"             // length = 10 + 3
        "0000000000000000" // req_id unset
        "0003"             // ResourceId::Seqnum
        "010203"           // payload
    );
    assert_eq!(frame.as_slice(), expected);

    let mut frame = Frame::from_raw_validated(expected.to_vec()).unwrap();
    assert_eq!(frame.length(), 13);
    assert_eq!(frame.resource_id(), Some(ResourceId::Seqnum));
    assert_eq!(frame.payload(), &[1, 2, 3]);

    frame.set_req_id(0x0102030405060708);
    assert_eq!(
        frame.as_slice(),
        hex!("000d 0102030405060708 0003 010203")
    );
}
