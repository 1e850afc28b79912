//! # Quill Codec Integration Tests
//!
//! End-to-end scenarios exercising the public API across modules: message
//! assembly against header declarations, hot-path field views on raw
//! buffers, and the request/response frame contract.

use codec::{header, CodecError, Frame, Header, Message, MessageType, ResourceId, HEADER_SIZE};

#[test]
fn test_text_message_end_to_end() {
    let msg = Message::text(1, 2, 3, "aaa").unwrap();

    // 32-byte header + 3-byte payload, no extension
    assert_eq!(msg.as_slice().len(), 35);
    assert_eq!(&msg.as_slice()[32..], b"aaa");

    // Decode only the fixed header, the way a router would
    let head = codec::decode(msg.as_slice()).unwrap();
    assert_eq!(head.typ, MessageType::Text);
    assert_eq!(head.typ.value(), 32);
    assert_eq!(head.payload_length, 3);
    assert_eq!(head.extension_length, 0);
    assert_eq!(head.sender, 1);
    assert_eq!(head.receiver, 2);
    assert_eq!(head.node_id, 3);
    assert_eq!(head.version, 1);
    assert_eq!(head.seqnum, 0);
}

#[test]
fn test_assembly_round_trips_header() {
    let mut header = Header::new(MessageType::Text, 10, 20, 5);
    header.payload_length = 3;

    let msg = Message::from_parts(&header, &[], b"aaa").unwrap();
    assert_eq!(msg.as_slice().len(), 35);
    assert_eq!(&msg.as_slice()[32..35], b"aaa");
    assert_eq!(codec::decode(&msg.as_slice()[..HEADER_SIZE]).unwrap(), header);
}

#[test]
fn test_hot_path_views_skip_full_decode() {
    let msg = Message::text_with_extension(1, 2, 3, "payload", "ext").unwrap();
    let buf = msg.as_slice();

    // Routing code branches on these two before touching the body
    assert_eq!(header::typ(buf).unwrap(), MessageType::Text);
    assert_eq!(header::payload_length(buf).unwrap(), 7);
    assert_eq!(header::extension_length(buf).unwrap(), 3);

    // Total message length is derivable before reading the body
    let total = HEADER_SIZE
        + header::extension_length(buf).unwrap()
        + header::payload_length(buf).unwrap();
    assert_eq!(total, buf.len());
}

#[test]
fn test_preallocate_then_fill() {
    let mut header = Header::new(MessageType::File, 1, 2, 3);
    header.payload_length = 5;
    let mut msg = Message::preallocate(&header).unwrap();
    assert_eq!(msg.as_slice().len(), 37);

    msg.payload_mut().copy_from_slice(b"hello");
    assert_eq!(msg.payload(), b"hello");
    assert_eq!(msg.header(), header);
}

#[test]
fn test_frame_request_response_contract() {
    let payload = [0xABu8; 16];
    let mut request = Frame::from_resource_and_payload(ResourceId::Seqnum, &payload).unwrap();

    assert_eq!(request.length(), 26);
    assert_eq!(request.resource_id(), Some(ResourceId::Seqnum));
    assert_eq!(request.payload(), &payload);
    assert_eq!(request.req_id(), 0);

    // Correlation layer assigns the req_id at dispatch
    request.set_req_id(7);
    assert_eq!(request.req_id(), 7);
    assert_eq!(request.length(), 26);
    assert_eq!(request.resource_id(), Some(ResourceId::Seqnum));
    assert_eq!(request.payload(), &payload);

    // The wire bytes survive a transport round-trip unchanged
    let echoed = Frame::from_raw(request.as_slice().to_vec());
    assert_eq!(echoed, request);
}

#[test]
fn test_transport_style_frame_read() {
    // A transport learns the body length from the prefix, preallocates,
    // then fills the body from the socket.
    let sent = Frame::from_resource_and_payload(ResourceId::MessageForward, b"forward me").unwrap();
    let wire = sent.as_slice();

    let body_length = u16::from_be_bytes([wire[0], wire[1]]);
    let mut received = Frame::preallocate(body_length);
    received.body_mut().copy_from_slice(&wire[2..]);

    assert_eq!(received, sent);
    assert_eq!(received.resource_id(), Some(ResourceId::MessageForward));
    assert_eq!(received.payload(), b"forward me");
}

#[test]
fn test_malformed_inputs_surface_typed_errors() {
    // Too-short header
    assert!(matches!(
        codec::decode(&[0u8; 12]),
        Err(CodecError::MessageTooSmall { .. })
    ));

    // Declared lengths vs actual content
    let mut header = Header::new(MessageType::Text, 1, 2, 3);
    header.payload_length = 4;
    assert!(matches!(
        Message::from_parts(&header, &[], b"abc"),
        Err(CodecError::LengthMismatch { .. })
    ));

    // Out-of-domain field at encode time
    header.payload_length = 0;
    header.seqnum = 1 << 50;
    assert!(matches!(
        codec::encode(&header),
        Err(CodecError::FieldOutOfRange { .. })
    ));

    // Oversized frame body
    assert!(matches!(
        Frame::from_resource_and_payload(ResourceId::Noop, &vec![0u8; 65526]),
        Err(CodecError::BodyTooLarge { .. })
    ));
}
