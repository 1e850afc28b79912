//! Demonstrates both wire envelopes end to end: build a chat message,
//! inspect it the way a routing node would, then run a control
//! request/response exchange over the frame codec.
//!
//! Run with: cargo run --example wire_demo -p codec

use codec::{header, Frame, Message, MessageType, ResourceId};

fn main() {
    // Chat envelope: a text message from user 1 to user 2 through node 3
    let msg = Message::text(1, 2, 3, "hello over the wire").expect("in-domain content");
    println!("built: {}", msg);
    println!("wire size: {} bytes", msg.as_slice().len());

    // A router branches on two fields without decoding the whole header
    let buf = msg.as_slice();
    let typ = header::typ(buf).expect("full header present");
    let payload_length = header::payload_length(buf).expect("full header present");
    println!("routing on typ={typ} payload_length={payload_length}");

    // Full decode once the message is actually consumed
    let head = codec::decode(buf).expect("full header present");
    assert_eq!(head.typ, MessageType::Text);
    println!("decoded: {}", head);

    // Control envelope: ask the seqnum service for a fresh sequence number
    let mut request = Frame::from_resource_and_payload(ResourceId::Seqnum, &2u64.to_be_bytes())
        .expect("payload fits a frame");
    request.set_req_id(42); // correlation layer assigns this at dispatch
    println!("request: {}", request);

    // The responder echoes the req_id so the caller can match the reply
    let reply = Frame::from_raw(request.as_slice().to_vec());
    assert_eq!(reply.req_id(), 42);
    assert_eq!(reply.resource_id(), Some(ResourceId::Seqnum));
    println!("reply correlated: req_id={}", reply.req_id());
}
