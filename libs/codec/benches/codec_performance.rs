//! Performance validation for the header and frame codecs
//!
//! The header codec sits on the receive path of every message in the
//! system, so full decode and the single-field views are benchmarked
//! separately: routing code is expected to use the views and only pay for
//! a full decode when it actually consumes the message.

use codec::{header, Frame, Header, Message, MessageType, ResourceId};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_header() -> Header {
    Header {
        version: 1,
        sender: 74_001,
        node_id: 12,
        receiver: 74_002,
        typ: MessageType::Text,
        extension_length: 0,
        timestamp: 1_700_000_000_000,
        payload_length: 64,
        seqnum: 123_456,
    }
}

fn bench_header_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_codec");

    let header = sample_header();
    group.bench_function("encode", |b| {
        b.iter(|| {
            let block = codec::encode(black_box(&header));
            black_box(block)
        });
    });

    let block = codec::encode(&header).expect("sample header encodes");
    group.bench_function("decode", |b| {
        b.iter(|| {
            let decoded = codec::decode(black_box(&block[..]));
            black_box(decoded)
        });
    });

    group.finish();
}

fn bench_hot_path_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("hot_path_views");

    let msg = Message::text(1, 2, 3, "benchmark payload").expect("builds");
    let buf = msg.as_slice();

    group.bench_function("typ_view", |b| {
        b.iter(|| black_box(header::typ(black_box(buf))));
    });

    group.bench_function("payload_length_view", |b| {
        b.iter(|| black_box(header::payload_length(black_box(buf))));
    });

    group.finish();
}

fn bench_frame_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_codec");

    let payload = [0u8; 16];
    group.bench_function("from_resource_and_payload", |b| {
        b.iter(|| {
            let frame =
                Frame::from_resource_and_payload(ResourceId::Seqnum, black_box(&payload));
            black_box(frame)
        });
    });

    let frame = Frame::from_resource_and_payload(ResourceId::Seqnum, &payload).expect("builds");
    group.bench_function("accessors", |b| {
        b.iter(|| {
            let f = black_box(&frame);
            black_box((f.length(), f.req_id(), f.resource_id_raw()))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_header_codec,
    bench_hot_path_views,
    bench_frame_codec
);
criterion_main!(benches);
