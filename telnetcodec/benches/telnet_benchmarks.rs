//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for telnetcodec performance

use bytes::{Bytes, BytesMut};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use iacstream_telnetcodec::naws::WindowSize;
use iacstream_telnetcodec::{
    CommandCode, Negotiation, TelnetArgument, TelnetCodec, TelnetFrame, TelnetOption, consts,
};
use tokio_util::codec::{Decoder, Encoder};

fn mixed_stream(size: usize) -> Vec<u8> {
    let mut stream = Vec::with_capacity(size + 64);
    while stream.len() < size {
        stream.extend_from_slice(b"You see a small lantern here.\r\n");
        stream.extend_from_slice(&[consts::IAC, consts::WILL, consts::option::ECHO]);
        stream.extend_from_slice(&[consts::IAC, consts::SB, consts::option::NAWS, 0, 120, 0, 40, consts::IAC, consts::SE]);
        stream.extend_from_slice(&[consts::IAC, consts::GA]);
    }
    stream
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encode_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_data_sizes");

    for size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut codec = TelnetCodec::new();
            let mut buffer = BytesMut::with_capacity(size * 2);
            let data = Bytes::from((0..size).map(|i| (i % 256) as u8).collect::<Vec<u8>>());

            b.iter(|| {
                buffer.clear();
                codec
                    .encode(black_box(TelnetFrame::Data(data.clone())), &mut buffer)
                    .unwrap();
            });
        });
    }

    group.finish();
}

fn bench_encode_commands(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_commands");

    group.bench_function("nop", |b| {
        let mut codec = TelnetCodec::new();
        let mut buffer = BytesMut::with_capacity(1024);

        b.iter(|| {
            buffer.clear();
            codec
                .encode(black_box(TelnetFrame::Control(CommandCode::NoOperation)), &mut buffer)
                .unwrap();
        });
    });

    group.bench_function("will_echo", |b| {
        let mut codec = TelnetCodec::new();
        let mut buffer = BytesMut::with_capacity(1024);

        b.iter(|| {
            buffer.clear();
            codec
                .encode(
                    black_box(TelnetFrame::Negotiate(Negotiation::Will, TelnetOption::Echo)),
                    &mut buffer,
                )
                .unwrap();
        });
    });

    group.bench_function("naws", |b| {
        let mut codec = TelnetCodec::new();
        let mut buffer = BytesMut::with_capacity(1024);
        let argument = TelnetArgument::WindowSize(WindowSize::new(120, 40));

        b.iter(|| {
            buffer.clear();
            let frame = TelnetFrame::subnegotiate(black_box(&argument)).unwrap();
            codec.encode(frame, &mut buffer).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Decoding Benchmarks
// ============================================================================

fn bench_decode_plain(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_plain");

    for size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let data = vec![b'A'; size];
            let mut codec = TelnetCodec::new();

            b.iter(|| {
                let mut buffer = BytesMut::from(&data[..]);
                while let Some(event) = codec.decode(&mut buffer).unwrap() {
                    black_box(event);
                }
            });
        });
    }

    group.finish();
}

fn bench_decode_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_mixed");

    for size in [1000, 10000].iter() {
        let stream = mixed_stream(*size);
        group.throughput(Throughput::Bytes(stream.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &stream, |b, stream| {
            let mut codec = TelnetCodec::new();

            b.iter(|| {
                let mut buffer = BytesMut::from(&stream[..]);
                while let Some(event) = codec.decode(&mut buffer).unwrap() {
                    black_box(event);
                }
            });
        });
    }

    group.finish();
}

fn bench_receive_fragmented(c: &mut Criterion) {
    let mut group = c.benchmark_group("receive_fragmented");
    let stream = mixed_stream(4096);
    group.throughput(Throughput::Bytes(stream.len() as u64));

    for chunk in [1, 7, 64, 1024].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), chunk, |b, &chunk| {
            let mut codec = TelnetCodec::new();

            b.iter(|| {
                for piece in stream.chunks(chunk) {
                    black_box(codec.receive(piece));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_data_sizes,
    bench_encode_commands,
    bench_decode_plain,
    bench_decode_mixed,
    bench_receive_fragmented,
);
criterion_main!(benches);
