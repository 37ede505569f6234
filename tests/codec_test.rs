use std::io::{BufReader, Cursor, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use paste::paste;
use proptest::{collection::vec, prelude::*};
use wust_frame::{Frame, FrameError, Opcode, Role, decode, decode_async, encode, encode_async};

#[allow(clippy::cast_possible_truncation)]
fn make_payload(len: usize) -> Vec<u8> { (0..len).map(|i| i as u8).collect() }

fn round_trip(frame: &Frame) -> Frame {
    let mut wire = Vec::new();
    encode(frame, &mut wire).unwrap();
    assert_eq!(wire.len(), frame.encoded_len());
    decode(&mut Cursor::new(wire)).unwrap()
}

macro_rules! round_trip_sizes {
    ($($len:expr),* $(,)?) => {
        $(paste! {
            #[test]
            fn [<round_trip_unmasked_ $len>]() {
                let frame = Frame::new(true, 2, make_payload($len));
                assert_eq!(round_trip(&frame), frame);
            }

            #[test]
            fn [<round_trip_masked_ $len>]() {
                let frame = Frame::new(false, 1, make_payload($len)).with_mask([0x37, 0xFA, 0x21, 0x3D]);
                assert_eq!(round_trip(&frame), frame);
            }
        })*
    };
}

round_trip_sizes!(0, 1, 125, 126, 65535, 65536);

#[test]
fn extended_length_field_matches_tier() {
    let header_of = |len: usize| {
        let mut wire = Vec::new();
        encode(&Frame::new(true, 2, make_payload(len)), &mut wire).unwrap();
        wire.truncate(10);
        wire
    };

    assert_eq!(header_of(125)[1], 125);
    assert_eq!(&header_of(126)[1..4], &[126, 0x00, 0x7E]);
    assert_eq!(&header_of(65536)[1..10], &[127, 0, 0, 0, 0, 0, 0x01, 0x00, 0x00]);
}

#[test]
fn client_frames_are_masked_on_the_wire() {
    let frame = Frame::outgoing(Role::Client, true, Opcode::Text.into(), "Hello");
    let wire = frame.to_bytes();
    let key = frame.mask_key().unwrap();

    assert_eq!(wire[1], 0x80 | 5);
    assert_eq!(&wire[2..6], &key);
    let unmasked: Vec<u8> = wire[6..]
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ key[i % 4])
        .collect();
    assert_eq!(unmasked, b"Hello");
}

#[test]
fn stream_of_fragments_decodes_in_order() {
    let fragments = [
        Frame::new(false, Opcode::Text.into(), "Hel"),
        Frame::new(true, Opcode::Ping.into(), "ping").with_mask([1, 2, 3, 4]),
        Frame::new(true, Opcode::Cont.into(), "lo"),
    ];

    let mut wire = Vec::new();
    for f in &fragments {
        encode(f, &mut wire).unwrap();
    }

    let mut input = Cursor::new(wire);
    for f in &fragments {
        assert_eq!(&decode(&mut input).unwrap(), f);
    }
    assert!(matches!(decode(&mut input), Err(FrameError::Truncated)));
}

#[test]
fn frames_cross_a_tcp_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    // echo server: unmask what the client sent, reply unmasked
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut writer = stream;
        let frame = decode(&mut reader).unwrap();
        assert!(frame.masked());
        encode(&frame.unmasked(), &mut writer).unwrap();
    });

    let mut stream = TcpStream::connect(addr).unwrap();
    let sent = Frame::outgoing(Role::Client, true, Opcode::Bin.into(), make_payload(70_000));
    encode(&sent, &mut stream).unwrap();
    stream.flush().unwrap();

    let echoed = decode(&mut stream).unwrap();
    server.join().unwrap();

    assert!(!echoed.masked());
    assert_eq!(echoed.payload(), sent.payload());
}

#[tokio::test]
async fn async_and_blocking_agree() {
    let frame = Frame::new(true, 2, make_payload(300)).with_mask([9, 9, 9, 9]);

    let mut async_wire = Vec::new();
    encode_async(&frame, &mut async_wire).await.unwrap();
    assert_eq!(async_wire, frame.to_bytes());

    let decoded = decode_async(&mut &async_wire[..]).await.unwrap();
    assert_eq!(decoded, frame);
}

proptest! {
    #[test]
    fn round_trip_any_frame(
        fin in any::<bool>(),
        opcode in 0u8..16,
        payload in vec(any::<u8>(), 0..2048),
        mask in any::<Option<[u8; 4]>>(),
    ) {
        let mut frame = Frame::new(fin, opcode, payload);
        if let Some(key) = mask {
            frame = frame.with_mask(key);
        }
        prop_assert_eq!(round_trip(&frame), frame);
    }

    #[test]
    fn every_strict_prefix_is_truncated(
        payload in vec(any::<u8>(), 0..300),
        mask in any::<Option<[u8; 4]>>(),
        cut in any::<prop::sample::Index>(),
    ) {
        let mut frame = Frame::new(true, 2, payload);
        if let Some(key) = mask {
            frame = frame.with_mask(key);
        }
        let wire = frame.to_bytes();
        let n = cut.index(wire.len());
        prop_assert!(matches!(decode(&mut &wire[..n]), Err(FrameError::Truncated)));
    }
}
