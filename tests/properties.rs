use std::io::{Cursor, Read, Write};

use proptest::prelude::*;

use base100::decode::Decoder;
use base100::encode::Encoder;
use base100::{decode, decode_str, decoded_len, encode_to_string, encoded_len};

proptest! {
    #[test]
    fn round_trip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let text = encode_to_string(&data);
        prop_assert_eq!(text.len(), encoded_len(data.len()));
        prop_assert_eq!(decode_str(&text).unwrap(), data);
    }

    #[test]
    fn encoded_text_is_one_emoji_char_per_byte(
        data in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let text = encode_to_string(&data);
        prop_assert_eq!(text.chars().count(), data.len());
        for c in text.chars() {
            let cp = c as u32;
            prop_assert!(
                (0x1f3f7..=0x1f4f6).contains(&cp),
                "char {:?} outside the emoji block", c,
            );
        }
    }

    #[test]
    fn trailing_bytes_never_affect_whole_quads(
        data in proptest::collection::vec(any::<u8>(), 1..256),
        cut in 1..4_usize,
    ) {
        let text = encode_to_string(&data).into_bytes();
        let short = &text[..text.len() - cut];
        let mut out = vec![0; decoded_len(short.len())];
        prop_assert_eq!(decode(&mut out, short).unwrap(), data.len() - 1);
        prop_assert_eq!(out, data[..data.len() - 1].to_vec());
    }

    #[test]
    fn streaming_encoder_matches_one_shot(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        chunk in 1..400_usize,
    ) {
        let mut encoder = Encoder::new(Vec::new());
        for piece in data.chunks(chunk) {
            prop_assert_eq!(encoder.write(piece).unwrap(), piece.len());
        }
        prop_assert_eq!(encoder.into_inner(), encode_to_string(&data).into_bytes());
    }

    #[test]
    fn streaming_decoder_matches_one_shot(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        size in 1..97_usize,
    ) {
        let text = encode_to_string(&data).into_bytes();
        let mut decoder = Decoder::new(Cursor::new(&text));
        let mut out = Vec::new();
        let mut buf = vec![0; size];
        loop {
            let n = decoder.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        prop_assert_eq!(out, data);
    }
}
