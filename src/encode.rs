/*
 * Copyright (C) 2022 taylor.fish <contact@taylor.fish>
 *
 * This file is part of Base100.
 *
 * Base100 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Base100 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Base100. If not, see <https://www.gnu.org/licenses/>.
 */

//! Functions and types for encoding base100 data.

use super::{BYTES_PER_QUAD, EMOJI_OFFSET, HIGH_BASE, LOW_BASE, QUAD_PREFIX};

#[cfg(feature = "alloc")]
use alloc::{string::String, vec};

#[cfg(feature = "std")]
use super::BUFFER_LEN;
#[cfg(feature = "std")]
use std::io::{self, Write};

/// Returns the length in bytes of the base100 encoding of an input buffer
/// of length `n`.
///
/// This is an exact length, not an upper bound.
pub const fn encoded_len(n: usize) -> usize {
    n * BYTES_PER_QUAD
}

/// Encodes `src` into `dst`, one four-byte quad per input byte.
///
/// Exactly `4 * min(src.len(), dst.len() / 4)` bytes are written: whichever
/// buffer is exhausted first stops the encoding, so an undersized `dst`
/// truncates the result rather than panicking. Every byte value encodes to
/// a single well-formed UTF-8 character in the emoji block.
pub fn encode(dst: &mut [u8], src: &[u8]) {
    for (quad, &b) in dst.chunks_exact_mut(BYTES_PER_QUAD).zip(src) {
        let n = u16::from(b) + u16::from(EMOJI_OFFSET);
        quad[0] = QUAD_PREFIX[0];
        quad[1] = QUAD_PREFIX[1];
        quad[2] = (n >> 6) as u8 + HIGH_BASE;
        quad[3] = (n as u8 & 0x3f) + LOW_BASE;
    }
}

/// Returns the base100 encoding of `src`.
///
/// # Example
///
/// ```
/// assert_eq!(base100::encode_to_string(b"Hello"), "🐿👜👣👣👦");
/// ```
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string(src: &[u8]) -> String {
    let mut buf = vec![0; encoded_len(src.len())];
    encode(&mut buf, src);

    #[cfg(debug_assertions)]
    let buf = String::from_utf8(buf)
        .expect("[debug] encoded data is not valid utf-8 -- this is UB!")
        .into_bytes();

    // SAFETY: `encode` emits only well-formed four-byte UTF-8 sequences.
    unsafe { String::from_utf8_unchecked(buf) }
}

/// A streaming encoder that writes the base100 encoding of its input to an
/// inner writer.
///
/// Input is encoded through a fixed-size scratch buffer and forwarded
/// immediately; no input is retained across calls. The first sink error
/// halts the encoder permanently: it is returned from the call that made
/// no progress (or from the following call, per the [`Write`] contract),
/// and every later call fails with an error of the same
/// [`kind`](io::Error::kind).
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
pub struct Encoder<W> {
    writer: W,
    pending: Option<io::Error>,
    failed: Option<io::ErrorKind>,
    buf: [u8; BUFFER_LEN],
}

#[cfg(feature = "std")]
impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: None,
            failed: None,
            buf: [0; BUFFER_LEN],
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn sticky_err(&mut self) -> Option<io::Error> {
        if let Some(e) = self.pending.take() {
            self.failed = Some(e.kind());
            return Some(e);
        }
        self.failed.map(io::Error::from)
    }
}

#[cfg(feature = "std")]
impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(e) = self.sticky_err() {
            return Err(e);
        }
        let mut consumed = 0;
        while consumed < buf.len() {
            let len = (buf.len() - consumed).min(BUFFER_LEN / BYTES_PER_QUAD);
            let chunk = &buf[consumed..consumed + len];
            let encoded = encoded_len(chunk.len());
            encode(&mut self.buf[..encoded], chunk);
            match self.writer.write_all(&self.buf[..encoded]) {
                Ok(()) => consumed += chunk.len(),
                Err(e) => {
                    if consumed == 0 {
                        self.failed = Some(e.kind());
                        return Err(e);
                    }
                    // `consumed` bytes were already forwarded, so the
                    // error surfaces on the next call instead.
                    self.pending = Some(e);
                    break;
                }
            }
        }
        Ok(consumed)
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.sticky_err() {
            return Err(e);
        }
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // Expected quad computed from the mapping formula, independent of
    // `encode`.
    fn reference_quad(b: u8) -> [u8; 4] {
        let n = usize::from(b) + 55;
        [0xf0, 0x9f, (n / 64) as u8 + 143, (n % 64) as u8 + 128]
    }

    #[test]
    fn empty_input() {
        assert_eq!(encoded_len(0), 0);
        assert_eq!(encode_to_string(b""), "");
    }

    #[test]
    fn every_byte_matches_the_formula() {
        for b in 0..=255u8 {
            let mut quad = [0; 4];
            encode(&mut quad, &[b]);
            assert_eq!(quad, reference_quad(b), "byte {:#04x}", b);
        }
    }

    #[test]
    fn every_byte_encodes_to_a_distinct_single_char() {
        let mut seen = HashSet::new();
        for b in 0..=255u8 {
            let mut quad = [0; 4];
            encode(&mut quad, &[b]);
            assert!(seen.insert(quad), "byte {:#04x} collides", b);
            let s = core::str::from_utf8(&quad).expect("malformed quad");
            assert_eq!(s.chars().count(), 1);
        }
        assert_eq!(seen.len(), 256);
    }

    #[test]
    fn undersized_output_truncates() {
        let mut out = [0xaa_u8; 11];
        encode(&mut out, b"abc");
        let mut expected = [0xaa_u8; 11];
        expected[..4].copy_from_slice(&reference_quad(b'a'));
        expected[4..8].copy_from_slice(&reference_quad(b'b'));
        assert_eq!(out, expected);
    }

    #[test]
    fn short_input_leaves_the_rest_of_the_output_untouched() {
        let mut out = [0_u8; 12];
        encode(&mut out, b"a");
        assert_eq!(out[..4], reference_quad(b'a'));
        assert_eq!(out[4..], [0; 8]);
    }

    #[test]
    fn sample_text_matches_the_formula() {
        let src: &[u8] = b"the quick brown fox jumped over the lazy dog\n";
        let expected: Vec<u8> = src
            .iter()
            .flat_map(|&b| IntoIterator::into_iter(reference_quad(b)))
            .collect();

        let mut buf = vec![0; encoded_len(src.len())];
        encode(&mut buf, src);
        assert_eq!(buf, expected);
        assert_eq!(buf.len(), 4 * src.len());
        assert_eq!(encode_to_string(src).into_bytes(), expected);
    }
}
