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

//! Functions and types for decoding base100 data.

use super::{BYTES_PER_QUAD, EMOJI_OFFSET, HIGH_BASE, LOW_BASE, QUAD_PREFIX};
use core::fmt::{self, Formatter};

#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

#[cfg(feature = "std")]
use super::BUFFER_LEN;
#[cfg(feature = "std")]
use std::io::{self, Read};

/// An error encountered while decoding base100 data.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The output buffer cannot hold one byte per complete input quad.
    ///
    /// Recoverable: retry with a buffer of at least `required` bytes.
    InsufficientBuffer {
        /// Bytes the output buffer must hold.
        required: usize,
        /// Bytes the provided output buffer holds.
        len: usize,
    },
    /// A quad did not begin with the fixed `0xf0 0x9f` prefix.
    ///
    /// Only returned when [`DecodeConfig::validate_prefix`] is enabled.
    BadPrefix([u8; 2]),
}

use DecodeError as Error;

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::InsufficientBuffer {
                required,
                len,
            } => write!(
                f,
                "output buffer holds {} bytes but {} are required",
                len, required,
            ),
            Self::BadPrefix(bytes) => write!(
                f,
                "bad quad prefix: {:#04x} {:#04x}",
                bytes[0], bytes[1],
            ),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeError {}

/// Used by the `decode_*_with` functions to configure the decoding
/// process.
#[non_exhaustive]
#[derive(Clone, Copy)]
pub struct DecodeConfig {
    /// Whether to require every quad to begin with the fixed `0xf0 0x9f`
    /// prefix. The mapping is decodable without it, so this is off by
    /// default; enabling it rejects input the permissive decoder would
    /// silently accept. [default: false]
    pub validate_prefix: bool,
}

impl DecodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            validate_prefix: false,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the maximum length in bytes of data decoded from `n` bytes of
/// base100 input.
///
/// This is `n / 4`, a bound that assumes the input contains no embedded
/// line breaks; strip those upstream if an exact count is needed.
pub const fn decoded_len(n: usize) -> usize {
    n / BYTES_PER_QUAD
}

/// Decodes `src` into `dst`, returning the number of bytes written.
///
/// Only the `src.len() / 4` complete quads are processed; up to three
/// trailing bytes are silently ignored at this layer (the streaming
/// decoder treats them as truncation instead). The two fixed prefix bytes
/// of each quad are not examined: decoding is the algebraic inverse of
/// the encoding formula applied positionally, so corrupt prefixes pass
/// without an error. Use [`decode_with`] to reject them.
///
/// # Errors
///
/// [`DecodeError::InsufficientBuffer`] if `dst` is shorter than the
/// number of complete quads in `src`. Nothing is written in that case.
pub fn decode(dst: &mut [u8], src: &[u8]) -> DecodeResult<usize> {
    decode_with(dst, src, DecodeConfig::new())
}

/// Decodes `src` into `dst` with the given config.
///
/// This function is like [`decode`], but takes a configuration object.
/// When a quad fails prefix validation, the bytes decoded from earlier
/// quads remain in `dst`.
pub fn decode_with(
    dst: &mut [u8],
    src: &[u8],
    config: DecodeConfig,
) -> DecodeResult<usize> {
    let quads = src.len() / BYTES_PER_QUAD;
    if dst.len() < quads {
        return Err(Error::InsufficientBuffer {
            required: quads,
            len: dst.len(),
        });
    }
    for (b, quad) in dst.iter_mut().zip(src.chunks_exact(BYTES_PER_QUAD)) {
        if config.validate_prefix && quad[..2] != QUAD_PREFIX {
            return Err(Error::BadPrefix([quad[0], quad[1]]));
        }
        *b = quad[2]
            .wrapping_sub(HIGH_BASE)
            .wrapping_mul(64)
            .wrapping_add(quad[3])
            .wrapping_sub(LOW_BASE)
            .wrapping_sub(EMOJI_OFFSET);
    }
    Ok(quads)
}

/// Returns the bytes represented by the base100 string `s`.
///
/// # Example
///
/// ```
/// let decoded = base100::decode_str("🐿👜👣👣👦").unwrap();
/// assert_eq!(decoded, b"Hello");
/// ```
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_str(s: &str) -> DecodeResult<Vec<u8>> {
    decode_str_with(s, DecodeConfig::new())
}

/// Returns the bytes represented by the base100 string `s`, decoded with
/// the given config.
///
/// This function is like [`decode_str`], but takes a configuration
/// object.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_str_with(
    s: &str,
    config: DecodeConfig,
) -> DecodeResult<Vec<u8>> {
    let src = s.as_bytes();
    let mut buf = vec![0; decoded_len(src.len())];
    decode_with(&mut buf, src, config)?;
    Ok(buf)
}

/// A streaming decoder that reads base100 text from an inner reader and
/// yields the decoded bytes.
///
/// Encoded bytes are buffered in a fixed backing array, so the source may
/// deliver reads of any size; only whole quads are ever decoded. A source
/// that ends partway through a quad produces an error of kind
/// [`UnexpectedEof`](io::ErrorKind::UnexpectedEof) once every complete
/// quad has been delivered. Terminal conditions are sticky: after a clean
/// end, further reads return `Ok(0)`; after an error, further reads fail
/// with an error of the same [`kind`](io::Error::kind).
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
pub struct Decoder<R> {
    reader: R,
    config: DecodeConfig,
    // Residual encoded bytes live at `buf[start..end]`; at most 3 remain
    // once `fill` has run.
    buf: [u8; BUFFER_LEN],
    start: usize,
    end: usize,
    eof: bool,
    pending: Option<io::Error>,
    failed: Option<io::ErrorKind>,
    done: bool,
}

#[cfg(feature = "std")]
impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecodeConfig::new())
    }

    /// This function is like [`Decoder::new`], but takes a configuration
    /// object.
    pub fn with_config(reader: R, config: DecodeConfig) -> Self {
        Self {
            reader,
            config,
            buf: [0; BUFFER_LEN],
            start: 0,
            end: 0,
            eof: false,
            pending: None,
            failed: None,
            done: false,
        }
    }

    /// Returns the wrapped reader.
    ///
    /// Residual encoded bytes buffered by the decoder are discarded.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn residual(&self) -> usize {
        self.end - self.start
    }

    /// Tops the backing array up until it holds at least one whole quad,
    /// the source reports end-of-input, or the source fails. A `Read`
    /// implementation must not return `Ok(0)` mid-stream, so a short
    /// source read cannot simply be handed back to the caller.
    fn fill(&mut self) {
        while self.residual() < BYTES_PER_QUAD
            && !self.eof
            && self.pending.is_none()
        {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    if self.residual() % BYTES_PER_QUAD != 0 {
                        self.pending = Some(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "base100 stream ends partway through a quad",
                        ));
                    }
                }
                Ok(n) => self.end += n,
                Err(e) => self.pending = Some(e),
            }
        }
    }
}

#[cfg(feature = "std")]
impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.done {
            return Ok(0);
        }
        if let Some(kind) = self.failed {
            return Err(kind.into());
        }
        if out.is_empty() {
            return Ok(0);
        }
        self.fill();

        let quads = self.residual() / BYTES_PER_QUAD;
        let len = out.len().min(quads);
        let encoded = &self.buf[self.start..self.start + len * BYTES_PER_QUAD];
        let produced = match decode_with(&mut out[..len], encoded, self.config)
        {
            Ok(n) => n,
            Err(e) => {
                self.start = 0;
                self.end = 0;
                let e = io::Error::new(io::ErrorKind::InvalidData, e);
                self.failed = Some(e.kind());
                return Err(e);
            }
        };
        self.start += produced * BYTES_PER_QUAD;

        // With a whole quad still buffered, or bytes produced this call,
        // any pending terminal condition waits for a later call.
        if produced > 0 || self.residual() >= BYTES_PER_QUAD {
            return Ok(produced);
        }
        if let Some(e) = self.pending.take() {
            self.failed = Some(e.kind());
            return Err(e);
        }
        self.done = true;
        Ok(0)
    }
}
