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

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

pub mod decode;
pub mod encode;

#[cfg(feature = "alloc")]
extern crate alloc;

const BYTES_PER_QUAD: usize = 4;

const QUAD_PREFIX: [u8; 2] = [0xf0, 0x9f];

// A quad's third byte is `(b + 55) / 64 + HIGH_BASE`; its fourth is
// `(b + 55) % 64 + LOW_BASE`. The offset of 55 places byte 0 at U+1F3F7.
const HIGH_BASE: u8 = 143;
const LOW_BASE: u8 = 128;
const EMOJI_OFFSET: u8 = 55;

#[cfg(feature = "std")]
const BUFFER_LEN: usize = 1024;

pub use decode::decode;
pub use decode::decode_with;
pub use decode::decoded_len;
#[cfg(feature = "alloc")]
pub use decode::decode_str;
#[cfg(feature = "alloc")]
pub use decode::decode_str_with;

pub use encode::encode;
pub use encode::encoded_len;
#[cfg(feature = "alloc")]
pub use encode::encode_to_string;
