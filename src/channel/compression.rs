//! LZ10 compression (Nintendo LZ77, type 0x10)
//!
//! Stream layout: `0x10`, decompressed size as 24-bit little endian, then groups
//! of one flag byte followed by up to eight tokens. Flag bits are read MSB first;
//! a set bit marks a two-byte back-reference, a clear bit a literal byte.

use crate::exceptions::{ChannelError, Result};
use log::trace;

const LZ10_TYPE: u8 = 0x10;
const MIN_MATCH: usize = 3;
const MAX_MATCH: usize = 18;
const WINDOW_SIZE: usize = 4096;
const MAX_INPUT_SIZE: usize = 1 << 24;

const HASH_BITS: u32 = 13;
const MAX_CHAIN: usize = 256;
const NO_POSITION: usize = usize::MAX;

/// Compress `data` into an LZ10 stream
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() >= MAX_INPUT_SIZE {
        return Err(ChannelError::Encoding(format!(
            "LZ10 input of {} bytes exceeds the 24-bit size field",
            data.len()
        )));
    }

    let mut out = Vec::with_capacity(4 + data.len() + data.len() / 8 + 1);
    out.push(LZ10_TYPE);
    out.extend_from_slice(&(data.len() as u32).to_le_bytes()[..3]);

    let mut finder = MatchFinder::new(data.len());
    let mut pos = 0;
    while pos < data.len() {
        let flag_index = out.len();
        out.push(0);

        for bit in 0..8 {
            if pos >= data.len() {
                break;
            }

            match finder.longest_match(data, pos) {
                Some((length, distance)) => {
                    out[flag_index] |= 0x80 >> bit;
                    let len_code = length - MIN_MATCH;
                    let disp_code = distance - 1;
                    out.push(((len_code << 4) | (disp_code >> 8)) as u8);
                    out.push((disp_code & 0xFF) as u8);
                    for p in pos..pos + length {
                        finder.insert(data, p);
                    }
                    pos += length;
                }
                None => {
                    out.push(data[pos]);
                    finder.insert(data, pos);
                    pos += 1;
                }
            }
        }
    }

    trace!("🗜️ LZ10 {} -> {} bytes", data.len(), out.len());
    Ok(out)
}

/// Hash chains over three-byte prefixes
struct MatchFinder {
    head: Vec<usize>,
    prev: Vec<usize>,
}

impl MatchFinder {
    fn new(len: usize) -> Self {
        Self {
            head: vec![NO_POSITION; 1 << HASH_BITS],
            prev: vec![NO_POSITION; len],
        }
    }

    fn hash(data: &[u8], pos: usize) -> usize {
        let key = (u32::from(data[pos]) << 16) | (u32::from(data[pos + 1]) << 8) | u32::from(data[pos + 2]);
        (key.wrapping_mul(2_654_435_761) >> (32 - HASH_BITS)) as usize
    }

    fn insert(&mut self, data: &[u8], pos: usize) {
        if pos + MIN_MATCH > data.len() {
            return;
        }
        let h = Self::hash(data, pos);
        self.prev[pos] = self.head[h];
        self.head[h] = pos;
    }

    /// Longest match for `pos` as (length, distance), if at least three bytes long
    fn longest_match(&self, data: &[u8], pos: usize) -> Option<(usize, usize)> {
        if pos + MIN_MATCH > data.len() {
            return None;
        }

        let limit = MAX_MATCH.min(data.len() - pos);
        let mut best: Option<(usize, usize)> = None;
        let mut candidate = self.head[Self::hash(data, pos)];
        let mut steps = 0;

        while candidate != NO_POSITION && steps < MAX_CHAIN {
            let distance = pos - candidate;
            if distance > WINDOW_SIZE {
                break;
            }

            let length = data[candidate..]
                .iter()
                .zip(&data[pos..pos + limit])
                .take_while(|(a, b)| a == b)
                .count();

            if length >= MIN_MATCH && best.is_none_or(|(best_len, _)| length > best_len) {
                best = Some((length, distance));
                if length == limit {
                    break;
                }
            }

            candidate = self.prev[candidate];
            steps += 1;
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decompress(stream: &[u8]) -> Vec<u8> {
        assert_eq!(stream[0], LZ10_TYPE);
        let size = u32::from_le_bytes([stream[1], stream[2], stream[3], 0]) as usize;
        let mut out = Vec::with_capacity(size);
        let mut i = 4;
        while out.len() < size {
            let flags = stream[i];
            i += 1;
            for bit in 0..8 {
                if out.len() >= size {
                    break;
                }
                if flags & (0x80 >> bit) == 0 {
                    out.push(stream[i]);
                    i += 1;
                } else {
                    let length = usize::from(stream[i] >> 4) + MIN_MATCH;
                    let distance = ((usize::from(stream[i] & 0x0F) << 8) | usize::from(stream[i + 1])) + 1;
                    i += 2;
                    for _ in 0..length {
                        out.push(out[out.len() - distance]);
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_header_carries_type_and_size() {
        let data = vec![7u8; 0x0123];
        let stream = compress(&data).unwrap();
        assert_eq!(&stream[..4], &[0x10, 0x23, 0x01, 0x00]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compress(&[]).unwrap(), vec![0x10, 0, 0, 0]);
    }

    #[test]
    fn test_round_trip_of_container_like_data() {
        let mut data = Vec::new();
        for i in 0..2000u32 {
            data.extend_from_slice(&(i % 37).to_be_bytes());
            data.extend_from_slice("Wii Sports".encode_utf16().flat_map(u16::to_be_bytes).collect::<Vec<_>>().as_slice());
            data.extend_from_slice(&[0xDE; 5]);
        }

        let stream = compress(&data).unwrap();
        assert!(stream.len() < data.len() / 4);
        assert_eq!(decompress(&stream), data);
    }

    #[test]
    fn test_oversized_input_is_rejected() {
        let data = vec![0u8; MAX_INPUT_SIZE];
        assert!(matches!(compress(&data), Err(ChannelError::Encoding(_))));
    }
}
