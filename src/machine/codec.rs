//! Appliance line codec.
//!
//! Each semantic byte is spread over four wire bytes. Only bits 2 and 5 of a
//! wire byte carry data; every other bit stays at the idle level:
//!
//! ```text
//!  semantic byte  b7 b6 | b5 b4 | b3 b2 | b1 b0
//!                  └─ w3   └─ w2   └─ w1   └─ w0
//!
//!  wire byte wk   1 1 [b2k+1] 1 1 [b2k] 1 1
//!                      bit 5        bit 2
//! ```
//!
//! A frame is the encoded payload followed by [`MARKER`], which is the
//! encoding of CR LF.

/// Idle line level for every non-data bit.
pub const IDLE: u8 = 0xFF;

/// Wire bit carrying the low bit of a pair.
const LOW_BIT: u8 = 2;
/// Wire bit carrying the high bit of a pair.
const HIGH_BIT: u8 = 5;

/// Wire bytes per semantic byte.
pub const GROUP_LEN: usize = 4;

/// Frame terminator as it appears in decoded text.
pub const LINE_END: &[u8] = b"\r\n";

/// Frame terminator as it appears on the wire.
pub const MARKER: [u8; 8] = [0xDF, 0xFF, 0xDB, 0xDB, 0xFB, 0xFB, 0xDB, 0xDB];

/// Wire length of a frame carrying `input_len` semantic bytes.
pub const fn frame_len(input_len: usize) -> usize {
    input_len * GROUP_LEN + MARKER.len()
}

#[inline]
const fn bit(value: u8, pos: u8) -> u8 {
    (value >> pos) & 1
}

#[inline]
const fn with_bit(value: u8, pos: u8, set: u8) -> u8 {
    if set == 0 {
        value & !(1 << pos)
    } else {
        value | (1 << pos)
    }
}

/// Encode one semantic byte into its four-byte wire group.
pub const fn encode_byte(value: u8) -> [u8; GROUP_LEN] {
    let mut group = [IDLE; GROUP_LEN];
    let mut k = 0;
    while k < GROUP_LEN {
        let pair = k as u8 * 2;
        group[k] = with_bit(group[k], LOW_BIT, bit(value, pair));
        group[k] = with_bit(group[k], HIGH_BIT, bit(value, pair + 1));
        k += 1;
    }
    group
}

/// Decode one four-byte wire group back into a semantic byte.
pub const fn decode(sample: [u8; GROUP_LEN]) -> u8 {
    let mut value = 0u8;
    let mut k = 0;
    while k < GROUP_LEN {
        let pair = k as u8 * 2;
        value = with_bit(value, pair, bit(sample[k], LOW_BIT));
        value = with_bit(value, pair + 1, bit(sample[k], HIGH_BIT));
        k += 1;
    }
    value
}

/// Encode `input` into `out` and append the marker.
///
/// Writes at most `out.len()` bytes and returns how many were written; a
/// correctly sized buffer is [`frame_len`]`(input.len())` bytes.
pub fn encode_into(input: &[u8], out: &mut [u8]) -> usize {
    let mut frame = input
        .iter()
        .flat_map(|&b| encode_byte(b))
        .chain(MARKER);
    let mut written = 0;
    for (slot, byte) in out.iter_mut().zip(&mut frame) {
        *slot = byte;
        written += 1;
    }
    written
}

/// Encode `input` into a freshly allocated frame.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut frame = vec![IDLE; frame_len(input.len())];
    encode_into(input, &mut frame);
    frame
}

/// Decode every complete group in `wire`; a trailing partial group is ignored.
pub fn decode_groups(wire: &[u8]) -> Vec<u8> {
    wire.chunks_exact(GROUP_LEN)
        .map(|c| decode([c[0], c[1], c[2], c[3]]))
        .collect()
}
