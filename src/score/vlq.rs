//! Variable-length quantities: 7-bit groups, most significant first, high bit
//! set on every byte except the last.

use super::ScoreError;

/// Largest value that fits in four VLQ bytes.
pub const MAX_VLQ: u32 = (1 << 28) - 1;

/// Append the VLQ encoding of `value` to `buf`.
pub fn write_vlq(buf: &mut Vec<u8>, value: u32) -> Result<(), ScoreError> {
    if value > MAX_VLQ {
        return Err(ScoreError::VlqOverflow(value as u64));
    }
    let mut bytes = [0u8; 4];
    let mut i = 3;
    let mut rest = value;
    bytes[i] = (rest & 0x7F) as u8;
    rest >>= 7;
    while rest > 0 {
        i -= 1;
        bytes[i] = ((rest & 0x7F) | 0x80) as u8;
        rest >>= 7;
    }
    buf.extend_from_slice(&bytes[i..]);
    Ok(())
}

/// Encode `value` into a fresh byte vector.
pub fn encode_vlq(value: u32) -> Result<Vec<u8>, ScoreError> {
    let mut buf = Vec::with_capacity(4);
    write_vlq(&mut buf, value)?;
    Ok(buf)
}

/// Decode one VLQ from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed. Input that runs out
/// mid-quantity is [`ScoreError::TruncatedVlq`]; a fourth byte with its high
/// bit still set is [`ScoreError::OverlongVlq`].
pub fn decode_vlq(bytes: &[u8]) -> Result<(u32, usize), ScoreError> {
    let mut value: u32 = 0;
    for (i, &byte) in bytes.iter().take(4).enumerate() {
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= 4 {
        Err(ScoreError::OverlongVlq)
    } else {
        Err(ScoreError::TruncatedVlq)
    }
}
