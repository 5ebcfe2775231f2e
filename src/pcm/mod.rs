//! PCM WAV encoder: mono, 16-bit, canonical 44-byte RIFF header.

use log::debug;
use std::io::{self, Write};

/// Channels written to every file.
pub const CHANNELS: u16 = 1;

/// Bits per sample.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Bytes per sample frame.
pub const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;

/// Size of the RIFF/fmt/data header.
pub const HEADER_LEN: usize = 44;

/// Quantize one float sample: `floor(sample * 32767)`, clamped to the i16 range.
#[inline]
pub fn quantize(sample: f32) -> i16 {
    let scaled = (sample as f64 * 32767.0).floor();
    scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Size of the data chunk for `num_samples` samples.
///
/// Fails when the file would exceed the 4 GiB RIFF limit.
fn data_size(num_samples: usize) -> io::Result<u32> {
    num_samples
        .checked_mul(BLOCK_ALIGN as usize)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| n.checked_add(36).is_some())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{num_samples} samples exceed the WAV size limit"),
            )
        })
}

/// Bytes per second at `sample_rate`. Fails when it does not fit the header field.
fn byte_rate(sample_rate: u32) -> io::Result<u32> {
    sample_rate.checked_mul(BLOCK_ALIGN as u32).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("sample rate {sample_rate} Hz is too high for a WAV header"),
        )
    })
}

fn write_header<W: Write>(writer: &mut W, data_size: u32, sample_rate: u32) -> io::Result<()> {
    let byte_rate = byte_rate(sample_rate)?;

    writer.write_all(b"RIFF")?;
    writer.write_all(&(36 + data_size).to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&CHANNELS.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&BLOCK_ALIGN.to_le_bytes())?;
    writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())
}

/// Stream a WAV file for `samples` into `writer`.
///
/// Samples outside [-1, 1] clip silently.
pub fn write_pcm<W: Write>(writer: &mut W, samples: &[f32], sample_rate: u32) -> io::Result<()> {
    write_header(writer, data_size(samples.len())?, sample_rate)?;

    let mut chunk = Vec::with_capacity(4096);
    for block in samples.chunks(2048) {
        chunk.clear();
        for &sample in block {
            chunk.extend_from_slice(&quantize(sample).to_le_bytes());
        }
        writer.write_all(&chunk)?;
    }
    Ok(())
}

/// Encode `samples` into an in-memory WAV file.
pub fn encode_pcm(samples: &[f32], sample_rate: u32) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + samples.len() * BLOCK_ALIGN as usize);
    write_pcm(&mut out, samples, sample_rate)?;
    debug!(
        "encoded {} samples at {sample_rate} Hz into {} WAV bytes",
        samples.len(),
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_u32(bytes: &[u8]) -> u32 {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn le_u16(bytes: &[u8]) -> u16 {
        u16::from_le_bytes([bytes[0], bytes[1]])
    }

    #[test]
    fn quantize_floors() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(0.5), 16383);
        assert_eq!(quantize(-0.5), -16384);
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(-1.0), -32767);
    }

    #[test]
    fn quantize_clips_silently() {
        assert_eq!(quantize(1.5), 32767);
        assert_eq!(quantize(-1.5), -32768);
        assert_eq!(quantize(f32::MAX), 32767);
    }

    #[test]
    fn header_fields() {
        let bytes = encode_pcm(&[0.5, -0.5, 0.0], 44100).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 6);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(le_u32(&bytes[4..8]), 36 + 6);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(le_u32(&bytes[16..20]), 16);
        assert_eq!(le_u16(&bytes[20..22]), 1);
        assert_eq!(le_u16(&bytes[22..24]), 1);
        assert_eq!(le_u32(&bytes[24..28]), 44100);
        assert_eq!(le_u32(&bytes[28..32]), 88200);
        assert_eq!(le_u16(&bytes[32..34]), 2);
        assert_eq!(le_u16(&bytes[34..36]), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(le_u32(&bytes[40..44]), 6);
    }

    #[test]
    fn sample_bytes() {
        let bytes = encode_pcm(&[0.5, -0.5, 0.0], 44100).unwrap();
        assert_eq!(&bytes[44..], &[0xFF, 0x3F, 0x00, 0xC0, 0x00, 0x00]);
    }

    #[test]
    fn empty_buffer_is_header_only() {
        let bytes = encode_pcm(&[], 22050).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(le_u32(&bytes[4..8]), 36);
        assert_eq!(le_u32(&bytes[40..44]), 0);
    }

    #[test]
    fn streaming_matches_in_memory() {
        let samples: Vec<f32> = (0..5000).map(|i| ((i as f32) * 0.01).sin() * 0.9).collect();
        let mut streamed = Vec::new();
        write_pcm(&mut streamed, &samples, 48000).unwrap();
        assert_eq!(streamed, encode_pcm(&samples, 48000).unwrap());
        assert_eq!(streamed.len(), HEADER_LEN + 10_000);
    }

    #[test]
    fn oversized_rejected() {
        assert!(data_size(usize::MAX).is_err());
        assert!(data_size((u32::MAX / 2) as usize).is_err());
        assert_eq!(data_size(3).unwrap(), 6);
    }

    #[test]
    fn oversized_sample_rate_rejected() {
        let mut out = Vec::new();
        let err = write_pcm(&mut out, &[0.0], u32::MAX).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());

        let err = encode_pcm(&[0.0], u32::MAX / 2 + 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn largest_sample_rate_accepted() {
        let rate = u32::MAX / 2;
        let bytes = encode_pcm(&[0.0], rate).unwrap();
        assert_eq!(le_u32(&bytes[24..28]), rate);
        assert_eq!(le_u32(&bytes[28..32]), rate * 2);
    }
}
