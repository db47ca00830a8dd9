//! Thin adapter over the zlib deflate codec used for compressed entries.

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io;
use std::io::{Read, Write};
use thiserror::Error;

/// Failure to recover an entry's original bytes from its deflate stream.
#[derive(Error, Debug)]
pub enum DecompressError {
    /// The stream did not decode cleanly.
    #[error("deflate stream error: {source}")]
    Stream {
        #[from]
        /// The underlying codec error.
        source: io::Error,
    },
    /// The stream decoded to a different length than the record declared.
    #[error("decompressed to {actual} bytes, the record declares {expected}")]
    LengthMismatch {
        /// Length the record's uncompressed-size field declares.
        expected: usize,
        /// Length the stream actually decoded to.
        actual: usize,
    },
}

/// Compresses `input` as a single zlib stream at the default level.
pub fn compress(input: &[u8]) -> io::Result<Vec<u8>> {
    // Input length plus ~10% plus fixed slack covers incompressible data.
    let out = Vec::with_capacity(input.len() + input.len() / 10 + 12);

    let mut encoder = ZlibEncoder::new(out, Compression::default());
    encoder.write_all(input)?;
    encoder.finish()
}

/// Inflates `input`, which must decode to exactly `expected_len` bytes.
///
/// The length cross-check is the format's only corruption detector (no
/// checksums are stored), so a mismatch is an error rather than a silent
/// truncation or padding.
pub fn decompress(input: &[u8], expected_len: usize) -> Result<Vec<u8>, DecompressError> {
    let mut out = Vec::with_capacity(expected_len);

    let mut decoder = ZlibDecoder::new(input);
    decoder.read_to_end(&mut out)?;

    if out.len() != expected_len {
        return Err(DecompressError::LengthMismatch {
            expected: expected_len,
            actual: out.len(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_data_round_trips() {
        let data: Vec<u8> = (0..2000u32).map(|i| (i % 251) as u8).collect();

        let compressed = compress(&data).unwrap();
        let restored = decompress(&compressed, data.len()).unwrap();

        assert_eq!(restored, data);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let compressed = compress(&[7u8; 500]).unwrap();

        let err = decompress(&compressed, 400).unwrap_err();
        assert!(matches!(
            err,
            DecompressError::LengthMismatch {
                expected: 400,
                actual: 500
            }
        ));
    }

    #[test]
    fn garbage_input_is_a_stream_error() {
        let err = decompress(b"this is not a deflate stream", 10).unwrap_err();
        assert!(matches!(err, DecompressError::Stream { .. }));
    }
}
