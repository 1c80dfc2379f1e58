//! RecordIO framing: `<decimal length>\n<length bytes>` repeated.
//!
//! Subscription events and container output arrive framed this way, and
//! attach input is sent framed the same way.

use bytes::{BufMut, Bytes, BytesMut};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

/// Default upper bound on a single frame.
pub const DEFAULT_MAX_FRAME_LENGTH: usize = 16 * 1024 * 1024;

/// Longest accepted length header, excluding the newline. Covers any `u64`
/// plus surrounding whitespace.
const MAX_HEADER_LENGTH: usize = 32;

/// Errors raised while decoding a RecordIO stream.
#[derive(Debug, Error)]
pub enum RecordIoError {
    /// The length header is not a base-10 integer.
    #[error("invalid frame length header: {0:?}")]
    InvalidHeader(String),

    /// No newline within the maximum header length.
    #[error("frame length header exceeds {MAX_HEADER_LENGTH} bytes")]
    HeaderTooLong,

    /// The declared length is above the configured maximum.
    #[error("frame of {length} bytes exceeds the limit of {max} bytes")]
    FrameTooLarge { length: usize, max: usize },

    /// The stream ended inside a frame.
    #[error("stream ended inside a frame ({buffered} bytes buffered)")]
    Truncated { buffered: usize },

    /// IO error from the underlying reader.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// RecordIO codec for `FramedRead`/`FramedWrite`.
#[derive(Debug, Clone)]
pub struct RecordIoCodec {
    max_frame_length: usize,
    /// Length of the frame whose header has been consumed.
    pending: Option<usize>,
}

impl RecordIoCodec {
    pub fn new() -> Self {
        Self::with_max_frame_length(DEFAULT_MAX_FRAME_LENGTH)
    }

    pub fn with_max_frame_length(max_frame_length: usize) -> Self {
        Self {
            max_frame_length,
            pending: None,
        }
    }

    pub fn max_frame_length(&self) -> usize {
        self.max_frame_length
    }

    fn decode_header(&self, src: &mut BytesMut) -> Result<Option<usize>, RecordIoError> {
        let Some(newline) = src.iter().position(|b| *b == b'\n') else {
            if src.len() > MAX_HEADER_LENGTH {
                return Err(RecordIoError::HeaderTooLong);
            }
            return Ok(None);
        };
        if newline > MAX_HEADER_LENGTH {
            return Err(RecordIoError::HeaderTooLong);
        }

        let header = src.split_to(newline + 1);
        let text = String::from_utf8_lossy(&header[..newline]);
        let length: usize = text
            .trim()
            .parse()
            .map_err(|_| RecordIoError::InvalidHeader(text.trim().to_string()))?;

        if length > self.max_frame_length {
            return Err(RecordIoError::FrameTooLarge {
                length,
                max: self.max_frame_length,
            });
        }
        Ok(Some(length))
    }
}

impl Default for RecordIoCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for RecordIoCodec {
    type Item = Bytes;
    type Error = RecordIoError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, RecordIoError> {
        let length = match self.pending {
            Some(length) => length,
            None => match self.decode_header(src)? {
                Some(length) => {
                    self.pending = Some(length);
                    length
                }
                None => return Ok(None),
            },
        };

        if src.len() < length {
            src.reserve(length - src.len());
            return Ok(None);
        }

        self.pending = None;
        Ok(Some(src.split_to(length).freeze()))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, RecordIoError> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() && self.pending.is_none() => Ok(None),
            None => Err(RecordIoError::Truncated {
                buffered: src.len(),
            }),
        }
    }
}

impl Encoder<Bytes> for RecordIoCodec {
    type Error = RecordIoError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), RecordIoError> {
        let header = format!("{}\n", item.len());
        dst.reserve(header.len() + item.len());
        dst.put_slice(header.as_bytes());
        dst.put(item);
        Ok(())
    }
}

/// Frames a single record.
pub fn encode_frame(record: &[u8]) -> Bytes {
    let mut frame = BytesMut::with_capacity(record.len() + 21);
    frame.put_slice(format!("{}\n", record.len()).as_bytes());
    frame.put_slice(record);
    frame.freeze()
}

/// Splits a complete in-memory body into its records.
pub fn decode_all(body: &[u8]) -> Result<Vec<Bytes>, RecordIoError> {
    let mut codec = RecordIoCodec::new();
    let mut buffer = BytesMut::from(body);
    let mut records = Vec::new();
    while let Some(record) = codec.decode_eof(&mut buffer)? {
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use mesops_test_utils::TrickleReader;
    use tokio_util::codec::FramedRead;

    const RECORDS: [&str; 3] = ["short", "medium", "looooooooooonnngggg"];

    fn body() -> Vec<u8> {
        RECORDS
            .iter()
            .flat_map(|r| encode_frame(r.as_bytes()).to_vec())
            .collect()
    }

    #[test]
    fn test_encode_frame() {
        assert_eq!(&encode_frame(b"short")[..], b"5\nshort");
        assert_eq!(&encode_frame(b"")[..], b"0\n");
    }

    #[test]
    fn test_decode_all() {
        let records = decode_all(&body()).unwrap();
        let records: Vec<_> = records.iter().map(|r| &r[..]).collect();
        assert_eq!(
            records,
            vec![&b"short"[..], &b"medium"[..], &b"looooooooooonnngggg"[..]]
        );
    }

    #[test]
    fn test_codec_encoder_matches_encode_frame() {
        let mut codec = RecordIoCodec::new();
        let mut dst = BytesMut::new();
        codec.encode(Bytes::from_static(b"medium"), &mut dst).unwrap();
        assert_eq!(&dst[..], &encode_frame(b"medium")[..]);
    }

    #[test]
    fn test_header_whitespace_trimmed() {
        let records = decode_all(b" 5 \nshort").unwrap();
        assert_eq!(&records[0][..], b"short");
    }

    #[test]
    fn test_invalid_header() {
        let err = decode_all(b"abc\nshort").unwrap_err();
        assert!(matches!(err, RecordIoError::InvalidHeader(ref h) if h == "abc"));

        let err = decode_all(b"-1\nx").unwrap_err();
        assert!(matches!(err, RecordIoError::InvalidHeader(_)));
    }

    #[test]
    fn test_header_too_long() {
        let err = decode_all(&[b'1'; 64]).unwrap_err();
        assert!(matches!(err, RecordIoError::HeaderTooLong));
    }

    #[test]
    fn test_frame_too_large() {
        let mut codec = RecordIoCodec::with_max_frame_length(4);
        let mut buffer = BytesMut::from(&b"5\nshort"[..]);
        let err = codec.decode(&mut buffer).unwrap_err();
        assert!(matches!(err, RecordIoError::FrameTooLarge { length: 5, max: 4 }));
    }

    #[test]
    fn test_truncated_frame() {
        let err = decode_all(b"6\nmed").unwrap_err();
        assert!(matches!(err, RecordIoError::Truncated { buffered: 3 }));

        let err = decode_all(b"12").unwrap_err();
        assert!(matches!(err, RecordIoError::Truncated { .. }));
    }

    #[test]
    fn test_partial_input_accumulates() {
        let mut codec = RecordIoCodec::new();
        let mut buffer = BytesMut::from(&b"19\nloooo"[..]);
        assert!(codec.decode(&mut buffer).unwrap().is_none());
        buffer.extend_from_slice(b"ooooooonnnggg");
        assert!(codec.decode(&mut buffer).unwrap().is_none());
        buffer.extend_from_slice(b"g");
        assert_eq!(
            &codec.decode(&mut buffer).unwrap().unwrap()[..],
            b"looooooooooonnngggg"
        );
    }

    #[tokio::test]
    async fn test_one_byte_at_a_time() {
        let reader = TrickleReader::new(body());
        let frames: Vec<_> = FramedRead::new(reader, RecordIoCodec::new())
            .collect::<Vec<_>>()
            .await;

        let frames: Vec<_> = frames
            .into_iter()
            .map(|frame| String::from_utf8(frame.unwrap().to_vec()).unwrap())
            .collect();
        assert_eq!(frames, RECORDS);
    }
}
