//! Readers that exercise partial-read handling.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

/// An [`AsyncRead`] that hands out one byte per read.
///
/// # Example
///
/// ```rust
/// use mesops_test_utils::TrickleReader;
/// use tokio::io::AsyncReadExt;
///
/// # async fn demo() {
/// let mut reader = TrickleReader::new(b"5\nshort".to_vec());
/// let mut buf = [0u8; 16];
/// assert_eq!(reader.read(&mut buf).await.unwrap(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TrickleReader {
    data: Vec<u8>,
    position: usize,
}

impl TrickleReader {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl AsyncRead for TrickleReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.position < self.data.len() && buf.remaining() > 0 {
            let byte = self.data[self.position];
            buf.put_slice(&[byte]);
            self.position += 1;
        }
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_one_byte_per_read() {
        let mut reader = TrickleReader::new(b"abc".to_vec());
        let mut buf = [0u8; 8];

        for expected in [b'a', b'b', b'c'] {
            assert_eq!(reader.read(&mut buf).await.unwrap(), 1);
            assert_eq!(buf[0], expected);
        }
        assert_eq!(reader.read(&mut buf).await.unwrap(), 0);
        assert_eq!(reader.remaining(), 0);
    }
}
