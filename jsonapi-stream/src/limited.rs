//! Byte-limited input adapter

use std::io::Read;

/// Reader wrapper that enforces a byte limit
pub(crate) struct LimitedReader<R> {
    inner: R,
    bytes_read: usize,
    limit: usize,
    exceeded: bool,
}

impl<R> LimitedReader<R> {
    pub(crate) fn new(inner: R, limit: usize) -> Self {
        Self {
            inner,
            bytes_read: 0,
            limit,
            exceeded: false,
        }
    }

    pub(crate) fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub(crate) fn limit_exceeded(&self) -> bool {
        self.exceeded
    }
}

impl<R: Read> Read for LimitedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.exceeded {
            return Ok(0);
        }

        let remaining = self.limit.saturating_sub(self.bytes_read);
        if remaining == 0 {
            self.exceeded = true;
            return Ok(0);
        }

        let max_read = buf.len().min(remaining);
        let n = self.inner.read(&mut buf[..max_read])?;
        self.bytes_read += n;

        Ok(n)
    }
}
