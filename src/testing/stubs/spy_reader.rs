use std::io::{self, BufRead, Read};

use crate::testing::Spy;

/// In-memory `BufRead` that reports reads and release to a [`Spy`], and can
/// be told to fail once a number of lines has been served.
#[derive(Debug)]
pub struct SpyReader {
    data: Vec<u8>,
    pos: usize,
    lines_served: usize,
    fail_after: Option<usize>,
    spy: Spy,
}

impl SpyReader {
    pub fn new(contents: &str) -> (Self, Spy) {
        Self::build(contents.as_bytes().to_vec(), None)
    }

    pub fn from_bytes(data: Vec<u8>) -> (Self, Spy) {
        Self::build(data, None)
    }

    pub fn failing_after(contents: &str, lines: usize) -> (Self, Spy) {
        Self::build(contents.as_bytes().to_vec(), Some(lines))
    }

    fn build(data: Vec<u8>, fail_after: Option<usize>) -> (Self, Spy) {
        let spy = Spy::default();
        let reader = Self {
            data,
            pos: 0,
            lines_served: 0,
            fail_after,
            spy: spy.clone(),
        };
        (reader, spy)
    }
}

impl Read for SpyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for SpyReader {
    // Hands out at most one line per call so the failure point is exact.
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.fail_after.is_some_and(|k| self.lines_served >= k) {
            return Err(io::Error::other("injected read failure"));
        }
        self.spy.record_read();
        let rest = &self.data[self.pos..];
        let end = rest
            .iter()
            .position(|b| *b == b'\n')
            .map_or(rest.len(), |i| i + 1);
        Ok(&rest[..end])
    }

    fn consume(&mut self, amt: usize) {
        let chunk = &self.data[self.pos..self.pos + amt];
        self.lines_served += chunk.iter().filter(|b| **b == b'\n').count();
        self.pos += amt;
    }
}

impl Drop for SpyReader {
    fn drop(&mut self) {
        self.spy.mark_closed();
    }
}
