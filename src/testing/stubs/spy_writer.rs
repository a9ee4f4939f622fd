use std::io::{self, Write};

use crate::testing::Spy;

/// `Write` sink recording every call into a [`Spy`]. Each successful
/// `write` takes the whole buffer, so one record is one write.
#[derive(Debug)]
pub struct SpyWriter {
    fail_after_writes: Option<u64>,
    fail_flush: bool,
    spy: Spy,
}

impl SpyWriter {
    pub fn new() -> (Self, Spy) {
        Self::build(None, false)
    }

    pub fn failing_after_writes(writes: u64) -> (Self, Spy) {
        Self::build(Some(writes), false)
    }

    pub fn failing_flush() -> (Self, Spy) {
        Self::build(None, true)
    }

    fn build(fail_after_writes: Option<u64>, fail_flush: bool) -> (Self, Spy) {
        let spy = Spy::default();
        let writer = Self {
            fail_after_writes,
            fail_flush,
            spy: spy.clone(),
        };
        (writer, spy)
    }
}

impl Write for SpyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self
            .fail_after_writes
            .is_some_and(|n| self.spy.writes() >= n)
        {
            return Err(io::Error::other("injected write failure"));
        }
        self.spy.record_write(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.spy.record_flush();
        if self.fail_flush {
            return Err(io::Error::other("injected flush failure"));
        }
        Ok(())
    }
}

impl Drop for SpyWriter {
    fn drop(&mut self) {
        self.spy.mark_closed();
    }
}
