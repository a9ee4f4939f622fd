use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Default)]
struct SpyState {
    closes: Cell<u32>,
    reads: Cell<u64>,
    writes: Cell<u64>,
    flushes: Cell<u64>,
    written: RefCell<Vec<u8>>,
}

/// Observer shared with a stub resource; outlives the resource itself so
/// tests can check what happened to it after release.
#[derive(Debug, Clone, Default)]
pub struct Spy {
    state: Rc<SpyState>,
}

impl Spy {
    pub fn is_closed(&self) -> bool {
        self.state.closes.get() > 0
    }

    pub fn close_count(&self) -> u32 {
        self.state.closes.get()
    }

    pub fn reads(&self) -> u64 {
        self.state.reads.get()
    }

    pub fn writes(&self) -> u64 {
        self.state.writes.get()
    }

    pub fn flushes(&self) -> u64 {
        self.state.flushes.get()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.state.written.borrow()).into_owned()
    }

    pub(crate) fn mark_closed(&self) {
        self.state.closes.set(self.state.closes.get() + 1);
    }

    pub(crate) fn record_read(&self) {
        self.state.reads.set(self.state.reads.get() + 1);
    }

    pub(crate) fn record_write(&self, bytes: &[u8]) {
        self.state.writes.set(self.state.writes.get() + 1);
        self.state.written.borrow_mut().extend_from_slice(bytes);
    }

    pub(crate) fn record_flush(&self) {
        self.state.flushes.set(self.state.flushes.get() + 1);
    }
}
