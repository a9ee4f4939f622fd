use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop request, checked by a [`StreamWriter`] between pulls.
///
/// Clones share the same flag, so one clone can be handed to a signal
/// handler or another thread while the pull loop holds the other.
///
/// [`StreamWriter`]: crate::tasks::StreamWriter
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
