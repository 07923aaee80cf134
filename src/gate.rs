//! Per-screen loading flag.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Allows at most one request in flight. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct RequestGate {
    loading: Arc<AtomicBool>,
}

/// Marks a request as in flight until dropped.
#[derive(Debug)]
#[must_use = "the gate reopens as soon as the guard is dropped"]
pub struct InFlight {
    loading: Arc<AtomicBool>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gate, or returns `None` while another request holds it.
    pub fn try_begin(&self) -> Option<InFlight> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                loading: Arc::clone(&self.loading),
            })
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.loading.store(false, Ordering::Release);
    }
}
