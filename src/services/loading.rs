use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Loading indicator shared between a flow and whoever renders it
///
/// Counts overlapping runs, so it stays raised until the last one finishes.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag {
    active: Arc<AtomicUsize>,
}

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag; it drops back when the guard goes out of scope
    #[must_use = "the flag clears as soon as the guard is dropped"]
    pub fn begin(&self) -> LoadingGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        LoadingGuard {
            active: self.active.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.active.load(Ordering::SeqCst) > 0
    }
}

/// Releases its run on drop, whichever way the flow exits
#[derive(Debug)]
pub struct LoadingGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
