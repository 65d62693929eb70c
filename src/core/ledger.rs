//! Dispose-once bookkeeping for renderable handles.
//!
//! Graphics memory is not reclaimed by the host runtime when logical objects
//! become unreachable, so every allocated handle must be released exactly
//! once at a well-defined teardown point. The ledger is the authority for
//! that invariant: allocation hands out a fresh handle, release fails loudly
//! on a double free.

use fnv::FnvHashSet;
use thiserror::Error;

/// Owning reference to one renderable primitive registered with the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualHandle(u32);

impl VisualHandle {
    pub fn index(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("visual handle {0} released twice")]
    DoubleRelease(u32),
    #[error("visual handle {0} was never allocated")]
    UnknownHandle(u32),
}

/// Allocation registry for visual handles.
#[derive(Default)]
pub struct ResourceLedger {
    next: u32,
    live: FnvHashSet<u32>,
    released: usize,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> VisualHandle {
        let id = self.next;
        self.next += 1;
        self.live.insert(id);
        VisualHandle(id)
    }

    /// Release a handle. Releasing the same handle a second time is an
    /// error, never a silent no-op.
    pub fn release(&mut self, handle: VisualHandle) -> Result<(), LedgerError> {
        if self.live.remove(&handle.0) {
            self.released += 1;
            Ok(())
        } else if handle.0 < self.next {
            Err(LedgerError::DoubleRelease(handle.0))
        } else {
            Err(LedgerError::UnknownHandle(handle.0))
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn released_count(&self) -> usize {
        self.released
    }
}
