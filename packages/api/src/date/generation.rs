//! Generation counter for in-flight fetches.

use std::cell::Cell;
use std::rc::Rc;

/// Shared counter; each run or invalidation moves it forward.
#[derive(Debug, Clone, Default)]
pub struct FetchGeneration(Rc<Cell<u64>>);

/// Captured at request start; current until the generation moves on.
#[derive(Debug)]
pub struct FetchTicket {
    generation: FetchGeneration,
    id: u64,
}

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run, superseding any earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        let id = self.bump();
        FetchTicket {
            generation: self.clone(),
            id,
        }
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.bump();
    }

    fn bump(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }
}

impl FetchTicket {
    pub fn is_current(&self) -> bool {
        self.generation.0.get() == self.id
    }
}
