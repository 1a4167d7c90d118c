// src/store.rs
//! Thread-safe holder for the last position and a bounded history

use crate::position::Position;
use std::collections::VecDeque;
use std::sync::RwLock;

/// Last recorded position plus a fixed-capacity, insertion-ordered history
/// ring. A single lock covers both, so a reader never observes the last
/// position and the history from two different writes.
pub struct PositionStore {
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    last: Option<Position>,
    history: VecDeque<Position>,
    capacity: usize,
}

impl PositionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                last: None,
                history: VecDeque::with_capacity(capacity.min(1024)),
                capacity,
            }),
        }
    }

    /// Set the last position and append to history, evicting the oldest entry
    /// at capacity. Writers are serialized against each other and against
    /// readers.
    pub fn record(&self, position: Position) {
        let mut inner = self.inner.write().unwrap();
        inner.last = Some(position);
        if inner.capacity == 0 {
            return;
        }
        if inner.history.len() == inner.capacity {
            inner.history.pop_front();
        }
        inner.history.push_back(position);
    }

    /// Most recent recorded position, if any.
    pub fn last(&self) -> Option<Position> {
        self.inner.read().unwrap().last
    }

    /// Ordered copy of the history, oldest to newest.
    pub fn snapshot(&self) -> Vec<Position> {
        self.inner.read().unwrap().history.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().unwrap().capacity
    }
}
