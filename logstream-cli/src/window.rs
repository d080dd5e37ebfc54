use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Keeps the most recent `capacity` items pushed, in arrival order.
///
/// With no capacity every item is kept.
#[derive(Debug)]
pub struct TrailingWindow<T> {
    capacity: Option<NonZeroUsize>,
    items: VecDeque<T>,
}

impl<T> TrailingWindow<T> {
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        let items = match capacity {
            Some(cap) => VecDeque::with_capacity(cap.get()),
            None => VecDeque::new(),
        };
        Self { capacity, items }
    }

    /// Append `item`, evicting the oldest one if the window is full.
    pub fn push(&mut self, item: T) {
        if let Some(cap) = self.capacity {
            if self.items.len() == cap.get() {
                self.items.pop_front();
            }
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_records(self) -> Vec<T> {
        self.items.into()
    }
}
