#![cfg(test)]

use crate::containers::IndexedList;
use crate::errors::Result;

/// Route `log` output through the test harness; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A list that supplies only a count and a positional read, so every other
/// operation is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedList<T> {
    items: Vec<T>,
}

impl<T> FixedList<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }
}

impl<T: Clone> IndexedList<T> for FixedList<T> {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> Option<T> {
        self.items.as_slice().get(index).cloned()
    }
}

crate::indexed_list!(FixedList);

/// Assert that `result` failed because writes are forbidden.
pub fn assert_write_rejected<T: std::fmt::Debug>(result: Result<T>) {
    match result {
        Err(err) => assert!(err.is_write_rejection(), "unexpected error: {err}"),
        Ok(value) => panic!("expected a write rejection, got Ok({value:?})"),
    }
}
