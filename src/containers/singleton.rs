use std::fmt;

use super::IndexedList;

/// A fixed, immutable sequence holding exactly one element.
///
/// # Examples
///
/// ```rust
/// use container_adapters::containers::{Collection, List, SingletonList};
///
/// let one = SingletonList::new("only");
/// assert_eq!(one.count(), 1);
/// assert_eq!(one.get(0).unwrap(), "only");
/// assert!(one.get(1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SingletonList<T> {
    item: T,
}

impl<T> SingletonList<T> {
    pub fn new(item: T) -> Self {
        Self { item }
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T: Clone> IndexedList<T> for SingletonList<T> {
    fn item_count(&self) -> usize {
        1
    }

    fn item_at(&self, index: usize) -> Option<T> {
        (index == 0).then(|| self.item.clone())
    }
}

crate::indexed_list!(SingletonList);

impl<T: fmt::Display> fmt::Display for SingletonList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SingletonList({})", self.item)
    }
}
