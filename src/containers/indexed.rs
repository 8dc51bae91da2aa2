//! Lists built from a count and a positional read.
//!
//! A type that can report how many elements it holds and produce the element
//! at a position implements [`IndexedList`], then derives the whole read side
//! of [`Collection`](super::Collection) and [`List`](super::List) with
//! [`indexed_list!`](crate::indexed_list):
//!
//! ```rust
//! use container_adapters::containers::{Collection, IndexedList, List};
//!
//! struct Squares<T> {
//!     items: Vec<T>,
//! }
//!
//! impl<T: Clone + std::ops::Mul<Output = T>> IndexedList<T> for Squares<T> {
//!     fn item_count(&self) -> usize {
//!         self.items.len()
//!     }
//!
//!     fn item_at(&self, index: usize) -> Option<T> {
//!         let item = self.items.as_slice().get(index)?.clone();
//!         Some(item.clone() * item)
//!     }
//! }
//!
//! container_adapters::indexed_list!(Squares where T: std::ops::Mul<Output = T>);
//!
//! let squares = Squares { items: vec![1, 2, 3] };
//! assert_eq!(squares.to_vec(), vec![1, 4, 9]);
//! assert_eq!(squares.index_of(&4), Some(1));
//! assert!(squares.get(3).is_err());
//! ```

use std::marker::PhantomData;

/// The primitives of a list addressed by position.
pub trait IndexedList<T> {
    fn item_count(&self) -> usize;

    /// Returns the element at `index`, or `None` past the end.
    fn item_at(&self, index: usize) -> Option<T>;
}

/// Enumerates an [`IndexedList`] in index order.
pub struct IndexEnumerator<'a, L: ?Sized, T> {
    list: &'a L,
    next: usize,
    end: usize,
    _item: PhantomData<fn() -> T>,
}

impl<'a, L, T> IndexEnumerator<'a, L, T>
where
    L: IndexedList<T> + ?Sized,
{
    pub fn new(list: &'a L) -> Self {
        Self {
            list,
            next: 0,
            end: list.item_count(),
            _item: PhantomData,
        }
    }
}

impl<L, T> Iterator for IndexEnumerator<'_, L, T>
where
    L: IndexedList<T> + ?Sized,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.next >= self.end {
            return None;
        }
        let item = self.list.item_at(self.next);
        self.next += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

/// Implements [`Collection`](crate::containers::Collection) and
/// [`List`](crate::containers::List) for a single-parameter type `$list<T>`
/// from its [`IndexedList`] primitives.
///
/// Extra bounds on `T` follow a `where`.
#[macro_export]
macro_rules! indexed_list {
    ($list:ident) => {
        $crate::indexed_list!($list where T: Clone);
    };
    ($list:ident where T: $($bound:tt)+) => {
        impl<T> $crate::containers::Collection<T> for $list<T>
        where
            T: Clone + PartialEq + $($bound)+,
        {
            fn enumerate(&self) -> $crate::containers::Enumerator<'_, T> {
                Box::new($crate::containers::IndexEnumerator::<Self, T>::new(self))
            }

            fn count(&self) -> usize {
                $crate::containers::IndexedList::<T>::item_count(self)
            }

            fn contains(&self, item: &T) -> bool {
                $crate::containers::List::index_of(self, item).is_some()
            }
        }

        impl<T> $crate::containers::List<T> for $list<T>
        where
            T: Clone + PartialEq + $($bound)+,
        {
            fn get(&self, index: usize) -> $crate::errors::Result<T> {
                $crate::containers::IndexedList::<T>::item_at(self, index).ok_or_else(|| {
                    $crate::errors::CollectionError::index_out_of_range(
                        index,
                        $crate::containers::IndexedList::<T>::item_count(self),
                    )
                })
            }

            fn index_of(&self, item: &T) -> Option<usize> {
                $crate::containers::IndexEnumerator::<Self, T>::new(self)
                    .position(|candidate| candidate == *item)
            }
        }
    };
}
