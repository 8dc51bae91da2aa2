use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use crate::containers::Enumerator;
use crate::errors::{CollectionError, Result};

/// Chains member enumerators end to end.
///
/// Exhausted members, including ones that were empty from the start, are
/// dropped as they are reached, so every element of every member is produced
/// exactly once and in member order. Members can be added while enumerating;
/// positions passed to [`insert`](CompositeEnumerator::insert) count only the
/// members not yet exhausted.
///
/// ```rust
/// use container_adapters::composite::CompositeEnumerator;
///
/// let mut chained = CompositeEnumerator::new();
/// chained.push(Box::new(vec![1, 2].into_iter()));
/// chained.push(Box::new(std::iter::empty::<i32>()));
/// chained.push(Box::new(vec![3].into_iter()));
/// assert_eq!(chained.collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
pub struct CompositeEnumerator<'a, T> {
    pending: VecDeque<Enumerator<'a, T>>,
}

impl<'a, T> CompositeEnumerator<'a, T> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a member enumerator.
    pub fn push(&mut self, member: Enumerator<'a, T>) {
        self.pending.push_back(member);
    }

    /// Insert a member enumerator before the pending member at `position`.
    pub fn insert(&mut self, position: usize, member: Enumerator<'a, T>) -> Result<()> {
        if position > self.pending.len() {
            return Err(CollectionError::index_out_of_range(
                position,
                self.pending.len(),
            ));
        }
        self.pending.insert(position, member);
        Ok(())
    }

    /// Insert several member enumerators, in order, starting at `position`.
    pub fn insert_all<I>(&mut self, position: usize, members: I) -> Result<()>
    where
        I: IntoIterator<Item = Enumerator<'a, T>>,
    {
        if position > self.pending.len() {
            return Err(CollectionError::index_out_of_range(
                position,
                self.pending.len(),
            ));
        }
        for (offset, member) in members.into_iter().enumerate() {
            self.pending.insert(position + offset, member);
        }
        Ok(())
    }

    /// Number of members not yet exhausted.
    pub fn pending_members(&self) -> usize {
        self.pending.len()
    }
}

impl<T> Default for CompositeEnumerator<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Iterator for CompositeEnumerator<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let current = self.pending.front_mut()?;
            if let Some(item) = current.next() {
                return Some(item);
            }
            self.pending.pop_front();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pending
            .iter()
            .map(|member| member.size_hint())
            .fold((0, Some(0)), |(low, high), (member_low, member_high)| {
                let high = match (high, member_high) {
                    (Some(a), Some(b)) => a.checked_add(b),
                    _ => None,
                };
                (low.saturating_add(member_low), high)
            })
    }
}

impl<T> FusedIterator for CompositeEnumerator<'_, T> {}

impl<'a, T> Extend<Enumerator<'a, T>> for CompositeEnumerator<'a, T> {
    fn extend<I: IntoIterator<Item = Enumerator<'a, T>>>(&mut self, members: I) {
        self.pending.extend(members);
    }
}

impl<'a, T> FromIterator<Enumerator<'a, T>> for CompositeEnumerator<'a, T> {
    fn from_iter<I: IntoIterator<Item = Enumerator<'a, T>>>(members: I) -> Self {
        Self {
            pending: members.into_iter().collect(),
        }
    }
}

impl<T> fmt::Debug for CompositeEnumerator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeEnumerator")
            .field("pending_members", &self.pending.len())
            .finish()
    }
}
