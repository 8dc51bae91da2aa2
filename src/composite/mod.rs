//! # Composite Aggregates
//!
//! A composite presents an ordered list of member containers as a single
//! read-only container. Nothing is copied: the count is the sum of the member
//! counts at the moment it is asked for, and enumeration walks the members in
//! order.
//!
//! [`CompositeList`] additionally translates a global index into a member and
//! a local index by subtracting member counts in turn:
//!
//! ```rust
//! use container_adapters::composite::CompositeList;
//! use container_adapters::containers::{Collection, List};
//!
//! let a = vec![1, 2, 3];
//! let b = vec![4, 5];
//! let ab = CompositeList::new() + &a + &b;
//!
//! assert_eq!(ab.count(), 5);
//! assert_eq!(ab.get(3).unwrap(), 4);
//! assert_eq!(ab.index_of(&5), Some(4));
//! assert!(ab.get(5).is_err());
//! ```

mod enumerator;

pub use enumerator::CompositeEnumerator;

use std::fmt;
use std::ops::Add;

use itertools::Itertools;
use log::trace;

use crate::containers::{self, Collection, Enumerator, List};
use crate::errors::{CollectionError, Result};

/// Generates member registration for a composite over `dyn $face<T>`.
macro_rules! member_registry {
    ($composite:ident, $face:ident) => {
        impl<'a, T> $composite<'a, T> {
            pub fn new() -> Self {
                Self {
                    members: Vec::new(),
                }
            }

            pub fn with_capacity(capacity: usize) -> Self {
                Self {
                    members: Vec::with_capacity(capacity),
                }
            }

            /// Create a composite over `members`, in iteration order.
            pub fn from_members<I, C>(members: I) -> Self
            where
                I: IntoIterator<Item = C>,
                C: $face<T> + 'a,
            {
                let mut composite = Self::new();
                composite.add_members(members);
                composite
            }

            /// Append a member.
            pub fn add_member<C: $face<T> + 'a>(&mut self, member: C) {
                self.members.push(Box::new(member));
            }

            /// Insert a member before the member at `position`.
            pub fn insert_member<C: $face<T> + 'a>(
                &mut self,
                position: usize,
                member: C,
            ) -> Result<()> {
                self.check_position(position)?;
                self.members.insert(position, Box::new(member));
                Ok(())
            }

            /// Append several members, in iteration order.
            pub fn add_members<I, C>(&mut self, members: I)
            where
                I: IntoIterator<Item = C>,
                C: $face<T> + 'a,
            {
                self.members.extend(
                    members
                        .into_iter()
                        .map(|member| Box::new(member) as Box<dyn $face<T> + 'a>),
                );
            }

            /// Insert several members, in iteration order, before the member at
            /// `position`. An invalid position leaves the member list untouched.
            pub fn insert_members<I, C>(&mut self, position: usize, members: I) -> Result<()>
            where
                I: IntoIterator<Item = C>,
                C: $face<T> + 'a,
            {
                self.check_position(position)?;
                let _ = self.members.splice(
                    position..position,
                    members
                        .into_iter()
                        .map(|member| Box::new(member) as Box<dyn $face<T> + 'a>),
                );
                Ok(())
            }

            pub fn member_count(&self) -> usize {
                self.members.len()
            }

            fn check_position(&self, position: usize) -> Result<()> {
                if position > self.members.len() {
                    Err(CollectionError::index_out_of_range(
                        position,
                        self.members.len(),
                    ))
                } else {
                    Ok(())
                }
            }

            fn chained(&self) -> CompositeEnumerator<'_, T> {
                self.members.iter().map(|member| member.enumerate()).collect()
            }
        }

        impl<T> Default for $composite<'_, T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<'a, T, C: $face<T> + 'a> Add<C> for $composite<'a, T> {
            type Output = Self;

            fn add(mut self, member: C) -> Self {
                self.add_member(member);
                self
            }
        }

        impl<'a, T, C: $face<T> + 'a> FromIterator<C> for $composite<'a, T> {
            fn from_iter<I: IntoIterator<Item = C>>(members: I) -> Self {
                Self::from_members(members)
            }
        }

        impl<'a, T, C: $face<T> + 'a> Extend<C> for $composite<'a, T> {
            fn extend<I: IntoIterator<Item = C>>(&mut self, members: I) {
                self.add_members(members);
            }
        }

        impl<'a, T> Collection<T> for $composite<'a, T> {
            fn enumerate(&self) -> Enumerator<'_, T> {
                Box::new(self.chained())
            }

            fn count(&self) -> usize {
                self.members.iter().map(|member| member.count()).sum()
            }

            fn contains(&self, item: &T) -> bool {
                self.members.iter().any(|member| member.contains(item))
            }

            fn is_empty(&self) -> bool {
                self.members.iter().all(|member| member.is_empty())
            }

            fn copy_into(&self, buffer: &mut [T], offset: usize) -> Result<()> {
                containers::ensure_room(buffer.len(), self.count(), offset)?;
                let mut offset = offset;
                for member in &self.members {
                    member.copy_into(buffer, offset)?;
                    offset += member.count();
                }
                Ok(())
            }
        }

        impl<T: fmt::Display> fmt::Display for $composite<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($composite), self.chained().join(", "))
            }
        }

        impl<T> fmt::Debug for $composite<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($composite))
                    .field("members", &self.members.len())
                    .field("count", &self.count())
                    .finish()
            }
        }
    };
}

/// Several containers seen as one read-only container.
pub struct CompositeCollection<'a, T> {
    members: Vec<Box<dyn Collection<T> + 'a>>,
}

member_registry!(CompositeCollection, Collection);

/// Several lists seen as one read-only list.
///
/// Indexing is get-only: [`List::set`] fails with
/// [`CollectionError::NotSupported`].
pub struct CompositeList<'a, T> {
    members: Vec<Box<dyn List<T> + 'a>>,
}

member_registry!(CompositeList, List);

impl<T> CompositeList<'_, T> {
    /// Resolve a global index to a member and the index within it.
    fn locate(&self, index: usize) -> Result<(usize, usize)> {
        let mut local = index;
        for (position, member) in self.members.iter().enumerate() {
            let count = member.count();
            if local < count {
                trace!(
                    "composite index {} resolved to member {} at {}",
                    index, position, local
                );
                return Ok((position, local));
            }
            local -= count;
        }
        Err(CollectionError::index_out_of_range(index, index - local))
    }
}

impl<T> List<T> for CompositeList<'_, T> {
    fn get(&self, index: usize) -> Result<T> {
        let (member, local) = self.locate(index)?;
        self.members[member].get(local)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        let mut offset = 0;
        for member in &self.members {
            if let Some(local) = member.index_of(item) {
                return Some(offset + local);
            }
            offset += member.count();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FixedList, assert_write_rejected, init_logging};
    use std::collections::BTreeSet;

    #[test]
    fn test_index_translation() {
        init_logging();
        let a = vec![1, 2, 3];
        let b: Vec<i32> = Vec::new();
        let c = vec![4, 5];
        let list = CompositeList::from_members([&a, &b, &c]);

        assert_eq!(list.count(), 5);
        assert_eq!(list.get(0).unwrap(), 1);
        assert_eq!(list.get(3).unwrap(), 4);
        assert_eq!(list.get(4).unwrap(), 5);
        assert_eq!(
            list.get(5).unwrap_err(),
            CollectionError::IndexOutOfRange {
                index: 5,
                available: 5
            }
        );
        assert_eq!(list.index_of(&4), Some(3));
        assert_eq!(list.index_of(&9), None);
        assert_eq!(list.to_string(), "CompositeList(1, 2, 3, 4, 5)");
    }

    #[test]
    fn test_mixed_members() {
        let fixed = FixedList::new(['x', 'y']);
        let owned = vec!['z'];
        let mut list = CompositeList::new();
        list.add_member(owned);
        list.insert_member(0, &fixed).unwrap();
        assert_eq!(list.to_vec(), vec!['x', 'y', 'z']);
        assert_eq!(list.member_count(), 2);
    }

    #[test]
    fn test_is_read_only() {
        let a = vec![1];
        let mut list = CompositeList::new() + &a;
        assert!(list.is_read_only());
        assert_write_rejected(Collection::add(&mut list, 2));
        assert_write_rejected(list.remove(&1));
        assert_write_rejected(list.clear());
        assert_eq!(
            list.set(0, 3).unwrap_err(),
            CollectionError::NotSupported("set")
        );
        assert_eq!(a, vec![1]);
    }

    #[test]
    fn test_batch_insert_validates_position() {
        let a = vec![1];
        let b = vec![2];
        let c = vec![3];
        let mut list = CompositeList::from_members([&a]);
        assert_eq!(
            list.insert_members(2, [&b, &c]).unwrap_err(),
            CollectionError::index_out_of_range(2, 1)
        );
        assert_eq!(list.member_count(), 1);

        list.insert_members(0, [&b, &c]).unwrap();
        assert_eq!(list.to_vec(), vec![2, 3, 1]);
        assert!(list.insert_member(4, &a).is_err());
    }

    #[test]
    fn test_unordered_members() {
        let mut set = BTreeSet::new();
        set.insert(10);
        let list = vec![1, 2];
        let mut composite: CompositeCollection<'_, i32> = [&list].into_iter().collect();
        composite.add_member(&set);
        composite.extend([&list]);

        assert_eq!(composite.count(), 5);
        assert!(composite.contains(&10));
        assert!(!composite.contains(&3));
        assert_eq!(composite.to_vec(), vec![1, 2, 10, 1, 2]);
        assert_eq!(composite.to_string(), "CompositeCollection(1, 2, 10, 1, 2)");
    }

    #[test]
    fn test_copy_into_checks_total_room() {
        let a = vec![1, 2];
        let b = vec![3];
        let composite = CompositeCollection::new() + &a + &b;

        let mut buffer = [0; 4];
        composite.copy_into(&mut buffer, 1).unwrap();
        assert_eq!(buffer, [0, 1, 2, 3]);

        let mut small = [0; 3];
        assert!(matches!(
            composite.copy_into(&mut small, 1),
            Err(CollectionError::InvalidArgument { .. })
        ));
        assert_eq!(small, [0, 0, 0]);
    }

    #[test]
    fn test_empty_composite() {
        let composite: CompositeList<'_, u8> = CompositeList::default();
        assert!(Collection::is_empty(&composite));
        assert_eq!(composite.count(), 0);
        assert_eq!(
            composite.get(0).unwrap_err(),
            CollectionError::index_out_of_range(0, 0)
        );
    }
}
