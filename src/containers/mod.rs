//! # Container Contracts
//!
//! The traits every container in this crate implements, and the operations the
//! framework synthesizes on top of them.
//!
//! ## Primitive Operations
//!
//! A concrete container supplies a handful of primitives:
//!
//! - [`Collection::enumerate`]: a fresh enumerator over owned elements
//! - [`Collection::count`] and [`Collection::contains`]
//! - [`Collection::add`], [`Collection::remove`], [`Collection::clear`] for
//!   mutable containers (the defaults reject writes with
//!   [`CollectionError::ReadOnly`])
//!
//! Everything else (emptiness, bulk copy, rendering, key and value
//! enumerations, the untyped bridge) is derived from those. A list addressed
//! by position can supply even less: see [`IndexedList`].
//!
//! ## Faces
//!
//! - [`Collection`]: unordered or ordered elements
//! - [`List`]: ordered elements addressable by index
//! - [`Map`]: unique keys, each with one value; as a collection it holds
//!   `(key, value)` pairs
//!
//! Elements are produced by value. Views compute their elements on demand, so a
//! borrowed element would have nothing to borrow from.
//!
//! ## Examples
//!
//! ```rust
//! use container_adapters::containers::{self, Collection, List};
//!
//! let numbers = vec![3, 1, 2];
//! assert_eq!(numbers.count(), 3);
//! assert_eq!(List::get(&numbers, 1).unwrap(), 1);
//! assert_eq!(containers::render(&numbers), "3, 1, 2");
//!
//! let mut buffer = [0; 4];
//! numbers.copy_into(&mut buffer, 1).unwrap();
//! assert_eq!(buffer, [0, 3, 1, 2]);
//! ```

pub mod indexed;
pub mod record;
pub mod singleton;
mod std_impls;
pub mod tolerant;

use std::fmt;

use itertools::Itertools;

use crate::errors::{CollectionError, Result};
use crate::legacy::{UntypedCollection, UntypedList, UntypedMap};

pub use indexed::{IndexEnumerator, IndexedList};
pub use record::{DataRow, Record, RecordMap};
pub use singleton::SingletonList;
pub use tolerant::TolerantMap;

/// A boxed, restartable-by-recreation enumeration of owned elements.
pub type Enumerator<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// The base container contract.
pub trait Collection<T> {
    /// Returns a fresh enumerator over the elements.
    ///
    /// Sequences enumerate in their stable order; unordered containers in an
    /// unspecified order that is deterministic for the instance.
    fn enumerate(&self) -> Enumerator<'_, T>;

    /// Returns the number of elements one full enumeration produces.
    fn count(&self) -> usize;

    /// Returns true if the container holds an element equal to `item`.
    fn contains(&self, item: &T) -> bool;

    /// Returns true if mutating operations are rejected.
    fn is_read_only(&self) -> bool {
        true
    }

    fn add(&mut self, _item: T) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    /// Removes one element equal to `item`, returning whether one was found.
    fn remove(&mut self, _item: &T) -> Result<bool> {
        Err(CollectionError::ReadOnly)
    }

    fn clear(&mut self) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    /// Returns true if an enumeration yields no element.
    fn is_empty(&self) -> bool {
        self.enumerate().next().is_none()
    }

    /// Copies every element into `buffer`, starting at `offset`.
    ///
    /// Fails with [`CollectionError::IndexOutOfRange`] when `offset` lies past
    /// the end of the buffer and [`CollectionError::InvalidArgument`] when the
    /// remaining space cannot hold [`count`](Collection::count) elements.
    fn copy_into(&self, buffer: &mut [T], offset: usize) -> Result<()> {
        copy_enumeration(self.enumerate(), self.count(), buffer, offset)
    }

    /// Collects one enumeration into a vector.
    fn to_vec(&self) -> Vec<T> {
        self.enumerate().collect()
    }

    /// Looks up a native untyped face.
    ///
    /// Containers without one return `None`, and the bridge in
    /// [`crate::legacy`] falls back to an adapter built from
    /// [`enumerate`](Collection::enumerate).
    fn as_untyped(&self) -> Option<&dyn UntypedCollection> {
        None
    }
}

/// An ordered container whose elements are addressable by position.
pub trait List<T>: Collection<T> {
    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Result<T>;

    /// Returns the position of the first element equal to `item`.
    fn index_of(&self, item: &T) -> Option<usize>;

    fn set(&mut self, _index: usize, _value: T) -> Result<()> {
        Err(CollectionError::NotSupported("set"))
    }

    fn insert(&mut self, _index: usize, _item: T) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    fn remove_at(&mut self, _index: usize) -> Result<T> {
        Err(CollectionError::ReadOnly)
    }

    fn as_untyped_list(&self) -> Option<&dyn UntypedList> {
        None
    }
}

/// A container of `(key, value)` pairs with unique keys.
///
/// On its [`Collection`] face, `contains((k, v))` is true only when `k` is
/// present and mapped to a value equal to `v`, and `remove((k, v))` removes the
/// pair only in that case. A present key with a different value is reported as
/// "not removed" (`Ok(false)`), never as an error.
pub trait Map<K, V>: Collection<(K, V)> {
    /// Returns the value stored under `key`, if any.
    fn try_get(&self, key: &K) -> Option<V>;

    /// Returns the value stored under `key`.
    ///
    /// Fails with [`CollectionError::KeyNotFound`] when the key is absent.
    fn get(&self, key: &K) -> Result<V>
    where
        K: fmt::Debug,
    {
        self.try_get(key)
            .ok_or_else(|| CollectionError::key_not_found(key))
    }

    fn contains_key(&self, key: &K) -> bool {
        self.try_get(key).is_some()
    }

    /// Adds a new pair; a key that is already present is a
    /// [`CollectionError::DuplicateKey`].
    fn insert(&mut self, _key: K, _value: V) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, _key: K, _value: V) -> Result<()> {
        Err(CollectionError::NotSupported("set"))
    }

    /// Removes the pair stored under `key`, returning whether one existed.
    fn remove_key(&mut self, _key: &K) -> Result<bool> {
        Err(CollectionError::ReadOnly)
    }

    fn as_untyped_map(&self) -> Option<&dyn UntypedMap> {
        None
    }
}

/// Copy an enumeration of `count` elements into `buffer` at `offset`.
///
/// Fails with [`CollectionError::ConcurrentModification`] when the enumeration
/// does not yield exactly `count` elements.
pub fn copy_enumeration<T>(
    items: impl Iterator<Item = T>,
    count: usize,
    buffer: &mut [T],
    offset: usize,
) -> Result<()> {
    ensure_room(buffer.len(), count, offset)?;

    let mut written = 0;
    for item in items {
        if written == count {
            return Err(CollectionError::ConcurrentModification);
        }
        buffer[offset + written] = item;
        written += 1;
    }

    if written == count {
        Ok(())
    } else {
        Err(CollectionError::ConcurrentModification)
    }
}

/// Check that a buffer of length `len` can take `count` elements at `offset`.
pub(crate) fn ensure_room(len: usize, count: usize, offset: usize) -> Result<()> {
    if offset > len {
        return Err(CollectionError::index_out_of_range(offset, len));
    }
    if len - offset < count {
        return Err(CollectionError::invalid_argument(
            "buffer",
            format!(
                "destination has room for {} elements but {} are required",
                len - offset,
                count
            ),
        ));
    }
    Ok(())
}

/// Render a container as its comma-joined elements.
pub fn render<T, C>(collection: &C) -> String
where
    T: fmt::Display,
    C: Collection<T> + ?Sized,
{
    collection.enumerate().join(", ")
}

/// Render a keyed container as comma-joined `key=value` pairs.
pub fn render_map<K, V, M>(map: &M) -> String
where
    K: fmt::Display,
    V: fmt::Display,
    M: Map<K, V> + ?Sized,
{
    map.enumerate()
        .map(|(key, value)| format!("{}={}", key, value))
        .join(", ")
}

/// Enumerate the keys of a keyed container.
pub fn keys<'a, K: 'a, V: 'a, M>(map: &'a M) -> impl Iterator<Item = K> + 'a
where
    M: Map<K, V> + ?Sized,
{
    map.enumerate().map(|(key, _)| key)
}

/// Enumerate the values of a keyed container.
pub fn values<'a, K: 'a, V: 'a, M>(map: &'a M) -> impl Iterator<Item = V> + 'a
where
    M: Map<K, V> + ?Sized,
{
    map.enumerate().map(|(_, value)| value)
}

/// Enumerate the elements of `collection` that satisfy `predicate`.
pub fn find_all<'a, T: 'a, C, P>(collection: &'a C, predicate: P) -> impl Iterator<Item = T> + 'a
where
    C: Collection<T> + ?Sized,
    P: FnMut(&T) -> bool + 'a,
{
    collection.enumerate().filter(predicate)
}

/// Enumerate `collection` with every element widened into `B`.
pub fn upcast_all<'a, S: 'a, B, C>(collection: &'a C) -> impl Iterator<Item = B> + 'a
where
    B: From<S> + 'a,
    C: Collection<S> + ?Sized,
{
    collection.enumerate().map(B::from)
}

/// Linear search used by containers without an indexed lookup.
pub(crate) fn position_of<T: PartialEq>(items: impl Iterator<Item = T>, item: &T) -> Option<usize> {
    items.into_iter().position(|candidate| candidate == *item)
}
