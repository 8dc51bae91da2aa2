//! # Delegating Wrapper
//!
//! [`CollectionWrapper`] holds exactly one backing container and forwards every
//! operation to it unchanged. Decorators embed a wrapper and override only the
//! operations whose meaning they alter.
//!
//! ```rust
//! use container_adapters::containers::Collection;
//! use container_adapters::wrapper::CollectionWrapper;
//!
//! let mut numbers = vec![1, 2];
//! let mut wrapper = CollectionWrapper::new(&mut numbers);
//! wrapper.add(3).unwrap();
//! assert_eq!(wrapper.count(), 3);
//! assert_eq!(numbers, vec![1, 2, 3]);
//! ```

use std::fmt;

use crate::containers::{self, Collection, Enumerator, List, Map};
use crate::errors::Result;
use crate::legacy::{UntypedCollection, UntypedList, UntypedMap};

/// Forwards every container operation to the backing container.
///
/// Two wrappers are equal exactly when their backing containers are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CollectionWrapper<C> {
    inner: C,
}

impl<C> CollectionWrapper<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> From<C> for CollectionWrapper<C> {
    fn from(inner: C) -> Self {
        Self::new(inner)
    }
}

impl<T, C: Collection<T>> Collection<T> for CollectionWrapper<C> {
    fn enumerate(&self) -> Enumerator<'_, T> {
        self.inner.enumerate()
    }

    fn count(&self) -> usize {
        self.inner.count()
    }

    fn contains(&self, item: &T) -> bool {
        self.inner.contains(item)
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    fn add(&mut self, item: T) -> Result<()> {
        self.inner.add(item)
    }

    fn remove(&mut self, item: &T) -> Result<bool> {
        self.inner.remove(item)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn copy_into(&self, buffer: &mut [T], offset: usize) -> Result<()> {
        self.inner.copy_into(buffer, offset)
    }

    fn as_untyped(&self) -> Option<&dyn UntypedCollection> {
        self.inner.as_untyped()
    }
}

impl<T, C: List<T>> List<T> for CollectionWrapper<C> {
    fn get(&self, index: usize) -> Result<T> {
        self.inner.get(index)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.inner.index_of(item)
    }

    fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.inner.set(index, value)
    }

    fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.inner.insert(index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        self.inner.remove_at(index)
    }

    fn as_untyped_list(&self) -> Option<&dyn UntypedList> {
        self.inner.as_untyped_list()
    }
}

impl<K, V, C: Map<K, V>> Map<K, V> for CollectionWrapper<C> {
    fn try_get(&self, key: &K) -> Option<V> {
        self.inner.try_get(key)
    }

    fn get(&self, key: &K) -> Result<V>
    where
        K: fmt::Debug,
    {
        self.inner.get(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.inner.insert(key, value)
    }

    fn set(&mut self, key: K, value: V) -> Result<()> {
        self.inner.set(key, value)
    }

    fn remove_key(&mut self, key: &K) -> Result<bool> {
        self.inner.remove_key(key)
    }

    fn as_untyped_map(&self) -> Option<&dyn UntypedMap> {
        self.inner.as_untyped_map()
    }
}

/// Render the wrapped elements the way the framework's own containers do.
pub fn render_wrapped<T, C>(wrapper: &CollectionWrapper<C>) -> String
where
    T: fmt::Display,
    C: Collection<T>,
{
    format!("CollectionWrapper({})", containers::render(wrapper))
}
