//! # Sealing
//!
//! A [`SealableCollection`] wraps a mutable container and can be switched,
//! once and for good, into a sealed state in which every mutating operation
//! fails with [`CollectionError::InstanceSealed`] before the backing container
//! is touched. Reads are never affected.
//!
//! The sealed flag is an atomic boolean, so [`Sealable::seal`] takes `&self`
//! and a seal performed on one thread is observed by every other thread
//! without further locking.
//!
//! ```rust
//! use container_adapters::containers::Collection;
//! use container_adapters::seal::{Sealable, SealableCollection};
//!
//! let mut names = SealableCollection::new(vec!["ada"]);
//! names.add("grace").unwrap();
//! names.seal();
//!
//! assert!(names.is_read_only());
//! assert!(names.add("alan").is_err());
//! assert_eq!(names.count(), 2);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::containers::{Collection, Enumerator, List, Map};
use crate::errors::{CollectionError, Result};
use crate::legacy::{UntypedCollection, UntypedList, UntypedMap};
use crate::wrapper::CollectionWrapper;

/// A container that can be made permanently immutable.
pub trait Sealable {
    /// Forbid all further mutation. Sealing twice is a no-op.
    fn seal(&self);

    fn is_sealed(&self) -> bool;
}

/// Decorates a container with an irreversible seal.
pub struct SealableCollection<C> {
    inner: CollectionWrapper<C>,
    sealed: AtomicBool,
}

impl<C> SealableCollection<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner: CollectionWrapper::new(inner),
            sealed: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &C {
        self.inner.inner()
    }

    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }

    fn fail_if_sealed(&self) -> Result<()> {
        if self.is_sealed() {
            Err(CollectionError::InstanceSealed)
        } else {
            Ok(())
        }
    }
}

impl<C> Sealable for SealableCollection<C> {
    fn seal(&self) {
        if !self.sealed.swap(true, Ordering::AcqRel) {
            debug!("sealed {}", std::any::type_name::<C>());
        }
    }

    fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }
}

/// Wrap `inner` in a decorator that is already sealed.
pub fn sealed<C>(inner: C) -> SealableCollection<C> {
    let collection = SealableCollection::new(inner);
    collection.seal();
    collection
}

impl<C: Default> Default for SealableCollection<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: Clone> Clone for SealableCollection<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            sealed: AtomicBool::new(self.is_sealed()),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for SealableCollection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealableCollection")
            .field("inner", self.inner.inner())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}

impl<T, C: Collection<T>> Collection<T> for SealableCollection<C> {
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
        self.is_sealed() || self.inner.is_read_only()
    }

    fn add(&mut self, item: T) -> Result<()> {
        self.fail_if_sealed()?;
        self.inner.add(item)
    }

    fn remove(&mut self, item: &T) -> Result<bool> {
        self.fail_if_sealed()?;
        self.inner.remove(item)
    }

    fn clear(&mut self) -> Result<()> {
        self.fail_if_sealed()?;
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

impl<T, C: List<T>> List<T> for SealableCollection<C> {
    fn get(&self, index: usize) -> Result<T> {
        self.inner.get(index)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.inner.index_of(item)
    }

    fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.fail_if_sealed()?;
        self.inner.set(index, value)
    }

    fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.fail_if_sealed()?;
        self.inner.insert(index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        self.fail_if_sealed()?;
        self.inner.remove_at(index)
    }

    fn as_untyped_list(&self) -> Option<&dyn UntypedList> {
        self.inner.as_untyped_list()
    }
}

impl<K, V, C: Map<K, V>> Map<K, V> for SealableCollection<C> {
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
        self.fail_if_sealed()?;
        self.inner.insert(key, value)
    }

    fn set(&mut self, key: K, value: V) -> Result<()> {
        self.fail_if_sealed()?;
        self.inner.set(key, value)
    }

    fn remove_key(&mut self, key: &K) -> Result<bool> {
        self.fail_if_sealed()?;
        self.inner.remove_key(key)
    }

    fn as_untyped_map(&self) -> Option<&dyn UntypedMap> {
        self.inner.as_untyped_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FixedList, init_logging};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_seal_blocks_every_mutation() {
        init_logging();
        let mut list = SealableCollection::new(vec![1, 2, 3]);
        list.add(4).unwrap();
        list.seal();

        assert_eq!(list.add(5).unwrap_err(), CollectionError::InstanceSealed);
        assert_eq!(list.remove(&1).unwrap_err(), CollectionError::InstanceSealed);
        assert_eq!(list.clear().unwrap_err(), CollectionError::InstanceSealed);
        assert_eq!(List::set(&mut list, 0, 9).unwrap_err(), CollectionError::InstanceSealed);
        assert_eq!(List::insert(&mut list, 0, 9).unwrap_err(), CollectionError::InstanceSealed);
        assert_eq!(list.remove_at(0).unwrap_err(), CollectionError::InstanceSealed);
        assert_eq!(list.inner(), &vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reads_survive_sealing() {
        let list = sealed(vec!['a', 'b']);
        assert!(list.is_sealed());
        assert_eq!(List::get(&list, 1).unwrap(), 'b');
        assert_eq!(list.index_of(&'a'), Some(0));
        assert!(list.contains(&'b'));
        assert_eq!(list.to_vec(), vec!['a', 'b']);
    }

    #[test]
    fn test_seal_is_idempotent() {
        let list = SealableCollection::new(Vec::<i32>::new());
        assert!(!list.is_read_only());
        list.seal();
        list.seal();
        assert!(list.is_sealed());
        assert!(list.is_read_only());
    }

    #[test]
    fn test_read_only_backing_is_reported() {
        let list = SealableCollection::new(FixedList::new([1]));
        assert!(!list.is_sealed());
        assert!(list.is_read_only());
    }

    #[test]
    fn test_sealed_map() {
        let mut map = SealableCollection::new(HashMap::<&str, i32>::new());
        Map::insert(&mut map, "a", 1).unwrap();
        map.seal();
        assert_eq!(Map::set(&mut map, "a", 2).unwrap_err(), CollectionError::InstanceSealed);
        assert_eq!(Map::insert(&mut map, "b", 2).unwrap_err(), CollectionError::InstanceSealed);
        assert_eq!(map.remove_key(&"a").unwrap_err(), CollectionError::InstanceSealed);
        assert_eq!(Map::get(&map, &"a").unwrap(), 1);
    }

    #[test]
    fn test_seal_is_visible_across_threads() {
        let list = Arc::new(SealableCollection::new(vec![1]));
        let sealer = Arc::clone(&list);
        thread::spawn(move || sealer.seal())
            .join()
            .expect("sealing thread panicked");
        assert!(list.is_sealed());
        assert!(Collection::<i32>::is_read_only(&*list));
    }

    #[test]
    fn test_clone_keeps_state() {
        let original = sealed(vec![1]);
        let copy = original.clone();
        assert!(copy.is_sealed());
        assert_eq!(copy.inner(), &vec![1]);
    }
}
