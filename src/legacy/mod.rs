//! # Untyped Bridge
//!
//! Object-safe container contracts over type-erased values, for callers that
//! only deal in [`Box<dyn Any>`](Object).
//!
//! Any typed container can be viewed through the untyped contracts:
//!
//! - a container that natively implements them reports so through
//!   [`Collection::as_untyped`] (and the list and map equivalents);
//! - otherwise [`untyped`], [`untyped_list`] and [`untyped_map`] fall back to
//!   an [`Untyped`] adapter generated from the typed operations.
//!
//! Behaviour matches the typed operations modulo type erasure. A value of the
//! wrong type fails writes with [`CollectionError::InvalidCast`] and reads as
//! absent (`false` or `None`) for lookups and removals.
//!
//! ```rust
//! use container_adapters::legacy::{self, UntypedCollection, Untyped};
//!
//! let numbers = vec![1, 2, 3];
//! let view = legacy::untyped(&numbers);
//! assert_eq!(view.object_count(), 3);
//! assert!(view.contains_object(&2));
//! assert!(!view.contains_object(&"2"));
//!
//! let mut adapter = Untyped::<Vec<i32>, i32>::new(Vec::new());
//! adapter.add_object(Box::new(7)).unwrap();
//! assert!(adapter.add_object(Box::new("seven")).is_err());
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use log::trace;

use crate::containers::{self, Collection, Enumerator, List, Map};
use crate::errors::{CollectionError, Result};

/// A type-erased element.
pub type Object = Box<dyn Any>;

/// A type-erased enumeration.
pub type ObjectEnumerator<'a> = Box<dyn Iterator<Item = Object> + 'a>;

/// The untyped container contract.
pub trait UntypedCollection {
    fn object_count(&self) -> usize;

    /// Returns a fresh enumeration of boxed elements.
    fn objects(&self) -> ObjectEnumerator<'_>;

    fn contains_object(&self, item: &dyn Any) -> bool;

    fn is_object_read_only(&self) -> bool;

    fn add_object(&mut self, item: Object) -> Result<()>;

    fn remove_object(&mut self, item: &dyn Any) -> Result<bool>;

    fn clear_objects(&mut self) -> Result<()>;

    /// Copies every element into `buffer` starting at `offset`, with the same
    /// bounds rules as [`Collection::copy_into`].
    fn copy_objects_into(&self, buffer: &mut [Option<Object>], offset: usize) -> Result<()> {
        containers::copy_enumeration(self.objects().map(Some), self.object_count(), buffer, offset)
    }
}

/// The untyped ordered contract.
pub trait UntypedList: UntypedCollection {
    fn object_at(&self, index: usize) -> Result<Object>;

    fn set_object_at(&mut self, index: usize, item: Object) -> Result<()>;

    fn position_of_object(&self, item: &dyn Any) -> Option<usize>;

    fn insert_object_at(&mut self, index: usize, item: Object) -> Result<()>;

    fn remove_object_at(&mut self, index: usize) -> Result<Object>;
}

/// The untyped keyed contract.
pub trait UntypedMap: UntypedCollection {
    fn object_for(&self, key: &dyn Any) -> Option<Object>;

    fn contains_object_key(&self, key: &dyn Any) -> bool;

    fn insert_object_for(&mut self, key: Object, value: Object) -> Result<()>;

    fn set_object_for(&mut self, key: Object, value: Object) -> Result<()>;

    fn remove_object_key(&mut self, key: &dyn Any) -> Result<bool>;

    /// Enumerates `(key, value)` entries.
    fn object_entries(&self) -> Box<dyn Iterator<Item = (Object, Object)> + '_>;
}

/// Presents a typed container of `E` through the untyped contracts.
///
/// The adapter owns whatever it is given: a container, `&mut C` for a mutable
/// view, or `&C` for a read-only one.
pub struct Untyped<C, E> {
    inner: C,
    _element: PhantomData<fn() -> E>,
}

impl<C, E> Untyped<C, E> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _element: PhantomData,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: fmt::Debug, E> fmt::Debug for Untyped<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Untyped").field("inner", &self.inner).finish()
    }
}

fn narrow<E: Any>(item: Object) -> Result<E> {
    item.downcast::<E>()
        .map(|boxed| *boxed)
        .map_err(|_| CollectionError::invalid_cast::<dyn Any, E>())
}

impl<C, E> UntypedCollection for Untyped<C, E>
where
    C: Collection<E>,
    E: Any,
{
    fn object_count(&self) -> usize {
        self.inner.count()
    }

    fn objects(&self) -> ObjectEnumerator<'_> {
        Box::new(self.inner.enumerate().map(|item| Box::new(item) as Object))
    }

    fn contains_object(&self, item: &dyn Any) -> bool {
        item.downcast_ref::<E>()
            .is_some_and(|item| self.inner.contains(item))
    }

    fn is_object_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    fn add_object(&mut self, item: Object) -> Result<()> {
        self.inner.add(narrow(item)?)
    }

    fn remove_object(&mut self, item: &dyn Any) -> Result<bool> {
        match item.downcast_ref::<E>() {
            Some(item) => self.inner.remove(item),
            None => Ok(false),
        }
    }

    fn clear_objects(&mut self) -> Result<()> {
        self.inner.clear()
    }
}

impl<C, E> UntypedList for Untyped<C, E>
where
    C: List<E>,
    E: Any,
{
    fn object_at(&self, index: usize) -> Result<Object> {
        Ok(Box::new(self.inner.get(index)?))
    }

    fn set_object_at(&mut self, index: usize, item: Object) -> Result<()> {
        self.inner.set(index, narrow(item)?)
    }

    fn position_of_object(&self, item: &dyn Any) -> Option<usize> {
        self.inner.index_of(item.downcast_ref::<E>()?)
    }

    fn insert_object_at(&mut self, index: usize, item: Object) -> Result<()> {
        self.inner.insert(index, narrow(item)?)
    }

    fn remove_object_at(&mut self, index: usize) -> Result<Object> {
        Ok(Box::new(self.inner.remove_at(index)?))
    }
}

impl<C, K, V> UntypedMap for Untyped<C, (K, V)>
where
    C: Map<K, V>,
    K: Any,
    V: Any,
{
    fn object_for(&self, key: &dyn Any) -> Option<Object> {
        let value = self.inner.try_get(key.downcast_ref::<K>()?)?;
        Some(Box::new(value))
    }

    fn contains_object_key(&self, key: &dyn Any) -> bool {
        key.downcast_ref::<K>()
            .is_some_and(|key| self.inner.contains_key(key))
    }

    fn insert_object_for(&mut self, key: Object, value: Object) -> Result<()> {
        self.inner.insert(narrow(key)?, narrow(value)?)
    }

    fn set_object_for(&mut self, key: Object, value: Object) -> Result<()> {
        self.inner.set(narrow(key)?, narrow(value)?)
    }

    fn remove_object_key(&mut self, key: &dyn Any) -> Result<bool> {
        match key.downcast_ref::<K>() {
            Some(key) => self.inner.remove_key(key),
            None => Ok(false),
        }
    }

    fn object_entries(&self) -> Box<dyn Iterator<Item = (Object, Object)> + '_> {
        Box::new(
            self.inner
                .enumerate()
                .map(|(key, value)| (Box::new(key) as Object, Box::new(value) as Object)),
        )
    }
}

// The adapter is also a typed container, reporting itself as the native
// untyped face.

impl<C, E> Collection<E> for Untyped<C, E>
where
    C: Collection<E>,
    E: Any,
{
    fn enumerate(&self) -> Enumerator<'_, E> {
        self.inner.enumerate()
    }

    fn count(&self) -> usize {
        self.inner.count()
    }

    fn contains(&self, item: &E) -> bool {
        self.inner.contains(item)
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    fn add(&mut self, item: E) -> Result<()> {
        self.inner.add(item)
    }

    fn remove(&mut self, item: &E) -> Result<bool> {
        self.inner.remove(item)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn copy_into(&self, buffer: &mut [E], offset: usize) -> Result<()> {
        self.inner.copy_into(buffer, offset)
    }

    fn as_untyped(&self) -> Option<&dyn UntypedCollection> {
        Some(self)
    }
}

impl<C, E> List<E> for Untyped<C, E>
where
    C: List<E>,
    E: Any,
{
    fn get(&self, index: usize) -> Result<E> {
        self.inner.get(index)
    }

    fn index_of(&self, item: &E) -> Option<usize> {
        self.inner.index_of(item)
    }

    fn set(&mut self, index: usize, value: E) -> Result<()> {
        self.inner.set(index, value)
    }

    fn insert(&mut self, index: usize, item: E) -> Result<()> {
        self.inner.insert(index, item)
    }

    fn remove_at(&mut self, index: usize) -> Result<E> {
        self.inner.remove_at(index)
    }

    fn as_untyped_list(&self) -> Option<&dyn UntypedList> {
        Some(self)
    }
}

impl<C, K, V> Map<K, V> for Untyped<C, (K, V)>
where
    C: Map<K, V>,
    K: Any,
    V: Any,
{
    fn try_get(&self, key: &K) -> Option<V> {
        self.inner.try_get(key)
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
        Some(self)
    }
}

/// A shared borrow of a native untyped face. Reads pass through; writes are
/// rejected.
struct Borrowed<'a, U: ?Sized>(&'a U);

impl<U: UntypedCollection + ?Sized> UntypedCollection for Borrowed<'_, U> {
    fn object_count(&self) -> usize {
        self.0.object_count()
    }

    fn objects(&self) -> ObjectEnumerator<'_> {
        self.0.objects()
    }

    fn contains_object(&self, item: &dyn Any) -> bool {
        self.0.contains_object(item)
    }

    fn is_object_read_only(&self) -> bool {
        true
    }

    fn add_object(&mut self, _item: Object) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    fn remove_object(&mut self, _item: &dyn Any) -> Result<bool> {
        Err(CollectionError::ReadOnly)
    }

    fn clear_objects(&mut self) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    fn copy_objects_into(&self, buffer: &mut [Option<Object>], offset: usize) -> Result<()> {
        self.0.copy_objects_into(buffer, offset)
    }
}

impl<U: UntypedList + ?Sized> UntypedList for Borrowed<'_, U> {
    fn object_at(&self, index: usize) -> Result<Object> {
        self.0.object_at(index)
    }

    fn set_object_at(&mut self, _index: usize, _item: Object) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    fn position_of_object(&self, item: &dyn Any) -> Option<usize> {
        self.0.position_of_object(item)
    }

    fn insert_object_at(&mut self, _index: usize, _item: Object) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    fn remove_object_at(&mut self, _index: usize) -> Result<Object> {
        Err(CollectionError::ReadOnly)
    }
}

impl<U: UntypedMap + ?Sized> UntypedMap for Borrowed<'_, U> {
    fn object_for(&self, key: &dyn Any) -> Option<Object> {
        self.0.object_for(key)
    }

    fn contains_object_key(&self, key: &dyn Any) -> bool {
        self.0.contains_object_key(key)
    }

    fn insert_object_for(&mut self, _key: Object, _value: Object) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    fn set_object_for(&mut self, _key: Object, _value: Object) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    fn remove_object_key(&mut self, _key: &dyn Any) -> Result<bool> {
        Err(CollectionError::ReadOnly)
    }

    fn object_entries(&self) -> Box<dyn Iterator<Item = (Object, Object)> + '_> {
        self.0.object_entries()
    }
}

/// View a typed container through the untyped contract.
///
/// Returns the container's native untyped face when it has one, otherwise an
/// [`Untyped`] adapter over a shared borrow. Either way the view is read-only.
pub fn untyped<'a, T, C>(collection: &'a C) -> Box<dyn UntypedCollection + 'a>
where
    T: Any,
    C: Collection<T> + ?Sized,
{
    match collection.as_untyped() {
        Some(native) => Box::new(Borrowed(native)),
        None => {
            trace!("no native untyped collection, generating an adapter");
            Box::new(Untyped::<_, T>::new(collection))
        }
    }
}

/// View a typed list through the untyped ordered contract.
pub fn untyped_list<'a, T, C>(list: &'a C) -> Box<dyn UntypedList + 'a>
where
    T: Any,
    C: List<T> + ?Sized,
{
    match list.as_untyped_list() {
        Some(native) => Box::new(Borrowed(native)),
        None => {
            trace!("no native untyped list, generating an adapter");
            Box::new(Untyped::<_, T>::new(list))
        }
    }
}

/// View a typed map through the untyped keyed contract.
pub fn untyped_map<'a, K, V, M>(map: &'a M) -> Box<dyn UntypedMap + 'a>
where
    K: Any,
    V: Any,
    M: Map<K, V> + ?Sized,
{
    match map.as_untyped_map() {
        Some(native) => Box::new(Borrowed(native)),
        None => {
            trace!("no native untyped map, generating an adapter");
            Box::new(Untyped::<_, (K, V)>::new(map))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_logging;
    use std::collections::BTreeMap;

    #[test]
    fn test_adapter_narrows_writes() {
        let mut adapter = Untyped::<Vec<String>, String>::new(Vec::new());
        adapter.add_object(Box::new("a".to_string())).unwrap();
        let err = adapter.add_object(Box::new(1u8)).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidCast { .. }));
        assert_eq!(adapter.object_count(), 1);
        assert!(!adapter.remove_object(&1u8).unwrap());
        assert!(adapter.remove_object(&"a".to_string()).unwrap());
    }

    #[test]
    fn test_list_face() {
        let mut backing = vec![10, 20];
        let mut adapter = Untyped::<_, i32>::new(&mut backing);
        adapter.insert_object_at(1, Box::new(15)).unwrap();
        adapter.set_object_at(0, Box::new(5)).unwrap();
        let third = adapter.object_at(2).unwrap();
        assert_eq!(third.downcast_ref::<i32>(), Some(&20));
        assert_eq!(adapter.position_of_object(&15), Some(1));
        assert_eq!(adapter.position_of_object(&"15"), None);
        assert!(adapter.object_at(3).is_err());
        drop(adapter);
        assert_eq!(backing, vec![5, 15, 20]);
    }

    #[test]
    fn test_map_face_and_entries() {
        let mut adapter =
            Untyped::<BTreeMap<String, i32>, (String, i32)>::new(BTreeMap::new());
        adapter
            .insert_object_for(Box::new("a".to_string()), Box::new(1))
            .unwrap();
        adapter
            .set_object_for(Box::new("b".to_string()), Box::new(2))
            .unwrap();
        assert!(adapter
            .insert_object_for(Box::new("c".to_string()), Box::new("x"))
            .is_err());

        let value = adapter.object_for(&"b".to_string()).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&2));
        assert!(adapter.object_for(&2).is_none());
        assert!(adapter.contains_object_key(&"a".to_string()));

        let keys: Vec<String> = adapter
            .object_entries()
            .filter_map(|(key, _)| key.downcast::<String>().ok().map(|key| *key))
            .collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert!(adapter.remove_object_key(&"a".to_string()).unwrap());
    }

    #[test]
    fn test_bridge_prefers_native_face() {
        init_logging();
        let adapter = Untyped::<_, i32>::new(vec![1, 2]);
        assert!(adapter.as_untyped().is_some());

        let mut view = untyped(&adapter);
        assert_eq!(view.object_count(), 2);
        assert!(view.is_object_read_only());
        assert_eq!(view.add_object(Box::new(3)).unwrap_err(), CollectionError::ReadOnly);
    }

    #[test]
    fn test_bridge_falls_back_to_adapter() {
        init_logging();
        let numbers = vec![1, 2, 3];
        let mut view = untyped(&numbers);
        assert!(view.contains_object(&3));
        assert!(view.is_object_read_only());
        assert_eq!(view.add_object(Box::new(4)).unwrap_err(), CollectionError::ReadOnly);

        let mut buffer: Vec<Option<Object>> = (0..4).map(|_| None).collect();
        view.copy_objects_into(&mut buffer, 1).unwrap();
        assert!(buffer[0].is_none());
        assert_eq!(
            buffer[3].as_ref().and_then(|item| item.downcast_ref::<i32>()),
            Some(&3)
        );

        let list = untyped_list(&numbers);
        assert_eq!(list.position_of_object(&2), Some(1));

        let mut map = BTreeMap::new();
        map.insert('k', 1.5);
        let keyed = untyped_map(&map);
        assert!(keyed.contains_object_key(&'k'));
        assert_eq!(keyed.object_entries().count(), 1);
    }
}
