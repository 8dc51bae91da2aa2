use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::{Collection, Enumerator, Map};
use crate::errors::Result;
use crate::legacy::{UntypedCollection, UntypedMap};
use crate::wrapper::CollectionWrapper;

/// A keyed container whose lookups never miss.
///
/// [`Map::get`] returns the configured default for an absent key instead of
/// failing with [`KeyNotFound`](crate::errors::CollectionError::KeyNotFound).
/// Every other operation, including [`Map::try_get`], is delegated unchanged.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use container_adapters::containers::{Map, TolerantMap};
///
/// let mut scores = TolerantMap::with_default(HashMap::new(), 0);
/// scores.set("alice", 3).unwrap();
/// assert_eq!(scores.get(&"alice").unwrap(), 3);
/// assert_eq!(scores.get(&"bob").unwrap(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TolerantMap<M, V> {
    inner: CollectionWrapper<M>,
    default: V,
}

impl<K, V> TolerantMap<HashMap<K, V>, V>
where
    K: Eq + Hash,
    V: Default,
{
    /// Create an empty map whose default is `V::default()`.
    pub fn new() -> Self {
        Self::with_default(HashMap::new(), V::default())
    }
}

impl<K, V> Default for TolerantMap<HashMap<K, V>, V>
where
    K: Eq + Hash,
    V: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<M, V> TolerantMap<M, V> {
    pub fn with_default(map: M, default: V) -> Self {
        Self {
            inner: CollectionWrapper::new(map),
            default,
        }
    }

    /// The value returned for absent keys.
    pub fn default_value(&self) -> &V {
        &self.default
    }

    pub fn inner(&self) -> &M {
        self.inner.inner()
    }

    pub fn inner_mut(&mut self) -> &mut M {
        self.inner.inner_mut()
    }

    pub fn into_inner(self) -> M {
        self.inner.into_inner()
    }
}

impl<K, V, M> Collection<(K, V)> for TolerantMap<M, V>
where
    M: Map<K, V>,
{
    fn enumerate(&self) -> Enumerator<'_, (K, V)> {
        self.inner.enumerate()
    }

    fn count(&self) -> usize {
        self.inner.count()
    }

    fn contains(&self, item: &(K, V)) -> bool {
        self.inner.contains(item)
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    fn add(&mut self, item: (K, V)) -> Result<()> {
        self.inner.add(item)
    }

    fn remove(&mut self, item: &(K, V)) -> Result<bool> {
        self.inner.remove(item)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn as_untyped(&self) -> Option<&dyn UntypedCollection> {
        self.inner.as_untyped()
    }
}

impl<K, V, M> Map<K, V> for TolerantMap<M, V>
where
    M: Map<K, V>,
    V: Clone,
{
    fn try_get(&self, key: &K) -> Option<V> {
        self.inner.try_get(key)
    }

    fn get(&self, key: &K) -> Result<V>
    where
        K: fmt::Debug,
    {
        Ok(self
            .inner
            .try_get(key)
            .unwrap_or_else(|| self.default.clone()))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;
    use std::collections::BTreeMap;

    #[test]
    fn test_missing_key_yields_default() {
        let mut map: TolerantMap<HashMap<String, i32>, i32> = TolerantMap::new();
        map.set("a".to_string(), 5).unwrap();
        assert_eq!(map.get(&"a".to_string()).unwrap(), 5);
        assert_eq!(map.get(&"z".to_string()).unwrap(), 0);
        assert_eq!(map.try_get(&"z".to_string()), None);
        assert!(!map.contains_key(&"z".to_string()));
    }

    #[test]
    fn test_other_operations_delegate() {
        let mut backing = BTreeMap::new();
        backing.insert(1, "one");
        let mut map = TolerantMap::with_default(backing, "none");

        assert_eq!(
            map.insert(1, "uno").unwrap_err(),
            CollectionError::DuplicateKey("1".to_string())
        );
        assert!(map.remove_key(&1).unwrap());
        assert_eq!(map.get(&1).unwrap(), "none");
        assert_eq!(map.count(), 0);
        assert_eq!(map.default_value(), &"none");
    }

    #[test]
    fn test_wraps_borrowed_map() {
        let mut backing = HashMap::new();
        backing.insert('k', 1);
        {
            let mut map = TolerantMap::with_default(&mut backing, -1);
            map.set('j', 2).unwrap();
            assert_eq!(map.get(&'q').unwrap(), -1);
        }
        assert_eq!(backing.len(), 2);
    }
}
