//! Container contracts for the standard library collections, plus forwarding
//! impls so that `&C`, `&mut C` and `Box<C>` can stand in for a backing
//! container wherever one is held.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use super::{Collection, Enumerator, List, Map};
use crate::errors::{CollectionError, Result};
use crate::legacy::{UntypedCollection, UntypedList, UntypedMap};

impl<T: Clone + PartialEq> Collection<T> for Vec<T> {
    fn enumerate(&self) -> Enumerator<'_, T> {
        Box::new(self.iter().cloned())
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.as_slice().contains(item)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn add(&mut self, item: T) -> Result<()> {
        self.push(item);
        Ok(())
    }

    fn remove(&mut self, item: &T) -> Result<bool> {
        match self.iter().position(|candidate| candidate == item) {
            Some(index) => {
                Vec::remove(self, index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear(&mut self) -> Result<()> {
        Vec::clear(self);
        Ok(())
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    fn copy_into(&self, buffer: &mut [T], offset: usize) -> Result<()> {
        super::ensure_room(buffer.len(), self.len(), offset)?;
        buffer[offset..offset + self.len()].clone_from_slice(self);
        Ok(())
    }
}

impl<T: Clone + PartialEq> List<T> for Vec<T> {
    fn get(&self, index: usize) -> Result<T> {
        self.as_slice()
            .get(index)
            .cloned()
            .ok_or_else(|| CollectionError::index_out_of_range(index, self.len()))
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|candidate| candidate == item)
    }

    fn set(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        let slot = self
            .get_mut(index)
            .ok_or_else(|| CollectionError::index_out_of_range(index, len))?;
        *slot = value;
        Ok(())
    }

    fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.len() {
            return Err(CollectionError::index_out_of_range(index, self.len()));
        }
        Vec::insert(self, index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(CollectionError::index_out_of_range(index, self.len()));
        }
        Ok(Vec::remove(self, index))
    }
}

impl<T, S> Collection<T> for HashSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn enumerate(&self) -> Enumerator<'_, T> {
        Box::new(self.iter().cloned())
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn contains(&self, item: &T) -> bool {
        HashSet::contains(self, item)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn add(&mut self, item: T) -> Result<()> {
        self.insert(item);
        Ok(())
    }

    fn remove(&mut self, item: &T) -> Result<bool> {
        Ok(HashSet::remove(self, item))
    }

    fn clear(&mut self) -> Result<()> {
        HashSet::clear(self);
        Ok(())
    }
}

impl<T: Ord + Clone> Collection<T> for BTreeSet<T> {
    fn enumerate(&self) -> Enumerator<'_, T> {
        Box::new(self.iter().cloned())
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn contains(&self, item: &T) -> bool {
        BTreeSet::contains(self, item)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn add(&mut self, item: T) -> Result<()> {
        self.insert(item);
        Ok(())
    }

    fn remove(&mut self, item: &T) -> Result<bool> {
        Ok(BTreeSet::remove(self, item))
    }

    fn clear(&mut self) -> Result<()> {
        BTreeSet::clear(self);
        Ok(())
    }
}

/// Implements both faces of a keyed standard collection.
macro_rules! std_map {
    ($map:ident, [$($bounds:tt)*] $(, $hasher:ident)?) => {
        impl<K, V $(, $hasher: BuildHasher)?> Collection<(K, V)> for $map<K, V $(, $hasher)?>
        where
            K: $($bounds)* + Clone + fmt::Debug,
            V: Clone + PartialEq,
        {
            fn enumerate(&self) -> Enumerator<'_, (K, V)> {
                Box::new(self.iter().map(|(k, v)| (k.clone(), v.clone())))
            }

            fn count(&self) -> usize {
                self.len()
            }

            fn contains(&self, item: &(K, V)) -> bool {
                $map::get(self, &item.0).is_some_and(|value| *value == item.1)
            }

            fn is_read_only(&self) -> bool {
                false
            }

            fn add(&mut self, item: (K, V)) -> Result<()> {
                Map::insert(self, item.0, item.1)
            }

            fn remove(&mut self, item: &(K, V)) -> Result<bool> {
                if Collection::contains(self, item) {
                    $map::remove(self, &item.0);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }

            fn clear(&mut self) -> Result<()> {
                $map::clear(self);
                Ok(())
            }
        }

        impl<K, V $(, $hasher: BuildHasher)?> Map<K, V> for $map<K, V $(, $hasher)?>
        where
            K: $($bounds)* + Clone + fmt::Debug,
            V: Clone + PartialEq,
        {
            fn try_get(&self, key: &K) -> Option<V> {
                $map::get(self, key).cloned()
            }

            fn contains_key(&self, key: &K) -> bool {
                $map::contains_key(self, key)
            }

            fn insert(&mut self, key: K, value: V) -> Result<()> {
                if $map::contains_key(self, &key) {
                    return Err(CollectionError::duplicate_key(&key));
                }
                $map::insert(self, key, value);
                Ok(())
            }

            fn set(&mut self, key: K, value: V) -> Result<()> {
                $map::insert(self, key, value);
                Ok(())
            }

            fn remove_key(&mut self, key: &K) -> Result<bool> {
                Ok($map::remove(self, key).is_some())
            }
        }
    };
}

std_map!(HashMap, [Eq + Hash], S);
std_map!(BTreeMap, [Ord]);

/// Forwards every operation through a pointer that grants mutable access.
macro_rules! forward_through {
    ([$($generics:tt)*] $target:ty) => {
        impl<$($generics)* T, C: Collection<T> + ?Sized> Collection<T> for $target {
            fn enumerate(&self) -> Enumerator<'_, T> {
                (**self).enumerate()
            }

            fn count(&self) -> usize {
                (**self).count()
            }

            fn contains(&self, item: &T) -> bool {
                (**self).contains(item)
            }

            fn is_read_only(&self) -> bool {
                (**self).is_read_only()
            }

            fn add(&mut self, item: T) -> Result<()> {
                (**self).add(item)
            }

            fn remove(&mut self, item: &T) -> Result<bool> {
                (**self).remove(item)
            }

            fn clear(&mut self) -> Result<()> {
                (**self).clear()
            }

            fn is_empty(&self) -> bool {
                (**self).is_empty()
            }

            fn copy_into(&self, buffer: &mut [T], offset: usize) -> Result<()> {
                (**self).copy_into(buffer, offset)
            }

            fn as_untyped(&self) -> Option<&dyn UntypedCollection> {
                (**self).as_untyped()
            }
        }

        impl<$($generics)* T, C: List<T> + ?Sized> List<T> for $target {
            fn get(&self, index: usize) -> Result<T> {
                (**self).get(index)
            }

            fn index_of(&self, item: &T) -> Option<usize> {
                (**self).index_of(item)
            }

            fn set(&mut self, index: usize, value: T) -> Result<()> {
                (**self).set(index, value)
            }

            fn insert(&mut self, index: usize, item: T) -> Result<()> {
                (**self).insert(index, item)
            }

            fn remove_at(&mut self, index: usize) -> Result<T> {
                (**self).remove_at(index)
            }

            fn as_untyped_list(&self) -> Option<&dyn UntypedList> {
                (**self).as_untyped_list()
            }
        }

        impl<$($generics)* K, V, C: Map<K, V> + ?Sized> Map<K, V> for $target {
            fn try_get(&self, key: &K) -> Option<V> {
                (**self).try_get(key)
            }

            fn get(&self, key: &K) -> Result<V>
            where
                K: fmt::Debug,
            {
                (**self).get(key)
            }

            fn contains_key(&self, key: &K) -> bool {
                (**self).contains_key(key)
            }

            fn insert(&mut self, key: K, value: V) -> Result<()> {
                (**self).insert(key, value)
            }

            fn set(&mut self, key: K, value: V) -> Result<()> {
                (**self).set(key, value)
            }

            fn remove_key(&mut self, key: &K) -> Result<bool> {
                (**self).remove_key(key)
            }

            fn as_untyped_map(&self) -> Option<&dyn UntypedMap> {
                (**self).as_untyped_map()
            }
        }
    };
}

forward_through!(['a,] &'a mut C);
forward_through!([] Box<C>);

// A shared reference reads through to the container but can never write.

impl<T, C: Collection<T> + ?Sized> Collection<T> for &C {
    fn enumerate(&self) -> Enumerator<'_, T> {
        (**self).enumerate()
    }

    fn count(&self) -> usize {
        (**self).count()
    }

    fn contains(&self, item: &T) -> bool {
        (**self).contains(item)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn copy_into(&self, buffer: &mut [T], offset: usize) -> Result<()> {
        (**self).copy_into(buffer, offset)
    }

    fn as_untyped(&self) -> Option<&dyn UntypedCollection> {
        (**self).as_untyped()
    }
}

impl<T, C: List<T> + ?Sized> List<T> for &C {
    fn get(&self, index: usize) -> Result<T> {
        (**self).get(index)
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        (**self).index_of(item)
    }

    fn set(&mut self, _index: usize, _value: T) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    fn as_untyped_list(&self) -> Option<&dyn UntypedList> {
        (**self).as_untyped_list()
    }
}

impl<K, V, C: Map<K, V> + ?Sized> Map<K, V> for &C {
    fn try_get(&self, key: &K) -> Option<V> {
        (**self).try_get(key)
    }

    fn get(&self, key: &K) -> Result<V>
    where
        K: fmt::Debug,
    {
        (**self).get(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        (**self).contains_key(key)
    }

    fn set(&mut self, _key: K, _value: V) -> Result<()> {
        Err(CollectionError::ReadOnly)
    }

    fn as_untyped_map(&self) -> Option<&dyn UntypedMap> {
        (**self).as_untyped_map()
    }
}
