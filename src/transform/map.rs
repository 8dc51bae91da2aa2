use std::fmt;
use std::marker::PhantomData;

use itertools::Itertools;

use super::{Forward, Identity, Mapping, Reversible};
use crate::containers::{Collection, Enumerator, Map};
use crate::errors::Result;

/// A keyed container of `KF -> VF` seen as one of `KT -> VT`.
///
/// A lookup by transformed key has to find the source key: a reversible key
/// mapping computes it, a one-way mapping scans the source keys. Values need
/// only the forward direction for reads;
/// `insert` and `set` additionally need the reverse and otherwise fail with
/// [`CollectionError::NotSupported`](crate::errors::CollectionError::NotSupported).
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use container_adapters::containers::{self, Map};
/// use container_adapters::transform::TransformingMap;
///
/// let mut ids = BTreeMap::new();
/// ids.insert(1u32, "ada".to_string());
///
/// let view = TransformingMap::new(
///     &ids,
///     |k: &u32| format!("#{k}"),
///     |k: &String| k.trim_start_matches('#').parse::<u32>().unwrap_or(u32::MAX),
///     |v: &String| v.len(),
/// );
/// assert_eq!(view.get(&"#1".to_string()).unwrap(), 3);
/// assert!(view.get(&"#2".to_string()).is_err());
/// assert_eq!(containers::render_map(&view), "#1=3");
/// ```
pub struct TransformingMap<S, KM, VM, KF, VF, KT, VT> {
    source: S,
    keys: KM,
    values: VM,
    _marker: PhantomData<fn(KF, VF) -> (KT, VT)>,
}

impl<S, KF, VF, KT, VT, FK, RK, FV> TransformingMap<S, Reversible<FK, RK>, Forward<FV>, KF, VF, KT, VT>
where
    S: Map<KF, VF>,
    FK: Fn(&KF) -> KT,
    RK: Fn(&KT) -> KF,
    FV: Fn(&VF) -> VT,
{
    /// Create a read-through view; values cannot be written.
    pub fn new(source: S, key_forward: FK, key_reverse: RK, value_forward: FV) -> Self {
        Self::with_mappings(
            source,
            Reversible {
                forward: key_forward,
                reverse: key_reverse,
            },
            Forward(value_forward),
        )
    }
}

impl<S, KF, VF, KT, VT, FK, RK, FV, RV>
    TransformingMap<S, Reversible<FK, RK>, Reversible<FV, RV>, KF, VF, KT, VT>
where
    S: Map<KF, VF>,
    FK: Fn(&KF) -> KT,
    RK: Fn(&KT) -> KF,
    FV: Fn(&VF) -> VT,
    RV: Fn(&VT) -> VF,
{
    /// Create a view that writes values through to the source.
    pub fn with_value_reverse(
        source: S,
        key_forward: FK,
        key_reverse: RK,
        value_forward: FV,
        value_reverse: RV,
    ) -> Self {
        Self::with_mappings(
            source,
            Reversible {
                forward: key_forward,
                reverse: key_reverse,
            },
            Reversible {
                forward: value_forward,
                reverse: value_reverse,
            },
        )
    }
}

impl<S, K, VF, VT, FV> TransformingMap<S, Identity, Forward<FV>, K, VF, K, VT>
where
    S: Map<K, VF>,
    K: Clone,
    FV: Fn(&VF) -> VT,
{
    /// Create a read-through view that keeps the keys and maps the values.
    pub fn map_values(source: S, value_forward: FV) -> Self {
        Self::with_mappings(source, Identity, Forward(value_forward))
    }
}

impl<S, KM, VM, KF, VF, KT, VT> TransformingMap<S, KM, VM, KF, VF, KT, VT>
where
    S: Map<KF, VF>,
    KM: Mapping<KF, KT>,
    VM: Mapping<VF, VT>,
{
    pub fn with_mappings(source: S, keys: KM, values: VM) -> Self {
        Self {
            source,
            keys,
            values,
            _marker: PhantomData,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn transform(&self, (key, value): (KF, VF)) -> (KT, VT) {
        (self.keys.forward(&key), self.values.forward(&value))
    }
}

impl<S, KM, VM, KF, VF, KT, VT> TransformingMap<S, KM, VM, KF, VF, KT, VT>
where
    S: Map<KF, VF>,
    KM: Mapping<KF, KT>,
    VM: Mapping<VF, VT>,
    KT: PartialEq,
{
    /// Find the source key shown as `key`.
    ///
    /// Without a reverse key mapping the source keys are scanned.
    fn source_key(&self, key: &KT) -> Option<KF> {
        if self.keys.is_reversible() {
            return self.keys.reverse(key).ok();
        }
        self.source
            .enumerate()
            .map(|(source_key, _)| source_key)
            .find(|source_key| self.keys.forward(source_key) == *key)
    }
}

impl<S, KM, VM, KF, VF, KT, VT> Collection<(KT, VT)> for TransformingMap<S, KM, VM, KF, VF, KT, VT>
where
    S: Map<KF, VF>,
    KM: Mapping<KF, KT>,
    VM: Mapping<VF, VT>,
    KT: PartialEq,
    VT: PartialEq,
{
    fn enumerate(&self) -> Enumerator<'_, (KT, VT)> {
        Box::new(self.source.enumerate().map(move |pair| self.transform(pair)))
    }

    fn count(&self) -> usize {
        self.source.count()
    }

    fn contains(&self, item: &(KT, VT)) -> bool {
        self.try_get(&item.0).is_some_and(|value| value == item.1)
    }

    fn is_read_only(&self) -> bool {
        self.source.is_read_only()
    }

    fn add(&mut self, item: (KT, VT)) -> Result<()> {
        Map::insert(self, item.0, item.1)
    }

    fn remove(&mut self, item: &(KT, VT)) -> Result<bool> {
        if !self.contains(item) {
            return Ok(false);
        }
        match self.source_key(&item.0) {
            Some(key) => self.source.remove_key(&key),
            None => Ok(false),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.source.clear()
    }
}

impl<S, KM, VM, KF, VF, KT, VT> Map<KT, VT> for TransformingMap<S, KM, VM, KF, VF, KT, VT>
where
    S: Map<KF, VF>,
    KM: Mapping<KF, KT>,
    VM: Mapping<VF, VT>,
    KT: PartialEq,
    VT: PartialEq,
{
    fn try_get(&self, key: &KT) -> Option<VT> {
        let value = self.source.try_get(&self.source_key(key)?)?;
        Some(self.values.forward(&value))
    }

    fn contains_key(&self, key: &KT) -> bool {
        self.source_key(key)
            .is_some_and(|key| self.source.contains_key(&key))
    }

    fn insert(&mut self, key: KT, value: VT) -> Result<()> {
        let source_key = self.keys.reverse(&key)?;
        let source_value = self.values.reverse(&value)?;
        self.source.insert(source_key, source_value)
    }

    fn set(&mut self, key: KT, value: VT) -> Result<()> {
        let source_key = self.keys.reverse(&key)?;
        let source_value = self.values.reverse(&value)?;
        self.source.set(source_key, source_value)
    }

    fn remove_key(&mut self, key: &KT) -> Result<bool> {
        match self.source_key(key) {
            Some(key) => self.source.remove_key(&key),
            None => Ok(false),
        }
    }
}

impl<S, KM, VM, KF, VF, KT, VT> fmt::Display for TransformingMap<S, KM, VM, KF, VF, KT, VT>
where
    S: Map<KF, VF>,
    KM: Mapping<KF, KT>,
    VM: Mapping<VF, VT>,
    KT: fmt::Display,
    VT: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .source
            .enumerate()
            .map(|pair| {
                let (key, value) = self.transform(pair);
                format!("{}={}", key, value)
            })
            .join(", ");
        write!(f, "TransformingMap({})", rendered)
    }
}

impl<S: fmt::Debug, KM, VM, KF, VF, KT, VT> fmt::Debug for TransformingMap<S, KM, VM, KF, VF, KT, VT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformingMap")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;
    use std::collections::{BTreeMap, HashMap};

    fn source() -> BTreeMap<String, i32> {
        let mut map = BTreeMap::new();
        map.insert("one".to_string(), 1);
        map.insert("two".to_string(), 2);
        map
    }

    #[test]
    fn test_lookup_by_transformed_key() {
        let backing = source();
        let view = TransformingMap::new(
            &backing,
            |k: &String| k.to_uppercase(),
            |k: &String| k.to_lowercase(),
            |v: &i32| v * 100,
        );
        assert_eq!(view.get(&"TWO".to_string()).unwrap(), 200);
        assert_eq!(
            view.get(&"THREE".to_string()).unwrap_err(),
            CollectionError::KeyNotFound("\"THREE\"".to_string())
        );
        assert!(view.contains_key(&"ONE".to_string()));
        assert!(view.contains(&("ONE".to_string(), 100)));
        assert!(!view.contains(&("ONE".to_string(), 1)));
        assert_eq!(view.to_string(), "TransformingMap(ONE=100, TWO=200)");
    }

    #[test]
    fn test_value_writes_need_reverse() {
        let mut backing = source();
        let mut view = TransformingMap::new(
            &mut backing,
            |k: &String| k.to_uppercase(),
            |k: &String| k.to_lowercase(),
            |v: &i32| v * 100,
        );
        assert_eq!(
            view.set("ONE".to_string(), 5).unwrap_err(),
            CollectionError::NotSupported("reverse mapping")
        );
        assert!(view.insert("SIX".to_string(), 600).is_err());

        // Key-only operations delegate.
        assert!(view.remove_key(&"ONE".to_string()).unwrap());
        assert!(!view.remove_key(&"ONE".to_string()).unwrap());
        view.clear().unwrap();
        assert!(backing.is_empty());
    }

    #[test]
    fn test_value_writes_with_reverse() {
        let mut backing = source();
        {
            let mut view = TransformingMap::with_value_reverse(
                &mut backing,
                |k: &String| k.to_uppercase(),
                |k: &String| k.to_lowercase(),
                |v: &i32| f64::from(*v) / 2.0,
                |v: &f64| (*v * 2.0) as i32,
            );
            view.set("ONE".to_string(), 5.0).unwrap();
            view.insert("SIX".to_string(), 3.0).unwrap();
            assert!(matches!(
                view.insert("SIX".to_string(), 1.0),
                Err(CollectionError::DuplicateKey(_))
            ));
            assert!(!view.remove(&("TWO".to_string(), 9.0)).unwrap());
            assert!(view.remove(&("TWO".to_string(), 1.0)).unwrap());
        }
        assert_eq!(backing.get("one"), Some(&10));
        assert_eq!(backing.get("six"), Some(&6));
        assert!(!backing.contains_key("two"));
    }

    #[test]
    fn test_one_way_key_mapping_still_reads() {
        let mut backing = source();
        let mut view = TransformingMap::with_mappings(
            &mut backing,
            Forward(|k: &String| k.to_uppercase()),
            Forward(|v: &i32| v + 1),
        );
        assert_eq!(view.get(&"TWO".to_string()).unwrap(), 3);
        assert!(view.contains_key(&"ONE".to_string()));
        assert!(view.contains(&("ONE".to_string(), 2)));
        assert_eq!(view.try_get(&"SIX".to_string()), None);
        assert_eq!(
            view.insert("SIX".to_string(), 0).unwrap_err(),
            CollectionError::NotSupported("reverse mapping")
        );

        assert!(view.remove_key(&"ONE".to_string()).unwrap());
        assert!(!view.remove_key(&"SIX".to_string()).unwrap());
        assert_eq!(backing.len(), 1);
    }

    #[test]
    fn test_map_values_keeps_keys() {
        let mut backing = HashMap::new();
        backing.insert('a', vec![1, 2, 3]);
        let view = TransformingMap::map_values(&backing, |v: &Vec<i32>| v.len());
        assert_eq!(view.get(&'a').unwrap(), 3);
        assert_eq!(view.count(), 1);
        assert_eq!(view.try_get(&'b'), None);
    }
}
