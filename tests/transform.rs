//! Integration tests for transforming views.

use std::collections::BTreeMap;

use container_adapters::containers::{Collection, List, Map};
use container_adapters::errors::CollectionError;
use container_adapters::transform::{TransformingCollection, TransformingMap, upcast};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #[test]
    fn view_reads_through(source in prop::collection::vec(-1000i32..1000, 0..32)) {
        let view = TransformingCollection::new(&source, |x: &i32| i64::from(*x) * 2);
        let expected: Vec<i64> = source.iter().map(|x| i64::from(*x) * 2).collect();

        prop_assert_eq!(view.count(), source.len());
        prop_assert_eq!(view.to_vec(), expected.clone());
        for (index, value) in expected.iter().enumerate() {
            prop_assert_eq!(view.get(index).unwrap(), *value);
        }
    }

    #[test]
    fn view_writes_through(source in prop::collection::vec(-1000i32..1000, 0..16), extra in -1000i32..1000) {
        let mut backing = source.clone();
        let mut view = TransformingCollection::with_reverse(
            &mut backing,
            |x: &i32| i64::from(*x) + 1,
            |y: &i64| (*y - 1) as i32,
        );
        view.add(i64::from(extra) + 1).unwrap();
        prop_assert_eq!(view.count(), source.len() + 1);
        prop_assert!(view.contains(&(i64::from(extra) + 1)));

        let mut expected = source;
        expected.push(extra);
        prop_assert_eq!(backing, expected);
    }
}

#[test]
fn test_temperature_view() {
    let mut celsius = vec![0, 100];
    {
        let mut fahrenheit = TransformingCollection::with_reverse(
            &mut celsius,
            |c: &i32| c * 9 / 5 + 32,
            |f: &i32| (f - 32) * 5 / 9,
        );
        assert_eq!(fahrenheit.to_vec(), vec![32, 212]);
        List::set(&mut fahrenheit, 0, 50).unwrap();
        assert_eq!(fahrenheit.index_of(&212), Some(1));
        assert!(fahrenheit.remove(&212).unwrap());
    }
    assert_eq!(celsius, vec![10]);
}

#[test]
fn test_forward_only_view_rejects_writes() {
    let mut names = vec!["ada".to_string()];
    let mut lengths = TransformingCollection::new(&mut names, |s: &String| s.len());
    assert!(lengths.contains(&3));
    assert_eq!(
        lengths.add(4).unwrap_err(),
        CollectionError::NotSupported("reverse mapping")
    );
    assert_eq!(
        lengths.remove(&3).unwrap_err(),
        CollectionError::NotSupported("remove without a reverse mapping")
    );
    lengths.clear().unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_upcast_view() {
    let mut small: Vec<u8> = vec![1, 2];
    {
        let mut wide = upcast::<u8, u16, _>(&mut small);
        assert_eq!(wide.to_vec(), vec![1u16, 2]);
        assert!(!wide.contains(&999));
        assert_eq!(
            wide.add(256).unwrap_err(),
            CollectionError::invalid_cast::<u16, u8>()
        );
        assert!(!wide.remove(&999).unwrap());
        wide.add(3).unwrap();
    }
    assert_eq!(small, vec![1, 2, 3]);
}

#[test]
fn test_map_view_with_value_reverse() {
    let mut source = BTreeMap::new();
    source.insert("a".to_string(), 1);
    {
        let mut view = TransformingMap::with_value_reverse(
            &mut source,
            |k: &String| k.to_uppercase(),
            |k: &String| k.to_lowercase(),
            |v: &i32| v * 10,
            |v: &i32| v / 10,
        );
        assert_eq!(view.try_get(&"A".to_string()), Some(10));
        assert_eq!(view.try_get(&"B".to_string()), None);
        Map::insert(&mut view, "B".to_string(), 20).unwrap();
        Map::set(&mut view, "A".to_string(), 30).unwrap();
        assert_eq!(view.count(), 2);
    }
    assert_eq!(source.get("a"), Some(&3));
    assert_eq!(source.get("b"), Some(&2));
}
