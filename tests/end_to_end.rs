//! End-to-end scenario combining the adapters.

use container_adapters::composite::CompositeList;
use container_adapters::containers::{Collection, List};
use container_adapters::errors::CollectionError;
use container_adapters::seal::{Sealable, sealed};
use container_adapters::transform::TransformingCollection;
use container_adapters::wrapper::CollectionWrapper;
use pretty_assertions::assert_eq;

#[test]
fn test_composite_of_two_lists() {
    let a = vec![1, 2, 3];
    let b = vec![4, 5];
    let ab = CompositeList::from_members([&a, &b]);

    assert_eq!(ab.count(), 5);
    assert_eq!(ab.get(0).unwrap(), 1);
    assert_eq!(ab.get(3).unwrap(), 4);
    let err = ab.get(5).unwrap_err();
    assert_eq!(
        err,
        CollectionError::IndexOutOfRange {
            index: 5,
            available: 5
        }
    );
    assert!(err.to_string().contains('5'));
    assert_eq!(ab.index_of(&4), Some(3));
}

#[test]
fn test_layered_adapters() {
    let a = vec![1, 2, 3];
    let b = CollectionWrapper::new(vec![4, 5]);
    let ab = CompositeList::new() + &a + &b;
    let labels = TransformingCollection::new(&ab, |n: &i32| format!("#{n}"));
    let frozen = sealed(labels);

    assert!(frozen.is_sealed());
    assert_eq!(frozen.count(), 5);
    assert_eq!(frozen.get(4).unwrap(), "#5");
    assert_eq!(frozen.index_of(&"#4".to_string()), Some(3));
    assert_eq!(frozen.inner().to_string(), "TransformingCollection(#1, #2, #3, #4, #5)");
}
