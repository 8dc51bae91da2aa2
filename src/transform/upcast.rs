use std::fmt;
use std::marker::PhantomData;

use super::{Mapping, TransformingCollection};
use crate::containers::Collection;
use crate::errors::{CollectionError, Result};

/// Widens `TSub` into `TBase`, and narrows back with a checked conversion.
///
/// Narrowing a value that is not a `TSub` fails with
/// [`CollectionError::InvalidCast`].
pub struct UpCast<TSub, TBase> {
    _marker: PhantomData<fn(TSub) -> TBase>,
}

impl<TSub, TBase> UpCast<TSub, TBase> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<TSub, TBase> Default for UpCast<TSub, TBase> {
    fn default() -> Self {
        Self::new()
    }
}

impl<TSub, TBase> Clone for UpCast<TSub, TBase> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<TSub, TBase> fmt::Debug for UpCast<TSub, TBase> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UpCast<{}, {}>",
            std::any::type_name::<TSub>(),
            std::any::type_name::<TBase>()
        )
    }
}

impl<TSub, TBase> Mapping<TSub, TBase> for UpCast<TSub, TBase>
where
    TSub: Clone + TryFrom<TBase>,
    TBase: Clone + From<TSub>,
{
    fn forward(&self, value: &TSub) -> TBase {
        TBase::from(value.clone())
    }

    fn is_reversible(&self) -> bool {
        true
    }

    fn reverse(&self, value: &TBase) -> Result<TSub> {
        TSub::try_from(value.clone()).map_err(|_| CollectionError::invalid_cast::<TBase, TSub>())
    }
}

/// A container of `TSub` seen as a container of its wider type `TBase`.
///
/// Membership tests and removals of values that are not a `TSub` report
/// `false`; adding one fails with [`CollectionError::InvalidCast`].
pub type UpCastCollection<C, TSub, TBase> =
    TransformingCollection<C, UpCast<TSub, TBase>, TSub, TBase>;

/// View `source` as a container of the wider type `TBase`.
///
/// # Examples
///
/// ```rust
/// use container_adapters::containers::Collection;
/// use container_adapters::transform::upcast;
///
/// let mut bytes: Vec<u8> = vec![1, 2];
/// let mut wide = upcast::<u8, u32, _>(&mut bytes);
/// assert!(wide.contains(&2u32));
/// assert!(!wide.contains(&300u32));
/// assert!(wide.add(300u32).is_err());
/// wide.add(3u32).unwrap();
/// assert_eq!(bytes, vec![1, 2, 3]);
/// ```
pub fn upcast<TSub, TBase, C>(source: C) -> UpCastCollection<C, TSub, TBase>
where
    C: Collection<TSub>,
    TSub: Clone + TryFrom<TBase>,
    TBase: Clone + From<TSub>,
{
    TransformingCollection::with_mapping(source, UpCast::new())
}
