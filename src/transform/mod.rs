//! # Transforming Views
//!
//! A transforming view presents a container of `TFrom` as a container of `TTo`
//! by running every element through a [`Mapping`]. Nothing is copied: elements
//! are mapped at the moment they are read, so changes to the source show up
//! through the view.
//!
//! A mapping always has a forward direction. Writes (`add`, `set`, `insert`)
//! and reverse lookups need the reverse direction as well; without it those
//! writes fail with [`CollectionError::NotSupported`].
//!
//! ## Examples
//!
//! ```rust
//! use container_adapters::containers::{Collection, List};
//! use container_adapters::transform::TransformingCollection;
//!
//! let mut celsius = vec![0.0, 100.0];
//! let mut fahrenheit = TransformingCollection::with_reverse(
//!     &mut celsius,
//!     |c: &f64| c * 9.0 / 5.0 + 32.0,
//!     |f: &f64| (f - 32.0) * 5.0 / 9.0,
//! );
//! assert_eq!(fahrenheit.get(1).unwrap(), 212.0);
//! fahrenheit.add(50.0).unwrap();
//! assert_eq!(celsius, vec![0.0, 100.0, 10.0]);
//! ```

pub mod map;
pub mod upcast;

use std::fmt;
use std::marker::PhantomData;

use itertools::Itertools;

use crate::containers::{self, Collection, Enumerator, List};
use crate::errors::{CollectionError, Result};

pub use map::TransformingMap;
pub use upcast::{UpCast, UpCastCollection, upcast};

/// A conversion from `From` to `To`, optionally reversible.
pub trait Mapping<From, To> {
    fn forward(&self, value: &From) -> To;

    /// Returns true if [`reverse`](Mapping::reverse) can succeed.
    fn is_reversible(&self) -> bool {
        false
    }

    /// Maps a value back to the source type.
    ///
    /// One-way mappings fail with [`CollectionError::NotSupported`]; a checked
    /// reverse fails with [`CollectionError::InvalidCast`] for values it cannot
    /// narrow.
    fn reverse(&self, _value: &To) -> Result<From> {
        Err(CollectionError::NotSupported("reverse mapping"))
    }
}

/// A one-way mapping built from a closure.
#[derive(Debug, Clone, Copy)]
pub struct Forward<F>(pub F);

impl<A, B, F> Mapping<A, B> for Forward<F>
where
    F: Fn(&A) -> B,
{
    fn forward(&self, value: &A) -> B {
        (self.0)(value)
    }
}

/// A two-way mapping built from a pair of closures.
#[derive(Debug, Clone, Copy)]
pub struct Reversible<F, R> {
    pub forward: F,
    pub reverse: R,
}

impl<A, B, F, R> Mapping<A, B> for Reversible<F, R>
where
    F: Fn(&A) -> B,
    R: Fn(&B) -> A,
{
    fn forward(&self, value: &A) -> B {
        (self.forward)(value)
    }

    fn is_reversible(&self) -> bool {
        true
    }

    fn reverse(&self, value: &B) -> Result<A> {
        Ok((self.reverse)(value))
    }
}

/// The mapping that leaves every value unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Clone> Mapping<T, T> for Identity {
    fn forward(&self, value: &T) -> T {
        value.clone()
    }

    fn is_reversible(&self) -> bool {
        true
    }

    fn reverse(&self, value: &T) -> Result<T> {
        Ok(value.clone())
    }
}

/// A container of `TFrom` seen as a container of `TTo`.
///
/// When the source is a [`List`], so is the view.
pub struct TransformingCollection<C, M, TFrom, TTo> {
    source: C,
    mapping: M,
    _marker: PhantomData<fn(TFrom) -> TTo>,
}

impl<C, F, TFrom, TTo> TransformingCollection<C, Forward<F>, TFrom, TTo>
where
    C: Collection<TFrom>,
    F: Fn(&TFrom) -> TTo,
{
    /// Create a read-through view with a forward mapping only.
    pub fn new(source: C, forward: F) -> Self {
        Self::with_mapping(source, Forward(forward))
    }
}

impl<C, F, R, TFrom, TTo> TransformingCollection<C, Reversible<F, R>, TFrom, TTo>
where
    C: Collection<TFrom>,
    F: Fn(&TFrom) -> TTo,
    R: Fn(&TTo) -> TFrom,
{
    /// Create a view that also writes through to the source.
    pub fn with_reverse(source: C, forward: F, reverse: R) -> Self {
        Self::with_mapping(
            source,
            Reversible {
                forward,
                reverse,
            },
        )
    }
}

impl<C, M, TFrom, TTo> TransformingCollection<C, M, TFrom, TTo>
where
    C: Collection<TFrom>,
    M: Mapping<TFrom, TTo>,
{
    pub fn with_mapping(source: C, mapping: M) -> Self {
        Self {
            source,
            mapping,
            _marker: PhantomData,
        }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut C {
        &mut self.source
    }

    pub fn mapping(&self) -> &M {
        &self.mapping
    }

    pub fn into_source(self) -> C {
        self.source
    }
}

impl<C, M, TFrom, TTo> Collection<TTo> for TransformingCollection<C, M, TFrom, TTo>
where
    C: Collection<TFrom>,
    M: Mapping<TFrom, TTo>,
    TTo: PartialEq,
{
    fn enumerate(&self) -> Enumerator<'_, TTo> {
        Box::new(
            self.source
                .enumerate()
                .map(move |item| self.mapping.forward(&item)),
        )
    }

    fn count(&self) -> usize {
        self.source.count()
    }

    fn contains(&self, item: &TTo) -> bool {
        if self.mapping.is_reversible() {
            self.mapping
                .reverse(item)
                .is_ok_and(|source_item| self.source.contains(&source_item))
        } else {
            self.enumerate().any(|candidate| candidate == *item)
        }
    }

    fn is_read_only(&self) -> bool {
        self.source.is_read_only()
    }

    fn add(&mut self, item: TTo) -> Result<()> {
        let source_item = self.mapping.reverse(&item)?;
        self.source.add(source_item)
    }

    fn remove(&mut self, item: &TTo) -> Result<bool> {
        if !self.mapping.is_reversible() {
            return Err(CollectionError::NotSupported(
                "remove without a reverse mapping",
            ));
        }
        match self.mapping.reverse(item) {
            Ok(source_item) => self.source.remove(&source_item),
            Err(CollectionError::InvalidCast { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.source.clear()
    }
}

impl<C, M, TFrom, TTo> List<TTo> for TransformingCollection<C, M, TFrom, TTo>
where
    C: List<TFrom>,
    M: Mapping<TFrom, TTo>,
    TTo: PartialEq,
{
    fn get(&self, index: usize) -> Result<TTo> {
        let item = self.source.get(index)?;
        Ok(self.mapping.forward(&item))
    }

    fn index_of(&self, item: &TTo) -> Option<usize> {
        if self.mapping.is_reversible() {
            let source_item = self.mapping.reverse(item).ok()?;
            self.source.index_of(&source_item)
        } else {
            containers::position_of(self.enumerate(), item)
        }
    }

    fn set(&mut self, index: usize, value: TTo) -> Result<()> {
        let source_item = self.mapping.reverse(&value)?;
        self.source.set(index, source_item)
    }

    fn insert(&mut self, index: usize, item: TTo) -> Result<()> {
        let source_item = self.mapping.reverse(&item)?;
        self.source.insert(index, source_item)
    }

    fn remove_at(&mut self, index: usize) -> Result<TTo> {
        let removed = self.source.remove_at(index)?;
        Ok(self.mapping.forward(&removed))
    }
}

impl<C, M, TFrom, TTo> fmt::Display for TransformingCollection<C, M, TFrom, TTo>
where
    C: Collection<TFrom>,
    M: Mapping<TFrom, TTo>,
    TTo: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .source
            .enumerate()
            .map(|item| self.mapping.forward(&item))
            .join(", ");
        write!(f, "TransformingCollection({})", rendered)
    }
}

impl<C: fmt::Debug, M, TFrom, TTo> fmt::Debug for TransformingCollection<C, M, TFrom, TTo> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformingCollection")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
