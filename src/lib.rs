//! # container_adapters
//!
//! A framework of container adapters over three contracts,
//! [`Collection`], [`List`] and [`Map`]:
//!
//! - [`wrapper`]: pass-through delegation, the base for decorators
//! - [`transform`]: lazy element-mapping views with optional write-back
//! - [`composite`]: several containers presented as one
//! - [`seal`]: a one-way switch into an immutable state
//! - [`legacy`]: a type-erased bridge for callers without static element types
//! - [`containers`]: the contracts plus a few specialized containers
//! - [`xml`]: a small persisted format (feature `xml`)

pub mod composite;
pub mod containers;
pub mod errors;
pub mod legacy;
pub mod seal;
pub mod transform;
pub mod wrapper;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(test)]
mod test_utils;

pub use crate::composite::{CompositeCollection, CompositeEnumerator, CompositeList};
pub use crate::containers::{Collection, Enumerator, List, Map};
pub use crate::errors::{CollectionError, Result};
pub use crate::seal::{Sealable, SealableCollection, sealed};
pub use crate::transform::{TransformingCollection, TransformingMap, upcast};
pub use crate::wrapper::CollectionWrapper;
