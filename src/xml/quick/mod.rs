//! Quick-xml helper utilities for the persisted collection format.
//!
//! Thin wrappers over quick-xml's event API: attribute decoding on the read
//! side and element emission on the write side.

pub mod de;
pub mod ser;

pub use de::{Attrs, read_root};
pub use ser::{AttrList, XmlEmitter};
