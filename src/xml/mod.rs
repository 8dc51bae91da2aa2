//! # Persistence
//!
//! Containers can be written to and read back from a small XML format built
//! on quick-xml and serde. See [`persist`] for the document layout.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use container_adapters::xml::{XmlOptions, read_map_into, write_map};
//!
//! let mut scores = BTreeMap::new();
//! scores.insert("ada".to_string(), 3);
//!
//! let xml = write_map(Some(&scores), &XmlOptions::default()).unwrap();
//! let mut restored: BTreeMap<String, i32> = BTreeMap::new();
//! read_map_into(&xml, &mut restored).unwrap();
//! assert_eq!(restored, scores);
//! ```

pub mod errors;
pub mod persist;
pub mod quick;

pub use errors::{DeserializeError, SerializeError};
pub use persist::{
    Entry, read_collection_from, read_collection_into, read_count, read_map_from, read_map_into,
    write_collection, write_collection_to, write_map, write_map_to,
};

/// Options controlling how documents are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Name of the document element.
    pub root: String,
    /// Emit an `<?xml ...?>` declaration before the root.
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            root: "items".to_string(),
            declaration: false,
        }
    }
}

impl XmlOptions {
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = XmlOptions::default()
            .with_root("names")
            .with_declaration(true);
        assert_eq!(options.root, "names");
        assert!(options.declaration);
        assert_eq!(XmlOptions::default().root, "items");
    }
}
