//! Error types for the persisted collection format.

use thiserror::Error;

use crate::errors::CollectionError;

/// Errors raised while writing a persisted collection.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("XML serialization error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Element serialization error: {0}")]
    Element(#[from] quick_xml::DeError),
    #[error("Serialization error: {0}")]
    Custom(String),
}

/// Errors raised while reading a persisted collection.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Element deserialization error: {0}")]
    Element(#[from] quick_xml::DeError),
    /// The `count` attribute is present but is not an integer.
    #[error("value of attribute '{attribute}' must be an integer, but encountered '{value}'")]
    Format {
        attribute: &'static str,
        value: String,
    },
    /// The target container rejected an element that was read.
    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),
    #[error("Document has no root element")]
    MissingRoot,
}
